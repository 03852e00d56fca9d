//! Test fixtures shared by the lobby integration tests.

use std::sync::Arc;

use lobbykit_client::{
    LobbyController, UserAction, config::LobbyConfig, domain::Nickname, domain::ParticipantId,
    drain, infrastructure::transport::InMemorySessionHub, usecase::LobbyError,
};
use tokio::sync::mpsc::UnboundedReceiver;

/// One lobby client connected to an in-memory hub
pub struct TestClient {
    pub id: ParticipantId,
    pub controller: LobbyController,
    rx: UnboundedReceiver<String>,
}

impl TestClient {
    /// Connect, show the menu and process the initial notifications
    pub fn connect(hub: &InMemorySessionHub, nickname: &str) -> Self {
        let nickname = Nickname::new(nickname.to_string()).expect("Invalid nickname");
        let (transport, rx) = hub.connect(nickname);
        let id = transport.participant_id();

        let mut controller = LobbyController::new(Arc::new(transport), LobbyConfig::default());
        controller.start();

        let mut client = Self { id, controller, rx };
        client.pump();
        client
    }

    pub fn act(&mut self, action: UserAction) -> Result<(), LobbyError> {
        self.controller.handle_action(action)
    }

    /// Process every queued notification; returns how many were handled
    pub fn pump(&mut self) -> usize {
        drain(&mut self.controller, &mut self.rx)
    }

    /// Open the browser and join the room shown in the first slot
    pub fn join_first_listed(&mut self) {
        self.act(UserAction::FindRooms).expect("Failed to open browser");
        self.act(UserAction::JoinSlot(0)).expect("Failed to click slot");
    }
}

/// Deliver notifications until no client has anything left to process
pub fn settle(clients: &mut [&mut TestClient]) {
    loop {
        let processed: usize = clients.iter_mut().map(|client| client.pump()).sum();
        if processed == 0 {
            break;
        }
    }
}
