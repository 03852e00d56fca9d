//! Event loop: decode inbound session messages and feed them to the controller.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    config::{Args, LobbyConfig},
    domain::{Nickname, SessionNotification, SessionPhase},
    error::ClientError,
    infrastructure::{dto::SessionMessage, transport::InMemorySessionHub},
    ui::{LobbyController, UserAction},
};

/// Decode one raw session message and hand it to the controller
pub fn dispatch(controller: &mut LobbyController, raw: &str) -> Result<(), ClientError> {
    let message = SessionMessage::decode(raw)?;
    let notification = SessionNotification::try_from(message)?;
    controller.handle_notification(notification)?;
    Ok(())
}

/// Process every message already queued, in arrival order.
///
/// Returns the number of messages taken from the channel.
pub fn drain(controller: &mut LobbyController, rx: &mut UnboundedReceiver<String>) -> usize {
    let mut processed = 0;
    while let Ok(raw) = rx.try_recv() {
        if let Err(e) = dispatch(controller, &raw) {
            tracing::warn!("Failed to handle session message: {}", e);
        }
        processed += 1;
    }
    processed
}

/// Process messages until the controller enters a scene transition or the
/// channel closes, then hand the controller back
pub async fn run(
    mut controller: LobbyController,
    mut rx: UnboundedReceiver<String>,
) -> LobbyController {
    while let Some(raw) = rx.recv().await {
        if let Err(e) = dispatch(&mut controller, &raw) {
            tracing::warn!("Failed to handle session message: {}", e);
        }
        if controller.phase() == SessionPhase::SceneTransition {
            tracing::info!("Lobby finished: scene transition in progress");
            return controller;
        }
    }
    tracing::info!("Session channel closed");
    controller
}

/// Play a host and a guest through create, browse, join and start against
/// an in-memory session hub
pub async fn run_demo(args: Args) -> Result<(), ClientError> {
    let config = LobbyConfig::try_from(&args)?;
    let hub = InMemorySessionHub::new(args.max_players);

    let (host_transport, mut host_rx) = hub.connect(Nickname::new(args.nickname.clone())?);
    let (guest_transport, mut guest_rx) = hub.connect(Nickname::new(args.guest.clone())?);

    let mut host = LobbyController::new(Arc::new(host_transport), config.clone());
    let mut guest = LobbyController::new(Arc::new(guest_transport), config);
    host.start();
    guest.start();
    drain(&mut host, &mut host_rx);
    drain(&mut guest, &mut guest_rx);

    // Host creates the room
    host.handle_action(UserAction::OpenCreateRoom)?;
    host.handle_action(UserAction::CreateRoom(args.room.clone()))?;
    drain(&mut host, &mut host_rx);
    drain(&mut guest, &mut guest_rx);

    // Guest browses and joins the first listed room
    guest.handle_action(UserAction::FindRooms)?;
    for slot in guest.slots().iter().filter(|slot| slot.is_visible()) {
        tracing::info!(
            "Browser slot {}: '{}' {}",
            slot.handle().value(),
            slot.bound_room().map(|name| name.as_str()).unwrap_or_default(),
            slot.text()
        );
    }
    guest.handle_action(UserAction::JoinSlot(0))?;
    drain(&mut guest, &mut guest_rx);
    drain(&mut host, &mut host_rx);
    drain(&mut guest, &mut guest_rx);

    for (role, controller) in [("host", &host), ("guest", &guest)] {
        let view = controller.view();
        tracing::info!(
            "{} lobby: players={:?} start_enabled={}",
            role,
            view.player_list_text,
            view.start_enabled
        );
    }

    // Host starts the game; both clients run until they load the stage
    host.handle_action(UserAction::StartGame)?;
    let (host, guest) = tokio::join!(run(host, host_rx), run(guest, guest_rx));

    for (role, controller) in [("host", &host), ("guest", &guest)] {
        tracing::info!(
            "{} is loading stage {:?}",
            role,
            controller.loading_stage().map(|stage| stage.as_str())
        );
    }

    Ok(())
}
