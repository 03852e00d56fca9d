//! Lobby controller: screen navigation and event handling.
//!
//! Inbound session notifications and user actions are handled here, one at
//! a time and to completion. The controller drives the room list reconciler
//! and the lobby state broadcaster and keeps the render model up to date.

use std::sync::Arc;

use crate::{
    config::LobbyConfig,
    domain::{
        LobbySignal, Nickname, RoomAuthorityState, RoomName, RoomSummary, Screen,
        SessionNotification, SessionPhase, SessionTransport, StageId, ViewSlot,
    },
    usecase::{LobbyError, LobbyStateBroadcaster, RoomListReconciler, SelectStageUseCase},
};

use super::{event::UserAction, view::LobbyView};

/// Client-side lobby controller
pub struct LobbyController {
    transport: Arc<dyn SessionTransport>,
    reconciler: RoomListReconciler,
    broadcaster: LobbyStateBroadcaster,
    select_stage: SelectStageUseCase,
    view: LobbyView,
    phase: SessionPhase,
    /// Latest snapshot; rendered only when the browser is shown or refreshed
    room_list: Vec<RoomSummary>,
    /// Authority state of the current room, reset on leave
    authority: Option<RoomAuthorityState>,
    /// Stage being loaded after a scene transition
    loading_stage: Option<StageId>,
}

impl LobbyController {
    pub fn new(transport: Arc<dyn SessionTransport>, config: LobbyConfig) -> Self {
        Self {
            broadcaster: LobbyStateBroadcaster::new(Arc::clone(&transport)),
            select_stage: SelectStageUseCase::new(Arc::clone(&transport), config.stages),
            transport,
            reconciler: RoomListReconciler::new(),
            view: LobbyView::default(),
            phase: SessionPhase::Disconnected,
            room_list: Vec::new(),
            authority: None,
            loading_stage: None,
        }
    }

    /// Prepare the menu.
    ///
    /// Room controls stay disabled until the session reports `Connected`.
    /// When the client is still in a room (back from a game), the room is
    /// reopened and the lobby is shown again.
    pub fn start(&mut self) {
        self.view.create_room_enabled = false;
        self.view.find_room_enabled = false;

        if self.transport.current_room_name().is_none() {
            self.set_screen(Screen::Main);
            return;
        }

        tracing::info!("Returning to the lobby of the current room");
        if self.transport.is_local_authority() {
            self.transport.set_room_discoverable(true);
        }
        self.phase = SessionPhase::InRoom;
        self.loading_stage = None;
        self.set_screen(Screen::Lobby);
        if let Err(e) = self.recompute_lobby() {
            tracing::warn!("Failed to render the lobby: {}", e);
        }
    }

    /// Handle one inbound notification from the session service
    pub fn handle_notification(
        &mut self,
        notification: SessionNotification,
    ) -> Result<(), LobbyError> {
        match notification {
            SessionNotification::Connected => {
                tracing::info!("Connected to the session service");
                if !self.phase.is_connected() {
                    self.phase = SessionPhase::Connected;
                }
                self.view.create_room_enabled = true;
                self.view.find_room_enabled = true;
            }
            SessionNotification::Disconnected => {
                tracing::warn!("Disconnected from the session service");
                self.phase = SessionPhase::Disconnected;
                self.view.create_room_enabled = false;
                self.view.find_room_enabled = false;
                self.room_list.clear();
                self.authority = None;
                self.view.clear_lobby();
                self.set_screen(Screen::Main);
            }
            SessionNotification::RoomListUpdated(rooms) => {
                tracing::debug!("Stored room list snapshot with {} rooms", rooms.len());
                self.room_list = rooms;
            }
            SessionNotification::JoinedRoom => {
                tracing::info!("Joined a room");
                self.phase = SessionPhase::InRoom;
                self.view.status = None;
                self.set_screen(Screen::Lobby);
                self.broadcaster.broadcast();
            }
            SessionNotification::JoinRoomFailed { room_name, reason } => {
                tracing::warn!("Failed to join room '{}': {}", room_name, reason);
                self.view.status = Some(format!("Could not join '{room_name}': {reason}"));
                if self.transport.current_room_name().is_some() {
                    // Still a member of the previous room
                    self.phase = SessionPhase::InRoom;
                    self.set_screen(Screen::Lobby);
                    self.recompute_lobby()?;
                } else {
                    self.leave_room_state();
                    self.set_screen(Screen::Browser);
                }
            }
            SessionNotification::CreateRoomFailed { room_name, reason } => {
                tracing::warn!("Failed to create room '{}': {}", room_name, reason);
                self.view.status = Some(format!("Could not create '{room_name}': {reason}"));
                self.set_screen(Screen::CreateRoom);
            }
            SessionNotification::ParticipantLeft(id) => {
                if self.phase.in_room() {
                    tracing::info!("Participant {} left the room", id);
                    self.broadcaster.broadcast();
                } else {
                    tracing::debug!("Ignoring departure of {} outside the lobby", id);
                }
            }
            SessionNotification::Signal(LobbySignal::RecomputeLobbyState) => {
                match self.recompute_lobby() {
                    Ok(()) => {}
                    // A recompute requested before we left is harmless
                    Err(LobbyError::NotInRoom) => {
                        tracing::debug!("Ignoring lobby recompute outside a room");
                    }
                    Err(e) => return Err(e),
                }
            }
            SessionNotification::Signal(LobbySignal::ChangeStage(stage)) => {
                tracing::info!("Loading stage '{}'", stage);
                self.phase = SessionPhase::SceneTransition;
                self.loading_stage = Some(stage);
                self.set_screen(Screen::SceneTransition);
            }
        }
        Ok(())
    }

    /// Handle one user action; failures are also shown as status text
    pub fn handle_action(&mut self, action: UserAction) -> Result<(), LobbyError> {
        let result = self.apply_action(action);
        if let Err(e) = &result {
            tracing::warn!("Rejected user action: {}", e);
            self.view.status = Some(e.to_string());
        }
        result
    }

    fn apply_action(&mut self, action: UserAction) -> Result<(), LobbyError> {
        self.view.status = None;
        match action {
            UserAction::ChangeNickname(nickname) => {
                let nickname = Nickname::new(nickname)?;
                self.transport.set_nickname(&nickname);
            }
            UserAction::OpenCreateRoom => {
                self.ensure_connected()?;
                self.set_screen(Screen::CreateRoom);
            }
            UserAction::FindRooms => {
                self.ensure_connected()?;
                self.set_screen(Screen::Browser);
            }
            UserAction::Back => {
                if self.phase == SessionPhase::StageSelect {
                    self.phase = SessionPhase::InRoom;
                    self.set_screen(Screen::Lobby);
                } else {
                    self.set_screen(Screen::Main);
                }
            }
            UserAction::CreateRoom(name) => {
                self.ensure_connected()?;
                self.ensure_outside_room()?;
                let name = RoomName::new(name)?;
                tracing::info!("Requesting to create room '{}'", name);
                self.transport.create_room(&name);
            }
            UserAction::JoinSlot(index) => {
                self.ensure_connected()?;
                self.ensure_outside_room()?;
                let request = self.reconciler.click(index)?;
                request.invoke(self.transport.as_ref());
            }
            UserAction::Refresh => {
                self.render_room_list();
            }
            UserAction::OpenStageSelect => {
                self.ensure_in_room()?;
                self.phase = SessionPhase::StageSelect;
                self.set_screen(Screen::StageSelect);
            }
            UserAction::StartGame => {
                self.ensure_lobby_shown()?;
                let stage = self
                    .select_stage
                    .default_stage()
                    .cloned()
                    .ok_or_else(|| LobbyError::UnknownStage(String::new()))?;
                self.select_stage.execute(&stage)?;
            }
            UserAction::SelectStage(stage) => {
                self.ensure_lobby_shown()?;
                self.select_stage.execute(&stage)?;
            }
            UserAction::LeaveRoom => {
                if self.transport.current_room_name().is_none() {
                    return Err(LobbyError::NotInRoom);
                }
                if self.transport.is_local_authority() {
                    self.transport.set_room_discoverable(false);
                }
                tracing::info!("Leaving the room");
                self.transport.leave_room();
                self.leave_room_state();
                self.set_screen(Screen::Main);
            }
        }
        Ok(())
    }

    /// Activate `screen`; showing the browser renders the stored snapshot
    fn set_screen(&mut self, screen: Screen) {
        if self.view.screen != screen {
            tracing::info!("Screen: {} -> {}", self.view.screen, screen);
        }
        self.view.screen = screen;

        if screen == Screen::Browser {
            self.render_room_list();
        }
    }

    fn render_room_list(&mut self) {
        let visible = self.reconciler.reconcile(&self.room_list);
        if visible == 0 {
            tracing::debug!("No rooms to show");
        }
    }

    fn recompute_lobby(&mut self) -> Result<(), LobbyError> {
        let state = self.broadcaster.recompute()?;
        self.view.apply(&state);
        self.authority = Some(state.authority);
        Ok(())
    }

    fn leave_room_state(&mut self) {
        if self.phase.is_connected() {
            self.phase = SessionPhase::Connected;
        }
        self.authority = None;
        self.loading_stage = None;
        self.view.clear_lobby();
    }

    fn ensure_connected(&self) -> Result<(), LobbyError> {
        if self.phase.is_connected() {
            Ok(())
        } else {
            Err(LobbyError::NotConnected)
        }
    }

    fn ensure_in_room(&self) -> Result<(), LobbyError> {
        if self.phase.in_room() {
            Ok(())
        } else {
            Err(LobbyError::NotInRoom)
        }
    }

    fn ensure_lobby_shown(&self) -> Result<(), LobbyError> {
        self.ensure_in_room()?;
        match self.view.screen {
            Screen::Lobby | Screen::StageSelect => Ok(()),
            _ => Err(LobbyError::LobbyNotShown),
        }
    }

    /// The session serves one room per client
    fn ensure_outside_room(&self) -> Result<(), LobbyError> {
        if self.phase.in_room() {
            Err(LobbyError::AlreadyInRoom)
        } else {
            Ok(())
        }
    }

    pub fn view(&self) -> &LobbyView {
        &self.view
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn screen(&self) -> Screen {
        self.view.screen
    }

    /// Room browser slots, including hidden ones
    pub fn slots(&self) -> &[ViewSlot] {
        self.reconciler.slots()
    }

    pub fn room_list(&self) -> &[RoomSummary] {
        &self.room_list
    }

    pub fn authority(&self) -> Option<&RoomAuthorityState> {
        self.authority.as_ref()
    }

    pub fn loading_stage(&self) -> Option<&StageId> {
        self.loading_stage.as_ref()
    }
}
