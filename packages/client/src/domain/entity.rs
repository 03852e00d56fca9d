//! Core domain models for the lobby.

use super::{
    error::ValueObjectError,
    transport::SessionTransport,
    value_object::{Nickname, RoomName, SlotHandle, StageId},
};

/// Label shown above the room name in the lobby
pub const ROOM_INFO_LABEL: &str = "<b>Room Name</b>";

/// One entry of a room-list snapshot pushed by the session service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    /// Room name (unique key)
    pub name: RoomName,
    /// Number of participants currently in the room
    pub current_players: u32,
    /// Maximum number of participants (always > 0)
    pub max_players: u32,
}

impl RoomSummary {
    /// Create a new room summary
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::MaxPlayersZero` if `max_players` is zero
    pub fn new(
        name: RoomName,
        current_players: u32,
        max_players: u32,
    ) -> Result<Self, ValueObjectError> {
        if max_players == 0 {
            return Err(ValueObjectError::MaxPlayersZero(name.into_string()));
        }
        Ok(Self {
            name,
            current_players,
            max_players,
        })
    }

    /// Occupancy text shown on the room's slot, e.g. `2 / 4`
    pub fn display_text(&self) -> String {
        format!("{} / {}", self.current_players, self.max_players)
    }
}

/// Join command stored in a slot at bind time.
///
/// Holds the room name by value, so clicking a slot always joins the room
/// the slot was last bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub room_name: RoomName,
}

impl JoinRequest {
    pub fn new(room_name: RoomName) -> Self {
        Self { room_name }
    }

    /// Issue the join request; the outcome arrives as a later notification
    pub fn invoke(&self, transport: &dyn SessionTransport) {
        tracing::info!("Requesting to join room '{}'", self.room_name);
        transport.join_room(&self.room_name);
    }
}

/// A reusable room-list entry in the browser screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSlot {
    handle: SlotHandle,
    bound_room: Option<RoomName>,
    visible: bool,
    text: String,
    join: Option<JoinRequest>,
}

impl ViewSlot {
    /// Create a hidden, never-bound slot
    pub fn new(handle: SlotHandle) -> Self {
        Self {
            handle,
            bound_room: None,
            visible: false,
            text: String::new(),
            join: None,
        }
    }

    pub fn handle(&self) -> SlotHandle {
        self.handle
    }

    /// Room last displayed in this slot (kept while hidden)
    pub fn bound_room(&self) -> Option<&RoomName> {
        self.bound_room.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Join command currently wired to the slot's click handler
    pub fn join_request(&self) -> Option<&JoinRequest> {
        self.join.as_ref()
    }

    /// Hide the slot, keeping its last binding
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Show the slot for `room` and replace its join command
    pub fn bind(&mut self, room: &RoomSummary) {
        self.visible = true;
        self.text = room.display_text();
        self.bound_room = Some(room.name.clone());
        self.join = Some(JoinRequest::new(room.name.clone()));
    }
}

/// Participant entry derived from the current room at recompute time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSummary {
    pub nickname: Nickname,
}

impl MemberSummary {
    pub fn new(nickname: Nickname) -> Self {
        Self { nickname }
    }
}

/// Who holds the session authority, from the local participant's point of view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomAuthorityState {
    pub room_name: RoomName,
    pub is_local_authority: bool,
}

/// Result of one lobby recompute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyState {
    pub authority: RoomAuthorityState,
    pub members: Vec<MemberSummary>,
}

impl LobbyState {
    /// Start and stage-selection controls are enabled only for the authority
    pub fn controls_enabled(&self) -> bool {
        self.authority.is_local_authority
    }

    /// One nickname per line, in the session's enumeration order
    pub fn player_list_text(&self) -> String {
        self.members
            .iter()
            .map(|m| format!("{}\n", m.nickname))
            .collect()
    }

    /// Two-line room info label
    pub fn room_info_text(&self) -> String {
        format!("{}\n{}", ROOM_INFO_LABEL, self.authority.room_name)
    }
}

/// Message sent to every participant in the room, sender included.
///
/// A signal tells receivers what happened; each receiver derives the new
/// state from its own view of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LobbySignal {
    /// Recompute the lobby view from current session state
    RecomputeLobbyState,
    /// Leave the lobby and load the given stage
    ChangeStage(StageId),
}
