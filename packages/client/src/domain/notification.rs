//! Inbound notifications from the session service.

use super::{
    entity::{LobbySignal, RoomSummary},
    value_object::ParticipantId,
};

/// Event delivered to the lobby controller, processed one at a time in
/// arrival order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotification {
    /// Connected to the session service and ready for room requests
    Connected,
    /// Connection to the session service was lost
    Disconnected,
    /// Fresh room-list snapshot; replaces the previous one wholesale
    RoomListUpdated(Vec<RoomSummary>),
    /// The local participant entered a room (created or joined)
    JoinedRoom,
    /// A join request was rejected
    JoinRoomFailed { room_name: String, reason: String },
    /// A create request was rejected
    CreateRoomFailed { room_name: String, reason: String },
    /// Another participant left the current room
    ParticipantLeft(ParticipantId),
    /// A signal sent to all participants of the room
    Signal(LobbySignal),
}
