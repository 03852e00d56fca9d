//! Domain layer for the lobby controller.
//!
//! This module contains the lobby's data model and the session transport
//! abstraction, independent of wire formats and rendering.

pub mod entity;
pub mod error;
pub mod notification;
pub mod screen;
pub mod transport;
pub mod value_object;

pub use entity::{
    JoinRequest, LobbySignal, LobbyState, MemberSummary, ROOM_INFO_LABEL, RoomAuthorityState,
    RoomSummary, ViewSlot,
};
pub use error::ValueObjectError;
pub use notification::SessionNotification;
pub use screen::{Screen, SessionPhase};
pub use transport::SessionTransport;
#[cfg(test)]
pub use transport::MockSessionTransport;
pub use value_object::{Nickname, ParticipantId, RoomName, SlotHandle, StageId};
