//! Session transport abstraction.
//!
//! The lobby talks to the session service only through this trait. Requests
//! are fire-and-forget: their outcome arrives later as an inbound
//! notification, never as a return value.

#[cfg(test)]
use mockall::automock;

use super::{
    entity::{LobbySignal, MemberSummary},
    value_object::{Nickname, RoomName},
};

/// Handle to the connected session (exactly one per client)
#[cfg_attr(test, automock)]
pub trait SessionTransport: Send + Sync {
    /// Request a new room; the creator joins it on success
    fn create_room(&self, name: &RoomName);

    /// Request to join an existing room
    fn join_room(&self, name: &RoomName);

    /// Request to leave the current room
    fn leave_room(&self);

    /// Open or close the current room and show or hide it in room lists
    fn set_room_discoverable(&self, discoverable: bool);

    /// Deliver a signal to every participant of the current room, sender included
    fn send_to_all(&self, signal: LobbySignal);

    /// Set the local participant's nickname
    fn set_nickname(&self, nickname: &Nickname);

    /// Participants of the current room in the session's enumeration order
    fn participants(&self) -> Vec<MemberSummary>;

    /// Whether the local participant is the room's designated authority
    fn is_local_authority(&self) -> bool;

    /// Display name of the current room, if any
    fn current_room_name(&self) -> Option<RoomName>;
}
