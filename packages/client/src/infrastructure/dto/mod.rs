//! Data transfer objects exchanged with the session service.

pub mod session;

pub use session::{RoomSummaryDto, RpcKind, SessionMessage};
