//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// RoomName validation error
    #[error("RoomName cannot be empty")]
    RoomNameEmpty,

    /// RoomName too long error
    #[error("RoomName cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// Nickname validation error
    #[error("Nickname cannot be empty")]
    NicknameEmpty,

    /// Nickname too long error
    #[error("Nickname cannot exceed {max} characters (got {actual})")]
    NicknameTooLong { max: usize, actual: usize },

    /// StageId validation error
    #[error("StageId cannot be empty")]
    StageIdEmpty,

    /// StageId too long error
    #[error("StageId cannot exceed {max} characters (got {actual})")]
    StageIdTooLong { max: usize, actual: usize },

    /// RoomSummary with a zero player limit
    #[error("Room '{0}' must allow at least one player")]
    MaxPlayersZero(String),
}
