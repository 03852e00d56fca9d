//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::ValueObjectError;

/// Errors returned by lobby operations.
///
/// None of them is fatal: the controller logs them and keeps rendering from
/// the current session state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LobbyError {
    /// User input failed value object validation
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValueObjectError),

    /// No slot exists at the clicked index
    #[error("No room slot at index {0}")]
    SlotNotFound(usize),

    /// The clicked slot is not currently shown
    #[error("Room slot {0} is hidden")]
    SlotHidden(usize),

    /// Only the room authority may change the stage
    #[error("Only the room authority can start the game or select a stage")]
    NotAuthority,

    /// Stage is not in the configured stage list
    #[error("Unknown stage: {0}")]
    UnknownStage(String),

    /// The operation needs a current room
    #[error("Not in a room")]
    NotInRoom,

    /// Stage controls are only usable from the lobby or stage-select screen
    #[error("The lobby is not shown")]
    LobbyNotShown,

    /// The operation needs the client to be outside any room
    #[error("Already in a room")]
    AlreadyInRoom,

    /// The operation needs a connection to the session service
    #[error("Not connected to the session service")]
    NotConnected,
}
