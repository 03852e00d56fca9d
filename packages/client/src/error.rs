//! Crate-level error type.

use thiserror::Error;

use crate::{domain::ValueObjectError, infrastructure::DecodeError, usecase::LobbyError};

/// Errors surfaced by the runner and the demo binary
#[derive(Debug, Error)]
pub enum ClientError {
    /// Inbound session message could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Lobby operation failed
    #[error(transparent)]
    Lobby(#[from] LobbyError),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(#[from] ValueObjectError),
}
