//! Infrastructure layer error definitions.

use thiserror::Error;

use crate::domain::ValueObjectError;

/// Errors raised while decoding a session message
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The message is not valid JSON or does not match any message type
    #[error("Malformed session message: {0}")]
    Json(#[from] serde_json::Error),

    /// A field failed domain validation
    #[error("Invalid session message payload: {0}")]
    InvalidPayload(#[from] ValueObjectError),

    /// An RPC arrived without a required argument
    #[error("RPC '{kind}' is missing argument #{index}")]
    MissingRpcArgument { kind: &'static str, index: usize },
}
