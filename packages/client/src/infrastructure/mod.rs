//! Infrastructure layer: wire DTOs and session transport implementations.

pub mod dto;
pub mod error;
pub mod transport;

pub use error::DecodeError;
