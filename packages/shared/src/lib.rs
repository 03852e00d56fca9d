//! Shared utilities for lobbykit.

pub mod logger;

pub use logger::setup_logger;
