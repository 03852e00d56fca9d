//! Client-side lobby controller.
//!
//! This library keeps a locally rendered lobby in sync with a remotely owned
//! session: it reconciles pushed room lists against a pool of reusable view
//! slots and recomputes lobby membership state on every participant through
//! a broadcast-and-recompute protocol.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod runner;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use error::ClientError;
pub use runner::{dispatch, drain, run, run_demo};
pub use ui::{LobbyController, LobbyView, UserAction};
