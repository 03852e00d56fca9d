//! Lobby client simulation.
//!
//! Connects a host and a guest to an in-memory session hub and walks them
//! through creating, browsing, joining and starting a game.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin lobbykit-client -- --room Alpha --stages Map1,Map2
//! ```

use clap::Parser;
use lobbykit_client::config::Args;
use lobbykit_shared::setup_logger;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the simulation
    if let Err(e) = lobbykit_client::run_demo(args).await {
        tracing::error!("Lobby client error: {}", e);
        std::process::exit(1);
    }
}
