//! Logger setup shared by lobbykit binaries.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Build the default filter directive for a binary.
///
/// Binary names use `-` while tracing targets use the crate path with `_`,
/// so both the binary and the lobbykit crates are enabled at `default_level`.
pub fn default_directive(name: &str, default_level: &str) -> String {
    let target = name.replace('-', "_");
    let mut targets = vec![target.as_str()];
    for lib in ["lobbykit_client", "lobbykit_shared"] {
        if !targets.contains(&lib) {
            targets.push(lib);
        }
    }
    targets
        .iter()
        .map(|t| format!("{t}={default_level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing for the given binary.
///
/// `RUST_LOG` takes precedence over `default_level` when it is set.
pub fn setup_logger(name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(name, default_level)));

    // Ignore the error when a subscriber is already installed (e.g. in tests)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
