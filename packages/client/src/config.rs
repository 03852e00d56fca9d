//! Command-line arguments and lobby configuration.

use clap::Parser;

use crate::domain::{StageId, ValueObjectError};

/// Stages offered when none are configured
pub const DEFAULT_STAGES: [&str; 2] = ["Map1", "Map2"];

/// Default maximum number of players per room
pub const DEFAULT_MAX_PLAYERS: u32 = 4;

/// Lobby client simulation
#[derive(Debug, Clone, Parser)]
#[command(name = "lobbykit-client", version, about)]
pub struct Args {
    /// Nickname of the hosting participant
    #[arg(long, default_value = "host")]
    pub nickname: String,

    /// Nickname of the joining participant
    #[arg(long, default_value = "guest")]
    pub guest: String,

    /// Name of the room to create
    #[arg(long, default_value = "Alpha")]
    pub room: String,

    /// Maximum number of players per room
    #[arg(long, default_value_t = DEFAULT_MAX_PLAYERS)]
    pub max_players: u32,

    /// Selectable stages, comma separated (the first one is used by "start")
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_STAGES.map(String::from))]
    pub stages: Vec<String>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    pub log_level: String,
}

/// Lobby controller configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyConfig {
    /// Selectable stages; the first one is the start control's target
    pub stages: Vec<StageId>,
}

impl Default for LobbyConfig {
    fn default() -> Self {
        Self {
            stages: DEFAULT_STAGES
                .iter()
                .filter_map(|id| StageId::new(id.to_string()).ok())
                .collect(),
        }
    }
}

impl TryFrom<&Args> for LobbyConfig {
    type Error = ValueObjectError;

    fn try_from(args: &Args) -> Result<Self, Self::Error> {
        let stages = args
            .stages
            .iter()
            .map(|id| StageId::new(id.trim().to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stages })
    }
}
