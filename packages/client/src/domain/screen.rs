//! Screens and the per-client session phase.

use std::fmt;

/// Menu screen currently shown. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Main,
    CreateRoom,
    Lobby,
    Browser,
    StageSelect,
    SceneTransition,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Main => "main",
            Screen::CreateRoom => "create-room",
            Screen::Lobby => "lobby",
            Screen::Browser => "browser",
            Screen::StageSelect => "stage-select",
            Screen::SceneTransition => "scene-transition",
        };
        f.write_str(name)
    }
}

/// Session phase of the local client
///
/// ```text
/// Disconnected -> Connected -> InRoom -> [StageSelect] -> SceneTransition
///                     ^           |            |
///                     +-----------+------------+  (leave room)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Disconnected,
    Connected,
    InRoom,
    StageSelect,
    SceneTransition,
}

impl SessionPhase {
    /// Whether the client currently occupies a room
    pub fn in_room(&self) -> bool {
        matches!(self, SessionPhase::InRoom | SessionPhase::StageSelect)
    }

    /// Whether room requests (create, join, browse) are possible
    pub fn is_connected(&self) -> bool {
        !matches!(self, SessionPhase::Disconnected)
    }
}
