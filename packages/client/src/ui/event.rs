//! User actions on the menu screens.

use crate::domain::StageId;

/// Input from the rendering layer (button presses, text fields)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    /// Nickname input changed
    ChangeNickname(String),
    /// "Create room" on the main screen
    OpenCreateRoom,
    /// "Find room" on the main screen
    FindRooms,
    /// "Back" on any sub screen
    Back,
    /// "Create" on the create-room screen, with the entered name
    CreateRoom(String),
    /// Click on the room browser slot at the given index
    JoinSlot(usize),
    /// "Refresh" on the room browser
    Refresh,
    /// "Select map" in the lobby
    OpenStageSelect,
    /// "Start game" in the lobby (first configured stage)
    StartGame,
    /// A stage button on the stage-select screen
    SelectStage(StageId),
    /// "Leave" in the lobby
    LeaveRoom,
}
