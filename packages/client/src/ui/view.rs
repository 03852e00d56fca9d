//! Render model consumed by the rendering layer.

use crate::domain::{LobbyState, Screen};

/// Everything the renderer needs besides the room browser slots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LobbyView {
    /// Active screen
    pub screen: Screen,
    /// Main screen "create room" button
    pub create_room_enabled: bool,
    /// Main screen "find room" button
    pub find_room_enabled: bool,
    /// Lobby participant list, one nickname per line
    pub player_list_text: String,
    /// Lobby room info label
    pub room_info_text: String,
    /// Lobby "start game" button (authority only)
    pub start_enabled: bool,
    /// Stage-select buttons (authority only)
    pub stage_select_enabled: bool,
    /// Last error or status message, if any
    pub status: Option<String>,
}

impl LobbyView {
    /// Write a recompute result into the lobby fields
    pub fn apply(&mut self, state: &LobbyState) {
        self.player_list_text = state.player_list_text();
        self.room_info_text = state.room_info_text();
        self.start_enabled = state.controls_enabled();
        self.stage_select_enabled = state.controls_enabled();
    }

    /// Clear the lobby fields after leaving a room
    pub fn clear_lobby(&mut self) {
        self.player_list_text.clear();
        self.room_info_text.clear();
        self.start_enabled = false;
        self.stage_select_enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MemberSummary, Nickname, RoomAuthorityState, RoomName};

    #[test]
    fn test_apply_and_clear_lobby() {
        // テスト項目: 再計算結果を反映し、退出時にクリアできる
        // given (前提条件):
        let state = LobbyState {
            authority: RoomAuthorityState {
                room_name: RoomName::new("Alpha".to_string()).unwrap(),
                is_local_authority: true,
            },
            members: vec![MemberSummary::new(Nickname::new("alice".to_string()).unwrap())],
        };
        let mut view = LobbyView::default();

        // when (操作):
        view.apply(&state);

        // then (期待する結果):
        assert_eq!(view.player_list_text, "alice\n");
        assert_eq!(view.room_info_text, "<b>Room Name</b>\nAlpha");
        assert!(view.start_enabled);
        assert!(view.stage_select_enabled);

        // when (操作):
        view.clear_lobby();

        // then (期待する結果):
        assert_eq!(view, LobbyView::default());
    }
}
