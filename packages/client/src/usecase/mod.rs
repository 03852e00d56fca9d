//! UseCase 層
//!
//! ロビーのロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod broadcast_lobby_state;
pub mod error;
pub mod reconcile_room_list;
pub mod select_stage;

pub use broadcast_lobby_state::LobbyStateBroadcaster;
pub use error::LobbyError;
pub use reconcile_room_list::RoomListReconciler;
pub use select_stage::SelectStageUseCase;
