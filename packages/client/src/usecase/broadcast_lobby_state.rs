//! UseCase: ロビー状態の再計算要求と再計算
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LobbyStateBroadcaster::broadcast() メソッド
//! - LobbyStateBroadcaster::recompute() メソッド
//!
//! ### なぜこのテストが必要か
//! - broadcast() は状態そのものではなく「再計算せよ」という合図だけを全員に送ることを保証
//! - recompute() がセッションの現在の状態だけから導出されることを確認
//! - ホストかどうかで操作ボタンの有効/無効が切り替わることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ホスト・非ホストそれぞれでの再計算
//! - エッジケース：ホストの移譲（再計算で自然に反映される）
//! - 異常系：ルームに入っていない状態での再計算

use std::sync::Arc;

use crate::domain::{LobbySignal, LobbyState, RoomAuthorityState, SessionTransport};

use super::error::LobbyError;

/// Broadcast-and-recompute of the lobby view.
///
/// The broadcaster never pushes a computed state to other participants.
/// It only asks every participant (itself included) to recompute from its
/// own session view.
pub struct LobbyStateBroadcaster {
    /// セッションへのハンドル
    transport: Arc<dyn SessionTransport>,
}

impl LobbyStateBroadcaster {
    /// 新しい LobbyStateBroadcaster を作成
    pub fn new(transport: Arc<dyn SessionTransport>) -> Self {
        Self { transport }
    }

    /// ルーム内の全参加者（自分を含む）に再計算を要求
    pub fn broadcast(&self) {
        tracing::info!("Broadcasting lobby recompute request to all participants");
        self.transport.send_to_all(LobbySignal::RecomputeLobbyState);
    }

    /// 現在のセッション状態からロビー状態を導出
    ///
    /// # Returns
    ///
    /// * `Ok(LobbyState)` - 再計算結果
    /// * `Err(LobbyError::NotInRoom)` - ルームに入っていない
    pub fn recompute(&self) -> Result<LobbyState, LobbyError> {
        let room_name = self
            .transport
            .current_room_name()
            .ok_or(LobbyError::NotInRoom)?;
        let is_local_authority = self.transport.is_local_authority();
        let members = self.transport.participants();

        tracing::debug!(
            "Recomputed lobby state for '{}': {} participants, authority={}",
            room_name,
            members.len(),
            is_local_authority
        );

        Ok(LobbyState {
            authority: RoomAuthorityState {
                room_name,
                is_local_authority,
            },
            members,
        })
    }
}
