//! UseCase: ルーム一覧の再描画（スロットプールとの突き合わせ）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RoomListReconciler::reconcile() メソッド
//! - RoomListReconciler::click() メソッド
//!
//! ### なぜこのテストが必要か
//! - スロットは使い回されるため、古いルームへの参加要求が残らないことを保証
//! - プールは縮まない（最大スナップショットサイズまで単調増加）ことを保証
//! - 同じスナップショットで何度再描画しても結果が変わらないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム一覧の表示、クリックでの参加要求
//! - エッジケース：一覧の縮小、空の一覧、同じ位置への別ルームの再バインド
//! - 異常系：存在しない・非表示のスロットのクリック

use crate::domain::{JoinRequest, RoomSummary, SlotHandle, ViewSlot};

use super::error::LobbyError;

/// Room browser slot pool.
///
/// Slot `i` shows snapshot entry `i` of the latest reconcile. Slots are
/// allocated on demand and never removed; surplus slots are only hidden.
#[derive(Debug, Default)]
pub struct RoomListReconciler {
    slots: Vec<ViewSlot>,
}

impl RoomListReconciler {
    /// 空のスロットプールを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// スナップショットをスロットプールに反映
    ///
    /// # Arguments
    ///
    /// * `rooms` - ルーム一覧のスナップショット（順序の保証なし）
    ///
    /// # Returns
    ///
    /// 表示中のスロット数
    pub fn reconcile(&mut self, rooms: &[RoomSummary]) -> usize {
        // 1. 全スロットを非表示にする（一覧が縮んだ場合に古いルームが残らないように）
        for slot in &mut self.slots {
            slot.hide();
        }

        // 2. 位置 i のスロットを再利用（なければ追加）し、rooms[i] をバインド
        for (index, room) in rooms.iter().enumerate() {
            self.slot_at(index).bind(room);
        }

        tracing::debug!(
            "Reconciled {} rooms into a pool of {} slots",
            rooms.len(),
            self.slots.len()
        );

        rooms.len()
    }

    /// スロットのクリックに対応する参加要求を取得
    ///
    /// # Errors
    ///
    /// * `LobbyError::SlotNotFound` - index にスロットが存在しない
    /// * `LobbyError::SlotHidden` - スロットが非表示
    pub fn click(&self, index: usize) -> Result<JoinRequest, LobbyError> {
        let slot = self
            .slots
            .get(index)
            .ok_or(LobbyError::SlotNotFound(index))?;

        if !slot.is_visible() {
            return Err(LobbyError::SlotHidden(index));
        }

        slot.join_request()
            .cloned()
            .ok_or(LobbyError::SlotHidden(index))
    }

    /// All slots ever allocated, in pool order
    pub fn slots(&self) -> &[ViewSlot] {
        &self.slots
    }

    pub fn pool_size(&self) -> usize {
        self.slots.len()
    }

    pub fn visible_slots(&self) -> impl Iterator<Item = &ViewSlot> {
        self.slots.iter().filter(|slot| slot.is_visible())
    }

    fn slot_at(&mut self, index: usize) -> &mut ViewSlot {
        if index >= self.slots.len() {
            tracing::debug!("Allocating room slot {}", index);
            self.slots.push(ViewSlot::new(SlotHandle::new(index)));
        }
        &mut self.slots[index]
    }
}
