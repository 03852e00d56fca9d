//! UseCase: ステージ選択とシーン遷移の指示
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SelectStageUseCase::execute() メソッド
//! - SelectStageUseCase::default_stage() メソッド
//!
//! ### なぜこのテストが必要か
//! - ホストだけがステージを選択できることを保証
//! - 遷移前にルームを締め切り、一覧から隠すことを確認
//! - 設定にないステージへの遷移を防ぐ
//!
//! ### どのような状況を想定しているか
//! - 正常系：ホストによるステージ選択
//! - 異常系：非ホストの選択、未知のステージ、ルーム外での選択

use std::sync::Arc;

use crate::domain::{LobbySignal, SessionTransport, StageId};

use super::error::LobbyError;

/// ステージ選択のユースケース
pub struct SelectStageUseCase {
    /// セッションへのハンドル
    transport: Arc<dyn SessionTransport>,
    /// 選択可能なステージ（先頭がスタートボタンの遷移先）
    stages: Vec<StageId>,
}

impl SelectStageUseCase {
    /// 新しい SelectStageUseCase を作成
    pub fn new(transport: Arc<dyn SessionTransport>, stages: Vec<StageId>) -> Self {
        Self { transport, stages }
    }

    /// ステージ選択を実行
    ///
    /// # Arguments
    ///
    /// * `stage` - 遷移先のステージ
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 全参加者への遷移指示を送信した
    /// * `Err(LobbyError)` - ルーム外、非ホスト、または未知のステージ
    pub fn execute(&self, stage: &StageId) -> Result<(), LobbyError> {
        if self.transport.current_room_name().is_none() {
            return Err(LobbyError::NotInRoom);
        }
        if !self.transport.is_local_authority() {
            return Err(LobbyError::NotAuthority);
        }
        if !self.stages.contains(stage) {
            return Err(LobbyError::UnknownStage(stage.as_str().to_string()));
        }

        // 1. ルームを締め切り、一覧から隠す
        self.transport.set_room_discoverable(false);

        // 2. 全参加者（自分を含む）にステージの読み込みを指示
        tracing::info!("Instructing all participants to load stage '{}'", stage);
        self.transport
            .send_to_all(LobbySignal::ChangeStage(stage.clone()));

        Ok(())
    }

    /// スタートボタンで遷移するステージ
    pub fn default_stage(&self) -> Option<&StageId> {
        self.stages.first()
    }

    pub fn stages(&self) -> &[StageId] {
        &self.stages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockSessionTransport, RoomName};
    use mockall::Sequence;

    fn stage(id: &str) -> StageId {
        StageId::new(id.to_string()).unwrap()
    }

    fn stages() -> Vec<StageId> {
        vec![stage("Map1"), stage("Map2")]
    }

    fn transport_in_room(is_authority: bool) -> MockSessionTransport {
        let mut transport = MockSessionTransport::new();
        transport
            .expect_current_room_name()
            .returning(|| Some(RoomName::new("Alpha".to_string()).unwrap()));
        transport
            .expect_is_local_authority()
            .return_const(is_authority);
        transport
    }

    #[test]
    fn test_select_stage_as_authority() {
        // テスト項目: ホストはルームを隠してから遷移を指示する
        // given (前提条件):
        let mut transport = transport_in_room(true);
        let mut seq = Sequence::new();
        transport
            .expect_set_room_discoverable()
            .withf(|discoverable| !*discoverable)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        transport
            .expect_send_to_all()
            .withf(|signal| *signal == LobbySignal::ChangeStage(stage("Map2")))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        let usecase = SelectStageUseCase::new(Arc::new(transport), stages());

        // when (操作):
        let result = usecase.execute(&stage("Map2"));

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_select_stage_as_guest_fails() {
        // テスト項目: 非ホストはステージを選択できず、何も送信しない
        // given (前提条件):
        let transport = transport_in_room(false);
        let usecase = SelectStageUseCase::new(Arc::new(transport), stages());

        // when (操作):
        let result = usecase.execute(&stage("Map1"));

        // then (期待する結果):
        assert_eq!(result, Err(LobbyError::NotAuthority));
    }

    #[test]
    fn test_select_unknown_stage_fails() {
        // テスト項目: 設定にないステージは選択できない
        // given (前提条件):
        let transport = transport_in_room(true);
        let usecase = SelectStageUseCase::new(Arc::new(transport), stages());

        // when (操作):
        let result = usecase.execute(&stage("Map9"));

        // then (期待する結果):
        assert_eq!(result, Err(LobbyError::UnknownStage("Map9".to_string())));
    }

    #[test]
    fn test_select_stage_not_in_room_fails() {
        // テスト項目: ルーム外ではステージを選択できない
        // given (前提条件):
        let mut transport = MockSessionTransport::new();
        transport.expect_current_room_name().returning(|| None);
        let usecase = SelectStageUseCase::new(Arc::new(transport), stages());

        // when (操作):
        let result = usecase.execute(&stage("Map1"));

        // then (期待する結果):
        assert_eq!(result, Err(LobbyError::NotInRoom));
    }

    #[test]
    fn test_default_stage_is_first_configured() {
        // テスト項目: スタートボタンの遷移先は先頭のステージ
        let usecase = SelectStageUseCase::new(Arc::new(MockSessionTransport::new()), stages());

        assert_eq!(usecase.default_stage(), Some(&stage("Map1")));
        assert_eq!(usecase.stages().len(), 2);
    }
}
