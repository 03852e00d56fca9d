//! Lobby integration tests.
//!
//! Several controllers share one in-memory session hub and exchange real
//! session messages: room browsing, joining, leaving and starting a game.

mod fixtures;
use fixtures::{TestClient, settle};

use lobbykit_client::{
    UserAction,
    domain::{ROOM_INFO_LABEL, Screen, SessionPhase, StageId},
    infrastructure::transport::InMemorySessionHub,
    usecase::LobbyError,
};

fn hub() -> InMemorySessionHub {
    InMemorySessionHub::new(4)
}

#[test]
fn test_host_and_guest_see_same_lobby() {
    // テスト項目: 参加後、全員が同じ参加者一覧を表示し、ホストだけが操作できる
    // given (前提条件):
    let hub = hub();
    let mut host = TestClient::connect(&hub, "host");
    let mut guest = TestClient::connect(&hub, "guest");

    // when (操作):
    host.act(UserAction::CreateRoom("Alpha".to_string())).unwrap();
    settle(&mut [&mut host, &mut guest]);
    guest.join_first_listed();
    settle(&mut [&mut host, &mut guest]);

    // then (期待する結果):
    for client in [&host, &guest] {
        let view = client.controller.view();
        assert_eq!(client.controller.screen(), Screen::Lobby);
        assert_eq!(view.player_list_text, "host\nguest\n");
        assert_eq!(view.room_info_text, format!("{ROOM_INFO_LABEL}\nAlpha"));
    }
    assert!(host.controller.view().start_enabled);
    assert!(host.controller.view().stage_select_enabled);
    assert!(!guest.controller.view().start_enabled);
    assert!(!guest.controller.view().stage_select_enabled);
}

#[test]
fn test_two_guests_leave_and_remaining_lists_converge() {
    // テスト項目: 4 人中 2 人が退出すると、残った 2 人の一覧が 2 人分になる
    // given (前提条件):
    let hub = hub();
    let mut a = TestClient::connect(&hub, "a");
    let mut b = TestClient::connect(&hub, "b");
    let mut c = TestClient::connect(&hub, "c");
    let mut d = TestClient::connect(&hub, "d");
    a.act(UserAction::CreateRoom("Alpha".to_string())).unwrap();
    settle(&mut [&mut a, &mut b, &mut c, &mut d]);
    for joiner in [&mut b, &mut c, &mut d] {
        joiner.join_first_listed();
    }
    settle(&mut [&mut a, &mut b, &mut c, &mut d]);
    assert_eq!(a.controller.view().player_list_text, "a\nb\nc\nd\n");

    // when (操作):
    b.act(UserAction::LeaveRoom).unwrap();
    c.act(UserAction::LeaveRoom).unwrap();
    settle(&mut [&mut a, &mut b, &mut c, &mut d]);

    // then (期待する結果):
    assert_eq!(a.controller.view().player_list_text, "a\nd\n");
    assert_eq!(d.controller.view().player_list_text, "a\nd\n");
    assert!(a.controller.view().start_enabled);
    assert!(!d.controller.view().start_enabled);
    for left in [&b, &c] {
        assert_eq!(left.controller.screen(), Screen::Main);
        assert_eq!(left.controller.phase(), SessionPhase::Connected);
        assert!(left.controller.view().player_list_text.is_empty());
        assert!(left.controller.authority().is_none());
    }
}

#[test]
fn test_host_leaving_hands_controls_to_remaining_member() {
    // テスト項目: ホストが退出すると残ったメンバーがホストになり操作が有効になる
    // given (前提条件):
    let hub = hub();
    let mut host = TestClient::connect(&hub, "host");
    let mut guest = TestClient::connect(&hub, "guest");
    host.act(UserAction::CreateRoom("Alpha".to_string())).unwrap();
    settle(&mut [&mut host, &mut guest]);
    guest.join_first_listed();
    settle(&mut [&mut host, &mut guest]);
    assert!(!guest.controller.view().start_enabled);

    // when (操作):
    host.act(UserAction::LeaveRoom).unwrap();
    settle(&mut [&mut host, &mut guest]);

    // then (期待する結果): 退出したホストはルームを一覧から隠している
    assert!(guest.controller.view().start_enabled);
    assert!(guest.controller.authority().unwrap().is_local_authority);
    assert_eq!(guest.controller.view().player_list_text, "guest\n");
    assert!(hub.listing().is_empty());
    assert_eq!(host.controller.screen(), Screen::Main);
}

#[test]
fn test_join_closed_room_returns_to_browser() {
    // テスト項目: 締め切られたルームへの参加は失敗し、ブラウザ画面に戻る
    // given (前提条件): ゲストはルームを表示したまま、ホストがゲームを開始する
    let hub = hub();
    let mut host = TestClient::connect(&hub, "host");
    let mut guest = TestClient::connect(&hub, "guest");
    host.act(UserAction::CreateRoom("Alpha".to_string())).unwrap();
    settle(&mut [&mut host, &mut guest]);
    guest.act(UserAction::FindRooms).unwrap();
    assert!(guest.controller.slots()[0].is_visible());
    host.act(UserAction::StartGame).unwrap();
    settle(&mut [&mut host, &mut guest]);

    // when (操作): 古い表示のまま参加を試みる
    guest.act(UserAction::JoinSlot(0)).unwrap();
    settle(&mut [&mut host, &mut guest]);

    // then (期待する結果):
    assert_eq!(guest.controller.screen(), Screen::Browser);
    assert_eq!(guest.controller.phase(), SessionPhase::Connected);
    let status = guest.controller.view().status.clone().unwrap();
    assert!(status.contains("room is closed"), "unexpected status: {status}");
    // ブラウザに戻ったときに最新の一覧で再描画されている
    assert!(!guest.controller.slots()[0].is_visible());
}

#[test]
fn test_member_browsing_rooms_stays_in_room() {
    // テスト項目: ルーム内のメンバーが戻る→ルーム検索しても、参加中のルーム状態は保たれる
    // given (前提条件): host, guest, third が Alpha に参加している
    let hub = hub();
    let mut host = TestClient::connect(&hub, "host");
    let mut guest = TestClient::connect(&hub, "guest");
    let mut third = TestClient::connect(&hub, "third");
    host.act(UserAction::CreateRoom("Alpha".to_string())).unwrap();
    settle(&mut [&mut host, &mut guest, &mut third]);
    guest.join_first_listed();
    settle(&mut [&mut host, &mut guest, &mut third]);
    third.join_first_listed();
    settle(&mut [&mut host, &mut guest, &mut third]);

    // when (操作): ゲストは一覧からもう一度参加しようとし、その後 third が退出する
    guest.act(UserAction::Back).unwrap();
    guest.act(UserAction::FindRooms).unwrap();
    let rejected = guest.act(UserAction::JoinSlot(0));
    settle(&mut [&mut host, &mut guest, &mut third]);
    third.act(UserAction::LeaveRoom).unwrap();
    settle(&mut [&mut host, &mut guest, &mut third]);

    // then (期待する結果):
    assert_eq!(rejected, Err(LobbyError::AlreadyInRoom));
    assert_eq!(guest.controller.phase(), SessionPhase::InRoom);
    assert_eq!(guest.controller.view().player_list_text, "host\nguest\n");
    assert!(guest.controller.authority().is_some());
    assert_eq!(hub.listing()[0].current_players, 2);

    // when (操作): ロビーに戻ってステージ選択を開く
    guest.act(UserAction::Back).unwrap();
    let opened = guest.act(UserAction::OpenStageSelect);

    // then (期待する結果):
    assert!(opened.is_ok());
    assert_eq!(guest.controller.screen(), Screen::StageSelect);
}

#[test]
fn test_host_cannot_start_from_browser() {
    // テスト項目: ホストがロビーを離れてルーム検索画面にいる間はゲームを開始できない
    // given (前提条件):
    let hub = hub();
    let mut host = TestClient::connect(&hub, "host");
    host.act(UserAction::CreateRoom("Alpha".to_string())).unwrap();
    settle(&mut [&mut host]);
    host.act(UserAction::Back).unwrap();
    host.act(UserAction::FindRooms).unwrap();

    // when (操作):
    let result = host.act(UserAction::StartGame);
    settle(&mut [&mut host]);

    // then (期待する結果):
    assert_eq!(result, Err(LobbyError::LobbyNotShown));
    assert_eq!(host.controller.phase(), SessionPhase::InRoom);
    assert!(host.controller.loading_stage().is_none());
    assert_eq!(hub.listing().len(), 1);
}

#[test]
fn test_refreshed_slot_joins_room_it_shows() {
    // テスト項目: 一覧が縮んだ後、スロットは表示中のルームに参加する（古い束縛を使わない）
    // given (前提条件): Alpha と Beta が公開されている
    let hub = hub();
    let mut alpha_host = TestClient::connect(&hub, "alpha");
    let mut beta_host = TestClient::connect(&hub, "beta");
    let mut guest = TestClient::connect(&hub, "guest");
    alpha_host
        .act(UserAction::CreateRoom("Alpha".to_string()))
        .unwrap();
    beta_host
        .act(UserAction::CreateRoom("Beta".to_string()))
        .unwrap();
    settle(&mut [&mut alpha_host, &mut beta_host, &mut guest]);
    guest.act(UserAction::FindRooms).unwrap();
    assert_eq!(guest.controller.slots()[0].text(), "1 / 4");

    // when (操作): Alpha が消えてから更新し、先頭スロットを押す
    alpha_host.act(UserAction::LeaveRoom).unwrap();
    settle(&mut [&mut alpha_host, &mut beta_host, &mut guest]);
    guest.act(UserAction::Refresh).unwrap();
    guest.act(UserAction::JoinSlot(0)).unwrap();
    settle(&mut [&mut alpha_host, &mut beta_host, &mut guest]);

    // then (期待する結果):
    assert_eq!(guest.controller.slots().len(), 2);
    assert!(!guest.controller.slots()[1].is_visible());
    let authority = guest.controller.authority().unwrap();
    assert_eq!(authority.room_name.as_str(), "Beta");
    assert_eq!(beta_host.controller.view().player_list_text, "beta\nguest\n");
}

#[test]
fn test_start_game_moves_everyone_to_stage() {
    // テスト項目: ホストの開始で全員がステージ読み込みに移り、ルームは一覧から消える
    // given (前提条件):
    let hub = hub();
    let mut host = TestClient::connect(&hub, "host");
    let mut guest = TestClient::connect(&hub, "guest");
    host.act(UserAction::CreateRoom("Alpha".to_string())).unwrap();
    settle(&mut [&mut host, &mut guest]);
    guest.join_first_listed();
    settle(&mut [&mut host, &mut guest]);

    // when (操作):
    let rejected = guest.act(UserAction::StartGame);
    host.act(UserAction::OpenStageSelect).unwrap();
    host.act(UserAction::SelectStage(StageId::new("Map2".to_string()).unwrap()))
        .unwrap();
    settle(&mut [&mut host, &mut guest]);

    // then (期待する結果):
    assert_eq!(rejected, Err(LobbyError::NotAuthority));
    for client in [&host, &guest] {
        assert_eq!(client.controller.phase(), SessionPhase::SceneTransition);
        assert_eq!(client.controller.screen(), Screen::SceneTransition);
        assert_eq!(client.controller.loading_stage().unwrap().as_str(), "Map2");
    }
    assert!(hub.listing().is_empty());
}

#[test]
fn test_returning_host_reopens_room() {
    // テスト項目: ゲームから戻ったホストはルームを再公開し、ロビーを表示する
    // given (前提条件):
    let hub = hub();
    let mut host = TestClient::connect(&hub, "host");
    host.act(UserAction::CreateRoom("Alpha".to_string())).unwrap();
    settle(&mut [&mut host]);
    host.act(UserAction::StartGame).unwrap();
    settle(&mut [&mut host]);
    assert!(hub.listing().is_empty());

    // when (操作):
    host.controller.start();
    settle(&mut [&mut host]);

    // then (期待する結果):
    assert_eq!(hub.listing().len(), 1);
    assert_eq!(host.controller.phase(), SessionPhase::InRoom);
    assert_eq!(host.controller.screen(), Screen::Lobby);
    assert!(host.controller.loading_stage().is_none());
    assert!(host.controller.view().start_enabled);
}

#[test]
fn test_disconnect_resets_client() {
    // テスト項目: 切断されるとメニューに戻りボタンが無効になる
    // given (前提条件):
    let hub = hub();
    let mut host = TestClient::connect(&hub, "host");
    host.act(UserAction::CreateRoom("Alpha".to_string())).unwrap();
    settle(&mut [&mut host]);

    // when (操作):
    hub.disconnect(host.id);
    settle(&mut [&mut host]);

    // then (期待する結果):
    assert_eq!(host.controller.phase(), SessionPhase::Disconnected);
    assert_eq!(host.controller.screen(), Screen::Main);
    assert!(!host.controller.view().create_room_enabled);
    assert!(hub.listing().is_empty());
    assert_eq!(
        host.act(UserAction::FindRooms),
        Err(LobbyError::NotConnected)
    );
}
