//! InMemory Session Hub 実装
//!
//! ドメイン層が定義する SessionTransport trait の具体的な実装。
//! 1 プロセス内で複数のクライアントを接続し、ルームの作成・参加・退出と
//! 全参加者への送信をループバックで再現します。デモとテストで使用します。
//!
//! 各クライアントへの通知は JSON 文字列として `UnboundedSender<String>` に
//! 送られ、送信者ごとの順序が保たれます。

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    domain::{
        LobbySignal, MemberSummary, Nickname, ParticipantId, RoomName, RoomSummary,
        SessionTransport,
    },
    infrastructure::dto::SessionMessage,
};

/// 接続中のクライアント情報
struct HubClient {
    nickname: Nickname,
    /// 通知送信チャンネル
    sender: UnboundedSender<String>,
    /// 参加中のルーム
    room: Option<RoomName>,
}

/// ハブ上のルーム
struct HubRoom {
    name: RoomName,
    /// 参加順の参加者
    members: Vec<ParticipantId>,
    authority: ParticipantId,
    open: bool,
    visible: bool,
    max_players: u32,
}

struct HubState {
    next_actor: u32,
    max_players: u32,
    clients: BTreeMap<ParticipantId, HubClient>,
    /// 作成順のルーム
    rooms: Vec<HubRoom>,
}

impl HubState {
    fn send(&self, to: ParticipantId, message: &SessionMessage) {
        let Some(client) = self.clients.get(&to) else {
            return;
        };
        match message.encode() {
            Ok(json) => {
                if client.sender.send(json).is_err() {
                    tracing::warn!("Failed to deliver session message to client {}", to);
                }
            }
            Err(e) => tracing::error!("Failed to encode session message: {}", e),
        }
    }

    fn room(&self, name: &RoomName) -> Option<&HubRoom> {
        self.rooms.iter().find(|room| &room.name == name)
    }

    fn room_mut(&mut self, name: &RoomName) -> Option<&mut HubRoom> {
        self.rooms.iter_mut().find(|room| &room.name == name)
    }

    fn room_of(&self, id: ParticipantId) -> Option<&HubRoom> {
        let name = self.clients.get(&id)?.room.as_ref()?;
        self.room(name)
    }

    /// 公開中のルーム一覧（作成順）
    fn listing(&self) -> Vec<RoomSummary> {
        self.rooms
            .iter()
            .filter(|room| room.open && room.visible)
            .filter_map(|room| {
                RoomSummary::new(
                    room.name.clone(),
                    room.members.len() as u32,
                    room.max_players,
                )
                .ok()
            })
            .collect()
    }

    /// ルームに入っていない全クライアントにルーム一覧を送信
    fn publish_room_list(&self) {
        let message = SessionMessage::room_list(&self.listing());
        for (id, client) in &self.clients {
            if client.room.is_none() {
                self.send(*id, &message);
            }
        }
    }

    fn join_failure(&self, id: ParticipantId, name: &RoomName) -> Option<&'static str> {
        match self.clients.get(&id) {
            None => return Some("client is not connected"),
            Some(client) if client.room.is_some() => return Some("already in a room"),
            Some(_) => {}
        }
        match self.room(name) {
            None => Some("room does not exist"),
            Some(room) if !room.open => Some("room is closed"),
            Some(room) if room.members.len() as u32 >= room.max_players => Some("room is full"),
            Some(_) => None,
        }
    }

    /// 参加者をルームから外す（ホストが抜けた場合は移譲する）
    fn remove_member(&mut self, id: ParticipantId) {
        let Some(room_name) = self.clients.get_mut(&id).and_then(|c| c.room.take()) else {
            return;
        };
        let Some(index) = self.rooms.iter().position(|room| room.name == room_name) else {
            return;
        };

        let room = &mut self.rooms[index];
        room.members.retain(|member| *member != id);

        if room.members.is_empty() {
            tracing::info!("Room '{}' is empty and has been removed", room_name);
            self.rooms.remove(index);
        } else {
            if room.authority == id
                && let Some(next) = room.members.iter().min().copied()
            {
                tracing::info!(
                    "Authority of room '{}' migrated from {} to {}",
                    room_name,
                    id,
                    next
                );
                room.authority = next;
            }
            let remaining = room.members.clone();
            let message = SessionMessage::ParticipantLeft {
                participant_id: id,
            };
            for member in remaining {
                self.send(member, &message);
            }
        }

        self.publish_room_list();
    }
}

/// インメモリのセッションハブ
///
/// クライアントごとに `InMemoryTransport` と通知受信チャンネルを払い出します。
#[derive(Clone)]
pub struct InMemorySessionHub {
    state: Arc<Mutex<HubState>>,
}

impl InMemorySessionHub {
    /// 新しいハブを作成
    ///
    /// # Arguments
    ///
    /// * `max_players` - 作成されるルームの最大人数（0 は 1 として扱う）
    pub fn new(max_players: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(HubState {
                next_actor: 1,
                max_players: max_players.max(1),
                clients: BTreeMap::new(),
                rooms: Vec::new(),
            })),
        }
    }

    /// クライアントを接続
    ///
    /// 接続通知と現在のルーム一覧が受信チャンネルに積まれます。
    pub fn connect(&self, nickname: Nickname) -> (InMemoryTransport, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = lock(&self.state);

        let id = ParticipantId::new(state.next_actor);
        state.next_actor += 1;
        state.clients.insert(
            id,
            HubClient {
                nickname,
                sender: tx,
                room: None,
            },
        );
        tracing::info!("Client {} connected to the session hub", id);

        state.send(id, &SessionMessage::Connected);
        let listing = SessionMessage::room_list(&state.listing());
        state.send(id, &listing);

        let transport = InMemoryTransport {
            id,
            state: Arc::clone(&self.state),
        };
        (transport, rx)
    }

    /// クライアントを切断（ルームにいれば退出扱い）
    pub fn disconnect(&self, id: ParticipantId) {
        let mut state = lock(&self.state);
        state.remove_member(id);
        state.send(id, &SessionMessage::Disconnected);
        state.clients.remove(&id);
        tracing::info!("Client {} disconnected from the session hub", id);
    }

    /// 公開中のルーム一覧
    pub fn listing(&self) -> Vec<RoomSummary> {
        lock(&self.state).listing()
    }
}

/// クライアント 1 つ分のセッションハンドル
pub struct InMemoryTransport {
    id: ParticipantId,
    state: Arc<Mutex<HubState>>,
}

impl InMemoryTransport {
    pub fn participant_id(&self) -> ParticipantId {
        self.id
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        lock(&self.state)
    }
}

impl SessionTransport for InMemoryTransport {
    fn create_room(&self, name: &RoomName) {
        let mut state = self.lock();

        let failure = match state.clients.get(&self.id) {
            None => Some("client is not connected"),
            Some(client) if client.room.is_some() => Some("already in a room"),
            Some(_) if state.room(name).is_some() => Some("a room with this name already exists"),
            Some(_) => None,
        };
        if let Some(reason) = failure {
            tracing::warn!("Client {} failed to create room '{}': {}", self.id, name, reason);
            state.send(
                self.id,
                &SessionMessage::CreateRoomFailed {
                    room_name: name.as_str().to_string(),
                    reason: reason.to_string(),
                },
            );
            return;
        }

        let max_players = state.max_players;
        state.rooms.push(HubRoom {
            name: name.clone(),
            members: vec![self.id],
            authority: self.id,
            open: true,
            visible: true,
            max_players,
        });
        if let Some(client) = state.clients.get_mut(&self.id) {
            client.room = Some(name.clone());
        }
        tracing::info!("Client {} created room '{}'", self.id, name);

        state.send(self.id, &SessionMessage::JoinedRoom);
        state.publish_room_list();
    }

    fn join_room(&self, name: &RoomName) {
        let mut state = self.lock();

        if let Some(reason) = state.join_failure(self.id, name) {
            tracing::warn!("Client {} failed to join room '{}': {}", self.id, name, reason);
            state.send(
                self.id,
                &SessionMessage::JoinRoomFailed {
                    room_name: name.as_str().to_string(),
                    reason: reason.to_string(),
                },
            );
            return;
        }

        if let Some(room) = state.room_mut(name) {
            room.members.push(self.id);
        }
        if let Some(client) = state.clients.get_mut(&self.id) {
            client.room = Some(name.clone());
        }
        tracing::info!("Client {} joined room '{}'", self.id, name);

        state.send(self.id, &SessionMessage::JoinedRoom);
        state.publish_room_list();
    }

    fn leave_room(&self) {
        let mut state = self.lock();
        tracing::info!("Client {} is leaving its room", self.id);
        state.remove_member(self.id);
    }

    fn set_room_discoverable(&self, discoverable: bool) {
        let mut state = self.lock();
        let Some(name) = state.clients.get(&self.id).and_then(|c| c.room.clone()) else {
            tracing::warn!("Client {} is not in a room; ignoring visibility change", self.id);
            return;
        };
        if let Some(room) = state.room_mut(&name) {
            room.open = discoverable;
            room.visible = discoverable;
        }
        tracing::debug!("Room '{}' discoverable={}", name, discoverable);
        state.publish_room_list();
    }

    fn send_to_all(&self, signal: LobbySignal) {
        let state = self.lock();
        let Some(room) = state.room_of(self.id) else {
            tracing::warn!("Client {} is not in a room; dropping {:?}", self.id, signal);
            return;
        };
        let message = SessionMessage::from(&signal);
        for member in &room.members {
            state.send(*member, &message);
        }
    }

    fn set_nickname(&self, nickname: &Nickname) {
        let mut state = self.lock();
        if let Some(client) = state.clients.get_mut(&self.id) {
            client.nickname = nickname.clone();
        }
    }

    fn participants(&self) -> Vec<MemberSummary> {
        let state = self.lock();
        state
            .room_of(self.id)
            .map(|room| {
                room.members
                    .iter()
                    .filter_map(|member| state.clients.get(member))
                    .map(|client| MemberSummary::new(client.nickname.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_local_authority(&self) -> bool {
        self.lock()
            .room_of(self.id)
            .is_some_and(|room| room.authority == self.id)
    }

    fn current_room_name(&self) -> Option<RoomName> {
        self.lock().room_of(self.id).map(|room| room.name.clone())
    }
}

fn lock(state: &Mutex<HubState>) -> MutexGuard<'_, HubState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
