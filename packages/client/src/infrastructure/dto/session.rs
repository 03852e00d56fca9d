//! Session message DTOs.
//!
//! Every inbound message is a JSON object tagged by `type`, e.g.
//! `{"type":"participant-left","participant_id":3}`.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{LobbySignal, ParticipantId, RoomName, RoomSummary, SessionNotification, StageId},
    infrastructure::error::DecodeError,
};

/// Room entry of a room-list update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub current_players: u32,
    pub max_players: u32,
}

/// Kind of a message sent to all participants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RpcKind {
    /// No arguments
    UpdateLobbyUi,
    /// One argument: the stage id
    ChangeScene,
}

impl RpcKind {
    fn as_str(&self) -> &'static str {
        match self {
            RpcKind::UpdateLobbyUi => "update-lobby-ui",
            RpcKind::ChangeScene => "change-scene",
        }
    }
}

/// Message pushed from the session service to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SessionMessage {
    Connected,
    Disconnected,
    RoomListUpdated {
        rooms: Vec<RoomSummaryDto>,
    },
    JoinedRoom,
    JoinRoomFailed {
        room_name: String,
        reason: String,
    },
    CreateRoomFailed {
        room_name: String,
        reason: String,
    },
    ParticipantLeft {
        participant_id: ParticipantId,
    },
    Rpc {
        kind: RpcKind,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl SessionMessage {
    /// Parse a raw JSON message
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serialize to JSON
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Build a room-list update from domain summaries
    pub fn room_list(rooms: &[RoomSummary]) -> Self {
        SessionMessage::RoomListUpdated {
            rooms: rooms.iter().map(RoomSummaryDto::from).collect(),
        }
    }
}

impl From<&RoomSummary> for RoomSummaryDto {
    fn from(room: &RoomSummary) -> Self {
        Self {
            name: room.name.as_str().to_string(),
            current_players: room.current_players,
            max_players: room.max_players,
        }
    }
}

impl TryFrom<RoomSummaryDto> for RoomSummary {
    type Error = DecodeError;

    fn try_from(dto: RoomSummaryDto) -> Result<Self, Self::Error> {
        let name = RoomName::new(dto.name)?;
        Ok(RoomSummary::new(name, dto.current_players, dto.max_players)?)
    }
}

impl From<&LobbySignal> for SessionMessage {
    fn from(signal: &LobbySignal) -> Self {
        match signal {
            LobbySignal::RecomputeLobbyState => SessionMessage::Rpc {
                kind: RpcKind::UpdateLobbyUi,
                args: Vec::new(),
            },
            LobbySignal::ChangeStage(stage) => SessionMessage::Rpc {
                kind: RpcKind::ChangeScene,
                args: vec![stage.as_str().to_string()],
            },
        }
    }
}

impl TryFrom<SessionMessage> for SessionNotification {
    type Error = DecodeError;

    fn try_from(message: SessionMessage) -> Result<Self, Self::Error> {
        let notification = match message {
            SessionMessage::Connected => SessionNotification::Connected,
            SessionMessage::Disconnected => SessionNotification::Disconnected,
            SessionMessage::RoomListUpdated { rooms } => {
                // Invalid entries are dropped; the rest of the snapshot is still usable
                let rooms = rooms
                    .into_iter()
                    .filter_map(|dto| {
                        let name = dto.name.clone();
                        match RoomSummary::try_from(dto) {
                            Ok(room) => Some(room),
                            Err(e) => {
                                tracing::warn!("Dropping invalid room '{}' from list: {}", name, e);
                                None
                            }
                        }
                    })
                    .collect();
                SessionNotification::RoomListUpdated(rooms)
            }
            SessionMessage::JoinedRoom => SessionNotification::JoinedRoom,
            SessionMessage::JoinRoomFailed { room_name, reason } => {
                SessionNotification::JoinRoomFailed { room_name, reason }
            }
            SessionMessage::CreateRoomFailed { room_name, reason } => {
                SessionNotification::CreateRoomFailed { room_name, reason }
            }
            SessionMessage::ParticipantLeft { participant_id } => {
                SessionNotification::ParticipantLeft(participant_id)
            }
            SessionMessage::Rpc { kind, args } => match kind {
                RpcKind::UpdateLobbyUi => {
                    SessionNotification::Signal(LobbySignal::RecomputeLobbyState)
                }
                RpcKind::ChangeScene => {
                    let stage = args
                        .into_iter()
                        .next()
                        .ok_or(DecodeError::MissingRpcArgument {
                            kind: kind.as_str(),
                            index: 0,
                        })?;
                    SessionNotification::Signal(LobbySignal::ChangeStage(StageId::new(stage)?))
                }
            },
        };
        Ok(notification)
    }
}
