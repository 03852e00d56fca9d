//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::ValueObjectError;

/// Maximum length of a room name in characters
pub const ROOM_NAME_MAX_LEN: usize = 64;

/// Maximum length of a nickname in characters
pub const NICKNAME_MAX_LEN: usize = 32;

/// Maximum length of a stage identifier in characters
pub const STAGE_ID_MAX_LEN: usize = 64;

/// Room name value object.
///
/// The unique key of a room on the session service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomName(String);

impl RoomName {
    /// Create a new RoomName.
    ///
    /// # Arguments
    ///
    /// * `name` - The room name string
    ///
    /// # Returns
    ///
    /// A Result containing the RoomName or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        let len = name.chars().count();
        if len > ROOM_NAME_MAX_LEN {
            return Err(ValueObjectError::RoomNameTooLong {
                max: ROOM_NAME_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Nickname value object.
///
/// The display name of a participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    /// Create a new Nickname.
    ///
    /// # Arguments
    ///
    /// * `nickname` - The nickname string
    ///
    /// # Returns
    ///
    /// A Result containing the Nickname or an error if validation fails
    pub fn new(nickname: String) -> Result<Self, ValueObjectError> {
        if nickname.is_empty() {
            return Err(ValueObjectError::NicknameEmpty);
        }
        let len = nickname.chars().count();
        if len > NICKNAME_MAX_LEN {
            return Err(ValueObjectError::NicknameTooLong {
                max: NICKNAME_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(nickname))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stage identifier value object.
///
/// Names the map or scene every participant loads on a stage transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StageId(String);

impl StageId {
    /// Create a new StageId.
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.is_empty() {
            return Err(ValueObjectError::StageIdEmpty);
        }
        let len = id.chars().count();
        if len > STAGE_ID_MAX_LEN {
            return Err(ValueObjectError::StageIdTooLong {
                max: STAGE_ID_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(id))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Participant identifier value object.
///
/// The actor number the session service assigns on connect. Serialized as
/// the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ParticipantId(u32);

impl ParticipantId {
    /// Create a new ParticipantId.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the inner u32 value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of a view slot, handed to the renderer to address the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotHandle(usize);

impl SlotHandle {
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    pub fn value(&self) -> usize {
        self.0
    }
}
