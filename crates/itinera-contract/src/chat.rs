//! Chat transcript shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        };
        f.write_str(s)
    }
}

impl FromStr for ChatRole {
    type Err = ChatRoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            other => Err(ChatRoleParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`ChatRole`] string.
#[derive(Debug, Clone)]
pub struct ChatRoleParseError(pub String);

impl fmt::Display for ChatRoleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid chat role: {:?}", self.0)
    }
}

impl std::error::Error for ChatRoleParseError {}

/// One message in the transcript, with the wall-clock display stamp it
/// was rendered with when appended. The stamp is presentation data, not
/// an ordering key -- ordering is insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    pub fn assistant(content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_role_display_roundtrip() {
        let variants = [ChatRole::User, ChatRole::Assistant];
        for v in &variants {
            let s = v.to_string();
            let parsed: ChatRole = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn chat_role_invalid() {
        let result = "system".parse::<ChatRole>();
        assert!(result.is_err());
    }

    #[test]
    fn chat_message_serializes_role_lowercase() {
        let message = ChatMessage::assistant("hello", "09:15");
        let value = serde_json::to_value(&message).expect("should serialize");
        assert_eq!(value["role"], "assistant");
        assert_eq!(value["timestamp"], "09:15");
    }
}
