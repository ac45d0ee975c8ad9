//! Chat message entity for the mentor conversation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{MessageId, Timestamp};

/// Sender of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Model,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Model => f.write_str("model"),
        }
    }
}

/// An immutable entry in the mentor transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub timestamp: Timestamp,
    /// Follow-up chips offered under a model reply.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_actions: Vec<String>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text, Vec::new())
    }

    pub fn model(text: impl Into<String>, suggested_actions: Vec<String>) -> Self {
        Self::new(Role::Model, text, suggested_actions)
    }

    fn new(role: Role, text: impl Into<String>, suggested_actions: Vec<String>) -> Self {
        Self {
            id: MessageId::new(),
            role,
            text: text.into(),
            timestamp: Timestamp::now(),
            suggested_actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_roles() {
        assert_eq!(ChatMessage::user("hi").role, Role::User);
        let reply = ChatMessage::model("hello", vec!["next?".into()]);
        assert_eq!(reply.role, Role::Model);
        assert_eq!(reply.suggested_actions, vec!["next?".to_string()]);
    }

    #[test]
    fn role_displays_lowercase() {
        assert_eq!(Role::Model.to_string(), "model");
    }

    #[test]
    fn user_messages_serialize_without_chips() {
        let json = serde_json::to_value(ChatMessage::user("hi")).unwrap();
        assert!(json.get("suggested_actions").is_none());
        assert_eq!(json["role"], "user");
    }
}
