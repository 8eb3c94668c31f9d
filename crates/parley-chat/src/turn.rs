use parley_llm::Message;
use serde::{Deserialize, Serialize};

/// Author of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl From<Role> for parley_llm::Role {
    fn from(role: Role) -> Self {
        match role {
            Role::User => parley_llm::Role::User,
            Role::Assistant => parley_llm::Role::Assistant,
        }
    }
}

/// One message in the conversation. Content is opaque text of any length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn to_message(&self) -> Message {
        Message::new(self.role.into(), self.content.clone())
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        turn.to_message()
    }
}
