use serde::{Deserialize, Serialize};

/// Opaque handle for a rendered chat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,

    /// Only ever set on bot messages
    pub image: Option<String>,
}
