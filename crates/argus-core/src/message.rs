use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An inbound message delivered by the transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub id: Uuid,
    /// Message kind as reported by the transport.
    pub kind: MessageKind,
    /// Full sender address (e.g. `ops@example.net/laptop`).
    pub sender: String,
    /// Message text content.
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl InboundMessage {
    /// The sender's local part — everything before the first `@`.
    /// This is the key used in the privilege table.
    pub fn sender_local(&self) -> &str {
        self.sender.split('@').next().unwrap_or(&self.sender)
    }
}

/// Message kinds the pipeline distinguishes. Only `Chat` and `Normal`
/// are processed; everything else is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Chat,
    Normal,
    Other,
}

/// Outcome of a host command invocation: exit status collapsed to a
/// bool, combined stdout+stderr as text.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub success: bool,
    pub output: String,
}
