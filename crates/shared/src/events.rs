//! Store change events for the rendering layer.
//!
//! The orchestrator publishes one event per observable state change so a
//! presentation layer can re-render incrementally instead of diffing
//! snapshots.

use crate::island::{IslandMessageType, IslandMode};
use crate::view::View;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    /// A message was appended to the log
    MessageAppended { message_id: String, is_user: bool },
    /// A new artifact entered the registry
    ArtifactAdded { artifact_id: String },
    /// Island mode changed
    ModeChanged { from: IslandMode, to: IslandMode },
    /// A notification became current (replacing any previous one)
    NotificationShown {
        message: String,
        kind: IslandMessageType,
    },
    /// The current notification was hidden
    NotificationHidden,
    /// Top-level view changed
    ViewChanged { view: View },
    /// Assistant typing indicator toggled
    TypingChanged { is_typing: bool },
    /// Browser overlay opened
    BrowserOpened { url: String },
    /// Browser overlay closed
    BrowserClosed,
    /// Artifact viewer opened for an artifact
    ArtifactViewerOpened { artifact_id: String },
    /// Conversation wiped by "new chat"
    ConversationReset { conversation_id: Uuid },
}

impl StoreEvent {
    /// One-line description for logs and the headless driver
    pub fn describe(&self) -> String {
        match self {
            StoreEvent::MessageAppended { message_id, is_user } => {
                let who = if *is_user { "user" } else { "assistant" };
                format!("{} message {}", who, message_id)
            }
            StoreEvent::ArtifactAdded { artifact_id } => format!("artifact {} added", artifact_id),
            StoreEvent::ModeChanged { from, to } => format!("island {} -> {}", from, to),
            StoreEvent::NotificationShown { message, kind } => {
                format!("{} {}", kind.icon(), message)
            }
            StoreEvent::NotificationHidden => "notification hidden".to_string(),
            StoreEvent::ViewChanged { view } => format!("view {:?}", view),
            StoreEvent::TypingChanged { is_typing } => {
                if *is_typing {
                    "assistant typing...".to_string()
                } else {
                    "assistant idle".to_string()
                }
            }
            StoreEvent::BrowserOpened { url } => format!("browser opened at {}", url),
            StoreEvent::BrowserClosed => "browser closed".to_string(),
            StoreEvent::ArtifactViewerOpened { artifact_id } => {
                format!("viewing artifact {}", artifact_id)
            }
            StoreEvent::ConversationReset { conversation_id } => {
                format!("new conversation {}", conversation_id)
            }
        }
    }
}
