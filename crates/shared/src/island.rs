//! Island overlay types: display modes and the single notification slot.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Display mode of the floating island overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IslandMode {
    #[default]
    Idle,
    Compact,
    Input,
    Voice,
    Awakening,
    Listening,
    Processing,
    Notification,
    ModelSelector,
    AgentCall,
    MediaPlayer,
    AppContent,
}

impl IslandMode {
    pub fn all() -> &'static [IslandMode] {
        &[
            IslandMode::Idle,
            IslandMode::Compact,
            IslandMode::Input,
            IslandMode::Voice,
            IslandMode::Awakening,
            IslandMode::Listening,
            IslandMode::Processing,
            IslandMode::Notification,
            IslandMode::ModelSelector,
            IslandMode::AgentCall,
            IslandMode::MediaPlayer,
            IslandMode::AppContent,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IslandMode::Idle => "idle",
            IslandMode::Compact => "compact",
            IslandMode::Input => "input",
            IslandMode::Voice => "voice",
            IslandMode::Awakening => "awakening",
            IslandMode::Listening => "listening",
            IslandMode::Processing => "processing",
            IslandMode::Notification => "notification",
            IslandMode::ModelSelector => "model-selector",
            IslandMode::AgentCall => "agent-call",
            IslandMode::MediaPlayer => "media-player",
            IslandMode::AppContent => "app-content",
        }
    }

    /// Resting modes yield to an incoming notification; busy modes keep the
    /// foreground and the notification rides along.
    pub fn is_resting(&self) -> bool {
        matches!(self, IslandMode::Idle | IslandMode::Compact)
    }

    /// Voice capture in progress (wake-word confirmation or recording)
    pub fn is_capturing(&self) -> bool {
        matches!(self, IslandMode::Awakening | IslandMode::Listening)
    }
}

impl std::fmt::Display for IslandMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of an island notification (drives icon and color)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IslandMessageType {
    Welcome,
    Loading,
    Success,
    #[default]
    Info,
    Browser,
    Code,
    Image,
    Chat,
    Error,
}

impl IslandMessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IslandMessageType::Welcome => "welcome",
            IslandMessageType::Loading => "loading",
            IslandMessageType::Success => "success",
            IslandMessageType::Info => "info",
            IslandMessageType::Browser => "browser",
            IslandMessageType::Code => "code",
            IslandMessageType::Image => "image",
            IslandMessageType::Chat => "chat",
            IslandMessageType::Error => "error",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            IslandMessageType::Welcome => "👋",
            IslandMessageType::Loading => "⏳",
            IslandMessageType::Success => "✅",
            IslandMessageType::Info => "ℹ️",
            IslandMessageType::Browser => "🌐",
            IslandMessageType::Code => "💻",
            IslandMessageType::Image => "🖼️",
            IslandMessageType::Chat => "💬",
            IslandMessageType::Error => "⚠️",
        }
    }
}

/// The single overlay notification. When `show` is false the content is
/// stale and must not be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IslandNotification {
    pub show: bool,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: IslandMessageType,
    pub auto_dismiss: bool,
    #[serde(with = "duration_millis")]
    pub dismiss_delay: Duration,
}

impl Default for IslandNotification {
    fn default() -> Self {
        Self {
            show: false,
            message: String::new(),
            kind: IslandMessageType::Info,
            auto_dismiss: true,
            dismiss_delay: Duration::from_millis(3000),
        }
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(d)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_names_are_kebab_case() {
        for mode in IslandMode::all() {
            let json = serde_json::to_string(mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.as_str()));
        }
    }
}
