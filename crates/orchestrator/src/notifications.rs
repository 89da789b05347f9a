//! Single-slot overlay notification.
//!
//! The channel only holds state. Auto-dismiss timing belongs to the store,
//! which arms one dismiss timer per `show` and lets a newer `show` supersede
//! the older timer.

use shared::island::{IslandMessageType, IslandNotification};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct NotificationChannel {
    current: IslandNotification,
}

impl NotificationChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current notification. Returns the delay after which it
    /// should be hidden automatically, if any.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        kind: IslandMessageType,
        dismiss_delay: Duration,
    ) -> Option<Duration> {
        let auto_dismiss = !dismiss_delay.is_zero();
        self.current = IslandNotification {
            show: true,
            message: message.into(),
            kind,
            auto_dismiss,
            dismiss_delay,
        };
        auto_dismiss.then_some(dismiss_delay)
    }

    /// Hide the notification, keeping its content. Returns whether it was visible.
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.current.show, false)
    }

    pub fn current(&self) -> &IslandNotification {
        &self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_replaces_previous() {
        let mut channel = NotificationChannel::new();
        channel.show("Opening browser...", IslandMessageType::Browser, Duration::ZERO);
        let delay = channel.show(
            "Browser opened!",
            IslandMessageType::Success,
            Duration::from_secs(2),
        );

        assert_eq!(delay, Some(Duration::from_secs(2)));
        assert_eq!(channel.current().message, "Browser opened!");
        assert_eq!(channel.current().kind, IslandMessageType::Success);
        assert!(channel.current().auto_dismiss);
    }

    #[test]
    fn test_zero_delay_never_auto_dismisses() {
        let mut channel = NotificationChannel::new();
        let delay = channel.show("Listening...", IslandMessageType::Loading, Duration::ZERO);

        assert!(delay.is_none());
        assert!(!channel.current().auto_dismiss);
    }

    #[test]
    fn test_hide_keeps_content() {
        let mut channel = NotificationChannel::new();
        channel.show("Awakening...", IslandMessageType::Loading, Duration::ZERO);

        assert!(channel.hide());
        assert!(!channel.hide());
        assert!(!channel.current().show);
        assert_eq!(channel.current().message, "Awakening...");
    }
}
