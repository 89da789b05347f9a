//! Island mode controller.
//!
//! `next_mode` is a total function over (mode, event): every pair either
//! yields the next mode or `None`, meaning the event is ignored in that mode.
//! Timers tied to a mode (auto-compact, wake confirmation) are armed by the
//! store when it observes the mode change.

use shared::island::IslandMode;

/// Things that can happen to the island
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IslandEvent {
    /// Inactivity timer elapsed while the island was visible
    InactivityElapsed,
    /// User tapped the island to type; `can_send` is false when no send
    /// handler is attached
    OpenComposer { can_send: bool },
    CloseComposer,
    /// A message left the composer
    MessageSubmitted,
    /// Voice button inside the island
    VoicePressed,
    /// Voice capture started (wake-word phase)
    WakeStarted,
    WakeConfirmed,
    StopRecording,
    RecordingTimedOut,
    ProcessingStarted,
    NotificationShown,
    NotificationHidden,
    OpenModelSelector,
    /// Expand or collapse the model list inside the selector
    ToggleModelList,
    ModelChosen,
    /// Switch to one of the rich content modes
    Enter(RichMode),
    /// Close whatever the island shows
    Dismiss,
    /// Unconditional return to idle
    Reset,
}

/// Modes entered explicitly by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RichMode {
    AgentCall,
    MediaPlayer,
    AppContent,
}

impl From<RichMode> for IslandMode {
    fn from(mode: RichMode) -> Self {
        match mode {
            RichMode::AgentCall => IslandMode::AgentCall,
            RichMode::MediaPlayer => IslandMode::MediaPlayer,
            RichMode::AppContent => IslandMode::AppContent,
        }
    }
}

/// Transition table
pub fn next_mode(mode: IslandMode, event: IslandEvent) -> Option<IslandMode> {
    use IslandMode::*;

    match event {
        IslandEvent::InactivityElapsed => matches!(mode, Idle).then_some(Compact),
        IslandEvent::OpenComposer { can_send } => {
            (can_send && mode.is_resting()).then_some(Input)
        }
        IslandEvent::CloseComposer | IslandEvent::MessageSubmitted => {
            matches!(mode, Input).then_some(Idle)
        }
        IslandEvent::VoicePressed => matches!(mode, Idle | Compact | Input).then_some(Voice),
        IslandEvent::WakeStarted => {
            matches!(mode, Idle | Compact | Input | Voice | Notification).then_some(Awakening)
        }
        IslandEvent::WakeConfirmed => matches!(mode, Awakening).then_some(Listening),
        IslandEvent::StopRecording => {
            matches!(mode, Voice | Awakening | Listening).then_some(Idle)
        }
        IslandEvent::RecordingTimedOut => mode.is_capturing().then_some(Idle),
        IslandEvent::ProcessingStarted => {
            matches!(mode, Idle | Compact | Input | Notification | Voice).then_some(Processing)
        }
        IslandEvent::NotificationShown => mode.is_resting().then_some(Notification),
        IslandEvent::NotificationHidden => matches!(mode, Notification).then_some(Idle),
        IslandEvent::OpenModelSelector => mode.is_resting().then_some(ModelSelector),
        IslandEvent::ToggleModelList | IslandEvent::ModelChosen => {
            matches!(mode, ModelSelector).then_some(ModelSelector)
        }
        IslandEvent::Enter(rich) => mode.is_resting().then_some(rich.into()),
        IslandEvent::Dismiss => (mode != Idle).then_some(Idle),
        IslandEvent::Reset => Some(Idle),
    }
}

/// Current island mode plus the model selector's expanded/collapsed display
#[derive(Debug, Default, Clone)]
pub struct ModeController {
    mode: IslandMode,
    model_list_expanded: bool,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> IslandMode {
        self.mode
    }

    pub fn model_list_expanded(&self) -> bool {
        self.model_list_expanded
    }

    /// Apply an event. Returns the resulting mode when the event was
    /// accepted, `None` when it was ignored.
    pub fn apply(&mut self, event: IslandEvent) -> Option<IslandMode> {
        let next = next_mode(self.mode, event)?;

        match event {
            IslandEvent::ToggleModelList => self.model_list_expanded = !self.model_list_expanded,
            IslandEvent::ModelChosen => self.model_list_expanded = false,
            _ => {}
        }
        if next != IslandMode::ModelSelector {
            self.model_list_expanded = false;
        }

        self.mode = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_events() -> Vec<IslandEvent> {
        vec![
            IslandEvent::InactivityElapsed,
            IslandEvent::OpenComposer { can_send: true },
            IslandEvent::OpenComposer { can_send: false },
            IslandEvent::CloseComposer,
            IslandEvent::MessageSubmitted,
            IslandEvent::VoicePressed,
            IslandEvent::WakeStarted,
            IslandEvent::WakeConfirmed,
            IslandEvent::StopRecording,
            IslandEvent::RecordingTimedOut,
            IslandEvent::ProcessingStarted,
            IslandEvent::NotificationShown,
            IslandEvent::NotificationHidden,
            IslandEvent::OpenModelSelector,
            IslandEvent::ToggleModelList,
            IslandEvent::ModelChosen,
            IslandEvent::Enter(RichMode::AgentCall),
            IslandEvent::Enter(RichMode::MediaPlayer),
            IslandEvent::Enter(RichMode::AppContent),
            IslandEvent::Dismiss,
            IslandEvent::Reset,
        ]
    }

    #[test]
    fn test_every_pair_is_defined_and_reset_always_idles() {
        for mode in IslandMode::all() {
            for event in all_events() {
                // Must not panic; either a mode or ignored
                let _ = next_mode(*mode, event);
            }
            assert_eq!(next_mode(*mode, IslandEvent::Reset), Some(IslandMode::Idle));
        }
    }

    #[test]
    fn test_composer_requires_send_handler() {
        assert_eq!(
            next_mode(IslandMode::Compact, IslandEvent::OpenComposer { can_send: true }),
            Some(IslandMode::Input)
        );
        assert_eq!(
            next_mode(IslandMode::Idle, IslandEvent::OpenComposer { can_send: false }),
            None
        );
        assert_eq!(
            next_mode(IslandMode::Processing, IslandEvent::OpenComposer { can_send: true }),
            None
        );
    }

    #[test]
    fn test_voice_capture_cycle() {
        let mut controller = ModeController::new();
        assert_eq!(controller.apply(IslandEvent::WakeStarted), Some(IslandMode::Awakening));
        assert_eq!(controller.apply(IslandEvent::WakeConfirmed), Some(IslandMode::Listening));
        assert_eq!(controller.apply(IslandEvent::WakeConfirmed), None);
        assert_eq!(controller.apply(IslandEvent::RecordingTimedOut), Some(IslandMode::Idle));
        assert_eq!(controller.apply(IslandEvent::RecordingTimedOut), None);
    }

    #[test]
    fn test_notification_only_preempts_resting_modes() {
        assert_eq!(
            next_mode(IslandMode::Compact, IslandEvent::NotificationShown),
            Some(IslandMode::Notification)
        );
        assert_eq!(next_mode(IslandMode::Listening, IslandEvent::NotificationShown), None);
        assert_eq!(next_mode(IslandMode::Processing, IslandEvent::NotificationShown), None);
        assert_eq!(
            next_mode(IslandMode::Notification, IslandEvent::NotificationHidden),
            Some(IslandMode::Idle)
        );
        assert_eq!(next_mode(IslandMode::Idle, IslandEvent::NotificationHidden), None);
    }

    #[test]
    fn test_model_selector_is_bistable() {
        let mut controller = ModeController::new();
        controller.apply(IslandEvent::OpenModelSelector);
        assert!(!controller.model_list_expanded());

        controller.apply(IslandEvent::ToggleModelList);
        assert_eq!(controller.mode(), IslandMode::ModelSelector);
        assert!(controller.model_list_expanded());

        controller.apply(IslandEvent::ModelChosen);
        assert!(!controller.model_list_expanded());

        controller.apply(IslandEvent::ToggleModelList);
        controller.apply(IslandEvent::Dismiss);
        assert_eq!(controller.mode(), IslandMode::Idle);
        assert!(!controller.model_list_expanded());
    }

    #[test]
    fn test_ignored_event_leaves_state_untouched() {
        let mut controller = ModeController::new();
        controller.apply(IslandEvent::ProcessingStarted);

        assert_eq!(controller.apply(IslandEvent::CloseComposer), None);
        assert_eq!(controller.mode(), IslandMode::Processing);
    }
}
