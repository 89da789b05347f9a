//! The conversation store.
//!
//! `Orchestrator` owns every piece of conversational state and is the only
//! writer. UI gestures call its action methods, which mutate state
//! synchronously; anything delayed (assistant replies, island timers,
//! notification auto-dismiss) is scheduled through [`Timers`] and applied
//! when the owner drains fired effects with [`Orchestrator::apply_pending`]
//! or [`Orchestrator::run_until`].
//!
//! Timers need a tokio runtime. Without one, actions still apply their
//! immediate changes but nothing deferred ever fires.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::Serialize;
use shared::conversation::{Artifact, Message, Origin};
use shared::events::StoreEvent;
use shared::island::{IslandMessageType, IslandMode, IslandNotification};
use shared::settings::{AppSettings, Preferences, TimingSettings};
use shared::view::{DeviceCategory, DeviceType, View, Viewport};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};
use uuid::Uuid;

use crate::artifacts::ArtifactRegistry;
use crate::catalog;
use crate::dispatcher::{self, Intent};
use crate::island::{IslandEvent, ModeController, RichMode};
use crate::message_log::MessageLog;
use crate::notifications::NotificationChannel;
use crate::timers::{Deferred, Slot, Timers};
use crate::view_router::ViewRouter;

/// Everything the rendering layer needs to draw a frame
#[derive(Debug, Clone, Serialize)]
pub struct StoreSnapshot {
    pub conversation_id: Uuid,
    pub current_view: View,
    pub messages: Vec<Message>,
    pub artifacts: Vec<Artifact>,
    pub selected_artifact: Option<Artifact>,
    pub is_typing: bool,
    pub show_weather_card: bool,
    pub is_artifact_modal_open: bool,
    pub is_settings_open: bool,
    pub is_model_selector_open: bool,
    pub is_browser_open: bool,
    pub is_sidebar_open: bool,
    pub browser_url: String,
    pub island_mode: IslandMode,
    pub model_list_expanded: bool,
    pub is_recording: bool,
    pub show_welcome_island: bool,
    pub island_notification: IslandNotification,
    pub selected_model: String,
    pub selected_category: String,
    pub viewport: Viewport,
    pub device_type: DeviceType,
    pub layout: DeviceCategory,
    pub is_portrait: bool,
    pub is_landscape: bool,
}

pub struct Orchestrator {
    timing: TimingSettings,
    conversation_id: Uuid,
    log: MessageLog,
    artifacts: ArtifactRegistry,
    notifications: NotificationChannel,
    island: ModeController,
    view: ViewRouter,
    timers: Timers,
    rng: Box<dyn RngCore + Send>,
    events: Option<mpsc::UnboundedSender<StoreEvent>>,
    message_seq: u64,

    is_typing: bool,
    show_weather_card: bool,
    selected_artifact: Option<Artifact>,
    is_artifact_modal_open: bool,
    is_settings_open: bool,
    is_model_selector_open: bool,
    is_browser_open: bool,
    is_sidebar_open: bool,
    browser_url: String,
    is_recording: bool,
    island_visible: bool,
    selected_model: String,
    selected_category: String,
}

impl Orchestrator {
    pub fn new(timing: TimingSettings, preferences: Preferences) -> Self {
        let selected_model = if catalog::find_model(&preferences.selected_model).is_some() {
            preferences.selected_model
        } else {
            warn!(model = %preferences.selected_model, "unknown model in settings, using default");
            catalog::DEFAULT_MODEL.to_string()
        };
        let selected_category = if catalog::CATEGORIES.contains(&preferences.selected_category.as_str()) {
            preferences.selected_category
        } else {
            catalog::DEFAULT_CATEGORY.to_string()
        };

        Self {
            timing,
            conversation_id: Uuid::new_v4(),
            log: MessageLog::new(),
            artifacts: ArtifactRegistry::new(),
            notifications: NotificationChannel::new(),
            island: ModeController::new(),
            view: ViewRouter::new(),
            timers: Timers::new(),
            rng: Box::new(StdRng::from_entropy()),
            events: None,
            message_seq: 0,
            is_typing: false,
            show_weather_card: false,
            selected_artifact: None,
            is_artifact_modal_open: false,
            is_settings_open: false,
            is_model_selector_open: false,
            is_browser_open: false,
            is_sidebar_open: false,
            browser_url: String::new(),
            is_recording: false,
            island_visible: false,
            selected_model,
            selected_category,
        }
    }

    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(settings.timing.clone(), settings.preferences.clone())
    }

    /// Replace the random source used for generic replies
    pub fn with_rng(mut self, rng: Box<dyn RngCore + Send>) -> Self {
        self.rng = rng;
        self
    }

    /// Publish a [`StoreEvent`] for every observable change
    pub fn with_events(mut self, sender: mpsc::UnboundedSender<StoreEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }

    pub fn timing(&self) -> &TimingSettings {
        &self.timing
    }

    pub fn messages(&self) -> &[Message] {
        self.log.as_slice()
    }

    pub fn artifacts(&self) -> &ArtifactRegistry {
        &self.artifacts
    }

    /// Artifact referenced by a message. A dangling reference is logged and
    /// treated as "no preview".
    pub fn artifact_for(&self, message: &Message) -> Option<&Artifact> {
        let id = message.artifact_id.as_deref()?;
        let found = self.artifacts.get(id);
        if found.is_none() {
            warn!(message_id = %message.id, artifact_id = id, "message references a missing artifact");
        }
        found
    }

    pub fn notification(&self) -> &IslandNotification {
        self.notifications.current()
    }

    pub fn island_mode(&self) -> IslandMode {
        self.island.mode()
    }

    pub fn model_list_expanded(&self) -> bool {
        self.island.model_list_expanded()
    }

    pub fn current_view(&self) -> View {
        self.view.current()
    }

    pub fn show_welcome_island(&self) -> bool {
        self.view.show_welcome_island()
    }

    pub fn device_type(&self) -> DeviceType {
        self.view.device_type()
    }

    pub fn layout(&self) -> DeviceCategory {
        self.view.layout()
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn show_weather_card(&self) -> bool {
        self.show_weather_card
    }

    pub fn selected_artifact(&self) -> Option<&Artifact> {
        self.selected_artifact.as_ref()
    }

    pub fn is_artifact_modal_open(&self) -> bool {
        self.is_artifact_modal_open
    }

    pub fn is_settings_open(&self) -> bool {
        self.is_settings_open
    }

    pub fn is_model_selector_open(&self) -> bool {
        self.is_model_selector_open
    }

    pub fn is_sidebar_open(&self) -> bool {
        self.is_sidebar_open
    }

    pub fn is_browser_open(&self) -> bool {
        self.is_browser_open
    }

    pub fn browser_url(&self) -> &str {
        &self.browser_url
    }

    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    pub fn selected_model(&self) -> &str {
        &self.selected_model
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn pending_replies(&self) -> usize {
        self.timers.pending_replies()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            conversation_id: self.conversation_id,
            current_view: self.view.current(),
            messages: self.log.as_slice().to_vec(),
            artifacts: self.artifacts.iter().cloned().collect(),
            selected_artifact: self.selected_artifact.clone(),
            is_typing: self.is_typing,
            show_weather_card: self.show_weather_card,
            is_artifact_modal_open: self.is_artifact_modal_open,
            is_settings_open: self.is_settings_open,
            is_model_selector_open: self.is_model_selector_open,
            is_browser_open: self.is_browser_open,
            is_sidebar_open: self.is_sidebar_open,
            browser_url: self.browser_url.clone(),
            island_mode: self.island.mode(),
            model_list_expanded: self.island.model_list_expanded(),
            is_recording: self.is_recording,
            show_welcome_island: self.view.show_welcome_island(),
            island_notification: self.notifications.current().clone(),
            selected_model: self.selected_model.clone(),
            selected_category: self.selected_category.clone(),
            viewport: self.view.viewport(),
            device_type: self.view.device_type(),
            layout: self.view.layout(),
            is_portrait: self.view.viewport().is_portrait(),
            is_landscape: self.view.viewport().is_landscape(),
        }
    }

    // ------------------------------------------------------------------
    // Chat actions
    // ------------------------------------------------------------------

    pub fn add_message(&mut self, message: Message) {
        self.emit(StoreEvent::MessageAppended {
            message_id: message.id.clone(),
            is_user: message.is_user,
        });
        self.log.append(message);
    }

    /// Drop messages, artifacts and the weather card
    pub fn clear_messages(&mut self) {
        self.log.clear();
        self.artifacts.clear();
        self.show_weather_card = false;
    }

    pub fn set_typing(&mut self, is_typing: bool) {
        if self.is_typing != is_typing {
            self.is_typing = is_typing;
            self.emit(StoreEvent::TypingChanged { is_typing });
        }
    }

    /// Returns true if the artifact was new
    pub fn add_artifact(&mut self, artifact: Artifact) -> bool {
        let id = artifact.id.clone();
        let inserted = self.artifacts.upsert_if_absent(artifact);
        if inserted {
            self.emit(StoreEvent::ArtifactAdded { artifact_id: id });
        }
        inserted
    }

    pub fn set_show_weather_card(&mut self, show: bool) {
        self.show_weather_card = show;
    }

    /// Submit a user message and schedule the assistant's reply.
    ///
    /// The user message is appended before anything is scheduled, and the
    /// view switches to chat synchronously.
    pub fn send_message(&mut self, text: impl Into<String>, origin: Origin) {
        let text = text.into();
        let intent = dispatcher::classify(&text);
        debug!(origin = origin.as_str(), intent = intent.as_str(), "dispatching message");

        let (id, now) = self.next_message_id();
        self.add_message(Message::user(id, text.as_str(), now));

        if self.view.current() != View::Chat {
            self.handle_start_chat();
        }

        if origin == Origin::Island {
            if self.island.mode() == IslandMode::Input {
                self.transition(IslandEvent::MessageSubmitted);
            }
            self.transition(IslandEvent::ProcessingStarted);
            self.show_notification(
                "Processing your request...",
                IslandMessageType::Loading,
                Some(Duration::ZERO),
            );
        }

        self.set_typing(true);

        if intent == Intent::OpenBrowser {
            self.show_notification(
                "Opening browser...",
                IslandMessageType::Browser,
                Some(Duration::ZERO),
            );
        }

        self.timers.schedule_reply(
            intent.delay(&self.timing),
            Deferred::Reply {
                intent,
                origin,
                wants_image: dispatcher::wants_image(&text),
            },
        );
    }

    fn deliver_reply(&mut self, intent: Intent, origin: Origin, wants_image: bool) {
        let (id, now) = self.next_message_id();

        match intent {
            Intent::Weather => {
                let text = intent.canned_reply().unwrap_or_default();
                self.add_message(Message::assistant(id, text, now));
                self.show_weather_card = true;
            }
            Intent::OpenBrowser => {
                if origin == Origin::Island {
                    self.transition(IslandEvent::Reset);
                }
                let dismiss = self.timing.browser_success_dismiss();
                self.show_notification("Browser opened!", IslandMessageType::Success, Some(dismiss));
                self.open_browser(catalog::BROWSER_HOME_URL);
                let text = intent.canned_reply().unwrap_or_default();
                self.add_message(Message::assistant(id, text, now));
            }
            Intent::Todo | Intent::Code | Intent::Poem | Intent::General => {
                let text = match intent.canned_reply() {
                    Some(text) => text.to_string(),
                    None => self.pick_acknowledgement().to_string(),
                };
                let mut reply = Message::assistant(id, text, now)
                    .with_image(wants_image && intent.allows_image());
                if let Some(artifact) = intent.artifact() {
                    let artifact_id = artifact.id.clone();
                    self.add_artifact(artifact);
                    reply = reply.with_artifact(artifact_id);
                }
                self.add_message(reply);
            }
        }

        self.set_typing(false);

        // The browser branch leaves its success notification up
        if origin == Origin::Island && intent != Intent::OpenBrowser {
            self.transition(IslandEvent::Reset);
            self.hide_notification();
        }
    }

    fn pick_acknowledgement(&mut self) -> &'static str {
        let index = self.rng.gen_range(0..catalog::ACKNOWLEDGEMENTS.len());
        catalog::ACKNOWLEDGEMENTS[index]
    }

    /// Wipe the conversation and return to the home screen.
    ///
    /// Pending replies belong to the discarded conversation and are cancelled.
    pub fn start_new_chat(&mut self) {
        let dropped = self.timers.cancel_replies();
        self.timers.cancel(Slot::FeatureOpen);
        self.timers.cancel(Slot::RecordingLimit);
        self.is_recording = false;

        self.clear_messages();
        self.selected_artifact = None;
        self.is_artifact_modal_open = false;
        self.set_typing(false);

        if self.view.reset() {
            self.emit(StoreEvent::ViewChanged { view: View::Home });
        }
        self.hide_notification();
        self.transition(IslandEvent::Reset);

        self.conversation_id = Uuid::new_v4();
        info!(conversation_id = %self.conversation_id, dropped_replies = dropped, "started new chat");
        self.emit(StoreEvent::ConversationReset {
            conversation_id: self.conversation_id,
        });
    }

    // ------------------------------------------------------------------
    // View actions
    // ------------------------------------------------------------------

    pub fn set_current_view(&mut self, view: View) {
        if self.view.set_view(view) {
            self.emit(StoreEvent::ViewChanged { view });
        }
    }

    /// Home -> Chat; hides the welcome island
    pub fn handle_start_chat(&mut self) {
        if self.view.start_chat() {
            self.emit(StoreEvent::ViewChanged { view: View::Chat });
        }
    }

    pub fn set_show_welcome_island(&mut self, show: bool) {
        self.view.set_show_welcome_island(show);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) -> DeviceType {
        let device = self.view.set_viewport(width, height);
        debug!(width, height, device = device.as_str(), "viewport changed");
        device
    }

    /// Feature card tapped on the home screen
    pub fn handle_feature_click(&mut self, feature: &str, kind: Option<IslandMessageType>) {
        let kind = kind.unwrap_or(IslandMessageType::Chat);
        let dismiss = self.timing.feature_dismiss();
        self.show_notification(format!("Opening {}...", feature), kind, Some(dismiss));
        self.timers.arm(
            Slot::FeatureOpen,
            self.timing.feature_open_delay(),
            Deferred::StartChat,
        );
    }

    // ------------------------------------------------------------------
    // Modal actions
    // ------------------------------------------------------------------

    pub fn open_artifact_modal(&mut self, artifact: Artifact) {
        self.emit(StoreEvent::ArtifactViewerOpened {
            artifact_id: artifact.id.clone(),
        });
        self.selected_artifact = Some(artifact);
        self.is_artifact_modal_open = true;
    }

    pub fn close_artifact_modal(&mut self) {
        self.is_artifact_modal_open = false;
        self.selected_artifact = None;
    }

    /// Open the viewer for a registered artifact. Unknown ids are ignored.
    pub fn handle_view_artifact(&mut self, artifact_id: &str) -> bool {
        match self.artifacts.get(artifact_id).cloned() {
            Some(artifact) => {
                self.open_artifact_modal(artifact);
                true
            }
            None => {
                debug!(artifact_id, "view requested for unknown artifact");
                false
            }
        }
    }

    /// `None` flips the flag, `Some(v)` sets it
    pub fn toggle_settings(&mut self, open: Option<bool>) {
        self.is_settings_open = open.unwrap_or(!self.is_settings_open);
    }

    pub fn toggle_model_selector(&mut self, open: Option<bool>) {
        self.is_model_selector_open = open.unwrap_or(!self.is_model_selector_open);
    }

    pub fn toggle_sidebar(&mut self, open: Option<bool>) {
        self.is_sidebar_open = open.unwrap_or(!self.is_sidebar_open);
    }

    pub fn open_browser(&mut self, url: impl Into<String>) {
        let url = url.into();
        self.is_browser_open = true;
        self.browser_url = url.clone();
        self.emit(StoreEvent::BrowserOpened { url });
    }

    pub fn close_browser(&mut self) {
        let was_open = std::mem::replace(&mut self.is_browser_open, false);
        self.browser_url.clear();
        if was_open {
            self.emit(StoreEvent::BrowserClosed);
        }
    }

    // ------------------------------------------------------------------
    // Preferences
    // ------------------------------------------------------------------

    /// Only catalog models are accepted
    pub fn set_selected_model(&mut self, model: &str) -> bool {
        if catalog::find_model(model).is_none() {
            debug!(model, "ignoring unknown model");
            return false;
        }
        self.selected_model = model.to_string();
        self.transition(IslandEvent::ModelChosen);
        true
    }

    pub fn set_selected_category(&mut self, category: &str) -> bool {
        match catalog::CATEGORIES.iter().find(|c| c.eq_ignore_ascii_case(category)) {
            Some(found) => {
                self.selected_category = found.to_string();
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Island actions
    // ------------------------------------------------------------------

    /// Whether the island is on screen; the inactivity timer only runs while
    /// it is
    pub fn set_island_visible(&mut self, visible: bool) {
        self.island_visible = visible;
        if !visible {
            self.timers.cancel(Slot::IslandMode);
        } else if self.island.mode() == IslandMode::Idle {
            self.timers.arm(
                Slot::IslandMode,
                self.timing.auto_compact(),
                Deferred::InactivityElapsed,
            );
        }
    }

    /// Feed a raw island event. Returns false if the event was ignored.
    pub fn island_event(&mut self, event: IslandEvent) -> bool {
        self.transition(event)
    }

    pub fn open_composer(&mut self) -> bool {
        // The store is always able to send
        self.transition(IslandEvent::OpenComposer { can_send: true })
    }

    pub fn close_composer(&mut self) -> bool {
        self.transition(IslandEvent::CloseComposer)
    }

    /// Voice button inside the island; capture itself starts with
    /// [`Self::handle_voice_click`]
    pub fn open_island_voice(&mut self) -> bool {
        self.transition(IslandEvent::VoicePressed)
    }

    pub fn open_island_model_selector(&mut self) -> bool {
        self.transition(IslandEvent::OpenModelSelector)
    }

    pub fn toggle_model_list(&mut self) -> bool {
        self.transition(IslandEvent::ToggleModelList)
    }

    pub fn enter_rich_mode(&mut self, mode: RichMode) -> bool {
        self.transition(IslandEvent::Enter(mode))
    }

    /// Close whatever the island shows. Dismissing a voice capture stops it.
    pub fn dismiss_island(&mut self) -> bool {
        if self.is_recording {
            self.handle_voice_click();
            return true;
        }
        self.transition(IslandEvent::Dismiss)
    }

    /// Replace the current notification. `None` uses the default dismiss
    /// delay; a zero delay keeps it up until hidden.
    pub fn show_notification(
        &mut self,
        message: impl Into<String>,
        kind: IslandMessageType,
        dismiss_delay: Option<Duration>,
    ) {
        let message = message.into();
        let delay = dismiss_delay.unwrap_or_else(|| self.timing.default_dismiss());

        match self.notifications.show(message.clone(), kind, delay) {
            Some(delay) => {
                self.timers
                    .arm(Slot::NotificationDismiss, delay, Deferred::HideNotification)
            }
            None => {
                self.timers.cancel(Slot::NotificationDismiss);
            }
        }

        self.emit(StoreEvent::NotificationShown { message, kind });
        self.transition(IslandEvent::NotificationShown);
    }

    pub fn hide_notification(&mut self) {
        self.timers.cancel(Slot::NotificationDismiss);
        if self.notifications.hide() {
            self.emit(StoreEvent::NotificationHidden);
        }
        self.transition(IslandEvent::NotificationHidden);
    }

    /// Same as toggling the voice button until `is_recording` matches
    pub fn set_recording(&mut self, recording: bool) {
        if self.is_recording != recording {
            self.handle_voice_click();
        }
    }

    /// Start or stop voice capture.
    ///
    /// Starting enters the wake-word phase, which becomes listening after
    /// the wake delay; the capture stops by itself after the recording limit.
    pub fn handle_voice_click(&mut self) {
        if self.is_recording {
            self.is_recording = false;
            self.timers.cancel(Slot::RecordingLimit);
            self.transition(IslandEvent::StopRecording);
            self.hide_notification();
            debug!("voice capture stopped");
            return;
        }

        if !self.transition(IslandEvent::WakeStarted) {
            return;
        }
        self.is_recording = true;

        if self.view.current() == View::Home {
            self.handle_start_chat();
        }

        self.show_notification("Awakening...", IslandMessageType::Loading, Some(Duration::ZERO));
        self.timers.arm(
            Slot::RecordingLimit,
            self.timing.max_recording(),
            Deferred::RecordingTimedOut,
        );
        debug!("voice capture started");
    }

    // ------------------------------------------------------------------
    // Deferred effects
    // ------------------------------------------------------------------

    /// Apply every effect that has already fired. Returns how many ran.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Some(effect) = self.timers.try_next() {
            self.apply(effect);
            applied += 1;
        }
        applied
    }

    /// Wait for the next effect and apply it
    pub async fn step(&mut self) -> Deferred {
        let effect = self.timers.next().await;
        self.apply(effect.clone());
        effect
    }

    /// Apply effects as they fire until `deadline`
    pub async fn run_until(&mut self, deadline: tokio::time::Instant) {
        loop {
            let fired = tokio::time::timeout_at(deadline, self.timers.next()).await;
            match fired {
                Ok(effect) => self.apply(effect),
                Err(_) => break,
            }
        }
        self.apply_pending();
    }

    pub async fn run_for(&mut self, duration: Duration) {
        self.run_until(tokio::time::Instant::now() + duration).await;
    }

    fn apply(&mut self, effect: Deferred) {
        trace!(?effect, "applying deferred effect");
        match effect {
            Deferred::HideNotification => self.hide_notification(),
            Deferred::InactivityElapsed => {
                self.transition(IslandEvent::InactivityElapsed);
            }
            Deferred::WakeConfirmed => {
                if self.transition(IslandEvent::WakeConfirmed) {
                    self.show_notification(
                        "Listening...",
                        IslandMessageType::Loading,
                        Some(Duration::ZERO),
                    );
                }
            }
            Deferred::RecordingTimedOut => {
                self.is_recording = false;
                self.transition(IslandEvent::RecordingTimedOut);
                self.hide_notification();
                debug!("voice capture hit the recording limit");
            }
            Deferred::StartChat => self.handle_start_chat(),
            Deferred::Reply {
                intent,
                origin,
                wants_image,
            } => self.deliver_reply(intent, origin, wants_image),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn transition(&mut self, event: IslandEvent) -> bool {
        let from = self.island.mode();
        match self.island.apply(event) {
            None => {
                trace!(?event, mode = %from, "island event ignored");
                false
            }
            Some(to) => {
                if to != from {
                    self.on_mode_entered(from, to);
                }
                true
            }
        }
    }

    fn on_mode_entered(&mut self, from: IslandMode, to: IslandMode) {
        debug!(%from, %to, "island mode changed");
        self.timers.cancel(Slot::IslandMode);
        match to {
            IslandMode::Idle if self.island_visible => self.timers.arm(
                Slot::IslandMode,
                self.timing.auto_compact(),
                Deferred::InactivityElapsed,
            ),
            IslandMode::Awakening => self.timers.arm(
                Slot::IslandMode,
                self.timing.wake_delay(),
                Deferred::WakeConfirmed,
            ),
            _ => {}
        }
        self.emit(StoreEvent::ModeChanged { from, to });
    }

    fn next_message_id(&mut self) -> (String, i64) {
        let now = Utc::now().timestamp_millis();
        self.message_seq += 1;
        (format!("{}-{}", now, self.message_seq), now)
    }

    fn emit(&self, event: StoreEvent) {
        if let Some(ref sender) = self.events {
            // Receiver may have gone away
            let _ = sender.send(event);
        }
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(TimingSettings::default(), Preferences::default())
    }
}
