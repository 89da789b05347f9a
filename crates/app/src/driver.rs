//! Line-oriented chat driver.
//!
//! Each stdin line becomes one store action. After an action the driver lets
//! timers run for the reply window and prints whatever changed; while it
//! waits for input, timers keep firing and their effects are printed as they
//! land.

use anyhow::Result;
use orchestrator::catalog;
use orchestrator::Orchestrator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::conversation::{Message, Origin};
use shared::events::StoreEvent;
use shared::settings::AppSettings;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config;

// Lets a reply due exactly at the end of the window land inside it
const WINDOW_SLACK: Duration = Duration::from_millis(50);

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send { text: String, origin: Origin },
    Voice,
    NewChat,
    StartChat,
    Feature(String),
    ViewArtifact(String),
    Settings,
    Sidebar,
    Models,
    Model(String),
    Category(String),
    CloseBrowser,
    Wait(Duration),
    State,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

const HELP: &str = "\
commands:
  <text>               send from the chat composer
  /island <text>       send from the island composer
  /fab <text>          send from the floating button
  /voice-send <text>   send a voice transcript
  /voice               start or stop voice capture
  /new                 start a new chat
  /start               open the chat view
  /feature <name>      tap a home-screen feature card
  /view <artifact-id>  open the artifact viewer
  /settings            toggle the settings modal
  /sidebar             toggle the sidebar
  /models              list models
  /model <id>          select a model
  /category <name>     select a category
  /close-browser       close the browser overlay
  /wait <ms>           let timers run
  /state               print a JSON snapshot
  /quit";

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    if !line.starts_with('/') {
        return Command::Send {
            text: line.to_string(),
            origin: Origin::Chat,
        };
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let needs_arg = |cmd: Command| {
        if rest.is_empty() {
            Command::Invalid(format!("{} needs an argument", name))
        } else {
            cmd
        }
    };
    let send = |origin| Command::Send {
        text: rest.to_string(),
        origin,
    };

    match name {
        "/island" => needs_arg(send(Origin::Island)),
        "/fab" => needs_arg(send(Origin::Fab)),
        "/voice-send" => needs_arg(send(Origin::Voice)),
        "/voice" => Command::Voice,
        "/new" => Command::NewChat,
        "/start" => Command::StartChat,
        "/feature" => needs_arg(Command::Feature(rest.to_string())),
        "/view" => needs_arg(Command::ViewArtifact(rest.to_string())),
        "/settings" => Command::Settings,
        "/sidebar" => Command::Sidebar,
        "/models" => Command::Models,
        "/model" => needs_arg(Command::Model(rest.to_string())),
        "/category" => needs_arg(Command::Category(rest.to_string())),
        "/close-browser" => Command::CloseBrowser,
        "/wait" => match rest.parse::<u64>() {
            Ok(ms) => Command::Wait(Duration::from_millis(ms)),
            Err(_) => Command::Invalid("/wait takes a number of milliseconds".to_string()),
        },
        "/state" => Command::State,
        "/help" => Command::Help,
        "/quit" | "/exit" => Command::Quit,
        other => Command::Invalid(format!("unknown command {}", other)),
    }
}

pub struct Driver<W: Write> {
    store: Orchestrator,
    events: mpsc::UnboundedReceiver<StoreEvent>,
    settings: AppSettings,
    settings_path: Option<PathBuf>,
    out: W,
}

impl<W: Write> Driver<W> {
    pub fn new(
        settings: AppSettings,
        settings_path: Option<PathBuf>,
        seed: Option<u64>,
        out: W,
    ) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        let mut store = Orchestrator::from_settings(&settings).with_events(tx);
        if let Some(seed) = seed {
            store = store.with_rng(Box::new(StdRng::seed_from_u64(seed)));
        }
        Self {
            store,
            events,
            settings,
            settings_path,
            out,
        }
    }

    pub fn store_mut(&mut self) -> &mut Orchestrator {
        &mut self.store
    }

    /// Handle one input line. Returns false when the session should end.
    pub async fn handle_line(&mut self, line: &str) -> Result<bool> {
        let command = parse_command(line);
        debug!(?command, "driver command");

        let window = self.store.timing().longest_reply() + WINDOW_SLACK;
        match command {
            Command::Empty => return Ok(true),
            Command::Quit => return Ok(false),
            Command::Help => {
                writeln!(self.out, "{}", HELP)?;
                return Ok(true);
            }
            Command::Invalid(reason) => {
                writeln!(self.out, "! {}", reason)?;
                return Ok(true);
            }
            Command::State => {
                let snapshot = serde_json::to_string_pretty(&self.store.snapshot())?;
                writeln!(self.out, "{}", snapshot)?;
                return Ok(true);
            }
            Command::Models => {
                for model in catalog::MODELS {
                    let marker = if model.id == self.store.selected_model() { "*" } else { " " };
                    writeln!(self.out, "{} {:<12} {}", marker, model.id, model.description)?;
                }
                return Ok(true);
            }
            Command::Wait(duration) => {
                self.store.run_for(duration).await;
                self.flush()?;
                return Ok(true);
            }
            Command::Send { text, origin } => self.store.send_message(text, origin),
            Command::Voice => self.store.handle_voice_click(),
            Command::NewChat => self.store.start_new_chat(),
            Command::StartChat => self.store.handle_start_chat(),
            Command::Feature(name) => match catalog::find_feature(&name) {
                Some(feature) => self.store.handle_feature_click(feature.title, Some(feature.kind)),
                None => writeln!(self.out, "! unknown feature {}", name)?,
            },
            Command::ViewArtifact(id) => {
                if self.store.handle_view_artifact(&id) {
                    self.print_artifact()?;
                } else {
                    writeln!(self.out, "! no artifact {}", id)?;
                }
            }
            Command::Settings => {
                self.store.toggle_settings(None);
                writeln!(self.out, "* settings {}", open_closed(self.store.is_settings_open()))?;
            }
            Command::Sidebar => {
                self.store.toggle_sidebar(None);
                writeln!(self.out, "* sidebar {}", open_closed(self.store.is_sidebar_open()))?;
            }
            Command::Model(id) => {
                if self.store.set_selected_model(&id) {
                    self.settings.preferences.selected_model = id;
                    self.persist_preferences();
                } else {
                    writeln!(self.out, "! unknown model {}", id)?;
                }
            }
            Command::Category(name) => {
                if self.store.set_selected_category(&name) {
                    self.settings.preferences.selected_category =
                        self.store.selected_category().to_string();
                    self.persist_preferences();
                } else {
                    writeln!(self.out, "! unknown category {}", name)?;
                }
            }
            Command::CloseBrowser => self.store.close_browser(),
        }

        self.flush()?;
        self.store.run_for(window).await;
        self.flush()?;
        Ok(true)
    }

    /// Print every event published since the last flush
    pub fn flush(&mut self) -> Result<()> {
        while let Ok(event) = self.events.try_recv() {
            match event {
                StoreEvent::MessageAppended { message_id, .. } => {
                    let found = self
                        .store
                        .messages()
                        .iter()
                        .rev()
                        .find(|m| m.id == message_id)
                        .cloned();
                    if let Some(message) = found {
                        self.print_message(&message)?;
                    }
                }
                // Covered by the message itself
                StoreEvent::TypingChanged { .. } | StoreEvent::ArtifactAdded { .. } => {}
                other => writeln!(self.out, "* {}", other.describe())?,
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn print_message(&mut self, message: &Message) -> Result<()> {
        if message.is_user {
            writeln!(self.out, "> you: {}", message.text)?;
            return Ok(());
        }

        let name = catalog::model_display_name(self.store.selected_model());
        writeln!(self.out, "< {}: {}", name, message.text)?;
        if let Some(artifact) = self.store.artifact_for(message) {
            writeln!(
                self.out,
                "    [{} artifact \"{}\", /view {}]",
                artifact.kind, artifact.title, artifact.id
            )?;
        }
        if message.has_image {
            writeln!(self.out, "    [{} images]", catalog::LANDSCAPE_IMAGES.len())?;
        }
        Ok(())
    }

    fn print_artifact(&mut self) -> Result<()> {
        if let Some(artifact) = self.store.selected_artifact() {
            let language = artifact.language.as_deref().unwrap_or(artifact.kind.as_str());
            writeln!(self.out, "--- {} ({}) ---", artifact.title, language)?;
            writeln!(self.out, "{}", artifact.preview(12))?;
        }
        self.store.close_artifact_modal();
        Ok(())
    }

    fn persist_preferences(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = config::save_settings(path, &self.settings) {
            warn!("failed to save preferences: {:#}", e);
        }
    }
}

fn open_closed(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}

/// Interactive session over stdin/stdout
pub async fn run(
    settings: AppSettings,
    settings_path: Option<PathBuf>,
    viewport: (u32, u32),
    seed: Option<u64>,
) -> Result<()> {
    let mut driver = Driver::new(settings, settings_path, seed, std::io::stdout());
    let device = driver.store_mut().set_viewport(viewport.0, viewport.1);
    driver.store_mut().set_island_visible(true);
    writeln!(
        driver.out,
        "umbric ({} layout), /help for commands",
        device.category().as_str()
    )?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !driver.handle_line(&line).await? {
                    break;
                }
            }
            _ = driver.store.step() => {
                driver.flush()?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> Driver<Vec<u8>> {
        Driver::new(AppSettings::default(), None, Some(3), Vec::new())
    }

    fn output(driver: Driver<Vec<u8>>) -> String {
        String::from_utf8(driver.out).unwrap()
    }

    #[test]
    fn test_parse_plain_text_sends_from_chat() {
        assert_eq!(
            parse_command("  hello there "),
            Command::Send {
                text: "hello there".into(),
                origin: Origin::Chat
            }
        );
        assert_eq!(parse_command("   "), Command::Empty);
    }

    #[test]
    fn test_parse_origin_commands() {
        assert_eq!(
            parse_command("/island what's the weather"),
            Command::Send {
                text: "what's the weather".into(),
                origin: Origin::Island
            }
        );
        assert_eq!(
            parse_command("/voice-send open youtube"),
            Command::Send {
                text: "open youtube".into(),
                origin: Origin::Voice
            }
        );
        assert!(matches!(parse_command("/fab"), Command::Invalid(_)));
    }

    #[test]
    fn test_parse_misc_commands() {
        assert_eq!(parse_command("/voice"), Command::Voice);
        assert_eq!(parse_command("/wait 250"), Command::Wait(Duration::from_millis(250)));
        assert!(matches!(parse_command("/wait soon"), Command::Invalid(_)));
        assert_eq!(
            parse_command("/feature Code Helper"),
            Command::Feature("Code Helper".into())
        );
        assert_eq!(parse_command("/model vexla-pro"), Command::Model("vexla-pro".into()));
        assert!(matches!(parse_command("/dance"), Command::Invalid(_)));
        assert_eq!(parse_command("/quit"), Command::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chat_line_prints_reply_with_artifact() {
        let mut driver = driver();
        assert!(driver.handle_line("write a poem please").await.unwrap());

        let out = output(driver);
        assert!(out.contains("> you: write a poem please"));
        assert!(out.contains("< Vexla Ultra: I've written a poem for you. Here it is:"));
        assert!(out.contains("/view poem"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_browser_flow_prints_notifications() {
        let mut driver = driver();
        driver.handle_line("/fab open youtube please").await.unwrap();

        let out = output(driver);
        assert!(out.contains("Opening browser..."));
        assert!(out.contains("Browser opened!"));
        assert!(out.contains("You can now browse YouTube."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_view_and_model_commands() {
        let mut driver = driver();
        driver.handle_line("build a react component").await.unwrap();
        driver.handle_line("/view react-component").await.unwrap();
        driver.handle_line("/view nothing").await.unwrap();
        driver.handle_line("/model vexla-max").await.unwrap();
        driver.handle_line("/model nope").await.unwrap();
        assert_eq!(driver.store.selected_model(), "vexla-max");
        assert!(!driver.store.is_artifact_modal_open());

        let out = output(driver);
        assert!(out.contains("(tsx) ---"));
        assert!(out.contains("! no artifact nothing"));
        assert!(out.contains("! unknown model nope"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_model_choice_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut driver = Driver::new(AppSettings::default(), Some(path.clone()), None, Vec::new());

        driver.handle_line("/model vexla").await.unwrap();
        driver.handle_line("/category fun").await.unwrap();

        let saved = config::load_settings(&path).unwrap().unwrap();
        assert_eq!(saved.preferences.selected_model, "vexla");
        assert_eq!(saved.preferences.selected_category, "Fun");
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_and_state() {
        let mut driver = driver();
        assert!(driver.handle_line("/state").await.unwrap());
        assert!(!driver.handle_line("/quit").await.unwrap());

        let out = output(driver);
        assert!(out.contains("\"island_mode\": \"idle\""));
    }
}
