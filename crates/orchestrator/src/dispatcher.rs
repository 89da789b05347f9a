//! Response dispatcher rules.
//!
//! Intent classification is an ordered rule table over the lowercased
//! message; the first matching rule wins. Anything unmatched is a general
//! chat reply.

use crate::catalog;
use shared::conversation::Artifact;
use shared::settings::TimingSettings;
use std::time::Duration;

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Weather,
    OpenBrowser,
    Todo,
    Code,
    Poem,
    General,
}

struct Rule {
    intent: Intent,
    matches: fn(&str) -> bool,
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

fn is_weather(text: &str) -> bool {
    contains_any(text, &["weather", "temperature", "forecast"])
}

fn is_browser(text: &str) -> bool {
    text.contains("open") && contains_any(text, &["youtube", "website", "browser"])
}

fn is_todo(text: &str) -> bool {
    contains_any(text, &["todo", "task"])
}

fn is_code(text: &str) -> bool {
    contains_any(text, &["code", "component", "react"])
}

fn is_poem(text: &str) -> bool {
    contains_any(text, &["poem", "poetry"])
}

// Order matters. Todo sits above code so "code for my todo list" builds the
// todo app.
const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Weather,
        matches: is_weather,
    },
    Rule {
        intent: Intent::OpenBrowser,
        matches: is_browser,
    },
    Rule {
        intent: Intent::Todo,
        matches: is_todo,
    },
    Rule {
        intent: Intent::Code,
        matches: is_code,
    },
    Rule {
        intent: Intent::Poem,
        matches: is_poem,
    },
];

/// Classify a message. Case-insensitive.
pub fn classify(text: &str) -> Intent {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find(|rule| (rule.matches)(&lower))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::General)
}

/// Whether the request asks for a picture (gallery hint on the reply)
pub fn wants_image(text: &str) -> bool {
    let lower = text.to_lowercase();
    contains_any(&lower, &["image", "picture"])
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Weather => "weather",
            Intent::OpenBrowser => "open-browser",
            Intent::Todo => "todo",
            Intent::Code => "code",
            Intent::Poem => "poem",
            Intent::General => "general",
        }
    }

    /// Simulated latency before the reply lands
    pub fn delay(&self, timing: &TimingSettings) -> Duration {
        match self {
            Intent::OpenBrowser => timing.browser_delay(),
            _ => timing.reply_delay(),
        }
    }

    /// Artifact attached to the reply, if the intent produces one
    pub fn artifact(&self) -> Option<Artifact> {
        match self {
            Intent::Todo => Some(catalog::todo_app()),
            Intent::Code => Some(catalog::react_component()),
            Intent::Poem => Some(catalog::poem()),
            Intent::Weather | Intent::OpenBrowser | Intent::General => None,
        }
    }

    /// Fixed reply text; `None` for general chat, which draws from the
    /// acknowledgement pool
    pub fn canned_reply(&self) -> Option<&'static str> {
        match self {
            Intent::Weather => Some("Here's the current weather information for you:"),
            Intent::OpenBrowser => {
                Some("I've opened the browser for you. You can now browse YouTube.")
            }
            Intent::Todo => {
                Some("Here's a complete Todo List application with HTML, CSS, and JavaScript:")
            }
            Intent::Code => Some(
                "I've created a React counter component for you. Check out the artifact below:",
            ),
            Intent::Poem => Some("I've written a poem for you. Here it is:"),
            Intent::General => None,
        }
    }

    /// Replies from the generic branch may carry the image gallery hint
    pub fn allows_image(&self) -> bool {
        matches!(
            self,
            Intent::Todo | Intent::Code | Intent::Poem | Intent::General
        )
    }
}
