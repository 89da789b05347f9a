//! Chat message and artifact types.
//!
//! Messages are immutable once created and only ever appended to the
//! conversation. Artifacts are rich content blocks a message may point at by
//! id; the message never owns the artifact.

use serde::{Deserialize, Serialize};

/// A single chat message (user or assistant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub text: String,
    pub is_user: bool,
    /// Rendering hint: show the stock image gallery under this reply
    #[serde(default)]
    pub has_image: bool,
    /// Weak reference into the artifact registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    /// Unix epoch millis
    pub timestamp: i64,
}

impl Message {
    pub fn user(id: impl Into<String>, text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_user: true,
            has_image: false,
            artifact_id: None,
            timestamp,
        }
    }

    pub fn assistant(id: impl Into<String>, text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_user: false,
            has_image: false,
            artifact_id: None,
            timestamp,
        }
    }

    pub fn with_artifact(mut self, artifact_id: impl Into<String>) -> Self {
        self.artifact_id = Some(artifact_id.into());
        self
    }

    pub fn with_image(mut self, has_image: bool) -> Self {
        self.has_image = has_image;
        self
    }
}

/// What kind of content an artifact carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    Code,
    Html,
    Document,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Code => "code",
            ArtifactKind::Html => "html",
            ArtifactKind::Document => "document",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A generated content block shown in the artifact viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ArtifactKind,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Artifact {
    pub fn new(
        id: impl Into<String>,
        kind: ArtifactKind,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            content: content.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// First few lines of content, for collapsed previews
    pub fn preview(&self, max_lines: usize) -> String {
        let lines: Vec<&str> = self.content.lines().take(max_lines).collect();
        let mut preview = lines.join("\n");
        if self.content.lines().count() > max_lines {
            preview.push_str("\n...");
        }
        preview
    }
}

/// UI surface that initiated a send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Island,
    #[default]
    Chat,
    Voice,
    Fab,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Island => "island",
            Origin::Chat => "chat",
            Origin::Voice => "voice",
            Origin::Fab => "fab",
        }
    }
}
