//! Artifact registry: first write wins.

use shared::conversation::Artifact;

#[derive(Debug, Default, Clone)]
pub struct ArtifactRegistry {
    artifacts: Vec<Artifact>,
}

impl ArtifactRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless an artifact with the same id already exists.
    /// Returns true if the artifact was inserted.
    pub fn upsert_if_absent(&mut self, artifact: Artifact) -> bool {
        if self.contains(&artifact.id) {
            return false;
        }
        self.artifacts.push(artifact);
        true
    }

    pub fn get(&self, id: &str) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.artifacts.iter().any(|a| a.id == id)
    }

    pub fn clear(&mut self) {
        self.artifacts.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
