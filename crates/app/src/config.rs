//! Settings file location and persistence.

use anyhow::{Context, Result};
use shared::settings::AppSettings;
use std::path::{Path, PathBuf};

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut p| {
        p.push("umbric");
        p.push("settings.json");
        p
    })
}

/// Read settings from `path`. A missing file is `Ok(None)`; a file that
/// exists but doesn't parse is an error.
pub fn load_settings(path: &Path) -> Result<Option<AppSettings>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
    };
    let settings = serde_json::from_str::<AppSettings>(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(settings))
}

pub fn save_settings(path: &Path, settings: &AppSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        assert!(load_settings(&path).unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = AppSettings::default();
        settings.preferences.selected_model = "vexla-pro".into();
        settings.timing.auto_compact_ms = 9000;
        save_settings(&path, &settings).unwrap();

        let loaded = load_settings(&path).unwrap().unwrap();
        assert_eq!(loaded.preferences.selected_model, "vexla-pro");
        assert_eq!(loaded.timing.auto_compact_ms, 9000);
    }

    #[test]
    fn test_garbage_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse"));
    }

    #[test]
    fn test_config_path_ends_in_app_dir() {
        if let Some(path) = config_path() {
            assert!(path.ends_with("umbric/settings.json"));
        }
    }
}
