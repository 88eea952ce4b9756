//! Write viewer settings to TOML on disk.
//!
//! Writes go to a `.tmp` sibling first and are renamed into place, so the
//! watcher never reloads a half-written file.

use std::path::Path;

use cfgview_common::ConfigError;
use tracing::{debug, warn};

use crate::schema::ViewerSettings;
use crate::toml_loader::default_settings_path;

/// Write settings to the platform default path.
pub fn save_settings(settings: &ViewerSettings) -> Result<(), ConfigError> {
    save_settings_to_path(settings, &default_settings_path()?)
}

/// Write settings to a specific path, creating parent directories.
pub fn save_settings_to_path(settings: &ViewerSettings, path: &Path) -> Result<(), ConfigError> {
    let toml_str = toml::to_string_pretty(settings)
        .map_err(|e| ConfigError::ParseError(format!("failed to serialize settings: {e}")))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, &toml_str).map_err(|e| {
        ConfigError::ParseError(format!("failed to write {}: {e}", tmp_path.display()))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        // Windows refuses to rename over an open file.
        warn!(error = %e, "atomic rename failed, falling back to direct write");
        std::fs::write(path, &toml_str).map_err(|e2| {
            ConfigError::ParseError(format!("failed to write {}: {e2}", path.display()))
        })?;
        let _ = std::fs::remove_file(&tmp_path);
    }

    debug!(path = %path.display(), "settings saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toml_loader::load_from_path;
    use tempfile::TempDir;

    fn custom() -> ViewerSettings {
        ViewerSettings {
            flat_switch: true,
            simplify: false,
            highlight: false,
            color_scheme: r##"{"version":1,"scheme":[{"name":"node.default","hex":"#010203"}]}"##
                .into(),
        }
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        save_settings_to_path(&custom(), &path).unwrap();
        assert_eq!(load_from_path(&path).unwrap(), custom());
    }

    #[test]
    fn save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("settings.toml");

        save_settings_to_path(&ViewerSettings::default(), &path).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("simplify = true"));
    }

    #[test]
    fn save_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "simplify = true").unwrap();

        save_settings_to_path(&custom(), &path).unwrap();
        assert!(!load_from_path(&path).unwrap().simplify);
    }

    #[test]
    fn save_cleans_up_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        save_settings_to_path(&ViewerSettings::default(), &path).unwrap();
        assert!(!path.with_extension("toml.tmp").exists());
    }
}
