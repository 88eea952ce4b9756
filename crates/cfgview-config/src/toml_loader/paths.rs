//! Settings path resolution and default file creation.

use cfgview_common::ConfigError;
use std::path::{Path, PathBuf};
use tracing::info;

use super::template::default_settings_toml;
use crate::schema::SETTINGS_FILE_NAME;

/// Platform-specific default settings file path.
pub fn default_settings_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("cfgview").join(SETTINGS_FILE_NAME))
}

/// Write the documented default settings file, creating parent
/// directories as needed.
pub fn create_default_settings(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_settings_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default settings to {}: {e}",
            path.display()
        ))
    })?;

    info!(path = %path.display(), "created default settings");
    Ok(())
}
