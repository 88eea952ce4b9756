//! Core TOML settings loading: read from a path or the platform default.

use crate::schema::ViewerSettings;
use crate::validation;
use cfgview_common::ConfigError;
use std::path::Path;
use tracing::{info, warn};

use super::paths::{create_default_settings, default_settings_path};

/// Load settings from a specific TOML file.
///
/// Missing fields take their defaults. Validation failures are logged and
/// the parsed settings are returned as-is, so a bad color scheme never
/// keeps the viewer from starting.
pub fn load_from_path(path: &Path) -> Result<ViewerSettings, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let settings: ViewerSettings = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&settings) {
        warn!(path = %path.display(), "settings validation warning: {e}");
    }

    info!(path = %path.display(), "loaded viewer settings");
    Ok(settings)
}

/// Load settings from `path`, writing a documented default file first if
/// there is none.
pub fn load_or_create(path: &Path) -> Result<ViewerSettings, ConfigError> {
    match load_from_path(path) {
        Err(ConfigError::FileNotFound(_)) => {
            info!(path = %path.display(), "no settings found, creating default");
            create_default_settings(path)?;
            Ok(ViewerSettings::default())
        }
        other => other,
    }
}

/// Load settings from the platform default path.
///
/// On macOS: `~/Library/Application Support/cfgview/settings.toml`
/// On Linux: `~/.config/cfgview/settings.toml`
pub fn load_default() -> Result<ViewerSettings, ConfigError> {
    load_or_create(&default_settings_path()?)
}
