//! cfgview viewer settings.
//!
//! TOML-backed [`ViewerSettings`] with validation, built-in color schemes
//! and live reload. Every field has a default, so partial files work out
//! of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cfgview_config::{load_settings, resolve_color_scheme};
//!
//! let settings = load_settings().expect("failed to load settings");
//! if let Some(scheme) = resolve_color_scheme(&settings.color_scheme) {
//!     println!("{scheme}");
//! }
//! ```

pub mod colors;
pub mod reload;
pub mod schema;
pub mod toml_loader;
pub mod toml_writer;
pub mod validation;
pub mod watcher;

pub use colors::{resolve_color_scheme, ColorScheme, DARK_SCHEME, LIGHT_SCHEME};
pub use reload::ReloadManager;
pub use schema::{ViewerSettings, SETTINGS_FILE_NAME};
pub use toml_writer::{save_settings, save_settings_to_path};
pub use watcher::SettingsWatcher;

use cfgview_common::ConfigError;

/// Load settings from the platform default path, creating a default file
/// if none exists.
pub fn load_settings() -> Result<ViewerSettings, ConfigError> {
    toml_loader::load_default()
}
