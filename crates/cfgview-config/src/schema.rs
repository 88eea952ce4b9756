//! The persisted viewer settings record.

use serde::{Deserialize, Serialize};

/// File name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Display settings pushed into the graph viewer.
///
/// Every field has a default, so a partial (or empty) settings file is
/// valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Render switch statements as a flat chain of branches.
    pub flat_switch: bool,
    /// Collapse trivial nodes.
    pub simplify: bool,
    /// Highlight the node under the cursor.
    pub highlight: bool,
    /// `""` (leave the viewer's colors alone), `"dark"`, `"light"`, or a
    /// color scheme JSON document.
    pub color_scheme: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            flat_switch: false,
            simplify: true,
            highlight: true,
            color_scheme: String::new(),
        }
    }
}
