//! Color schemes for the graph viewer.
//!
//! A scheme is a JSON document `{"version": 1, "scheme": [{"name", "hex"}, ...]}`.
//! Two are built in; any other document is passed to the viewer as-is.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use cfgview_common::ConfigError;

/// Name of the built-in dark scheme.
pub const DARK: &str = "dark";
/// Name of the built-in light scheme.
pub const LIGHT: &str = "light";

/// The only scheme document version the viewer understands.
pub const SCHEME_VERSION: u32 = 1;

pub const DARK_SCHEME: &str = r##"{"version":1,"scheme":[{"name":"node.default","hex":"#707070"},{"name":"node.entry","hex":"#48AB30"},{"name":"node.exit","hex":"#AB3030"},{"name":"node.throw","hex":"#590c0c"},{"name":"node.yield","hex":"#0a9aca"},{"name":"node.border","hex":"#000000"},{"name":"node.highlight","hex":"#dddddd"},{"name":"edge.regular","hex":"#2592a1"},{"name":"edge.consequence","hex":"#4ce34c"},{"name":"edge.alternative","hex":"#ff3e3e"},{"name":"cluster.border","hex":"#302e2e"},{"name":"cluster.with","hex":"#7d007d"},{"name":"cluster.tryComplex","hex":"#344c74"},{"name":"cluster.try","hex":"#1b5f1b"},{"name":"cluster.finally","hex":"#999918"},{"name":"cluster.except","hex":"#590c0c"},{"name":"graph.background","hex":"#2B2D30"}]}"##;

pub const LIGHT_SCHEME: &str = r##"{"version":1,"scheme":[{"name":"node.default","hex":"#d3d3d3"},{"name":"node.entry","hex":"#48AB30"},{"name":"node.exit","hex":"#AB3030"},{"name":"node.throw","hex":"#ffdddd"},{"name":"node.yield","hex":"#00bfff"},{"name":"node.border","hex":"#000000"},{"name":"node.highlight","hex":"#000000"},{"name":"edge.regular","hex":"#0000ff"},{"name":"edge.consequence","hex":"#008000"},{"name":"edge.alternative","hex":"#ff0000"},{"name":"cluster.border","hex":"#ffffff"},{"name":"cluster.with","hex":"#ffddff"},{"name":"cluster.tryComplex","hex":"#ddddff"},{"name":"cluster.try","hex":"#ddffdd"},{"name":"cluster.finally","hex":"#ffffdd"},{"name":"cluster.except","hex":"#ffdddd"},{"name":"graph.background","hex":"#F7F8FA"}]}"##;

/// Hex color: #RGB, #RRGGBB, or #RRGGBBAA.
static HEX_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").ok());

/// A parsed color scheme document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub version: u32,
    pub scheme: Vec<ColorEntry>,
}

/// One named color in a scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorEntry {
    pub name: String,
    pub hex: String,
}

impl ColorScheme {
    /// Parse and validate a scheme document.
    pub fn parse(json: &str) -> Result<Self, ConfigError> {
        let scheme: ColorScheme = serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(format!("invalid color scheme JSON: {e}")))?;
        scheme.validate()?;
        Ok(scheme)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        if self.version != SCHEME_VERSION {
            errors.push(format!(
                "color scheme version {} is not supported (expected {SCHEME_VERSION})",
                self.version
            ));
        }
        for entry in &self.scheme {
            if entry.name.trim().is_empty() {
                errors.push("color scheme entry has an empty name".to_string());
            }
            if !is_hex_color(&entry.hex) {
                errors.push(format!("{}: invalid hex color {:?}", entry.name, entry.hex));
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(errors.join("; ")))
        }
    }

    /// Hex value for a named entry.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.scheme
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.hex.as_str())
    }
}

/// Whether `s` is a `#RGB`, `#RRGGBB` or `#RRGGBBAA` color.
pub fn is_hex_color(s: &str) -> bool {
    (*HEX_RE).as_ref().is_some_and(|re| re.is_match(s))
}

/// The document to send for a `color_scheme` setting.
///
/// Empty means "send nothing". Built-in names resolve to their documents;
/// anything else is returned verbatim.
pub fn resolve_color_scheme(setting: &str) -> Option<Cow<'_, str>> {
    match setting {
        "" => None,
        DARK => Some(Cow::Borrowed(DARK_SCHEME)),
        LIGHT => Some(Cow::Borrowed(LIGHT_SCHEME)),
        custom => Some(Cow::Borrowed(custom)),
    }
}
