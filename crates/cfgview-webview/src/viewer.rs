//! The graph viewer's call surface.
//!
//! [`GraphViewer`] is the only place that knows the viewer page's global
//! functions: `setCode`, `setSimplify`, `setFlatSwitch`, `setHighlight`
//! and `setColors` going in, and the `navigate` query coming back out.

use tracing::{debug, warn};

use cfgview_common::BridgeError;

use crate::bridge::{ScriptSink, ViewerBridge};
use crate::events::{ViewerEvent, ViewerEvents};
use crate::query::QueryChannel;
use crate::script::JsArg;

/// Query channel the viewer uses to report a clicked node.
pub const NAVIGATE_CHANNEL: &str = "navigate";

/// Function injected into the viewer to send navigation requests.
pub const NAVIGATE_FUNCTION: &str = "navigateTo";

/// Language name as the viewer expects it.
///
/// A few editor language names differ from the viewer's grammar names;
/// everything else passes through unchanged.
pub fn internal_language_name(language: &str) -> &str {
    match language {
        "C/C++" => "C++",
        "JavaScript" => "TypeScript",
        "TypeScript JSX" => "TSX",
        other => other,
    }
}

/// Parse a navigation payload as a character offset.
///
/// Accepts plain decimal integers only. Anything else (floats, signs,
/// whitespace, empty) is rejected.
pub fn parse_offset(payload: &str) -> Option<usize> {
    if payload.is_empty() || !payload.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    payload.parse().ok()
}

/// Host-side driver for one graph viewer page.
pub struct GraphViewer<S: ScriptSink> {
    bridge: ViewerBridge<S>,
    navigate: QueryChannel,
}

impl<S: ScriptSink> GraphViewer<S> {
    /// Wrap a bridge and register the navigation query. Navigation
    /// requests are pushed to `events` as [`ViewerEvent::NavigateTo`]; the
    /// host applies them on its own loop.
    pub fn new(bridge: ViewerBridge<S>, events: ViewerEvents) -> Result<Self, BridgeError> {
        let navigate = bridge.create_query(NAVIGATE_CHANNEL, move |payload: &str| -> Option<String> {
            match parse_offset(payload) {
                Some(offset) => {
                    debug!(offset, "navigation requested");
                    events.push(ViewerEvent::NavigateTo { offset });
                }
                None => warn!(payload = %payload, "navigation payload is not an offset"),
            }
            None
        })?;
        Ok(Self { bridge, navigate })
    }

    pub fn bridge(&self) -> &ViewerBridge<S> {
        &self.bridge
    }

    /// Render `code` with the cursor at `cursor_offset`.
    ///
    /// Callbacks are re-injected afterwards since the viewer may replace
    /// its globals when new code is loaded.
    pub fn set_code(
        &self,
        code: &str,
        cursor_offset: usize,
        language: &str,
    ) -> Result<(), BridgeError> {
        self.bridge.call(
            "setCode",
            &[
                JsArg::from(code),
                JsArg::try_from(cursor_offset)?,
                JsArg::from(internal_language_name(language)),
            ],
        )?;
        self.initialize_callbacks()
    }

    pub fn set_simplify(&self, simplify: bool) -> Result<(), BridgeError> {
        self.bridge.call("setSimplify", &[JsArg::from(simplify)])
    }

    pub fn set_flat_switch(&self, flat_switch: bool) -> Result<(), BridgeError> {
        self.bridge.call("setFlatSwitch", &[JsArg::from(flat_switch)])
    }

    pub fn set_highlight(&self, highlight: bool) -> Result<(), BridgeError> {
        self.bridge.call("setHighlight", &[JsArg::from(highlight)])
    }

    /// Pass a color scheme document to the viewer verbatim.
    pub fn set_colors(&self, scheme_json: &str) -> Result<(), BridgeError> {
        self.bridge.call("setColors", &[JsArg::from(scheme_json)])
    }

    /// Define `window.navigateTo(position)` in the viewer.
    pub fn initialize_callbacks(&self) -> Result<(), BridgeError> {
        let body = self.navigate.inject("position")?;
        self.bridge
            .inject_function(NAVIGATE_FUNCTION, &["position"], &body)
    }

    /// Deliver pending query replies. See [`ViewerBridge::flush_replies`].
    pub fn flush_replies(&self) -> usize {
        self.bridge.flush_replies()
    }
}
