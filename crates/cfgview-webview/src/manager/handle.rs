use cfgview_common::BridgeError;
use wry::WebView;

use crate::bridge::ScriptSink;

/// The viewer's WebView. Scripts reach it only through [`ScriptSink`].
pub struct WebViewHandle {
    pub(super) webview: WebView,
}

impl WebViewHandle {
    /// Set the WebView bounds (position + size) within the parent window.
    pub fn set_bounds(&self, bounds: wry::Rect) -> Result<(), wry::Error> {
        self.webview.set_bounds(bounds)
    }
}

impl ScriptSink for WebViewHandle {
    fn evaluate(&self, script: &str) -> Result<(), BridgeError> {
        self.webview
            .evaluate_script(script)
            .map_err(|e| BridgeError::Evaluate(e.to_string()))
    }
}
