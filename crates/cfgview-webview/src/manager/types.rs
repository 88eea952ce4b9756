/// Engine options for a viewer webview. The page itself always comes from
/// the bridge's virtual origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebViewConfig {
    /// Whether the WebView background should be transparent.
    pub transparent: bool,
    /// Whether to enable dev tools.
    pub devtools: bool,
    /// Custom user agent string.
    pub user_agent: Option<String>,
    /// Whether to enable clipboard access.
    pub clipboard: bool,
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            transparent: false,
            devtools: cfg!(debug_assertions),
            user_agent: Some(format!("cfgview/{}", env!("CARGO_PKG_VERSION"))),
            clipboard: true,
        }
    }
}

impl WebViewConfig {
    pub fn with_devtools(mut self, devtools: bool) -> Self {
        self.devtools = devtools;
        self
    }
}
