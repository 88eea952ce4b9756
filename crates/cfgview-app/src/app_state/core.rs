//! CfgviewApp struct definition and constructor.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use winit::window::Window;

use cfgview_config::ViewerSettings;
use cfgview_webview::{BridgeConfig, GraphViewer, WebViewConfig, WebViewHandle, WebViewManager};

use super::document::SourceDocument;

/// Top-level application state.
pub struct CfgviewApp {
    pub(super) document: SourceDocument,
    pub(super) settings: ViewerSettings,
    pub(super) settings_rx: Option<watch::Receiver<ViewerSettings>>,

    pub(super) bridge_config: BridgeConfig,
    pub(super) webview_config: WebViewConfig,

    // Windowing
    pub(super) window: Option<Arc<Window>>,

    // The embedded viewer. Dropping it removes request interception
    // before the webview itself goes away.
    pub(super) manager: WebViewManager,
    pub(super) viewer: Option<GraphViewer<WebViewHandle>>,

    // Runs the settings watcher
    pub(super) tokio_runtime: Option<tokio::runtime::Runtime>,

    pub(super) last_poll: Instant,
}

impl CfgviewApp {
    pub fn new(
        document: SourceDocument,
        settings: ViewerSettings,
        bridge_config: BridgeConfig,
        webview_config: WebViewConfig,
    ) -> Self {
        Self {
            document,
            settings,
            settings_rx: None,
            bridge_config,
            webview_config,
            window: None,
            manager: WebViewManager::new(),
            viewer: None,
            tokio_runtime: None,
            last_poll: Instant::now(),
        }
    }

    /// Follow settings changes published on `rx`. The runtime driving the
    /// watcher is kept alive until shutdown.
    pub fn with_live_settings(
        mut self,
        rx: Option<watch::Receiver<ViewerSettings>>,
        runtime: Option<tokio::runtime::Runtime>,
    ) -> Self {
        self.settings_rx = rx;
        self.tokio_runtime = runtime;
        self
    }
}
