//! Graceful shutdown: drop the viewer, stop settings reload, close the window.

use std::time::Duration;

use super::core::CfgviewApp;

impl CfgviewApp {
    /// Tear down all subsystems. Safe to call more than once.
    ///
    /// Order matters:
    /// 1. Drop the viewer (interception stops before the webview goes)
    /// 2. Stop following settings
    /// 3. Shut down the tokio runtime (stops the file watcher)
    /// 4. Release the window
    pub(super) fn shutdown(&mut self) {
        tracing::info!("Initiating graceful shutdown");

        // 1. The bridge shuts its interception down on drop
        self.viewer = None;
        self.manager.drain_events();

        // 2. Settings
        self.settings_rx = None;

        // 3. Runtime
        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }

        // 4. Window
        self.window = None;

        tracing::info!("Graceful shutdown complete");
    }
}
