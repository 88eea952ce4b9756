use tracing::debug;
use wry::raw_window_handle;
use wry::WebViewBuilder;

use crate::bridge::Interception;
use crate::query::QUERY_INIT_SCRIPT;

use super::handle::WebViewHandle;
use super::handlers;
use super::types::WebViewConfig;
use super::WebViewManager;

impl WebViewManager {
    /// Create the viewer WebView as a child of the given window.
    ///
    /// Every engine callback is routed through `interception`; the page is
    /// loaded from the interception's entry URL. Keep the returned handle
    /// alive for as long as the bridge that wraps it.
    pub fn create<W: raw_window_handle::HasWindowHandle>(
        &self,
        window: &W,
        bounds: wry::Rect,
        interception: &Interception,
        config: WebViewConfig,
    ) -> Result<WebViewHandle, wry::Error> {
        let entry_url = interception.config().entry_url();

        let mut builder = WebViewBuilder::new()
            .with_bounds(bounds)
            .with_transparent(config.transparent)
            .with_devtools(config.devtools)
            .with_clipboard(config.clipboard)
            .with_focused(false)
            .with_initialization_script(QUERY_INIT_SCRIPT);

        if let Some(ua) = &config.user_agent {
            builder = builder.with_user_agent(ua);
        }

        builder = handlers::attach_custom_protocol(builder, interception.clone());
        builder = handlers::attach_ipc_handler(builder, interception.clone());
        builder = handlers::attach_page_load_handler(builder, self.events.clone());
        builder = handlers::attach_navigation_handler(
            builder,
            interception.origin().clone(),
            self.events.clone(),
        );

        let webview = builder.with_url(&entry_url).build_as_child(window)?;
        debug!(url = %entry_url, devtools = config.devtools, "viewer WebView created");

        Ok(WebViewHandle { webview })
    }
}
