//! WebView lifecycle management.
//!
//! `WebViewManager` builds the `wry::WebView` for a viewer and wires the
//! engine callbacks (custom protocol, IPC, navigation, page load) into an
//! [`Interception`](crate::bridge::Interception).

use crate::events::{ViewerEvent, ViewerEvents};

mod handle;
pub mod handlers;
mod lifecycle;
mod types;

pub use handle::WebViewHandle;
pub use types::WebViewConfig;

/// Creates viewer webviews and collects their events.
pub struct WebViewManager {
    /// Event sink; engine threads push here for the main loop to consume.
    pub(crate) events: ViewerEvents,
}

impl WebViewManager {
    pub fn new() -> Self {
        Self::with_events(ViewerEvents::new())
    }

    /// Share an existing event queue, e.g. the one a `GraphViewer` pushes
    /// navigation requests to.
    pub fn with_events(events: ViewerEvents) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &ViewerEvents {
        &self.events
    }

    /// Drain all pending events.
    pub fn drain_events(&self) -> Vec<ViewerEvent> {
        self.events.drain()
    }
}

impl Default for WebViewManager {
    fn default() -> Self {
        Self::new()
    }
}
