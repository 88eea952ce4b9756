//! Window creation and viewer setup.

use std::sync::Arc;

use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use cfgview_common::{CfgviewError, Result};
use cfgview_webview::{GraphViewer, Interception, ViewerBridge, WebViewHandle};

use super::core::CfgviewApp;
use super::types::DEFAULT_WINDOW_SIZE;

impl CfgviewApp {
    /// Create the window and the embedded viewer.
    /// Returns `false` if initialization failed and the event loop should exit.
    pub(super) fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let title = match self.document.path().file_name() {
            Some(name) => format!("cfgview - {}", name.to_string_lossy()),
            None => "cfgview".to_string(),
        };
        let (width, height) = DEFAULT_WINDOW_SIZE;
        let attrs = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                return false;
            }
        };

        if !self.initialize_viewer(&window) {
            return false;
        }

        self.window = Some(window);
        tracing::info!("Window created and viewer initialized");
        true
    }

    fn initialize_viewer(&mut self, window: &Arc<Window>) -> bool {
        let root = &self.bridge_config.resource_root;
        if !root.join("index.html").is_file() {
            tracing::warn!(
                path = %root.display(),
                "viewer page not found; the viewer will stay blank"
            );
        }

        match self.build_viewer(window) {
            Ok(viewer) => {
                tracing::info!(
                    origin = %self.bridge_config.origin,
                    resources = %self.bridge_config.resource_root.display(),
                    "viewer bridge ready"
                );
                self.viewer = Some(viewer);
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to set up viewer");
                false
            }
        }
    }

    fn build_viewer(&self, window: &Arc<Window>) -> Result<GraphViewer<WebViewHandle>> {
        let interception = Interception::from_resource_root(self.bridge_config.clone());
        let handle = match self.manager.create(
            window.as_ref(),
            viewport_rect(window),
            &interception,
            self.webview_config.clone(),
        ) {
            Ok(handle) => handle,
            Err(e) => {
                interception.shutdown();
                return Err(webview_error(e));
            }
        };

        let bridge = ViewerBridge::new(interception, handle);
        Ok(GraphViewer::new(bridge, self.manager.events().clone())?)
    }

    /// Resize the viewer to fill the window.
    pub(super) fn sync_viewer_bounds(&self) {
        let (Some(window), Some(viewer)) = (&self.window, &self.viewer) else {
            return;
        };
        if let Err(e) = viewer.bridge().sink().set_bounds(viewport_rect(window)) {
            tracing::warn!(error = %e, "Failed to resize viewer");
        }
    }
}

/// The whole client area of `window`, in logical coordinates.
fn viewport_rect(window: &Window) -> wry::Rect {
    let size = window.inner_size().to_logical::<f64>(window.scale_factor());
    logical_rect(size.width, size.height)
}

fn webview_error(e: impl std::fmt::Display) -> CfgviewError {
    CfgviewError::WebView(e.to_string())
}

pub(super) fn logical_rect(width: f64, height: f64) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(width, height)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_failures_become_webview_errors() {
        let err = webview_error("WebView2 runtime missing");
        assert!(matches!(err, CfgviewError::WebView(_)));
        assert_eq!(err.to_string(), "webview error: WebView2 runtime missing");
    }

    #[test]
    fn logical_rect_covers_origin_and_size() {
        let rect = logical_rect(800.0, 600.0);
        match rect.position {
            wry::dpi::Position::Logical(pos) => {
                assert!(pos.x.abs() < f64::EPSILON);
                assert!(pos.y.abs() < f64::EPSILON);
            }
            _ => panic!("Expected logical position"),
        }
        match rect.size {
            wry::dpi::Size::Logical(size) => {
                assert!((size.width - 800.0).abs() < f64::EPSILON);
                assert!((size.height - 600.0).abs() < f64::EPSILON);
            }
            _ => panic!("Expected logical size"),
        }
    }
}
