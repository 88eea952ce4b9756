//! Polling of viewer events, settings changes and query replies.

use std::time::Instant;

use winit::event_loop::{ActiveEventLoop, ControlFlow};

use cfgview_config::ViewerSettings;
use cfgview_webview::{GraphViewer, PageLoadState, ScriptSink, ViewerEvent};

use super::core::CfgviewApp;
use super::document::SourceDocument;
use super::settings::{push_document, push_settings};
use super::types::POLL_INTERVAL;

impl CfgviewApp {
    /// Run polling and schedule the next wake-up.
    pub(super) fn poll_and_schedule(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();

        if now.duration_since(self.last_poll) >= POLL_INTERVAL {
            self.last_poll = now;
            self.poll_viewer_events();
            self.poll_settings();
            if let Some(viewer) = &self.viewer {
                viewer.flush_replies();
            }
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }

    fn poll_viewer_events(&mut self) {
        let events = self.manager.drain_events();
        let Some(viewer) = &self.viewer else {
            return;
        };
        for event in events {
            apply_event(viewer, &mut self.document, &self.settings, event);
        }
    }

    fn poll_settings(&mut self) {
        let Some(rx) = self.settings_rx.as_mut() else {
            return;
        };
        match rx.has_changed() {
            Ok(true) => {}
            Ok(false) => return,
            Err(_) => {
                tracing::debug!("settings watcher stopped, live reload off");
                self.settings_rx = None;
                return;
            }
        }

        let settings = rx.borrow_and_update().clone();
        if settings == self.settings {
            return;
        }
        tracing::info!("settings changed, updating viewer");
        self.settings = settings;
        if let Some(viewer) = &self.viewer {
            if let Err(e) = push_settings(viewer, &self.settings) {
                tracing::warn!(error = %e, "failed to push settings");
            }
        }
    }
}

/// Apply one viewer event.
pub(super) fn apply_event<S: ScriptSink>(
    viewer: &GraphViewer<S>,
    document: &mut SourceDocument,
    settings: &ViewerSettings,
    event: ViewerEvent,
) {
    match event {
        ViewerEvent::PageLoad {
            state: PageLoadState::Finished,
            url,
        } => {
            tracing::info!(url = %url, "viewer page loaded");
            if let Err(e) = push_document(viewer, settings, document) {
                tracing::warn!(error = %e, "failed to send code to viewer");
            }
        }
        ViewerEvent::PageLoad {
            state: PageLoadState::Started,
            url,
        } => {
            tracing::debug!(url = %url, "viewer page loading");
        }
        ViewerEvent::NavigateTo { offset } => {
            document.set_cursor(offset);
            if document.cursor() != offset {
                tracing::debug!(offset, cursor = document.cursor(), "navigation clamped");
            }
            if let Err(e) = viewer.set_code(document.text(), document.cursor(), document.language())
            {
                tracing::warn!(error = %e, "failed to move viewer cursor");
            }
        }
        ViewerEvent::NavigationBlocked { url } => {
            tracing::debug!(url = %url, "blocked navigation ignored");
        }
    }
}
