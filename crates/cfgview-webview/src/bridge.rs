//! The host side of one viewer: request interception plus the script bridge.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use cfgview_common::BridgeError;

use crate::content::DirLookup;
use crate::origin::VirtualOrigin;
use crate::query::{QueryChannel, QueryDispatcher, QueryHandler};
use crate::resource::{ResourceLookup, ResourceRouter, Routed};
use crate::script::{format_call, format_function, JsArg};

/// Path of the viewer page under the virtual origin.
pub const VIEWER_PATH: &str = "/index.html";

/// Fixed per bridge; build a new bridge to change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    pub origin: VirtualOrigin,
    /// Directory served by the default [`DirLookup`].
    pub resource_root: PathBuf,
}

impl BridgeConfig {
    pub fn new(origin: VirtualOrigin, resource_root: impl Into<PathBuf>) -> Self {
        Self {
            origin,
            resource_root: resource_root.into(),
        }
    }

    /// URL of the viewer page.
    pub fn entry_url(&self) -> String {
        self.origin.url_for(VIEWER_PATH)
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new(VirtualOrigin::default(), "webview")
    }
}

/// Where outbound script text goes. Implemented by the webview handle.
///
/// Each `evaluate` call is one unit on the engine's serial script queue,
/// so statements run in the order they were evaluated.
pub trait ScriptSink {
    fn evaluate(&self, script: &str) -> Result<(), BridgeError>;
}

/// Everything the engine calls back into: the resource router, the query
/// dispatcher and the queue of reply scripts produced by queries.
///
/// Cheap to clone; clones share state, including shutdown.
#[derive(Clone)]
pub struct Interception {
    config: Arc<BridgeConfig>,
    router: Arc<ResourceRouter>,
    queries: Arc<QueryDispatcher>,
    replies: Arc<Mutex<Vec<String>>>,
    shutdown: CancellationToken,
}

impl Interception {
    pub fn new(config: BridgeConfig, lookup: Arc<dyn ResourceLookup>) -> Self {
        let shutdown = CancellationToken::new();
        let router = ResourceRouter::new(config.origin.clone(), lookup, shutdown.clone());
        Self {
            config: Arc::new(config),
            router: Arc::new(router),
            queries: Arc::new(QueryDispatcher::new()),
            replies: Arc::new(Mutex::new(Vec::new())),
            shutdown,
        }
    }

    /// Serve `config.resource_root` from disk.
    pub fn from_resource_root(config: BridgeConfig) -> Self {
        let lookup = DirLookup::new(config.resource_root.clone());
        Self::new(config, Arc::new(lookup))
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn origin(&self) -> &VirtualOrigin {
        &self.config.origin
    }

    /// Route one resource request (engine callback).
    pub fn handle_request(&self, url: &str) -> Routed {
        self.router.handle(url)
    }

    /// Handle one IPC body from the viewer (engine callback). A reply, if
    /// any, is queued for [`ViewerBridge::flush_replies`].
    pub fn handle_ipc(&self, body: &str) {
        let Some(reply) = self.queries.dispatch(body) else {
            return;
        };
        let script = match reply.to_script() {
            Ok(script) => script,
            Err(e) => {
                warn!(id = reply.id, error = %e, "query reply not deliverable");
                return;
            }
        };
        if let Ok(mut replies) = self.replies.lock() {
            replies.push(script);
        }
    }

    pub fn register_query(
        &self,
        name: &str,
        handler: impl QueryHandler + 'static,
    ) -> Result<QueryChannel, BridgeError> {
        if self.is_shut_down() {
            return Err(BridgeError::Disposed);
        }
        self.queries.register(name, handler)
    }

    /// Take every queued reply script.
    pub fn take_replies(&self) -> Vec<String> {
        match self.replies.lock() {
            Ok(mut replies) => std::mem::take(&mut *replies),
            Err(_) => Vec::new(),
        }
    }

    /// Stop intercepting: new requests are rejected, in-flight streams stop
    /// at their next read, and queries get no reply. Idempotent.
    pub fn shutdown(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }
        self.shutdown.cancel();
        self.queries.close();
        if let Ok(mut replies) = self.replies.lock() {
            replies.clear();
        }
        info!(origin = %self.config.origin, "request interception removed");
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }
}

/// One viewer's bridge: the interception registration plus the script
/// sink it talks to.
///
/// Dropping the bridge shuts the interception down before the sink is
/// dropped, so engine callbacks never reach a half-destroyed bridge.
pub struct ViewerBridge<S: ScriptSink> {
    interception: Interception,
    sink: S,
}

impl<S: ScriptSink> ViewerBridge<S> {
    pub fn new(interception: Interception, sink: S) -> Self {
        Self { interception, sink }
    }

    pub fn interception(&self) -> &Interception {
        &self.interception
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Evaluate `name(args...)` in the viewer. Fire-and-forget: the
    /// return value is not observed.
    pub fn call(&self, name: &str, args: &[JsArg]) -> Result<(), BridgeError> {
        self.ensure_live()?;
        let script = format_call(name, args)?;
        debug!(function = %name, args = args.len(), "script call");
        self.sink.evaluate(&script)
    }

    /// Define (or redefine) `window.<name>` in the viewer.
    pub fn inject_function(
        &self,
        name: &str,
        params: &[&str],
        body: &str,
    ) -> Result<(), BridgeError> {
        self.ensure_live()?;
        let script = format_function(name, params, body)?;
        debug!(function = %name, "script function injected");
        self.sink.evaluate(&script)
    }

    pub fn create_query(
        &self,
        name: &str,
        handler: impl QueryHandler + 'static,
    ) -> Result<QueryChannel, BridgeError> {
        self.interception.register_query(name, handler)
    }

    /// Send queued query replies into the viewer. Returns how many were
    /// delivered.
    pub fn flush_replies(&self) -> usize {
        let mut delivered = 0;
        for script in self.interception.take_replies() {
            match self.sink.evaluate(&script) {
                Ok(()) => delivered += 1,
                Err(e) => warn!(error = %e, "failed to deliver query reply"),
            }
        }
        delivered
    }

    /// Tear the bridge down. Same as dropping it.
    pub fn dispose(self) {}

    fn ensure_live(&self) -> Result<(), BridgeError> {
        if self.interception.is_shut_down() {
            Err(BridgeError::Disposed)
        } else {
            Ok(())
        }
    }
}

impl<S: ScriptSink> Drop for ViewerBridge<S> {
    fn drop(&mut self) {
        self.interception.shutdown();
    }
}

/// A sink that records every script instead of running it.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct RecordingSink {
    scripts: Arc<Mutex<Vec<String>>>,
}

#[cfg(test)]
impl RecordingSink {
    pub(crate) fn scripts(&self) -> Vec<String> {
        self.scripts.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl ScriptSink for RecordingSink {
    fn evaluate(&self, script: &str) -> Result<(), BridgeError> {
        self.scripts.lock().unwrap().push(script.to_string());
        Ok(())
    }
}
