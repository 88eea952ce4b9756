//! Query channels from the viewer script context to the host.
//!
//! Messages flow in both directions:
//! - **JS -> Rust**: `window.__cfgview.query(channel, payload)` posts
//!   `{"channel", "id", "payload"}` through `window.ipc.postMessage` and
//!   returns a Promise.
//! - **Rust -> JS**: if the channel's handler produces a response, the host
//!   evaluates `window.__cfgview.resolve(id, response)`, settling exactly
//!   that Promise. Without a response the Promise stays pending.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use serde::Deserialize;
use tracing::{debug, warn};

use cfgview_common::BridgeError;

use crate::script::{encode_str, format_call, is_identifier, JsArg, MAX_SAFE_INTEGER};

/// JavaScript snippet that sets up the query bridge on the JS side.
/// Injected as an initialization script into the viewer.
pub const QUERY_INIT_SCRIPT: &str = r#"
(function() {
    if (window.__cfgview) {
        return;
    }
    var pending = {};
    var nextId = 1;
    window.__cfgview = {
        query: function(channel, payload) {
            var id = nextId++;
            return new Promise(function(resolve) {
                pending[id] = resolve;
                window.ipc.postMessage(JSON.stringify({
                    channel: channel,
                    id: id,
                    payload: String(payload)
                }));
            });
        },
        resolve: function(id, response) {
            var settle = pending[id];
            if (settle) {
                delete pending[id];
                settle(response);
            }
        }
    };
})();
"#;

const RESOLVE_FN: &str = "window.__cfgview.resolve";

/// A query message as posted by the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PendingQuery {
    pub channel: String,
    pub id: u64,
    pub payload: String,
}

impl PendingQuery {
    /// Parse a raw IPC body. Ids the page could not have produced as an
    /// exact number are refused, since no reply could name them.
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str::<Self>(raw)
            .ok()
            .filter(|query| query.id <= MAX_SAFE_INTEGER)
    }

    /// Settle the query. Consumes it, so a query is answered at most once.
    pub fn respond(self, response: Option<String>) -> Option<QueryReply> {
        response.map(|response| QueryReply {
            id: self.id,
            response,
        })
    }
}

/// The response to one query, ready to be sent back into the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryReply {
    pub id: u64,
    pub response: String,
}

impl QueryReply {
    pub fn to_script(&self) -> Result<String, BridgeError> {
        let args = [JsArg::uint(self.id)?, JsArg::str(self.response.as_str())];
        format_call(RESOLVE_FN, &args)
    }
}

/// Host-side handler for one query channel.
///
/// Called on engine threads, possibly concurrently with itself. Returning
/// `None` sends no response. Payloads the handler cannot interpret should
/// also yield `None`.
pub trait QueryHandler: Send + Sync {
    fn handle(&self, payload: &str) -> Option<String>;
}

impl<F> QueryHandler for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn handle(&self, payload: &str) -> Option<String> {
        self(payload)
    }
}

/// A registered channel name, used to generate the JS that queries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryChannel {
    name: String,
}

impl QueryChannel {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Script that sends the value of `param` over this channel and
    /// evaluates to the response Promise.
    pub fn inject(&self, param: &str) -> Result<String, BridgeError> {
        if !is_identifier(param) {
            return Err(BridgeError::InvalidIdentifier(param.to_string()));
        }
        Ok(format!(
            "return window.__cfgview.query({}, {param});",
            encode_str(&self.name)
        ))
    }
}

/// Routes incoming query messages to their channel handlers.
#[derive(Default)]
pub struct QueryDispatcher {
    handlers: RwLock<HashMap<String, Arc<dyn QueryHandler>>>,
    closed: AtomicBool,
}

impl QueryDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the single handler for `name`.
    pub fn register(
        &self,
        name: &str,
        handler: impl QueryHandler + 'static,
    ) -> Result<QueryChannel, BridgeError> {
        // Handlers run outside the lock, so a poisoned guard still holds a
        // consistent map.
        let mut handlers = self.handlers.write().unwrap_or_else(PoisonError::into_inner);
        if handlers.contains_key(name) {
            return Err(BridgeError::DuplicateQuery(name.to_string()));
        }
        handlers.insert(name.to_string(), Arc::new(handler));
        debug!(channel = %name, "query channel registered");
        Ok(QueryChannel {
            name: name.to_string(),
        })
    }

    /// Stop answering. Every later message is dropped without a reply.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Handle one raw IPC body. Never panics; every failure is "no reply".
    pub fn dispatch(&self, body: &str) -> Option<QueryReply> {
        if self.is_closed() {
            debug!(body_len = body.len(), "query dropped: bridge closed");
            return None;
        }

        let Some(query) = PendingQuery::from_json(body) else {
            warn!(body_len = body.len(), "query rejected: malformed message");
            return None;
        };

        let handler = {
            let handlers = self.handlers.read().unwrap_or_else(PoisonError::into_inner);
            handlers.get(&query.channel).cloned()
        };
        let Some(handler) = handler else {
            warn!(channel = %query.channel, "query rejected: unknown channel");
            return None;
        };

        debug!(channel = %query.channel, id = query.id, "query dispatched");
        let response = catch_unwind(AssertUnwindSafe(|| handler.handle(&query.payload)));
        match response {
            Ok(response) => query.respond(response),
            Err(_) => {
                warn!(channel = %query.channel, id = query.id, "query handler panicked");
                None
            }
        }
    }
}
