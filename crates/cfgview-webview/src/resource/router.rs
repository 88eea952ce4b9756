use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::origin::{parse_request_url, VirtualOrigin};

use super::stream::{Rejected, ResourceResponder, ResourceStreamAdapter};
use super::ResourceLookup;

/// Routing decision for one request.
#[derive(Debug)]
pub enum Routed {
    Accepted(ResourceStreamAdapter),
    Rejected,
}

impl Routed {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The responder the engine drives for this request.
    pub fn into_responder(self) -> Box<dyn ResourceResponder> {
        match self {
            Self::Accepted(adapter) => Box::new(adapter),
            Self::Rejected => Box::new(Rejected),
        }
    }
}

/// Answers requests addressed to one virtual origin.
///
/// Holds only immutable state, so `handle` can run concurrently on any
/// number of engine threads.
pub struct ResourceRouter {
    origin: VirtualOrigin,
    lookup: Arc<dyn ResourceLookup>,
    shutdown: CancellationToken,
}

impl ResourceRouter {
    /// Create a router. Once `shutdown` is cancelled every new request is
    /// rejected and every adapter already handed out stops delivering.
    pub fn new(
        origin: VirtualOrigin,
        lookup: Arc<dyn ResourceLookup>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            origin,
            lookup,
            shutdown,
        }
    }

    pub fn origin(&self) -> &VirtualOrigin {
        &self.origin
    }

    /// Route a request URL.
    ///
    /// Malformed URLs, foreign origins, missing resources and failing
    /// lookups all produce [`Routed::Rejected`]; the engine sees no
    /// difference between them.
    pub fn handle(&self, url: &str) -> Routed {
        if self.shutdown.is_cancelled() {
            debug!(url = %url, "request rejected: bridge shut down");
            return Routed::Rejected;
        }

        let Some(target) = parse_request_url(url) else {
            debug!(url = %url, "request rejected: malformed url");
            return Routed::Rejected;
        };

        if !self.origin.matches(&target) {
            debug!(
                url = %url,
                origin = %self.origin,
                "request rejected: origin mismatch"
            );
            return Routed::Rejected;
        }

        let lookup = AssertUnwindSafe(|| self.lookup.lookup(&target.path));
        match catch_unwind(lookup) {
            Ok(Some(handle)) => {
                debug!(
                    path = %target.path,
                    content_type = %handle.content_type(),
                    "request accepted"
                );
                Routed::Accepted(ResourceStreamAdapter::new(
                    handle,
                    self.shutdown.child_token(),
                ))
            }
            Ok(None) => {
                debug!(path = %target.path, "request rejected: resource not found");
                Routed::Rejected
            }
            Err(_) => {
                warn!(path = %target.path, "request rejected: resource lookup panicked");
                Routed::Rejected
            }
        }
    }
}
