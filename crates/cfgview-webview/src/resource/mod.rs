//! Request interception for the virtual origin.
//!
//! A [`ResourceRouter`] answers every request the engine hands it with one
//! of two responders: a [`ResourceStreamAdapter`] that streams a freshly
//! looked-up [`ResourceHandle`], or the stateless [`Rejected`] responder.

use std::borrow::Cow;
use std::fmt;
use std::io::Read;

mod router;
mod stream;

#[cfg(test)]
mod tests;

pub use router::{ResourceRouter, Routed};
pub use stream::{ReadOutcome, Rejected, ResourceResponder, ResourceStreamAdapter, ResponseHead};

/// A byte source plus its declared content type.
///
/// Created fresh per request by a [`ResourceLookup`] and owned by exactly
/// one stream adapter from then on.
pub struct ResourceHandle {
    source: Box<dyn Read + Send>,
    content_type: Cow<'static, str>,
}

impl ResourceHandle {
    pub fn new(
        source: impl Read + Send + 'static,
        content_type: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            source: Box::new(source),
            content_type: content_type.into(),
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub(crate) fn into_parts(self) -> (Box<dyn Read + Send>, Cow<'static, str>) {
        (self.source, self.content_type)
    }
}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Maps a request path (leading `/` included, no query string) to a
/// resource.
///
/// Called concurrently from engine threads. Returning `None` means "not
/// found"; the router also treats a panic inside `lookup` as not found.
pub trait ResourceLookup: Send + Sync {
    fn lookup(&self, path: &str) -> Option<ResourceHandle>;
}

impl<F> ResourceLookup for F
where
    F: Fn(&str) -> Option<ResourceHandle> + Send + Sync,
{
    fn lookup(&self, path: &str) -> Option<ResourceHandle> {
        self(path)
    }
}
