use std::borrow::Cow;
use std::fmt;
use std::io::{ErrorKind, Read};

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::ResourceHandle;

/// Status line and headers reported before any body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    pub status: u16,
    pub content_type: Option<Cow<'static, str>>,
    /// `None` when the length is not known up front (streamed body).
    pub content_length: Option<u64>,
}

/// Result of a single `read` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// `n` bytes were written to the front of the buffer.
    Data(usize),
    /// The body is complete.
    Done,
    /// The request failed; no more bytes will be delivered.
    Failed,
    /// The request was cancelled; no more bytes will be delivered.
    Cancelled,
}

/// The engine-facing half of a resource request.
///
/// The engine calls `open` once, reads the head, then pulls body bytes
/// with `read` until it sees anything other than [`ReadOutcome::Data`].
/// `cancel` may arrive at any point, from either side.
pub trait ResourceResponder: Send {
    /// Start the response. `false` means the request is refused and the
    /// engine must not read a body.
    fn open(&mut self) -> bool;

    fn head(&self) -> ResponseHead;

    fn read(&mut self, buf: &mut [u8]) -> ReadOutcome;

    fn cancel(&mut self);
}

/// The responder for every rejected request.
///
/// Zero-sized and stateless: every rejection behaves identically, so one
/// value serves all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rejected;

impl ResourceResponder for Rejected {
    fn open(&mut self) -> bool {
        false
    }

    fn head(&self) -> ResponseHead {
        ResponseHead {
            status: 404,
            content_type: None,
            content_length: Some(0),
        }
    }

    fn read(&mut self, _buf: &mut [u8]) -> ReadOutcome {
        ReadOutcome::Failed
    }

    fn cancel(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Pending,
    Open,
    Finished,
    Cancelled,
    Failed,
}

/// Serves one accepted [`ResourceHandle`] to the engine.
///
/// Single-shot and sequential: bytes are delivered in source order, in
/// whatever chunk sizes the engine asks for. The byte source is dropped
/// exactly once, on whichever comes first of end-of-stream, a read error,
/// cancellation, or the adapter itself being dropped.
pub struct ResourceStreamAdapter {
    source: Option<Box<dyn Read + Send>>,
    content_type: Cow<'static, str>,
    state: State,
    cancel: CancellationToken,
    delivered: u64,
}

impl ResourceStreamAdapter {
    /// Wrap a handle. Cancelling `cancel` (or its parent) stops delivery
    /// at the next engine contact.
    pub fn new(handle: ResourceHandle, cancel: CancellationToken) -> Self {
        let (source, content_type) = handle.into_parts();
        Self {
            source: Some(source),
            content_type,
            state: State::Pending,
            cancel,
            delivered: 0,
        }
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Total body bytes handed to the engine so far.
    pub fn bytes_delivered(&self) -> u64 {
        self.delivered
    }

    /// Whether the byte source has been dropped.
    pub fn is_released(&self) -> bool {
        self.source.is_none()
    }

    fn release(&mut self, next: State) {
        if self.source.take().is_some() {
            debug!(
                state = ?next,
                delivered = self.delivered,
                content_type = %self.content_type,
                "resource source released"
            );
        }
        self.state = next;
    }
}

impl fmt::Debug for ResourceStreamAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceStreamAdapter")
            .field("content_type", &self.content_type)
            .field("state", &self.state)
            .field("delivered", &self.delivered)
            .field("released", &self.source.is_none())
            .finish()
    }
}

impl ResourceResponder for ResourceStreamAdapter {
    fn open(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            self.release(State::Cancelled);
            return false;
        }
        match self.state {
            State::Pending => {
                self.state = State::Open;
                true
            }
            _ => false,
        }
    }

    fn head(&self) -> ResponseHead {
        ResponseHead {
            status: 200,
            content_type: Some(self.content_type.clone()),
            content_length: None,
        }
    }

    fn read(&mut self, buf: &mut [u8]) -> ReadOutcome {
        match self.state {
            State::Open => {}
            State::Finished => return ReadOutcome::Done,
            State::Cancelled => return ReadOutcome::Cancelled,
            State::Failed => return ReadOutcome::Failed,
            State::Pending => {
                warn!("resource read before open");
                self.release(State::Failed);
                return ReadOutcome::Failed;
            }
        }

        if self.cancel.is_cancelled() {
            self.release(State::Cancelled);
            return ReadOutcome::Cancelled;
        }
        if buf.is_empty() {
            return ReadOutcome::Data(0);
        }

        let Some(source) = self.source.as_mut() else {
            self.state = State::Failed;
            return ReadOutcome::Failed;
        };
        let result = loop {
            match source.read(buf) {
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                other => break other,
            }
        };

        match result {
            Ok(0) => {
                self.release(State::Finished);
                ReadOutcome::Done
            }
            Ok(n) => {
                self.delivered += n as u64;
                ReadOutcome::Data(n)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    delivered = self.delivered,
                    content_type = %self.content_type,
                    "resource read failed"
                );
                self.release(State::Failed);
                ReadOutcome::Failed
            }
        }
    }

    fn cancel(&mut self) {
        match self.state {
            State::Finished | State::Cancelled | State::Failed => {}
            State::Pending | State::Open => self.release(State::Cancelled),
        }
    }
}
