//! Viewer event types.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageLoadState {
    Started,
    Finished,
}

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(e: wry::PageLoadEvent) -> Self {
        match e {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

/// Events raised on engine threads for the host loop to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Page load state changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// The viewer asked the host to move the cursor to a character offset.
    NavigateTo { offset: usize },
    /// A navigation outside the virtual origin was refused.
    NavigationBlocked { url: String },
}

/// Shared event queue. Producers push from any thread; the host loop
/// drains.
#[derive(Debug, Clone, Default)]
pub struct ViewerEvents {
    queue: Arc<Mutex<Vec<ViewerEvent>>>,
}

impl ViewerEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: ViewerEvent) {
        if let Ok(mut queue) = self.queue.lock() {
            queue.push(event);
        }
    }

    /// Take all pending events in arrival order.
    pub fn drain(&self) -> Vec<ViewerEvent> {
        match self.queue.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }
}
