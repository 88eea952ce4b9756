use std::borrow::Cow;

use tracing::{debug, warn};
use wry::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use wry::http::{Response, StatusCode};
use wry::WebViewBuilder;

use crate::bridge::Interception;
use crate::events::{PageLoadState, ViewerEvent, ViewerEvents};
use crate::origin::VirtualOrigin;
use crate::resource::{ReadOutcome, ResourceResponder};

/// Bytes pulled from a responder per read.
const CHUNK_SIZE: usize = 64 * 1024;

// =============================================================================
// NAVIGATION ALLOWLIST
// =============================================================================

/// Check whether the viewer may navigate to `url`.
///
/// Only the virtual origin itself and `about:blank` are allowed. On
/// Windows, WebView2 rewrites `scheme://authority/…` to
/// `http://scheme.authority/…`, so that form is accepted too.
pub fn is_navigation_allowed(origin: &VirtualOrigin, url: &str) -> bool {
    if url == "about:blank" {
        return true;
    }
    let rewritten = VirtualOrigin::new(
        "http",
        format!("{}.{}", origin.scheme(), origin.authority()),
    );
    origin.contains_url(url) || rewritten.contains_url(url)
}

// =============================================================================
// CUSTOM PROTOCOL RESPONSES
// =============================================================================

/// Drive a responder to completion and build the engine response.
///
/// Refused requests get the responder's own error status with an empty
/// body, or 503 if the responder was cancelled before it could open. A
/// read failure turns the whole response into a 500; a cancellation into a
/// 503. Partial bodies are never returned.
pub fn respond(
    responder: &mut dyn ResourceResponder,
    origin: &VirtualOrigin,
) -> Response<Cow<'static, [u8]>> {
    if !responder.open() {
        let status = responder.head().status;
        return empty(if status < 400 { 503 } else { status });
    }
    let head = responder.head();

    let mut body = Vec::new();
    let mut chunk = vec![0u8; CHUNK_SIZE];
    loop {
        match responder.read(&mut chunk) {
            ReadOutcome::Data(n) => body.extend_from_slice(&chunk[..n]),
            ReadOutcome::Done => break,
            ReadOutcome::Failed => return empty(500),
            ReadOutcome::Cancelled => return empty(503),
        }
    }

    let mut builder = Response::builder()
        .status(head.status)
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, origin.to_string());
    if let Some(content_type) = &head.content_type {
        builder = builder.header(CONTENT_TYPE, content_type.as_ref());
    }
    builder.body(Cow::Owned(body)).unwrap_or_else(|e| {
        warn!(error = %e, "custom protocol: invalid response head");
        empty(500)
    })
}

fn empty(status: u16) -> Response<Cow<'static, [u8]>> {
    let mut response = Response::new(Cow::Borrowed(&[][..]));
    *response.status_mut() =
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    response
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

pub(super) fn attach_custom_protocol(
    builder: WebViewBuilder<'_>,
    interception: Interception,
) -> WebViewBuilder<'_> {
    let scheme = interception.origin().scheme().to_string();
    builder.with_custom_protocol(scheme, move |_wv_id, request| {
        let uri = request.uri().to_string();
        let mut responder = interception.handle_request(&uri).into_responder();
        respond(responder.as_mut(), interception.origin())
    })
}

pub(super) fn attach_ipc_handler(
    builder: WebViewBuilder<'_>,
    interception: Interception,
) -> WebViewBuilder<'_> {
    builder.with_ipc_handler(move |request| {
        let body = request.body();
        debug!(body_len = body.len(), "IPC message from viewer");
        interception.handle_ipc(body);
    })
}

pub(super) fn attach_page_load_handler(
    builder: WebViewBuilder<'_>,
    events: ViewerEvents,
) -> WebViewBuilder<'_> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(?state, url = %url, "page load");
        events.push(ViewerEvent::PageLoad { state, url });
    })
}

pub(super) fn attach_navigation_handler(
    builder: WebViewBuilder<'_>,
    origin: VirtualOrigin,
    events: ViewerEvents,
) -> WebViewBuilder<'_> {
    builder.with_navigation_handler(move |url| {
        if !is_navigation_allowed(&origin, &url) {
            warn!(url = %url, "navigation blocked: outside the viewer origin");
            events.push(ViewerEvent::NavigationBlocked { url });
            return false;
        }
        debug!(url = %url, "navigation allowed");
        true
    })
}

// =============================================================================
// TESTS
// =============================================================================
