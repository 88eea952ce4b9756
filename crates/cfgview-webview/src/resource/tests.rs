use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::*;
use crate::content::BundleLookup;
use crate::origin::VirtualOrigin;

fn localhost() -> VirtualOrigin {
    VirtualOrigin::new("http", "localhost")
}

fn bundle_router(shutdown: CancellationToken) -> ResourceRouter {
    let mut bundle = BundleLookup::new();
    bundle.insert("/index.html", b"<html>viewer</html>".to_vec());
    bundle.insert("/a.js", b"console.log('graph');".to_vec());
    ResourceRouter::new(localhost(), Arc::new(bundle), shutdown)
}

fn accepted(routed: Routed) -> ResourceStreamAdapter {
    match routed {
        Routed::Accepted(adapter) => adapter,
        Routed::Rejected => panic!("expected the request to be accepted"),
    }
}

/// Drive a responder the way the engine does, `chunk` bytes at a time.
fn drain(responder: &mut dyn ResourceResponder, chunk: usize) -> (Vec<u8>, ReadOutcome) {
    let mut body = Vec::new();
    let mut buf = vec![0u8; chunk];
    loop {
        match responder.read(&mut buf) {
            ReadOutcome::Data(n) => body.extend_from_slice(&buf[..n]),
            end => return (body, end),
        }
    }
}

/// Counts how many times it has been dropped.
struct DropCounter {
    inner: Cursor<Vec<u8>>,
    drops: Arc<AtomicUsize>,
}

impl Read for DropCounter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Drop for DropCounter {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}

fn counted(data: &[u8]) -> (ResourceHandle, Arc<AtomicUsize>) {
    let drops = Arc::new(AtomicUsize::new(0));
    let source = DropCounter {
        inner: Cursor::new(data.to_vec()),
        drops: Arc::clone(&drops),
    };
    (ResourceHandle::new(source, "text/plain"), drops)
}

/// Yields `good` bytes, then fails.
struct FailingReader {
    good: Cursor<Vec<u8>>,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.good.read(buf)? {
            0 => Err(io::Error::new(io::ErrorKind::Other, "disk went away")),
            n => Ok(n),
        }
    }
}

/// Interrupted once before every successful read.
struct InterruptingReader {
    inner: Cursor<Vec<u8>>,
    interrupt_next: bool,
}

impl Read for InterruptingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt_next = !self.interrupt_next;
        if self.interrupt_next {
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.inner.read(buf)
    }
}

// ---------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------

#[test]
fn index_is_accepted_as_html() {
    let router = bundle_router(CancellationToken::new());
    let adapter = accepted(router.handle("http://localhost/index.html"));
    assert_eq!(adapter.content_type(), "text/html");
}

#[test]
fn missing_resource_is_rejected() {
    let router = bundle_router(CancellationToken::new());
    assert!(matches!(
        router.handle("http://localhost/missing.js"),
        Routed::Rejected
    ));
}

#[test]
fn foreign_origins_are_rejected() {
    let router = bundle_router(CancellationToken::new());
    for url in [
        "http://evil.example/index.html",
        "https://localhost/index.html",
        "http://localhost:8080/index.html",
        "HTTP://localhost/index.html",
        "http://LOCALHOST/index.html",
        "http://localhost.evil.example/index.html",
    ] {
        assert!(!router.handle(url).is_accepted(), "{url} was accepted");
    }
}

#[test]
fn malformed_urls_are_rejected() {
    let router = bundle_router(CancellationToken::new());
    for url in ["", "index.html", "/index.html", "http://", "localhost/index.html", "::"] {
        assert!(!router.handle(url).is_accepted(), "{url:?} was accepted");
    }
}

#[test]
fn query_string_and_fragment_are_ignored() {
    let router = bundle_router(CancellationToken::new());
    assert!(router.handle("http://localhost/index.html?v=2").is_accepted());
    assert!(router.handle("http://localhost/index.html#top").is_accepted());
}

#[test]
fn lookup_receives_path_only() {
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let recorder = {
        let seen = Arc::clone(&seen);
        move |path: &str| -> Option<ResourceHandle> {
            seen.lock().unwrap().push(path.to_string());
            None
        }
    };
    let router = ResourceRouter::new(localhost(), Arc::new(recorder), CancellationToken::new());
    router.handle("http://localhost/index.html?x=1");
    router.handle("http://localhost");
    router.handle("http://evil.example/never.js");
    assert_eq!(*seen.lock().unwrap(), vec!["/index.html", "/"]);
}

#[test]
fn panicking_lookup_is_rejected() {
    let lookup = |_: &str| -> Option<ResourceHandle> { panic!("lookup bug") };
    let router = ResourceRouter::new(localhost(), Arc::new(lookup), CancellationToken::new());
    assert!(!router.handle("http://localhost/index.html").is_accepted());
    // The router stays usable.
    assert!(!router.handle("http://localhost/other.html").is_accepted());
}

#[test]
fn every_request_gets_a_fresh_handle() {
    let opened = Arc::new(AtomicUsize::new(0));
    let lookup = {
        let opened = Arc::clone(&opened);
        move |_: &str| -> Option<ResourceHandle> {
            opened.fetch_add(1, Ordering::SeqCst);
            Some(ResourceHandle::new(Cursor::new(b"x".to_vec()), "text/css"))
        }
    };
    let router = ResourceRouter::new(localhost(), Arc::new(lookup), CancellationToken::new());
    for _ in 0..3 {
        assert!(router.handle("http://localhost/s.css").is_accepted());
    }
    assert_eq!(opened.load(Ordering::SeqCst), 3);
}

// ---------------------------------------------------------------------
// Streaming
// ---------------------------------------------------------------------

#[test]
fn served_bytes_are_exact_for_any_chunk_size() {
    let router = bundle_router(CancellationToken::new());
    for chunk in [1, 3, 7, 64, 4096] {
        let mut responder = router.handle("http://localhost/a.js").into_responder();
        assert!(responder.open());
        let head = responder.head();
        assert_eq!(head.status, 200);
        assert_eq!(head.content_type.as_deref(), Some("text/javascript"));
        assert_eq!(head.content_length, None);

        let (body, end) = drain(responder.as_mut(), chunk);
        assert_eq!(end, ReadOutcome::Done);
        assert_eq!(body, b"console.log('graph');");
        // Done is sticky.
        assert_eq!(drain(responder.as_mut(), chunk).1, ReadOutcome::Done);
    }
}

#[test]
fn empty_resource_finishes_immediately() {
    let lookup = |_: &str| Some(ResourceHandle::new(io::empty(), "application/json"));
    let router = ResourceRouter::new(localhost(), Arc::new(lookup), CancellationToken::new());
    let mut adapter = accepted(router.handle("http://localhost/empty.json"));
    assert!(adapter.open());
    let (body, end) = drain(&mut adapter, 16);
    assert!(body.is_empty());
    assert_eq!(end, ReadOutcome::Done);
    assert!(adapter.is_released());
}

#[test]
fn zero_length_buffer_reads_nothing() {
    let router = bundle_router(CancellationToken::new());
    let mut adapter = accepted(router.handle("http://localhost/a.js"));
    assert!(adapter.open());
    assert_eq!(adapter.read(&mut [0u8; 0]), ReadOutcome::Data(0));
    assert_eq!(adapter.bytes_delivered(), 0);
}

#[test]
fn interrupted_reads_are_retried() {
    let source = InterruptingReader {
        inner: Cursor::new(b"abcdef".to_vec()),
        interrupt_next: false,
    };
    let mut adapter =
        ResourceStreamAdapter::new(ResourceHandle::new(source, "text/css"), CancellationToken::new());
    assert!(adapter.open());
    let (body, end) = drain(&mut adapter, 4);
    assert_eq!(body, b"abcdef");
    assert_eq!(end, ReadOutcome::Done);
}

#[test]
fn open_is_single_shot() {
    let (handle, _) = counted(b"abc");
    let mut adapter = ResourceStreamAdapter::new(handle, CancellationToken::new());
    assert!(adapter.open());
    assert!(!adapter.open());
}

#[test]
fn read_before_open_fails() {
    let (handle, drops) = counted(b"abc");
    let mut adapter = ResourceStreamAdapter::new(handle, CancellationToken::new());
    assert_eq!(adapter.read(&mut [0u8; 8]), ReadOutcome::Failed);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------
// Release and cancellation
// ---------------------------------------------------------------------

#[test]
fn source_released_once_at_end_of_stream() {
    let (handle, drops) = counted(b"hello");
    let mut adapter = ResourceStreamAdapter::new(handle, CancellationToken::new());
    assert!(adapter.open());
    let (_, end) = drain(&mut adapter, 2);
    assert_eq!(end, ReadOutcome::Done);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    adapter.cancel();
    drop(adapter);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn cancel_mid_stream_releases_once_and_stops_delivery() {
    let (handle, drops) = counted(b"0123456789");
    let mut adapter = ResourceStreamAdapter::new(handle, CancellationToken::new());
    assert!(adapter.open());
    let mut buf = [0u8; 4];
    assert_eq!(adapter.read(&mut buf), ReadOutcome::Data(4));

    adapter.cancel();
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    assert!(adapter.is_released());

    adapter.cancel();
    assert_eq!(adapter.read(&mut buf), ReadOutcome::Cancelled);
    assert_eq!(adapter.bytes_delivered(), 4);
    drop(adapter);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn cancel_before_open_releases_once() {
    let (handle, drops) = counted(b"abc");
    let mut adapter = ResourceStreamAdapter::new(handle, CancellationToken::new());
    adapter.cancel();
    assert_eq!(drops.load(Ordering::SeqCst), 1);
    assert!(!adapter.open());
    assert_eq!(adapter.read(&mut [0u8; 4]), ReadOutcome::Cancelled);
}

#[test]
fn dropping_unopened_adapter_releases_once() {
    let (handle, drops) = counted(b"abc");
    let adapter = ResourceStreamAdapter::new(handle, CancellationToken::new());
    drop(adapter);
    assert_eq!(drops.load(Ordering::SeqCst), 1);
}

#[test]
fn read_error_fails_only_that_request() {
    let failing = |_: &str| {
        Some(ResourceHandle::new(
            FailingReader {
                good: Cursor::new(b"partial".to_vec()),
            },
            "text/javascript",
        ))
    };
    let router = ResourceRouter::new(localhost(), Arc::new(failing), CancellationToken::new());
    let mut broken = accepted(router.handle("http://localhost/broken.js"));
    assert!(broken.open());
    let (body, end) = drain(&mut broken, 4);
    assert_eq!(body, b"partial");
    assert_eq!(end, ReadOutcome::Failed);
    assert!(broken.is_released());
    assert_eq!(broken.read(&mut [0u8; 4]), ReadOutcome::Failed);

    // An unrelated request on another router is unaffected.
    let healthy = bundle_router(CancellationToken::new());
    let mut ok = healthy.handle("http://localhost/a.js").into_responder();
    assert!(ok.open());
    assert_eq!(drain(ok.as_mut(), 8).1, ReadOutcome::Done);
}

#[test]
fn shutdown_rejects_new_and_cancels_in_flight() {
    let shutdown = CancellationToken::new();
    let router = bundle_router(shutdown.clone());
    let mut in_flight = accepted(router.handle("http://localhost/a.js"));
    let mut not_opened = accepted(router.handle("http://localhost/index.html"));
    assert!(in_flight.open());
    let mut buf = [0u8; 4];
    assert_eq!(in_flight.read(&mut buf), ReadOutcome::Data(4));

    shutdown.cancel();

    assert!(!router.handle("http://localhost/a.js").is_accepted());
    assert_eq!(in_flight.read(&mut buf), ReadOutcome::Cancelled);
    assert!(in_flight.is_released());
    assert!(!not_opened.open());
    assert!(not_opened.is_released());
}

#[test]
fn rejected_responder_is_stateless() {
    let mut rejected = Routed::Rejected.into_responder();
    assert!(!rejected.open());
    assert_eq!(
        rejected.head(),
        ResponseHead {
            status: 404,
            content_type: None,
            content_length: Some(0),
        }
    );
    assert_eq!(rejected.read(&mut [0u8; 8]), ReadOutcome::Failed);
    rejected.cancel();
    rejected.cancel();
    assert_eq!(std::mem::size_of::<Rejected>(), 0);
}

#[test]
fn concurrent_requests_are_independent() {
    let router = Arc::new(bundle_router(CancellationToken::new()));
    std::thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|i| {
                let router = Arc::clone(&router);
                scope.spawn(move || {
                    let path = if i % 2 == 0 { "a.js" } else { "index.html" };
                    let mut responder = router
                        .handle(&format!("http://localhost/{path}"))
                        .into_responder();
                    assert!(responder.open());
                    let (body, end) = drain(responder.as_mut(), 1 + i);
                    assert_eq!(end, ReadOutcome::Done);
                    (path, body)
                })
            })
            .collect();
        for worker in workers {
            let (path, body) = worker.join().unwrap();
            let expected: &[u8] = if path == "a.js" {
                b"console.log('graph');"
            } else {
                b"<html>viewer</html>"
            };
            assert_eq!(body, expected);
        }
    });
}

#[test]
fn bundled_asset_with_space_is_served_through_router() {
    let mut bundle = BundleLookup::new();
    bundle.insert("my file.css", b"body{}".to_vec());
    let router = ResourceRouter::new(localhost(), Arc::new(bundle), CancellationToken::new());

    let mut adapter = accepted(router.handle("http://localhost/my%20file.css"));
    assert!(adapter.open());
    assert_eq!(adapter.content_type(), "text/css");
    let (body, end) = drain(&mut adapter, 4);
    assert_eq!(body, b"body{}");
    assert_eq!(end, ReadOutcome::Done);
}
