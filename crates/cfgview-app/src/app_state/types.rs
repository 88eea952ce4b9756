//! Internal constants for the app state module.

use std::time::Duration;

/// How often to poll for viewer events (approx 120 Hz).
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(8);

/// Initial window size in logical pixels.
pub(super) const DEFAULT_WINDOW_SIZE: (f64, f64) = (900.0, 700.0);
