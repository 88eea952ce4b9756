//! File watcher for live settings reload.
//!
//! Uses `notify` on the settings file's directory, debounced so that an
//! editor's write-then-rename save produces a single signal.

mod settings_watcher;


pub use settings_watcher::{SettingsWatcher, DEBOUNCE};
