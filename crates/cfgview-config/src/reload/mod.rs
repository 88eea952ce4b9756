//! Live settings reload.
//!
//! Combines the file watcher with settings loading and republishes every
//! successfully reloaded record on a `watch` channel.

mod manager;


pub use manager::ReloadManager;
