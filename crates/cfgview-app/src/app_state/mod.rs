//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the source document, the live settings and the one
//! embedded graph viewer.

mod core;
mod document;
mod event_handler;
mod init;
mod polling;
mod settings;
mod shutdown;
mod types;

#[cfg(test)]
mod test_support;

pub use core::CfgviewApp;
pub use document::SourceDocument;
