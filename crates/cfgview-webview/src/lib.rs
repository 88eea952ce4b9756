//! Host-side bridge for an embedded control-flow-graph viewer.
//!
//! Provides:
//! - A virtual origin whose requests are answered from in-process
//!   resources ([`ResourceRouter`], [`ResourceStreamAdapter`])
//! - Injection-safe script calls into the viewer ([`encode_str`],
//!   [`ViewerBridge`])
//! - Query channels from the viewer back to the host
//! - The viewer's call surface ([`GraphViewer`])
//! - `wry` wiring for all of the above ([`WebViewManager`])

pub mod bridge;
pub mod content;
pub mod events;
pub mod manager;
pub mod origin;
pub mod query;
pub mod resource;
pub mod script;
pub mod viewer;

pub use bridge::{BridgeConfig, Interception, ScriptSink, ViewerBridge, VIEWER_PATH};
pub use content::{content_type_for, BundleLookup, DirLookup};
pub use events::{PageLoadState, ViewerEvent, ViewerEvents};
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager};
pub use origin::VirtualOrigin;
pub use query::{QueryChannel, QueryDispatcher, QueryHandler};
pub use resource::{
    ReadOutcome, Rejected, ResourceHandle, ResourceLookup, ResourceResponder, ResourceRouter,
    ResourceStreamAdapter, Routed,
};
pub use script::{encode_str, JsArg, MAX_SAFE_INTEGER};
pub use viewer::{internal_language_name, parse_offset, GraphViewer};
