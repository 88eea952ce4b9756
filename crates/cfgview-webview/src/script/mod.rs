//! Generation of script text sent into the viewer.
//!
//! Host data only ever enters generated script through [`JsArg`], whose
//! string form is base64 inside a fixed decoder expression. Function and
//! parameter names are checked against identifier syntax before they are
//! spliced into source.

mod call;
mod encode;

pub use call::{format_call, format_function, is_identifier, is_identifier_path};
pub use encode::{encode_str, JsArg, MAX_SAFE_INTEGER};
