use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use cfgview_common::BridgeError;

const DECODE_PREFIX: &str = "(()=>{const s=atob(\"";
// `ignoreBOM` keeps a leading U+FEFF; the default decoder strips it.
const DECODE_SUFFIX: &str = "\");return new TextDecoder(undefined,{ignoreBOM:true})\
     .decode(Uint8Array.from(s,(c)=>c.charCodeAt(0)));})()";

/// Encode a string as a script expression that evaluates to exactly that
/// string.
///
/// The UTF-8 bytes are base64-encoded and embedded in a double-quoted
/// literal. The base64 alphabet contains no quote, backslash, angle
/// bracket or line terminator, so no input can break out of the literal.
pub fn encode_str(value: &str) -> String {
    let encoded = STANDARD.encode(value.as_bytes());
    let mut out = String::with_capacity(DECODE_PREFIX.len() + encoded.len() + DECODE_SUFFIX.len());
    out.push_str(DECODE_PREFIX);
    out.push_str(&encoded);
    out.push_str(DECODE_SUFFIX);
    out
}

/// Largest integer a script number holds exactly (`Number.MAX_SAFE_INTEGER`).
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// An argument to an outbound script call.
///
/// Strings go through [`encode_str`]; numbers and booleans use their
/// literal form. A float argument can only be built from a finite value.
/// Integers beyond [`MAX_SAFE_INTEGER`] in magnitude are rejected, since
/// the script would read their literal as a different number.
#[derive(Debug, Clone, PartialEq)]
pub struct JsArg(Repr);

#[derive(Debug, Clone, PartialEq)]
enum Repr {
    Str(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
}

impl JsArg {
    pub fn str(value: impl Into<String>) -> Self {
        Self(Repr::Str(value.into()))
    }

    pub fn int(value: i64) -> Result<Self, BridgeError> {
        if value.unsigned_abs() <= MAX_SAFE_INTEGER {
            Ok(Self(Repr::Int(value)))
        } else {
            Err(BridgeError::UnsafeInteger(value.into()))
        }
    }

    pub fn uint(value: u64) -> Result<Self, BridgeError> {
        if value <= MAX_SAFE_INTEGER {
            Ok(Self(Repr::Uint(value)))
        } else {
            Err(BridgeError::UnsafeInteger(value.into()))
        }
    }

    /// Fails for NaN and infinities, which have no numeric literal.
    pub fn float(value: f64) -> Result<Self, BridgeError> {
        if value.is_finite() {
            Ok(Self(Repr::Float(value)))
        } else {
            Err(BridgeError::NonFiniteNumber(value))
        }
    }

    pub fn bool(value: bool) -> Self {
        Self(Repr::Bool(value))
    }

    /// The script expression for this argument.
    pub fn to_script(&self) -> String {
        match &self.0 {
            Repr::Str(s) => encode_str(s),
            Repr::Int(n) => n.to_string(),
            Repr::Uint(n) => n.to_string(),
            // `Display` for f64 never uses exponent notation, and every
            // finite value prints as a valid numeric literal.
            Repr::Float(f) => f.to_string(),
            Repr::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for JsArg {
    fn from(value: &str) -> Self {
        Self::str(value)
    }
}

impl From<String> for JsArg {
    fn from(value: String) -> Self {
        Self::str(value)
    }
}

impl From<bool> for JsArg {
    fn from(value: bool) -> Self {
        Self::bool(value)
    }
}

impl From<i32> for JsArg {
    fn from(value: i32) -> Self {
        Self(Repr::Int(value.into()))
    }
}

impl From<u32> for JsArg {
    fn from(value: u32) -> Self {
        Self(Repr::Uint(value.into()))
    }
}

impl TryFrom<i64> for JsArg {
    type Error = BridgeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::int(value)
    }
}

impl TryFrom<u64> for JsArg {
    type Error = BridgeError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::uint(value)
    }
}

impl TryFrom<usize> for JsArg {
    type Error = BridgeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::uint(value as u64)
    }
}

impl TryFrom<f64> for JsArg {
    type Error = BridgeError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::float(value)
    }
}
