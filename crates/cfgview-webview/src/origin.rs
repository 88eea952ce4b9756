//! The reserved `(scheme, authority)` pair the resource router answers for.

use std::fmt;

/// A virtual origin served from inside the process.
///
/// Matching is exact and case-sensitive on both parts. There is no
/// wildcarding and no port or userinfo normalisation: `localhost:80` is a
/// different authority from `localhost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualOrigin {
    scheme: String,
    authority: String,
}

/// Scheme, authority and path split out of a well-formed request URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub scheme: String,
    pub authority: String,
    /// Path with its leading `/`, without query string or fragment.
    pub path: String,
}

impl VirtualOrigin {
    pub fn new(scheme: impl Into<String>, authority: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            authority: authority.into(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Absolute URL for a path under this origin.
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}://{}/{}", self.scheme, self.authority, path)
    }

    /// Whether a parsed request targets this origin.
    pub fn matches(&self, target: &RequestTarget) -> bool {
        target.scheme == self.scheme && target.authority == self.authority
    }

    /// Whether a raw URL (e.g. a navigation target) lies within this origin.
    pub fn contains_url(&self, url: &str) -> bool {
        parse_request_url(url).is_some_and(|t| self.matches(&t))
    }
}

impl Default for VirtualOrigin {
    fn default() -> Self {
        Self::new("cfgview", "localhost")
    }
}

impl fmt::Display for VirtualOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.authority)
    }
}

/// Strictly parse a request URL.
///
/// The URL must parse with [`url::Url`] and carry an explicit `//`
/// authority. Scheme and authority are taken verbatim from the input so
/// that origin matching stays case-sensitive (the URL parser lowercases
/// both). The path is the parser's normalised path, so `.` and `..`
/// segments are already resolved.
pub fn parse_request_url(raw: &str) -> Option<RequestTarget> {
    let parsed = url::Url::parse(raw).ok()?;
    if parsed.cannot_be_a_base() {
        return None;
    }

    let (scheme, rest) = raw.split_once("://")?;
    let authority_end = rest
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    if authority.is_empty() {
        return None;
    }

    // Non-special schemes report an empty path for `scheme://host`.
    let path = match parsed.path() {
        "" => "/".to_string(),
        p => p.to_string(),
    };

    Some(RequestTarget {
        scheme: scheme.to_string(),
        authority: authority.to_string(),
        path,
    })
}
