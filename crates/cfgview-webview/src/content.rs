//! Resource lookups for the virtual origin.
//!
//! Two [`ResourceLookup`] implementations: an in-memory [`BundleLookup`]
//! for assets compiled into the host, and a [`DirLookup`] that streams
//! files from a resource directory. Both only serve extensions with a
//! known content type.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::resource::{ResourceHandle, ResourceLookup};

/// Content type for a resource path, by extension.
///
/// The mapping is closed: anything not listed has no content type and is
/// therefore not servable.
pub fn content_type_for(path: &str) -> Option<&'static str> {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("html") => Some("text/html"),
        Some("png") => Some("image/png"),
        Some("wasm") => Some("application/wasm"),
        Some("js") => Some("text/javascript"),
        Some("css") => Some("text/css"),
        Some("json") => Some("application/json"),
        _ => None,
    }
}

#[derive(Clone)]
struct BundleEntry {
    content_type: Cow<'static, str>,
    data: Arc<[u8]>,
}

/// In-memory resource bundle.
///
/// Keys are stored without a leading `/`, so `/index.html` and
/// `index.html` name the same entry. Request paths are percent-decoded
/// before matching, as in [`DirLookup`]. Each lookup hands out a fresh
/// reader over shared bytes.
#[derive(Clone, Default)]
pub struct BundleLookup {
    entries: HashMap<String, BundleEntry>,
}

impl BundleLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an asset whose content type follows from its extension.
    ///
    /// Returns `false` (and stores nothing) for unknown extensions.
    pub fn insert(&mut self, path: &str, data: impl Into<Arc<[u8]>>) -> bool {
        match content_type_for(path) {
            Some(content_type) => {
                self.insert_with_type(path, content_type, data);
                true
            }
            None => false,
        }
    }

    /// Add an asset with an explicit content type.
    pub fn insert_with_type(
        &mut self,
        path: &str,
        content_type: impl Into<Cow<'static, str>>,
        data: impl Into<Arc<[u8]>>,
    ) {
        self.entries.insert(
            normalize_key(path).to_string(),
            BundleEntry {
                content_type: content_type.into(),
                data: data.into(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResourceLookup for BundleLookup {
    fn lookup(&self, path: &str) -> Option<ResourceHandle> {
        let decoded = urlencoding::decode(path).ok()?;
        let entry = self.entries.get(normalize_key(&decoded))?;
        Some(ResourceHandle::new(
            Cursor::new(Arc::clone(&entry.data)),
            entry.content_type.clone(),
        ))
    }
}

fn normalize_key(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// Streams files from a resource directory.
///
/// Request paths are percent-decoded and resolved under `root`; anything
/// that canonicalises outside the root (via `..`, absolute paths or
/// symlinks) is not found.
#[derive(Debug, Clone)]
pub struct DirLookup {
    root: PathBuf,
}

impl DirLookup {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let decoded = urlencoding::decode(path).ok()?;
        let clean = decoded.trim_start_matches('/');
        let file_path = self.root.join(clean);

        let canonical_root = std::fs::canonicalize(&self.root).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_root) {
            debug!(path = %path, "resource path escapes the resource root");
            return None;
        }
        canonical_file.is_file().then_some(canonical_file)
    }
}

impl ResourceLookup for DirLookup {
    fn lookup(&self, path: &str) -> Option<ResourceHandle> {
        let file_path = self.resolve(path)?;
        let content_type = content_type_for(&file_path.to_string_lossy())?;
        let file = File::open(&file_path).ok()?;
        Some(ResourceHandle::new(file, content_type))
    }
}
