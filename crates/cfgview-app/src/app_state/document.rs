//! The source file being viewed and its cursor.

use std::path::{Path, PathBuf};

use cfgview_common::{CfgviewError, Result};

/// Editor language name for a file, by extension.
///
/// Names follow the usual editor display names; the viewer bridge maps
/// them to its own grammar names.
pub fn language_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let language = match ext.as_str() {
        "py" | "pyi" => "Python",
        "go" => "Go",
        "c" => "C",
        "cc" | "cpp" | "cxx" | "h" | "hh" | "hpp" | "hxx" => "C/C++",
        "js" | "mjs" | "cjs" | "jsx" => "JavaScript",
        "ts" | "mts" | "cts" => "TypeScript",
        "tsx" => "TypeScript JSX",
        "java" => "Java",
        _ => return None,
    };
    Some(language)
}

/// A loaded source file plus the cursor position sent to the viewer.
///
/// Offsets are in UTF-16 code units, matching the viewer's string
/// indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    path: PathBuf,
    text: String,
    language: String,
    cursor: usize,
}

impl SourceDocument {
    pub fn new(path: PathBuf, text: String, language: String, cursor: usize) -> Self {
        let mut document = Self {
            path,
            text,
            language,
            cursor: 0,
        };
        document.set_cursor(cursor);
        document
    }

    /// Read `path`. The language comes from `language` if given, else from
    /// the extension.
    pub fn load(path: &Path, language: Option<&str>, cursor: usize) -> Result<Self> {
        let language = match language.or_else(|| language_for_path(path)) {
            Some(language) => language.to_string(),
            None => {
                return Err(CfgviewError::Other(format!(
                    "cannot infer the language of {}; pass --language",
                    path.display()
                )))
            }
        };
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(path.to_path_buf(), text, language, cursor))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the text in UTF-16 code units.
    pub fn len_utf16(&self) -> usize {
        self.text.encode_utf16().count()
    }

    /// Move the cursor, clamped to the end of the text. Returns whether it
    /// moved.
    pub fn set_cursor(&mut self, offset: usize) -> bool {
        let clamped = offset.min(self.len_utf16());
        let moved = clamped != self.cursor;
        self.cursor = clamped;
        moved
    }
}
