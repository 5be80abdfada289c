//! Where book and dictionary files come from.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::{trace, warn};

use super::format::markup;
use super::types::error::{BibleError, Result};

/// Delivers raw file bytes by relative path.
///
/// Implementations must be shareable across threads; the engine fetches from
/// whichever thread first asks for a resource.
pub trait DocumentSource: Send + Sync {
    /// # Errors
    /// Returns `BibleError::Fetch` when the file does not exist, or
    /// `BibleError::Io` when it exists but cannot be read.
    fn fetch(&self, path: &str) -> Result<Vec<u8>>;
}

/// Serves files from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DocumentSource for DirectorySource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.root.join(path);
        trace!("Reading {}", full.display());
        std::fs::read(&full).map_err(|e| match e.kind() {
            ErrorKind::NotFound => BibleError::Fetch {
                path: path.to_string(),
                reason: format!("{} does not exist", full.display()),
            },
            _ => BibleError::Io(e),
        })
    }
}

/// Serves files held in memory, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a file.
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }
}

impl DocumentSource for MemorySource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        self.files.get(path).cloned().ok_or_else(|| BibleError::Fetch {
            path: path.to_string(),
            reason: "no such file".to_string(),
        })
    }
}

/// Whether decoded content is an HTML page (a web server's fallback for a
/// missing file) rather than XML.
pub(crate) fn looks_like_html(text: &str) -> bool {
    let head: String = text
        .trim_start()
        .chars()
        .take(14)
        .collect::<String>()
        .to_ascii_lowercase();
    head.starts_with("<!doctype html") || head.starts_with("<html")
}

/// Fetches a file and decodes it to text, rejecting HTML fallback pages.
///
/// # Errors
/// - `Fetch` if the source cannot deliver the file
/// - `SoftNotFound` if the body is an HTML page
pub(crate) fn fetch_text(source: &dyn DocumentSource, path: &str) -> Result<String> {
    let bytes = source.fetch(path)?;
    let text = markup::decode_text(&bytes);
    if looks_like_html(&text) {
        warn!("{} came back as an HTML page", path);
        return Err(BibleError::SoftNotFound(path.to_string()));
    }
    Ok(text)
}
