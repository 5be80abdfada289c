//! Book document cache, verse extraction and adjacency.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::{debug, info};

use super::cache::LoadCell;
use super::format::document::BookDocument;
use super::source::{fetch_text, DocumentSource};
use super::types::books::BookCode;
use super::types::error::{BibleError, Result};
use super::types::models::{CanonicalReference, Direction, Verse};

/// Loaded books, one load cell per file.
pub struct DocumentStore {
    source: Arc<dyn DocumentSource>,
    books: Mutex<HashMap<String, Arc<LoadCell<BookDocument>>>>,
    scan_ceiling: u32,
}

impl DocumentStore {
    pub fn new(source: Arc<dyn DocumentSource>, scan_ceiling: u32) -> Self {
        Self {
            source,
            books: Mutex::new(HashMap::new()),
            scan_ceiling,
        }
    }

    fn file_name(book: &BookCode) -> Result<String> {
        book.file_name()
            .ok_or_else(|| BibleError::UnknownBook(book.to_string()))
    }

    fn cell(&self, file: &str) -> Result<Arc<LoadCell<BookDocument>>> {
        let mut books = self.books.lock().map_err(|_| BibleError::LockPoisoned)?;
        Ok(Arc::clone(books.entry(file.to_string()).or_default()))
    }

    /// Fetches, validates and indexes a book unless it is already cached.
    ///
    /// Concurrent calls for the same book share one fetch. Nothing is cached
    /// on failure, so the next call retries.
    ///
    /// # Errors
    /// - `UnknownBook` if no file is registered for the code
    /// - `Fetch` / `SoftNotFound` if the file cannot be delivered
    /// - `Xml` / `InvalidFormat` / `MissingBookNode` if it cannot be indexed
    /// - `LoadFailed` when waiting on another caller's failed load
    pub fn ensure_loaded(&self, book: &BookCode) -> Result<Arc<BookDocument>> {
        let file = Self::file_name(book)?;
        let cell = self.cell(&file)?;
        cell.get_or_load(&file, || {
            debug!("Fetching {} for {}", file, book);
            let text = fetch_text(self.source.as_ref(), &file)?;
            let document = BookDocument::from_xml(book, &text)?;
            info!("Loaded {}: {} words", file, document.word_count());
            Ok(document)
        })
    }

    /// The cached document for a book, without loading it.
    pub fn loaded(&self, book: &BookCode) -> Option<Arc<BookDocument>> {
        let file = Self::file_name(book).ok()?;
        let books = self.books.lock().ok()?;
        books.get(&file)?.get().ok().flatten()
    }

    /// The words of a verse from a loaded book.
    ///
    /// `None` if the book is not loaded, the verse is absent, or it has no
    /// words under either markup convention.
    pub fn verse(&self, reference: &CanonicalReference) -> Option<Verse> {
        let document = self.loaded(&reference.book)?;
        let words = document.verse_words(reference.chapter, reference.verse);
        if words.is_empty() {
            return None;
        }
        Some(Verse {
            reference: reference.clone(),
            words,
        })
    }

    /// The highest verse present in a loaded book.
    pub fn last_verse(&self, book: &BookCode) -> Option<CanonicalReference> {
        self.loaded(book)?.last_verse()
    }

    /// The neighbouring verse within the same book.
    ///
    /// When the book is not loaded the result is a best guess that callers
    /// should re-validate once it loads: the plain increment or decrement, or
    /// verse 1 of the previous chapter when stepping back across a chapter.
    pub fn adjacent(
        &self,
        reference: &CanonicalReference,
        direction: Direction,
    ) -> Option<CanonicalReference> {
        let document = self.loaded(&reference.book);
        let at = |chapter, verse| CanonicalReference::new(reference.book.clone(), chapter, verse);
        let exists = |chapter, verse| {
            document
                .as_ref()
                .map_or(true, |doc| doc.contains(chapter, verse))
        };

        let (chapter, verse) = match direction {
            Direction::Next => (reference.chapter, reference.verse.checked_add(1)?),
            Direction::Previous if reference.verse > 1 => (reference.chapter, reference.verse - 1),
            Direction::Previous => {
                let chapter = reference.chapter.checked_sub(1).filter(|c| *c >= 1)?;
                let last = match &document {
                    Some(doc) => (1..=self.scan_ceiling)
                        .take_while(|verse| doc.contains(chapter, *verse))
                        .last()
                        .unwrap_or(1),
                    None => 1,
                };
                (chapter, last)
            }
        };

        if exists(chapter, verse) {
            return Some(at(chapter, verse));
        }
        match direction {
            Direction::Next => reference
                .chapter
                .checked_add(1)
                .filter(|next| exists(*next, 1))
                .map(|next| at(next, 1)),
            Direction::Previous => None,
        }
    }
}
