use std::sync::Arc;

use log::{info, warn};

use super::config::EngineConfig;
use super::lexicon::Lexicon;
use super::morph;
use super::navigation;
use super::reference;
use super::source::{DirectorySource, DocumentSource};
use super::store::DocumentStore;
use super::types::books::BookCode;
use super::types::error::{ParseFailure, Result};
use super::types::models::*;

/// Resolves references and serves interlinear verses, definitions and
/// morphology.
///
/// All caches live inside the engine. It is `Send + Sync`; share it behind an
/// `Arc` to use it from several threads.
pub struct BibleEngine {
    store: DocumentStore,
    lexicon: Lexicon,
    source: Arc<dyn DocumentSource>,
    config: EngineConfig,
}

impl BibleEngine {
    /// Opens an engine reading files from `config.assets_dir`.
    ///
    /// # Errors
    /// Returns an error if the lexicon cannot be loaded (see [`BibleEngine::with_source`]).
    pub fn open(config: EngineConfig) -> Result<Self> {
        info!("Opening assets directory: {}", config.assets_dir.display());
        let source = DirectorySource::new(&config.assets_dir);
        Self::with_source(Arc::new(source), config)
    }

    /// Creates an engine over any document source and loads the lexicon.
    ///
    /// # Arguments
    /// * `source` - Delivers book and dictionary files by name
    /// * `config` - Dictionary file names and the verse scan ceiling
    ///
    /// # Errors
    /// Returns an error if:
    /// - Neither dictionary can be fetched (`LexiconUnavailable`)
    /// - A fetched dictionary is malformed
    pub fn with_source(source: Arc<dyn DocumentSource>, config: EngineConfig) -> Result<Self> {
        let engine = Self {
            store: DocumentStore::new(Arc::clone(&source), config.verse_scan_ceiling),
            lexicon: Lexicon::new(),
            source,
            config,
        };
        engine.lexicon.load(engine.source.as_ref(), &engine.config)?;
        Ok(engine)
    }

    /// Parses a human reference such as `"Gen 1:1"` or `"1 John 2.3"`.
    pub fn resolve(&self, query: &str) -> std::result::Result<CanonicalReference, ParseFailure> {
        reference::resolve(query)
    }

    /// Loads a book unless it is already cached.
    ///
    /// # Errors
    /// Returns the load failure; nothing is cached, so a later call retries.
    pub fn ensure_loaded(&self, book: &BookCode) -> Result<()> {
        self.store.ensure_loaded(book).map(|_| ())
    }

    /// The words of a verse from an already loaded book.
    pub fn verse(&self, reference: &CanonicalReference) -> Option<Verse> {
        self.store.verse(reference)
    }

    /// Resolves, loads and extracts in one step.
    ///
    /// Load failures are logged and reported as a missing verse.
    pub fn lookup(&self, query: &str) -> std::result::Result<Option<Verse>, ParseFailure> {
        let reference = self.resolve(query)?;
        if let Err(e) = self.ensure_loaded(&reference.book) {
            warn!("Could not load {} for {:?}: {}", reference.book, query, e);
            return Ok(None);
        }
        Ok(self.verse(&reference))
    }

    /// The neighbouring verse inside the same book.
    pub fn adjacent(
        &self,
        reference: &CanonicalReference,
        direction: Direction,
    ) -> Option<CanonicalReference> {
        self.store.adjacent(reference, direction)
    }

    /// The next verse, continuing into the next book.
    pub fn next(&self, reference: &CanonicalReference) -> Option<CanonicalReference> {
        navigation::next(&self.store, reference)
    }

    /// The previous verse, continuing into the previous book.
    pub fn previous(&self, reference: &CanonicalReference) -> Option<CanonicalReference> {
        navigation::previous(&self.store, reference)
    }

    pub fn last_verse(&self, book: &BookCode) -> Option<CanonicalReference> {
        self.store.last_verse(book)
    }

    /// Looks up a free-form Strong's id.
    pub fn definition(&self, raw: &str) -> Option<LexiconEntry> {
        self.lexicon.definition(raw)
    }

    /// Gathers the definition and decoded morphology for a word.
    pub fn inspect(&self, word: &Word) -> WordDetails {
        WordDetails {
            word: word.clone(),
            definition: word.strongs.and_then(|id| self.lexicon.entry(id)),
            morphology: morph::decode(&word.morph).collect(),
        }
    }
}
