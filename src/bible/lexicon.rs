//! Strong's lexicon lookup.
//!
//! Holds the Greek and Hebrew dictionaries as two tables keyed by number.
//! Both are loaded together, once, through a [`LoadCell`].

use log::{info, warn};

use super::cache::LoadCell;
use super::config::EngineConfig;
use super::format::dictionary::{self, EntryTable};
use super::source::{fetch_text, DocumentSource};
use super::strongs::StrongsId;
use super::types::error::{BibleError, Result};
use super::types::models::{LexiconEntry, Testament};

#[derive(Debug, Default)]
struct Tables {
    greek: EntryTable,
    hebrew: EntryTable,
}

impl Tables {
    fn table(&self, testament: Testament) -> &EntryTable {
        match testament {
            Testament::Old => &self.hebrew,
            Testament::New => &self.greek,
        }
    }

    fn fetch(source: &dyn DocumentSource, config: &EngineConfig) -> Result<Self> {
        let greek = read_dictionary(source, &config.greek_lexicon)?;
        let hebrew = read_dictionary(source, &config.hebrew_lexicon)?;
        if greek.is_none() && hebrew.is_none() {
            return Err(BibleError::LexiconUnavailable);
        }
        let tables = Self {
            greek: greek.unwrap_or_default(),
            hebrew: hebrew.unwrap_or_default(),
        };
        info!(
            "Lexicon loaded: {} Greek and {} Hebrew entries",
            tables.greek.len(),
            tables.hebrew.len()
        );
        Ok(tables)
    }
}

/// Reads one dictionary. A file that cannot be fetched is `None`; a file
/// that arrives but does not parse is an error.
fn read_dictionary(source: &dyn DocumentSource, name: &str) -> Result<Option<EntryTable>> {
    let text = match fetch_text(source, name) {
        Ok(text) => text,
        Err(e) => {
            warn!("Dictionary {} unavailable, continuing without it: {}", name, e);
            return Ok(None);
        }
    };
    dictionary::parse(&text, name).map(Some)
}

#[derive(Debug, Default)]
pub struct Lexicon {
    tables: LoadCell<Tables>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads both dictionaries unless already loaded. Concurrent callers
    /// share a single load.
    ///
    /// # Errors
    /// - `LexiconUnavailable` if neither dictionary could be fetched
    /// - `Xml` / `InvalidFormat` if a fetched dictionary does not parse
    /// - `LoadFailed` when waiting on another caller's failed load
    pub fn load(&self, source: &dyn DocumentSource, config: &EngineConfig) -> Result<()> {
        self.tables
            .get_or_load("lexicon", || Tables::fetch(source, config))
            .map(|_| ())
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.tables.get(), Ok(Some(_)))
    }

    /// Looks up a normalized id in its own testament's table, then in the other.
    pub fn entry(&self, id: StrongsId) -> Option<LexiconEntry> {
        let tables = self.tables.get().ok().flatten()?;
        [id.testament, id.testament.other()]
            .into_iter()
            .find_map(|testament| tables.table(testament).get(&id.number))
            .cloned()
    }

    /// Looks up a free-form id such as `H7225`, `Hb/7225`, `G3056` or `1254 a`.
    ///
    /// Ids containing `H` are looked up as Hebrew first, everything else as
    /// Greek first. Returns `None` when the input has no digits, the lexicon is
    /// not loaded, or neither table has the number.
    pub fn definition(&self, raw: &str) -> Option<LexiconEntry> {
        self.entry(StrongsId::normalize(raw, Testament::New)?)
    }
}
