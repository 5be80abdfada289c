//! # interlinear
//!
//! Reference resolution and text retrieval for interlinear Bible study.
//! Resolves free-text references to canonical `Book.Chapter.Verse` ids, loads
//! per-book OSIS-style XML on demand, extracts the words of a verse under either
//! verse markup convention, looks up Strong's definitions and decodes Greek and
//! Hebrew morphology codes.
pub mod bible;

// Re-export the main types for convenience
pub use bible::{
    morph,
    BibleEngine,
    BibleError,
    Book,
    BookCode,
    DirectorySource,
    DocumentSource,
    EngineConfig,
    MemorySource,
    ParseFailure,
    Result,
    StrongsId,
    models::{
        CanonicalReference,
        Direction,
        LexiconEntry,
        Testament,
        Verse,
        Word,
        WordDetails,
    },
    reference::resolve,
};
