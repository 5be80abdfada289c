//! Core data structures shared across the engine.
//!
//! - References and verses
//! - Interlinear words and their display details
//! - Lexicon entries

use std::fmt;

use super::books::BookCode;
use crate::bible::strongs::StrongsId;

/// Which half of the canon (and which source language) something belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Testament {
    /// Hebrew/Aramaic, marker letter `H`.
    Old,
    /// Greek, marker letter `G`.
    New,
}

impl Testament {
    /// The single-letter marker used in Strong's ids.
    pub fn marker(self) -> char {
        match self {
            Testament::Old => 'H',
            Testament::New => 'G',
        }
    }

    pub fn other(self) -> Testament {
        match self {
            Testament::Old => Testament::New,
            Testament::New => Testament::Old,
        }
    }
}

/// A fully resolved `book.chapter.verse` reference.
///
/// Chapter and verse are always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalReference {
    pub book: BookCode,
    pub chapter: u32,
    pub verse: u32,
}

impl CanonicalReference {
    pub fn new(book: impl Into<BookCode>, chapter: u32, verse: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
        }
    }
}

impl fmt::Display for CanonicalReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}.{}", self.book, self.chapter, self.verse)
    }
}

/// One unit of interlinear text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Display glyphs.
    pub text: String,
    /// Raw `lemma` attribute.
    pub lemma: String,
    /// Raw `morph` attribute.
    pub morph: String,
    /// `None` disables lexicon lookup for this word only.
    pub strongs: Option<StrongsId>,
    /// Markup-provided `id`, or a stable id synthesized from the word's position.
    pub source_id: String,
}

/// The words of a single verse, in document order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    pub reference: CanonicalReference,
    pub words: Vec<Word>,
}

/// A dictionary record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LexiconEntry {
    pub headword: String,
    pub definition: String,
}

/// Everything shown for a selected word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDetails {
    pub word: Word,
    pub definition: Option<LexiconEntry>,
    pub morphology: Vec<&'static str>,
}

/// Which way to step from a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}
