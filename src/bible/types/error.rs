//! Custom error types for the interlinear crate.

use thiserror::Error;

/// The primary error type for load and lookup operations in this crate.
///
/// Absence (an unknown verse, a missing definition) is never an error here;
/// those are reported as `None` by the lookup APIs.
#[derive(Debug, Error)]
pub enum BibleError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// The document parsed but its structure is not usable.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// No file name is registered for the requested book code.
    #[error("Unknown book alias: {0}")]
    UnknownBook(String),

    /// The source could not deliver the requested file.
    #[error("Fetch failed for {path}: {reason}")]
    Fetch { path: String, reason: String },

    /// The source delivered an HTML fallback page instead of a document.
    #[error("Soft 404 for {0}: received HTML instead of XML")]
    SoftNotFound(String),

    /// The document has no element that can serve as the book's root.
    #[error("Could not find book node for {0}")]
    MissingBookNode(String),

    /// Neither the Greek nor the Hebrew dictionary could be loaded.
    #[error("No lexicon source could be loaded")]
    LexiconUnavailable,

    /// A concurrent load of the same resource failed; reported to every waiter.
    #[error("Loading {resource} failed: {reason}")]
    LoadFailed { resource: String, reason: String },

    /// A mutex lock was poisoned, indicating a panic in another thread holding the lock.
    #[error("A mutex lock was poisoned, indicating a panic in another thread holding the lock.")]
    LockPoisoned,
}

impl From<quick_xml::Error> for BibleError {
    fn from(err: quick_xml::Error) -> Self {
        BibleError::Xml(err.to_string())
    }
}

/// A convenience `Result` type alias using the crate's `BibleError` type.
pub type Result<T> = std::result::Result<T, BibleError>;

/// A reference string that matched none of the accepted shapes.
///
/// Carries the query exactly as it was given so callers can echo it back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized reference: {query:?}")]
pub struct ParseFailure {
    pub query: String,
}
