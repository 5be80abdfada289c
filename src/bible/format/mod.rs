//! File format parsing layer for book and dictionary files.
//!
//! This module sits between raw bytes delivered by a
//! [`DocumentSource`](crate::bible::source::DocumentSource) and the caches
//! owned by the engine.
//!
//! # Module Organization
//!
//! - [`markup`]: Builds an owned element tree from XML text
//! - [`document`]: Indexes a book's words under both verse conventions
//! - [`dictionary`]: Reads Strong's dictionaries in the flat and OSIS layouts
//!
//! # Architecture
//!
//! ```text
//! bytes ─► markup::decode_text ─► markup::parse ─┬─► document::BookDocument
//!                                                └─► dictionary::parse
//! ```

pub mod dictionary;
pub mod document;
pub mod markup;
