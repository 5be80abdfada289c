//! Core interlinear engine module

pub mod config;
pub mod engine;
pub mod format;
pub mod lexicon;
pub mod morph;
pub mod navigation;
pub mod reference;
pub mod source;
pub mod store;
pub mod strongs;
pub mod types;
mod cache;

pub use config::EngineConfig;
pub use engine::BibleEngine;
pub use source::{DirectorySource, DocumentSource, MemorySource};
pub use strongs::StrongsId;
pub use types::books::{Book, BookCode};
pub use types::error::{BibleError, ParseFailure, Result};
pub use types::models;
