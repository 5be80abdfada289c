//! Foundational data structures, error types, and the book table.

pub mod books;
pub mod error;
pub mod models;
