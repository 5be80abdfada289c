//! Free-text reference parsing.
//!
//! Accepts a book token followed by a chapter and an optional verse, joined by
//! `:`, `.` or whitespace: "Gen 1:1", "1 John 2.3", "Ps 23", "GEN 1 1".

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::bible::types::books::{compact, Book, BookCode};
use crate::bible::types::error::ParseFailure;
use crate::bible::types::models::CanonicalReference;

static CHAPTER_VERSE: OnceLock<Regex> = OnceLock::new();
static CHAPTER_ONLY: OnceLock<Regex> = OnceLock::new();

// Both patterns are anchored at the end, so the book token runs up to the
// last number group and numbered books like "1 Corinthians" stay intact.
fn chapter_verse_regex() -> &'static Regex {
    CHAPTER_VERSE.get_or_init(|| {
        Regex::new(r"^(.+?)\s+(\d+)[:.\s]+(\d+)$").expect("Invalid chapter:verse pattern")
    })
}

fn chapter_only_regex() -> &'static Regex {
    CHAPTER_ONLY.get_or_init(|| Regex::new(r"^(.+?)\s+(\d+)$").expect("Invalid chapter pattern"))
}

/// Parses a human reference into a canonical one.
///
/// A missing verse defaults to 1. A book token missing from the alias table
/// becomes an unregistered code built by title-casing the compacted token;
/// such codes resolve here and fail later at document lookup.
///
/// # Errors
/// Returns [`ParseFailure`] carrying the original query when it is empty, has
/// no trailing chapter number, or has a zero/overflowing chapter or verse.
pub fn resolve(query: &str) -> Result<CanonicalReference, ParseFailure> {
    let failure = || ParseFailure {
        query: query.to_string(),
    };

    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(failure());
    }

    let (book_token, chapter, verse) = if let Some(caps) = chapter_verse_regex().captures(trimmed) {
        (caps.get(1), caps.get(2), caps.get(3))
    } else if let Some(caps) = chapter_only_regex().captures(trimmed) {
        (caps.get(1), caps.get(2), None)
    } else {
        return Err(failure());
    };

    let book_token = book_token.ok_or_else(failure)?.as_str().trim();
    let chapter = parse_number(chapter.map(|m| m.as_str())).ok_or_else(failure)?;
    let verse = match verse {
        Some(m) => parse_number(Some(m.as_str())).ok_or_else(failure)?,
        None => 1,
    };

    Ok(CanonicalReference {
        book: resolve_book(book_token),
        chapter,
        verse,
    })
}

fn parse_number(digits: Option<&str>) -> Option<u32> {
    digits?.parse().ok().filter(|n| *n >= 1)
}

/// Maps a book token to a code, falling back to naive title case.
pub fn resolve_book(token: &str) -> BookCode {
    if let Some(book) = Book::from_alias(token) {
        return BookCode::Canonical(book);
    }
    let compacted = compact(token);
    let mut chars = compacted.chars();
    let fallback: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    debug!("No alias for book token {:?}, using unregistered code {:?}", token, fallback);
    BookCode::Unregistered(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(book: Book, chapter: u32, verse: u32) -> CanonicalReference {
        CanonicalReference::new(book, chapter, verse)
    }

    #[test]
    fn separators_and_case_do_not_matter() {
        let expected = reference(Book::Genesis, 1, 1);
        for query in ["Gen 1:1", "gen 1.1", "GEN 1 1", "Genesis 1:1", "  gn 1 : 1 ", "ge 1.1"] {
            assert_eq!(resolve(query), Ok(expected.clone()), "query {:?}", query);
        }
    }

    #[test]
    fn numbered_books_keep_their_number() {
        assert_eq!(resolve("1 John 2:3"), Ok(reference(Book::FirstJohn, 2, 3)));
        assert_eq!(resolve("1John 2:3"), Ok(reference(Book::FirstJohn, 2, 3)));
        assert_eq!(resolve("1 Corinthians 13"), Ok(reference(Book::FirstCorinthians, 13, 1)));
        assert_eq!(resolve("2 Kgs 4.2").map(|r| r.to_string()), Ok("2Kgs.4.2".to_string()));
    }

    #[test]
    fn chapter_only_defaults_to_first_verse() {
        assert_eq!(resolve("Ps 23"), Ok(reference(Book::Psalms, 23, 1)));
        assert_eq!(resolve("song of solomon 2"), Ok(reference(Book::SongOfSolomon, 2, 1)));
    }

    #[test]
    fn unparseable_queries_echo_the_input() {
        for query in ["", "   ", "Genesis", "Gen1:1", "Gen 1:x", "Gen 0:1", "Gen 1:0"] {
            let err = resolve(query).expect_err(query);
            assert_eq!(err.query, query);
        }
    }

    #[test]
    fn unknown_books_fall_back_to_title_case() {
        let resolved = resolve("tobit 1:1").expect("parses");
        assert_eq!(resolved.book, BookCode::Unregistered("Tobit".to_string()));
        assert_eq!(resolved.to_string(), "Tobit.1.1");
        let resolved = resolve("WISDOM OF sirach 3").expect("parses");
        assert_eq!(resolved.book.as_str(), "Wisdomofsirach");
    }
}
