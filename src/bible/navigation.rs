//! Stepping across book boundaries.
//!
//! [`DocumentStore::adjacent`] stays inside one book; these helpers continue
//! into the neighbouring book in canonical order when it runs out.

use log::debug;

use super::store::DocumentStore;
use super::types::models::{CanonicalReference, Direction};

/// The verse after `reference`, continuing at 1:1 of the next book.
///
/// `None` after the last verse of Revelation, or at the end of a book that
/// has no registered successor.
pub fn next(store: &DocumentStore, reference: &CanonicalReference) -> Option<CanonicalReference> {
    if let Some(adjacent) = store.adjacent(reference, Direction::Next) {
        return Some(adjacent);
    }
    let book = reference.book.book()?.next()?;
    debug!("Crossing from {} into {}", reference.book, book);
    Some(CanonicalReference::new(book, 1, 1))
}

/// The verse before `reference`, continuing at the end of the previous book.
///
/// The previous book's last verse is exact when that book is loaded; otherwise
/// it is a best guess of verse 1 of its final chapter. `None` before Genesis 1:1.
pub fn previous(
    store: &DocumentStore,
    reference: &CanonicalReference,
) -> Option<CanonicalReference> {
    if let Some(adjacent) = store.adjacent(reference, Direction::Previous) {
        return Some(adjacent);
    }
    let book = reference.book.book()?.previous()?;
    debug!("Crossing back from {} into {}", reference.book, book);
    store
        .last_verse(&book.into())
        .or_else(|| Some(CanonicalReference::new(book, book.chapters(), 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bible::source::MemorySource;
    use crate::bible::types::books::{Book, BookCode};
    use std::sync::Arc;

    const MALACHI: &str = r#"<osis><div type="book" osisID="Mal">
        <verse osisID="Mal.4.5"><w lemma="1">a</w></verse>
        <verse osisID="Mal.4.6"><w lemma="2">b</w></verse>
    </div></osis>"#;

    const MATTHEW: &str = r#"<osis><div type="book" osisID="Matt">
        <verse osisID="Matt.1.1"><w lemma="976">Βίβλος</w></verse>
    </div></osis>"#;

    const REVELATION: &str = r#"<osis><div type="book" osisID="Rev">
        <verse osisID="Rev.22.21"><w lemma="5485">χάρις</w></verse>
    </div></osis>"#;

    fn store(files: &[(&str, &str)], load: &[Book]) -> DocumentStore {
        let source = files
            .iter()
            .fold(MemorySource::new(), |source, (path, body)| source.with_file(*path, *body));
        let store = DocumentStore::new(Arc::new(source), 200);
        for book in load {
            store.ensure_loaded(&(*book).into()).expect("loads");
        }
        store
    }

    #[test]
    fn next_moves_into_the_following_book() {
        let store = store(&[("Mal.xml", MALACHI)], &[Book::Malachi]);
        let last = CanonicalReference::new(Book::Malachi, 4, 6);
        assert_eq!(next(&store, &last), Some(CanonicalReference::new(Book::Matthew, 1, 1)));
    }

    #[test]
    fn next_ends_after_revelation() {
        let store = store(&[("Rev.xml", REVELATION)], &[Book::Revelation]);
        assert_eq!(next(&store, &CanonicalReference::new(Book::Revelation, 22, 21)), None);
    }

    #[test]
    fn previous_uses_the_loaded_book_end() {
        let store = store(
            &[("Mal.xml", MALACHI), ("Matt.xml", MATTHEW)],
            &[Book::Malachi, Book::Matthew],
        );
        let first = CanonicalReference::new(Book::Matthew, 1, 1);
        assert_eq!(previous(&store, &first), Some(CanonicalReference::new(Book::Malachi, 4, 6)));
    }

    #[test]
    fn previous_guesses_when_the_book_is_not_loaded() {
        let store = store(&[("Matt.xml", MATTHEW)], &[Book::Matthew]);
        let first = CanonicalReference::new(Book::Matthew, 1, 1);
        assert_eq!(previous(&store, &first), Some(CanonicalReference::new(Book::Malachi, 4, 1)));
    }

    #[test]
    fn previous_stops_at_genesis() {
        let store = store(&[], &[]);
        assert_eq!(previous(&store, &CanonicalReference::new(Book::Genesis, 1, 1)), None);
    }

    #[test]
    fn unregistered_books_do_not_cross() {
        let store = store(&[], &[]);
        let tobit = CanonicalReference::new(BookCode::Unregistered("Tobit".to_string()), 1, 1);
        assert_eq!(next(&store, &tobit), Some(CanonicalReference::new(tobit.book.clone(), 1, 2)));
        assert_eq!(previous(&store, &tobit), None);
    }
}
