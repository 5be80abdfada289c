//! # Book Document Indexing & Verse Extraction
//!
//! Turns one book file into a [`BookDocument`]: the book's words in document
//! order plus two indexes built once at load time, one per markup convention.
//!
//! ## Milestone convention
//! ```text
//! <p><verse-number id="Mark 1:1"/><w>..</w><w>..</w><verse-number id="Mark 1:2"/>..</p>
//! ```
//! A marker's words are its following sibling `w` elements up to the next
//! sibling marker or `chapter` element.
//!
//! ## Container convention
//! ```text
//! <verse osisID="Gen.1.1"><w>..</w><w>..</w></verse>
//! ```
//! A verse's words are the `w` elements below the element carrying its id.
//!
//! Extraction tries the milestone index first and the container index only
//! when that yields no words.

use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

use log::{debug, trace};

use super::markup::{self, Element};
use crate::bible::strongs::StrongsId;
use crate::bible::types::books::{compact, Book, BookCode};
use crate::bible::types::error::{BibleError, Result};
use crate::bible::types::models::{CanonicalReference, Testament, Word};

const WORD_ELEMENT: &str = "w";
const MILESTONE_ELEMENT: &str = "verse-number";
const CHAPTER_ELEMENT: &str = "chapter";

/// Word attributes that may carry the lexical id, in priority order.
const LEXICAL_ID_ATTRIBUTES: &[&str] = &["strongs", "lemma"];

/// Attributes a milestone marker may be keyed by.
const MILESTONE_ATTRIBUTES: &[&str] = &["id", "osisID"];

#[derive(Debug, Clone, Copy)]
enum KeyStyle {
    /// `Gen 1:1`
    Spaced,
    /// `Gen.1.1`
    Dotted,
}

/// Milestone lookups in the order they are tried: (index into
/// `MILESTONE_ATTRIBUTES`, key spelling).
const MILESTONE_LOOKUPS: &[(usize, KeyStyle)] = &[
    (0, KeyStyle::Spaced),
    (1, KeyStyle::Spaced),
    (0, KeyStyle::Dotted),
];

/// Selects a verse container: optional element name, optional `type`
/// attribute value, and the attribute holding the verse id.
struct ContainerRule {
    element: Option<&'static str>,
    kind: Option<&'static str>,
    id_attr: &'static str,
}

impl ContainerRule {
    fn key<'e>(&self, element: &'e Element) -> Option<&'e str> {
        if self.element.is_some_and(|name| !element.is(name)) {
            return None;
        }
        if self.kind.is_some_and(|kind| element.attr("type") != Some(kind)) {
            return None;
        }
        element.attr(self.id_attr)
    }
}

/// Container rules in the order they are tried. The last one matches any
/// element and stands in for a full-tree scan.
const CONTAINER_RULES: &[ContainerRule] = &[
    ContainerRule { element: Some("verse"), kind: None, id_attr: "osisID" },
    ContainerRule { element: Some("verse"), kind: None, id_attr: "id" },
    ContainerRule { element: Some("div"), kind: Some("verse"), id_attr: "osisID" },
    ContainerRule { element: None, kind: None, id_attr: "osisID" },
];

/// One parsed, indexed book.
#[derive(Debug, Clone)]
pub struct BookDocument {
    code: BookCode,
    /// Book code as spelled inside the file, used to build verse keys.
    key_code: String,
    words: Vec<Word>,
    milestones: Vec<Vec<usize>>,
    /// One map per entry of `MILESTONE_ATTRIBUTES`: attribute value to milestone.
    milestone_keys: Vec<HashMap<String, usize>>,
    /// One map per entry of `CONTAINER_RULES`: id to word range.
    containers: Vec<HashMap<String, Range<usize>>>,
    verses: BTreeSet<(u32, u32)>,
}

impl BookDocument {
    /// Parses and indexes a book from XML text.
    ///
    /// # Errors
    /// - `Xml` / `InvalidFormat` if the text does not parse
    /// - `MissingBookNode` if no element can serve as the book root
    pub fn from_xml(code: &BookCode, xml: &str) -> Result<Self> {
        let root = markup::parse(xml)?;
        let book_node = find_book_node(&root, code)
            .ok_or_else(|| BibleError::MissingBookNode(code.to_string()))?;
        let key_code = book_node
            .attr("osisID")
            .filter(|id| !id.trim().is_empty() && !id.contains('.'))
            .unwrap_or(code.as_str())
            .to_string();

        let mut indexer = Indexer::new(code, key_code);
        indexer.visit(book_node);
        let document = indexer.finish();
        debug!(
            "Indexed {}: {} words, {} milestones, {} verses",
            document.code,
            document.words.len(),
            document.milestones.len(),
            document.verses.len()
        );
        Ok(document)
    }

    pub fn code(&self) -> &BookCode {
        &self.code
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    fn key(&self, style: KeyStyle, chapter: u32, verse: u32) -> String {
        match style {
            KeyStyle::Spaced => format!("{} {}:{}", self.key_code, chapter, verse),
            KeyStyle::Dotted => format!("{}.{}.{}", self.key_code, chapter, verse),
        }
    }

    fn milestone(&self, chapter: u32, verse: u32) -> Option<&[usize]> {
        MILESTONE_LOOKUPS.iter().find_map(|(attr, style)| {
            let key = self.key(*style, chapter, verse);
            self.milestone_keys[*attr]
                .get(&key)
                .map(|index| self.milestones[*index].as_slice())
        })
    }

    fn container(&self, chapter: u32, verse: u32) -> Option<Range<usize>> {
        let key = self.key(KeyStyle::Dotted, chapter, verse);
        self.containers
            .iter()
            .find_map(|rule_index| rule_index.get(&key).cloned())
    }

    /// Whether either convention has an element for this verse, with or
    /// without words.
    pub fn contains(&self, chapter: u32, verse: u32) -> bool {
        self.milestone(chapter, verse).is_some() || self.container(chapter, verse).is_some()
    }

    /// Fresh copies of a verse's words in document order; empty when the
    /// verse is absent or has no words under either convention.
    pub fn verse_words(&self, chapter: u32, verse: u32) -> Vec<Word> {
        if let Some(indices) = self.milestone(chapter, verse).filter(|i| !i.is_empty()) {
            trace!("{} {}:{} matched milestone markup", self.key_code, chapter, verse);
            return indices.iter().map(|i| self.words[*i].clone()).collect();
        }
        match self.container(chapter, verse) {
            Some(range) => {
                trace!("{} {}:{} matched container markup", self.key_code, chapter, verse);
                self.words[range].to_vec()
            }
            None => Vec::new(),
        }
    }

    /// The highest `(chapter, verse)` with a recognizable id in this book.
    pub fn last_verse(&self) -> Option<CanonicalReference> {
        self.verses
            .last()
            .map(|(chapter, verse)| CanonicalReference::new(self.code.clone(), *chapter, *verse))
    }
}

/// Locates the element holding the book's content.
///
/// Tried in order: a `book` element, a `div[type=book]` whose `osisID` names
/// this book, then any element whose `osisID` equals the code.
fn find_book_node<'e>(root: &'e Element, code: &BookCode) -> Option<&'e Element> {
    let names_this_book = |element: &Element| match element.attr("osisID") {
        Some(id) => id == code.as_str() || (code.book().is_some() && Book::from_alias(id) == code.book()),
        None => false,
    };
    let candidates = std::iter::once(root).chain(root.descendants());
    candidates
        .clone()
        .find(|e| e.is("book"))
        .or_else(|| {
            candidates
                .clone()
                .find(|e| e.is("div") && e.attr("type") == Some("book") && names_this_book(*e))
        })
        .or_else(|| candidates.clone().find(|e| e.attr("osisID") == Some(code.as_str())))
}

/// Parses `Book.C.V` or `Book C:V` when `Book` matches `key_code`.
fn parse_verse_key(key_code: &str, key: &str) -> Option<(u32, u32)> {
    let (book, chapter, verse) = if let Some((book, numbers)) = key.rsplit_once(' ') {
        let (chapter, verse) = numbers.split_once(':')?;
        (book, chapter, verse)
    } else {
        let mut parts = key.split('.');
        let parts = (parts.next()?, parts.next()?, parts.next()?, parts.next());
        match parts {
            (book, chapter, verse, None) => (book, chapter, verse),
            _ => return None,
        }
    };
    if compact(book) != compact(key_code) {
        return None;
    }
    let chapter = chapter.parse().ok().filter(|n| *n >= 1)?;
    let verse = verse.parse().ok().filter(|n| *n >= 1)?;
    Some((chapter, verse))
}

struct Indexer {
    code: BookCode,
    key_code: String,
    testament: Testament,
    words: Vec<Word>,
    milestones: Vec<Vec<usize>>,
    milestone_keys: Vec<HashMap<String, usize>>,
    containers: Vec<HashMap<String, Range<usize>>>,
    verses: BTreeSet<(u32, u32)>,
}

impl Indexer {
    fn new(code: &BookCode, key_code: String) -> Self {
        Self {
            code: code.clone(),
            key_code,
            testament: code.testament(),
            words: Vec::new(),
            milestones: Vec::new(),
            milestone_keys: vec![HashMap::new(); MILESTONE_ATTRIBUTES.len()],
            containers: vec![HashMap::new(); CONTAINER_RULES.len()],
            verses: BTreeSet::new(),
        }
    }

    /// Indexes the children of `parent`, tracking the milestone run among them.
    fn visit(&mut self, parent: &Element) {
        let mut run: Option<usize> = None;
        for child in parent.elements() {
            if child.is(MILESTONE_ELEMENT) {
                run = Some(self.open_milestone(child));
                continue;
            }
            if child.is(CHAPTER_ELEMENT) {
                run = None;
            }

            let first = self.words.len();
            if child.is(WORD_ELEMENT) {
                let index = self.push_word(child);
                if let Some(milestone) = run {
                    self.milestones[milestone].push(index);
                }
            } else {
                self.visit(child);
            }
            self.register_container(child, first..self.words.len());
        }
    }

    fn open_milestone(&mut self, marker: &Element) -> usize {
        let index = self.milestones.len();
        self.milestones.push(Vec::new());
        for (attr_index, attr) in MILESTONE_ATTRIBUTES.iter().enumerate() {
            if let Some(key) = marker.attr(attr) {
                self.record_verse(key);
                self.milestone_keys[attr_index]
                    .entry(key.to_string())
                    .or_insert(index);
            }
        }
        index
    }

    fn register_container(&mut self, element: &Element, words: Range<usize>) {
        for (rule_index, rule) in CONTAINER_RULES.iter().enumerate() {
            if let Some(key) = rule.key(element) {
                self.record_verse(key);
                self.containers[rule_index]
                    .entry(key.to_string())
                    .or_insert_with(|| words.clone());
            }
        }
    }

    fn record_verse(&mut self, key: &str) {
        if let Some(position) = parse_verse_key(&self.key_code, key) {
            self.verses.insert(position);
        }
    }

    fn push_word(&mut self, element: &Element) -> usize {
        let index = self.words.len();
        let lemma = element.attr("lemma").unwrap_or_default().to_string();
        let morph = element.attr("morph").unwrap_or_default().to_string();
        let text = element.text().trim().to_string();
        let strongs = element
            .first_attr(LEXICAL_ID_ATTRIBUTES)
            .and_then(|raw| StrongsId::from_word_attribute(raw, self.testament));
        if strongs.is_none() && !text.is_empty() {
            trace!("No Strong's id for word {:?} in {}: {:?}", text, self.code, element.attributes);
        }
        let source_id = element
            .attr("id")
            .filter(|id| !id.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("w-{}-{}", self.code, index));

        self.words.push(Word {
            text,
            lemma,
            morph,
            strongs,
            source_id,
        });
        index
    }

    fn finish(self) -> BookDocument {
        BookDocument {
            code: self.code,
            key_code: self.key_code,
            words: self.words,
            milestones: self.milestones,
            milestone_keys: self.milestone_keys,
            containers: self.containers,
            verses: self.verses,
        }
    }
}
