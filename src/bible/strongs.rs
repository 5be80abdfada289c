//! Strong's number normalization.
//!
//! Source files spell the same key many ways: `H7225`, `07225`, `b/7225`,
//! `1254 a`, `strong:G3056`. Everything reduces to a testament plus the first
//! maximal run of digits.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::bible::types::models::Testament;

static DIGIT_RUN: OnceLock<Regex> = OnceLock::new();
static SCHEME_PREFIX: OnceLock<Regex> = OnceLock::new();
static MARKED_ID: OnceLock<Regex> = OnceLock::new();

fn digit_run() -> &'static Regex {
    DIGIT_RUN.get_or_init(|| Regex::new(r"\d+").expect("Invalid digit run pattern"))
}

fn scheme_prefix() -> &'static Regex {
    SCHEME_PREFIX.get_or_init(|| Regex::new(r"^[A-Za-z]+:").expect("Invalid scheme prefix pattern"))
}

fn marked_id() -> &'static Regex {
    MARKED_ID.get_or_init(|| Regex::new(r"^([HG])\d+").expect("Invalid marked id pattern"))
}

/// A normalized Strong's key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrongsId {
    pub testament: Testament,
    pub number: u32,
}

/// Returns the first maximal run of ASCII digits parsed as a number.
///
/// Leading zeros disappear in the parse. A run too long for `u32` yields `None`.
pub(crate) fn first_number(raw: &str) -> Option<u32> {
    digit_run().find(raw)?.as_str().parse().ok()
}

impl StrongsId {
    pub fn new(testament: Testament, number: u32) -> Self {
        Self { testament, number }
    }

    /// Normalizes a free-form id.
    ///
    /// The testament comes from an `H` marker anywhere in the input, then a
    /// `G` marker, then `default`. Normalizing a normalized id's display form
    /// yields the same id.
    pub fn normalize(raw: &str, default: Testament) -> Option<Self> {
        let number = first_number(raw)?;
        let testament = if raw.contains('H') {
            Testament::Old
        } else if raw.contains('G') {
            Testament::New
        } else {
            default
        };
        Some(Self { testament, number })
    }

    /// Normalizes a `strongs` or `lemma` attribute taken from a word element.
    ///
    /// A `scheme:` prefix is dropped. An explicit leading `H`/`G` marker wins;
    /// otherwise the value is tagged with the testament of the book it came from.
    pub(crate) fn from_word_attribute(raw: &str, book_testament: Testament) -> Option<Self> {
        let cleaned = scheme_prefix().replace(raw.trim(), "");
        let testament = match marked_id().captures(&cleaned) {
            Some(caps) if &caps[1] == "H" => Testament::Old,
            Some(_) => Testament::New,
            None => book_testament,
        };
        let number = first_number(&cleaned)?;
        Some(Self { testament, number })
    }
}

impl fmt::Display for StrongsId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.testament.marker(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefixes_suffixes_and_zeros() {
        let hebrew = StrongsId::new(Testament::Old, 7225);
        assert_eq!(StrongsId::normalize("H7225", Testament::New), Some(hebrew));
        assert_eq!(StrongsId::normalize("Hb/7225", Testament::New), Some(hebrew));
        assert_eq!(StrongsId::normalize("H07225", Testament::New), Some(hebrew));
        assert_eq!(
            StrongsId::normalize("1254 a", Testament::Old),
            Some(StrongsId::new(Testament::Old, 1254))
        );
        assert_eq!(
            StrongsId::normalize("strong:G3056", Testament::Old),
            Some(StrongsId::new(Testament::New, 3056))
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["H7225", "b/7225", "G03056", "1254 a", "c/853", "strong:H430", "00001"] {
            let once = StrongsId::normalize(raw, Testament::New).expect("has digits");
            let twice = StrongsId::normalize(&once.to_string(), Testament::New).expect("has digits");
            assert_eq!(once, twice, "not idempotent for {}", raw);
        }
    }

    #[test]
    fn no_digits_is_none() {
        assert_eq!(StrongsId::normalize("", Testament::New), None);
        assert_eq!(StrongsId::normalize("Hb/", Testament::New), None);
        assert_eq!(StrongsId::from_word_attribute("strong:", Testament::Old), None);
    }

    #[test]
    fn word_attributes_take_book_testament_when_bare() {
        assert_eq!(
            StrongsId::from_word_attribute("b/7225", Testament::Old),
            Some(StrongsId::new(Testament::Old, 7225))
        );
        assert_eq!(
            StrongsId::from_word_attribute("strong:G746", Testament::Old),
            Some(StrongsId::new(Testament::New, 746))
        );
        assert_eq!(
            StrongsId::from_word_attribute("1722", Testament::New),
            Some(StrongsId::new(Testament::New, 1722))
        );
    }
}
