//! Morphology code decoding.
//!
//! Turns a positional code into ordered grammatical labels. Three code shapes
//! are recognized from the code itself:
//!
//! - [`hebrew`]: `H`/`A` + part of speech, slash-separated morphemes (`HVqp3ms`, `HTd/Ncmpa`)
//! - [`greek`] fixed-column: seven positions, `-` for not applicable (`3IAI-S--`, `----DSF-`)
//! - [`greek`] tagged: part of speech, dash, parsing letters (`V-IAI-3S`, `N-DSF`)
//!
//! # Example
//! ```
//! let labels: Vec<_> = interlinear::morph::decode("----DSF-").collect();
//! assert_eq!(labels, ["Dative", "Singular", "Feminine"]);
//! ```

mod greek;
mod hebrew;

use std::borrow::Cow;
use std::iter::FusedIterator;

/// A code-letter to label table for one position.
pub(crate) type Table = &'static [(u8, &'static str)];

pub(crate) fn lookup(table: Table, code: u8) -> Option<&'static str> {
    table
        .iter()
        .find(|(letter, _)| *letter == code)
        .map(|(_, label)| *label)
}

/// One fixed position in a code and the table that decodes it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Slot {
    offset: usize,
    table: Table,
}

impl Slot {
    pub(crate) const fn new(offset: usize, table: Table) -> Self {
        Self { offset, table }
    }
}

/// Walks a layout over a code, yielding the labels that decode.
///
/// Positions past the end of the code, `-`, and letters missing from a
/// position's table are skipped.
#[derive(Debug, Clone)]
pub(crate) struct SlotReader<'a> {
    code: Cow<'a, [u8]>,
    layout: &'static [Slot],
    position: usize,
}

impl<'a> SlotReader<'a> {
    pub(crate) fn new(code: impl Into<Cow<'a, [u8]>>, layout: &'static [Slot]) -> Self {
        Self {
            code: code.into(),
            layout,
            position: 0,
        }
    }
}

impl Iterator for SlotReader<'_> {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.layout.get(self.position) {
            self.position += 1;
            let label = self
                .code
                .get(slot.offset)
                .and_then(|letter| lookup(slot.table, *letter));
            if label.is_some() {
                return label;
            }
        }
        None
    }
}

#[derive(Debug, Clone)]
enum Scheme<'a> {
    Empty,
    Hebrew(hebrew::Segments<'a>),
    GreekTagged(greek::Tagged<'a>),
    GreekFixed(SlotReader<'a>),
}

/// The labels of one morphology code, produced on demand.
///
/// Clone the value to walk the labels again.
#[derive(Debug, Clone)]
pub struct Labels<'a> {
    scheme: Scheme<'a>,
}

impl Iterator for Labels<'_> {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.scheme {
            Scheme::Empty => None,
            Scheme::Hebrew(segments) => segments.next(),
            Scheme::GreekTagged(tagged) => tagged.next(),
            Scheme::GreekFixed(reader) => reader.next(),
        }
    }
}

impl FusedIterator for Labels<'_> {}

/// Decodes a morphology code into its labels.
///
/// Never fails: empty or unrecognized codes produce no labels.
pub fn decode(code: &str) -> Labels<'_> {
    let code = code.trim();
    let scheme = if code.is_empty() {
        Scheme::Empty
    } else if hebrew::claims(code) {
        Scheme::Hebrew(hebrew::Segments::new(code))
    } else if code.as_bytes()[0].is_ascii_uppercase() {
        Scheme::GreekTagged(greek::Tagged::new(code))
    } else {
        Scheme::GreekFixed(greek::fixed_column(code))
    };
    Labels { scheme }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(code: &str) -> Vec<&'static str> {
        decode(code).collect()
    }

    #[test]
    fn routes_each_scheme() {
        assert_eq!(
            labels("3IAI-S--"),
            ["3rd Person", "Imperfect", "Active", "Indicative", "Singular"]
        );
        assert_eq!(labels("----DSF-"), ["Dative", "Singular", "Feminine"]);
        assert_eq!(
            labels("HVqp3ms"),
            ["Verb", "Qal", "Perfect", "3rd Person", "Masculine", "Singular"]
        );
        assert_eq!(labels("N-DSF"), ["Noun", "Dative", "Singular", "Feminine"]);
    }

    #[test]
    fn empty_and_garbage_yield_nothing() {
        assert!(labels("").is_empty());
        assert!(labels("   ").is_empty());
        assert!(labels("--------").is_empty());
        assert!(labels("???").is_empty());
    }

    #[test]
    fn labels_restart_by_cloning() {
        let first = decode("HTd/Ncmpa");
        let again = first.clone();
        assert_eq!(first.collect::<Vec<_>>(), again.collect::<Vec<_>>());
    }

    #[test]
    fn greek_tags_starting_with_hebrew_prefixes_stay_greek() {
        assert_eq!(labels("ADV"), ["Adverb"]);
        assert_eq!(labels("A-NSM"), ["Adjective", "Nominative", "Singular", "Masculine"]);
        assert_eq!(labels("ARAM"), ["Aramaic Word"]);
    }
}
