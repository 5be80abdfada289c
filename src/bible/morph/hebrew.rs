//! Hebrew and Aramaic morphology codes.
//!
//! A code is a language letter (`H` or `A`) followed by one or more morpheme
//! segments joined with `/`, e.g. `HC/Vqw3ms` (conjunction + verb). Each
//! segment starts with its part of speech; the letters after it are read at
//! fixed offsets through tables chosen by that part of speech.

use std::str::Split;

use super::{lookup, Slot, SlotReader, Table};

const PART_OF_SPEECH: &[u8] = b"VNATCRPDS";

const STEM: Table = &[
    (b'q', "Qal"),
    (b'N', "Niphal"),
    (b'n', "Niphal"),
    (b'p', "Piel"),
    (b'P', "Pual"),
    (b'h', "Hiphil"),
    (b'H', "Hophal"),
    (b't', "Hithpael"),
    (b'o', "Polel"),
    (b'O', "Polal"),
    (b'r', "Hithpolel"),
    (b'm', "Poel"),
    (b'M', "Poal"),
    (b'k', "Palel"),
    (b'K', "Pulal"),
    (b'Q', "Qal Passive"),
    (b'l', "Pilpel"),
    (b'L', "Polpal"),
    (b'f', "Hithpalpel"),
    (b'D', "Nithpael"),
    (b'j', "Pealal"),
    (b'i', "Pilel"),
    (b'u', "Hothpaal"),
    (b'c', "Tiphil"),
    (b'v', "Hishtaphel"),
    (b'w', "Nithpalel"),
    (b'y', "Nithpoel"),
    (b'z', "Hithpoel"),
];

const ASPECT: Table = &[
    (b'p', "Perfect"),
    (b'q', "Sequential Perfect"),
    (b'i', "Imperfect"),
    (b'w', "Waw-Consecutive"),
    (b'h', "Cohortative"),
    (b'j', "Jussive"),
    (b'v', "Imperative"),
    (b'r', "Participle"),
    (b's', "Passive Participle"),
    (b'a', "Infinitive Absolute"),
    (b'c', "Infinitive Construct"),
];

const PERSON: Table = &[(b'1', "1st Person"), (b'2', "2nd Person"), (b'3', "3rd Person")];

const GENDER: Table = &[
    (b'm', "Masculine"),
    (b'f', "Feminine"),
    (b'c', "Common"),
    (b'b', "Both"),
];

const NUMBER: Table = &[(b's', "Singular"), (b'p', "Plural"), (b'd', "Dual")];

const STATE: Table = &[(b'a', "Absolute"), (b'c', "Construct"), (b'd', "Determined")];

const NOUN_TYPE: Table = &[(b'c', "Common"), (b'p', "Proper"), (b'g', "Gentilic")];

const ADJECTIVE_TYPE: Table = &[(b'c', "Cardinal"), (b'g', "Gentilic"), (b'o', "Ordinal")];

const PRONOUN_TYPE: Table = &[
    (b'd', "Demonstrative"),
    (b'f', "Indefinite"),
    (b'i', "Interrogative"),
    (b'p', "Personal"),
    (b'r', "Relative"),
];

const SUFFIX_TYPE: Table = &[
    (b'd', "Directional He"),
    (b'h', "Paragogic He"),
    (b'n', "Paragogic Nun"),
    (b'p', "Pronominal"),
];

const PARTICLE_TYPE: Table = &[
    (b'd', "Article"),
    (b'o', "Direct Object Marker"),
    (b'r', "Relative Particle"),
    (b'i', "Interrogative Particle"),
    (b'm', "Exclamatory Particle"),
    (b'n', "Negative Particle"),
    (b'a', "Affirmation Particle"),
    (b'j', "Interjection"),
];

const PREPOSITION_TYPE: Table = &[(b'd', "Article")];

const FINITE_VERB: &[Slot] = &[
    Slot::new(1, STEM),
    Slot::new(2, ASPECT),
    Slot::new(3, PERSON),
    Slot::new(4, GENDER),
    Slot::new(5, NUMBER),
];

const PARTICIPLE: &[Slot] = &[
    Slot::new(1, STEM),
    Slot::new(2, ASPECT),
    Slot::new(3, GENDER),
    Slot::new(4, NUMBER),
    Slot::new(5, STATE),
];

const INFINITIVE: &[Slot] = &[Slot::new(1, STEM), Slot::new(2, ASPECT)];

const NOUN: &[Slot] = &[
    Slot::new(1, NOUN_TYPE),
    Slot::new(2, GENDER),
    Slot::new(3, NUMBER),
    Slot::new(4, STATE),
];

const ADJECTIVE: &[Slot] = &[
    Slot::new(1, ADJECTIVE_TYPE),
    Slot::new(2, GENDER),
    Slot::new(3, NUMBER),
    Slot::new(4, STATE),
];

const PRONOUN: &[Slot] = &[
    Slot::new(1, PRONOUN_TYPE),
    Slot::new(2, PERSON),
    Slot::new(3, GENDER),
    Slot::new(4, NUMBER),
];

const SUFFIX: &[Slot] = &[
    Slot::new(1, SUFFIX_TYPE),
    Slot::new(2, PERSON),
    Slot::new(3, GENDER),
    Slot::new(4, NUMBER),
];

const PREPOSITION: &[Slot] = &[Slot::new(1, PREPOSITION_TYPE)];

/// Whether a code belongs to this scheme: a language letter followed by a
/// part of speech, and not a Greek word tag that happens to look like one.
pub(super) fn claims(code: &str) -> bool {
    matches!(code.as_bytes(), [b'H' | b'A', pos, ..] if PART_OF_SPEECH.contains(pos))
        && !super::greek::is_word_tag(code)
}

/// Part-of-speech label and the layout for the rest of a segment.
fn segment_shape(segment: &[u8]) -> (Option<&'static str>, &'static [Slot]) {
    match segment.first() {
        Some(b'V') => {
            let layout = match segment.get(2) {
                Some(b'r' | b's') => PARTICIPLE,
                Some(b'a' | b'c') => INFINITIVE,
                _ => FINITE_VERB,
            };
            (Some("Verb"), layout)
        }
        Some(b'N') => (Some("Noun"), NOUN),
        Some(b'A') => (Some("Adjective"), ADJECTIVE),
        Some(b'T') => {
            let label = segment
                .get(1)
                .and_then(|kind| lookup(PARTICLE_TYPE, *kind))
                .unwrap_or("Particle");
            (Some(label), &[])
        }
        Some(b'C') => (Some("Conjunction"), &[]),
        Some(b'R') => (Some("Preposition"), PREPOSITION),
        Some(b'P') => (Some("Pronoun"), PRONOUN),
        Some(b'D') => (Some("Adverb"), &[]),
        Some(b'S') => (Some("Suffix"), SUFFIX),
        _ => (None, &[]),
    }
}

#[derive(Debug, Clone)]
struct Segment<'a> {
    head: Option<&'static str>,
    rest: SlotReader<'a>,
}

impl<'a> Segment<'a> {
    fn new(segment: &'a str) -> Self {
        let bytes = segment.as_bytes();
        let (head, layout) = segment_shape(bytes);
        Self {
            head,
            rest: SlotReader::new(bytes, layout),
        }
    }
}

impl Iterator for Segment<'_> {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        self.head.take().or_else(|| self.rest.next())
    }
}

/// Labels of every segment, in segment order.
#[derive(Debug, Clone)]
pub(crate) struct Segments<'a> {
    pending: Split<'a, char>,
    current: Option<Segment<'a>>,
}

impl<'a> Segments<'a> {
    /// `code` must start with the language letter.
    pub(super) fn new(code: &'a str) -> Self {
        Self {
            pending: code[1..].split('/'),
            current: None,
        }
    }
}

impl Iterator for Segments<'_> {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(label) = self.current.as_mut().and_then(Iterator::next) {
                return Some(label);
            }
            self.current = Some(Segment::new(self.pending.next()?));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::decode;

    fn labels(code: &str) -> Vec<&'static str> {
        decode(code).collect()
    }

    #[test]
    fn finite_verb() {
        assert_eq!(
            labels("HVqp3ms"),
            ["Verb", "Qal", "Perfect", "3rd Person", "Masculine", "Singular"]
        );
    }

    #[test]
    fn compound_segments_concatenate_in_order() {
        assert_eq!(
            labels("HR/Ncfsa"),
            ["Preposition", "Noun", "Common", "Feminine", "Singular", "Absolute"]
        );
        assert_eq!(
            labels("HTd/Ncmpa"),
            ["Article", "Noun", "Common", "Masculine", "Plural", "Absolute"]
        );
        assert_eq!(labels("HC/To"), ["Conjunction", "Direct Object Marker"]);
        assert_eq!(
            labels("HC/Vqw3ms"),
            ["Conjunction", "Verb", "Qal", "Waw-Consecutive", "3rd Person", "Masculine", "Singular"]
        );
    }

    #[test]
    fn participles_and_infinitives_use_their_own_layouts() {
        assert_eq!(
            labels("HVqrmsa"),
            ["Verb", "Qal", "Participle", "Masculine", "Singular", "Absolute"]
        );
        assert_eq!(labels("HVqc"), ["Verb", "Qal", "Infinitive Construct"]);
    }

    #[test]
    fn unknown_letters_are_skipped() {
        assert_eq!(labels("HNxmsa"), ["Noun", "Masculine", "Singular", "Absolute"]);
        assert_eq!(labels("HTz"), ["Particle"]);
        assert_eq!(labels("HVqp3ms/"), ["Verb", "Qal", "Perfect", "3rd Person", "Masculine", "Singular"]);
        assert_eq!(labels("HR/Xq/Np"), ["Preposition", "Noun", "Proper"]);
    }

    #[test]
    fn aramaic_uses_the_same_tables() {
        assert_eq!(labels("ANcmsd"), ["Noun", "Common", "Masculine", "Singular", "Determined"]);
    }
}
