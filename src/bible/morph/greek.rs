//! Greek morphology codes.
//!
//! Fixed-column codes have seven positions:
//!
//! ```text
//! 0 person  1 tense  2 voice  3 mood  4 case  5 number  6 gender
//! 3         I        A        I       -       S         -      => "3IAI-S--"
//! ```
//!
//! Nominal codes leave the verb positions blank and only fill 4-6.
//! Tagged codes lead with a part of speech (`V-IAI-3S`, `N-DSF`, `PREP`).

use super::{lookup, Slot, SlotReader, Table};

const PERSON: Table = &[(b'1', "1st Person"), (b'2', "2nd Person"), (b'3', "3rd Person")];

const TENSE: Table = &[
    (b'P', "Present"),
    (b'I', "Imperfect"),
    (b'F', "Future"),
    (b'A', "Aorist"),
    (b'X', "Perfect"),
    (b'Y', "Pluperfect"),
];

const VOICE: Table = &[(b'A', "Active"), (b'M', "Middle"), (b'P', "Passive")];

const MOOD: Table = &[
    (b'I', "Indicative"),
    (b'S', "Subjunctive"),
    (b'O', "Optative"),
    (b'M', "Imperative"),
    (b'N', "Infinitive"),
    (b'P', "Participle"),
];

const CASE: Table = &[
    (b'N', "Nominative"),
    (b'G', "Genitive"),
    (b'D', "Dative"),
    (b'A', "Accusative"),
    (b'V', "Vocative"),
];

const NUMBER: Table = &[(b'S', "Singular"), (b'P', "Plural")];

const GENDER: Table = &[(b'M', "Masculine"), (b'F', "Feminine"), (b'N', "Neuter")];

const VERB_LAYOUT: &[Slot] = &[
    Slot::new(0, PERSON),
    Slot::new(1, TENSE),
    Slot::new(2, VOICE),
    Slot::new(3, MOOD),
    Slot::new(4, CASE),
    Slot::new(5, NUMBER),
    Slot::new(6, GENDER),
];

const NOMINAL_LAYOUT: &[Slot] = &[Slot::new(4, CASE), Slot::new(5, NUMBER), Slot::new(6, GENDER)];

/// `^[123-][PIFAXY]`: a person (or blank) followed by a tense.
fn is_verb(code: &[u8]) -> bool {
    matches!(code, [b'1' | b'2' | b'3' | b'-', tense, ..] if lookup(TENSE, *tense).is_some())
}

pub(super) fn fixed_column(code: &str) -> SlotReader<'_> {
    let bytes = code.as_bytes();
    let layout = if is_verb(bytes) { VERB_LAYOUT } else { NOMINAL_LAYOUT };
    SlotReader::new(bytes, layout)
}

const PART_OF_SPEECH: &[(&str, &str)] = &[
    ("V", "Verb"),
    ("N", "Noun"),
    ("A", "Adjective"),
    ("T", "Article"),
    ("P", "Personal Pronoun"),
    ("D", "Demonstrative Pronoun"),
    ("R", "Relative Pronoun"),
    ("PREP", "Preposition"),
    ("CONJ", "Conjunction"),
    ("COND", "Conditional"),
    ("PRON", "Pronoun"),
    ("ADJ", "Adjective"),
    ("ADV", "Adverb"),
    ("PRT", "Particle"),
    ("INJ", "Interjection"),
    ("HEB", "Hebrew Word"),
    ("ARAM", "Aramaic Word"),
];

const TAGGED_TENSE: Table = &[
    (b'P', "Present"),
    (b'I', "Imperfect"),
    (b'F', "Future"),
    (b'A', "Aorist"),
    (b'R', "Perfect"),
    (b'L', "Pluperfect"),
];

const TAGGED_VOICE: Table = &[
    (b'A', "Active"),
    (b'M', "Middle"),
    (b'P', "Passive"),
    (b'D', "Middle/Passive"),
];

const TAGGED_NUMBER: Table = &[(b'S', "Singular"), (b'P', "Plural"), (b'D', "Dual")];

const TAGGED_FINITE_LAYOUT: &[Slot] = &[
    Slot::new(0, TAGGED_TENSE),
    Slot::new(1, TAGGED_VOICE),
    Slot::new(2, MOOD),
    Slot::new(3, PERSON),
    Slot::new(4, TAGGED_NUMBER),
    Slot::new(5, GENDER),
];

const TAGGED_PARTICIPLE_LAYOUT: &[Slot] = &[
    Slot::new(0, TAGGED_TENSE),
    Slot::new(1, TAGGED_VOICE),
    Slot::new(2, MOOD),
    Slot::new(3, CASE),
    Slot::new(4, TAGGED_NUMBER),
    Slot::new(5, GENDER),
];

const TAGGED_NOMINAL_LAYOUT: &[Slot] = &[
    Slot::new(0, CASE),
    Slot::new(1, TAGGED_NUMBER),
    Slot::new(2, GENDER),
];

/// Pronouns that carry a person digit ahead of the case (`P-1GS`, `F-3ASM`).
const TAGGED_PERSONAL_LAYOUT: &[Slot] = &[
    Slot::new(0, PERSON),
    Slot::new(1, CASE),
    Slot::new(2, TAGGED_NUMBER),
    Slot::new(3, GENDER),
];

fn part_of_speech(tag: &str) -> Option<&'static str> {
    PART_OF_SPEECH
        .iter()
        .find(|(key, _)| *key == tag)
        .map(|(_, label)| *label)
}

/// Whether the token before the first dash is a multi-letter Greek tag
/// such as `ADV` or `ARAM`.
pub(super) fn is_word_tag(code: &str) -> bool {
    let tag = code.split('-').next().unwrap_or_default();
    tag.len() > 1 && part_of_speech(tag).is_some()
}

/// A tagged code: the part of speech, then the parsing letters.
#[derive(Debug, Clone)]
pub(crate) struct Tagged<'a> {
    head: Option<&'static str>,
    details: SlotReader<'a>,
}

impl<'a> Tagged<'a> {
    pub(super) fn new(code: &'a str) -> Self {
        let (tag, rest) = code.split_once('-').unwrap_or((code, ""));
        let details: Vec<u8> = rest.bytes().filter(|b| *b != b'-').collect();
        let layout = if tag == "V" {
            match details.get(2) {
                Some(b'P') => TAGGED_PARTICIPLE_LAYOUT,
                _ => TAGGED_FINITE_LAYOUT,
            }
        } else if matches!(details.first(), Some(b'1' | b'2' | b'3')) {
            TAGGED_PERSONAL_LAYOUT
        } else {
            TAGGED_NOMINAL_LAYOUT
        };
        Self {
            head: part_of_speech(tag),
            details: SlotReader::new(details, layout),
        }
    }
}

impl Iterator for Tagged<'_> {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        self.head.take().or_else(|| self.details.next())
    }
}

#[cfg(test)]
mod tests {
    use super::super::decode;

    fn labels(code: &str) -> Vec<&'static str> {
        decode(code).collect()
    }

    #[test]
    fn fixed_column_verbs_read_all_seven_positions() {
        assert_eq!(
            labels("3IAI-S--"),
            ["3rd Person", "Imperfect", "Active", "Indicative", "Singular"]
        );
        assert_eq!(
            labels("-PAPNSM-"),
            ["Present", "Active", "Participle", "Nominative", "Singular", "Masculine"]
        );
        assert_eq!(labels("-AAN----"), ["Aorist", "Active", "Infinitive"]);
    }

    #[test]
    fn fixed_column_nominals_read_trailing_positions_only() {
        assert_eq!(labels("----DSF-"), ["Dative", "Singular", "Feminine"]);
        assert_eq!(labels("----NPN-"), ["Nominative", "Plural", "Neuter"]);
    }

    #[test]
    fn unknown_letters_are_skipped_in_place() {
        assert_eq!(labels("3IZI-S--"), ["3rd Person", "Imperfect", "Indicative", "Singular"]);
        assert_eq!(labels("----QSF-"), ["Singular", "Feminine"]);
        assert_eq!(labels("----D"), ["Dative"]);
    }

    #[test]
    fn tagged_codes_lead_with_part_of_speech() {
        assert_eq!(
            labels("V-IAI-3S"),
            ["Verb", "Imperfect", "Active", "Indicative", "3rd Person", "Singular"]
        );
        assert_eq!(
            labels("V-PAP-NSM"),
            ["Verb", "Present", "Active", "Participle", "Nominative", "Singular", "Masculine"]
        );
        assert_eq!(labels("T-NSM"), ["Article", "Nominative", "Singular", "Masculine"]);
        assert_eq!(labels("PREP"), ["Preposition"]);
        assert_eq!(labels("Q-NSM"), ["Nominative", "Singular", "Masculine"]);
    }

    #[test]
    fn tagged_pronouns_read_person_before_case() {
        assert_eq!(
            labels("P-1GS"),
            ["Personal Pronoun", "1st Person", "Genitive", "Singular"]
        );
        assert_eq!(labels("P-2NP"), ["Personal Pronoun", "2nd Person", "Nominative", "Plural"]);
        assert_eq!(
            labels("P-3ASM"),
            ["Personal Pronoun", "3rd Person", "Accusative", "Singular", "Masculine"]
        );
        assert_eq!(labels("P-DSF"), ["Personal Pronoun", "Dative", "Singular", "Feminine"]);
    }
}
