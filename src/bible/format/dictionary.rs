//! Strong's dictionary file parsing.
//!
//! Two layouts are recognized by their root element:
//!
//! ```text
//! <strongsdictionary>
//!   <entry strongs="00001"><greek unicode="Α"/><strongs_def>..</strongs_def></entry>
//! </strongsdictionary>
//!
//! <osis><osisText>
//!   <div type="entry" n="1"><w>אָב</w><div type="definition">..</div></div>
//! </osisText></osis>
//! ```
//!
//! Every other root is read with the flat `entry` rules.

use std::collections::HashMap;

use log::{debug, trace, warn};

use super::markup::{self, Element};
use crate::bible::strongs::first_number;
use crate::bible::types::error::Result;
use crate::bible::types::models::LexiconEntry;

/// Parsed entries keyed by Strong's number.
pub type EntryTable = HashMap<u32, LexiconEntry>;

/// How to read a text value out of an entry element.
#[derive(Debug, Clone, Copy)]
enum Field {
    /// Text of the first descendant with this name.
    Child(&'static str),
    /// An attribute of the first descendant with this name.
    ChildAttr(&'static str, &'static str),
    /// Text of the first descendant with this name and `type` attribute.
    Typed(&'static str, &'static str),
}

impl Field {
    fn read(self, entry: &Element) -> Option<String> {
        let value = match self {
            Field::Child(name) => entry.find(name, None).map(Element::text),
            Field::ChildAttr(name, attr) => entry
                .find(name, None)
                .and_then(|child| child.attr(attr))
                .map(str::to_string),
            Field::Typed(name, kind) => entry.find(name, Some(("type", kind))).map(Element::text),
        }?;
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// First field in `fields` that yields a non-empty value.
fn read_first(entry: &Element, fields: &[Field]) -> String {
    fields
        .iter()
        .find_map(|field| field.read(entry))
        .unwrap_or_default()
}

/// Selects entry elements anywhere in the document.
#[derive(Debug, Clone, Copy)]
enum EntryRule {
    Named(&'static str),
    Typed(&'static str, &'static str),
    /// Elements with this name carrying any of these attributes.
    WithAnyAttr(&'static str, &'static [&'static str]),
}

impl EntryRule {
    fn matches(self, element: &Element) -> bool {
        match self {
            EntryRule::Named(name) => element.is(name),
            EntryRule::Typed(name, kind) => element.is(name) && element.attr("type") == Some(kind),
            EntryRule::WithAnyAttr(name, attrs) => {
                element.is(name) && element.first_attr(attrs).is_some()
            }
        }
    }
}

struct Schema {
    name: &'static str,
    /// Tried in order; the first rule that selects anything is used.
    entries: &'static [EntryRule],
    id_attributes: &'static [&'static str],
    headword: &'static [Field],
    definition: &'static [Field],
}

const FLAT: Schema = Schema {
    name: "strongsdictionary",
    entries: &[EntryRule::Named("entry")],
    id_attributes: &["strongs", "id"],
    headword: &[
        Field::Child("w"),
        Field::ChildAttr("greek", "unicode"),
        Field::ChildAttr("hebrew", "unicode"),
    ],
    definition: &[
        Field::Child("def"),
        Field::Child("strongs_def"),
        Field::Child("kjv_def"),
    ],
};

const NESTED: Schema = Schema {
    name: "osis",
    entries: &[
        EntryRule::Typed("div", "entry"),
        EntryRule::Typed("div", "article"),
        EntryRule::WithAnyAttr("div", &["osisID", "id", "type"]),
    ],
    id_attributes: &["osisID", "id", "strongs", "n"],
    headword: &[
        Field::Child("w"),
        Field::Child("title"),
        Field::Typed("div", "title"),
    ],
    definition: &[
        Field::Child("def"),
        Field::Typed("div", "definition"),
        Field::Child("p"),
    ],
};

fn schema_for(root: &Element) -> &'static Schema {
    if root.is("strongsdictionary") {
        &FLAT
    } else if root.is("osis") || root.is("osisText") {
        &NESTED
    } else {
        warn!("Unknown dictionary root <{}>; reading flat entry elements", root.name);
        &FLAT
    }
}

/// Parses a dictionary document into an entry table.
///
/// Entries without a usable id are skipped, never fatal.
///
/// # Arguments
/// * `xml` - The decoded document text
/// * `name` - The file name, used in log messages
///
/// # Errors
/// Returns `BibleError::Xml` or `BibleError::InvalidFormat` if the document
/// does not parse.
pub fn parse(xml: &str, name: &str) -> Result<EntryTable> {
    let root = markup::parse(xml)?;
    let schema = schema_for(&root);
    debug!("Reading {} as a {} dictionary", name, schema.name);

    let all: Vec<&Element> = std::iter::once(&root).chain(root.descendants()).collect();
    let entries: Vec<&Element> = schema
        .entries
        .iter()
        .map(|rule| {
            all.iter()
                .copied()
                .filter(|element| rule.matches(element))
                .collect::<Vec<_>>()
        })
        .find(|selected| !selected.is_empty())
        .unwrap_or_default();

    let mut table = EntryTable::with_capacity(entries.len());
    let mut skipped = 0usize;
    for (index, entry) in entries.iter().enumerate() {
        let number = schema
            .id_attributes
            .iter()
            .find_map(|attr| entry.attr(attr).and_then(first_number));
        let Some(number) = number else {
            trace!("{}: entry {} <{}> has no usable id", name, index, entry.name);
            skipped += 1;
            continue;
        };
        table.insert(
            number,
            LexiconEntry {
                headword: read_first(entry, schema.headword),
                definition: read_first(entry, schema.definition),
            },
        );
    }

    if skipped > 0 {
        warn!("{}: skipped {} entries without an id", name, skipped);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bible::types::error::BibleError;

    #[test]
    fn flat_entries_use_fallback_fields() {
        let xml = r#"<strongsdictionary>
            <entry strongs="00001"><greek BETA="*A" unicode="Α" translit="A"/>
                <strongs_def> the first letter</strongs_def><kjv_def>Alpha</kjv_def></entry>
            <entry id="G3056"><w>λόγος</w><def>word</def></entry>
            <entry><w>orphan</w></entry>
        </strongsdictionary>"#;
        let table = parse(xml, "greek").expect("parses");
        assert_eq!(table.len(), 2);
        assert_eq!(
            table[&1],
            LexiconEntry {
                headword: "Α".to_string(),
                definition: "the first letter".to_string(),
            }
        );
        assert_eq!(table[&3056].headword, "λόγος");
        assert_eq!(table[&3056].definition, "word");
    }

    #[test]
    fn nested_entries_prefer_typed_divs() {
        let xml = r#"<osis><osisText>
            <div type="entry" n="430"><w>אֱלֹהִים</w><div type="definition">God</div></div>
            <div type="entry" osisID="H7225"><title>רֵאשִׁית</title><p>beginning</p></div>
            <div type="entry"><w>no id</w></div>
        </osisText></osis>"#;
        let table = parse(xml, "hebrew").expect("parses");
        assert_eq!(table.len(), 2);
        assert_eq!(table[&430].headword, "אֱלֹהִים");
        assert_eq!(table[&430].definition, "God");
        assert_eq!(table[&7225].headword, "רֵאשִׁית");
        assert_eq!(table[&7225].definition, "beginning");
    }

    #[test]
    fn nested_falls_back_to_articles_then_any_div() {
        let articles = r#"<osis><div type="article" id="1"><p>father</p></div></osis>"#;
        assert_eq!(parse(articles, "a").expect("parses")[&1].definition, "father");

        let bare = r#"<osisText><div osisID="Strong:H2"><div type="title">אַב</div></div></osisText>"#;
        let table = parse(bare, "b").expect("parses");
        assert_eq!(table[&2].headword, "אַב");
    }

    #[test]
    fn id_attributes_without_digits_fall_through() {
        let xml = r#"<osis>
            <div type="entry" osisID="entry.aleph" n="1"><w>אָב</w></div>
            <div type="entry" osisID="entry.beth"><w>בַּ</w></div>
        </osis>"#;
        let table = parse(xml, "hebrew").expect("parses");
        assert_eq!(table.len(), 1);
        assert_eq!(table[&1].headword, "אָב");
    }

    #[test]
    fn unknown_root_reads_flat_entries() {
        let xml = r#"<lexicon><entry strongs="5"><w>x</w><def>y</def></entry></lexicon>"#;
        let table = parse(xml, "other").expect("parses");
        assert_eq!(table[&5].definition, "y");
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(matches!(parse("<osis><div>", "bad"), Err(BibleError::Xml(_))));
    }
}
