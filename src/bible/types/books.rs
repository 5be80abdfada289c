//! The canonical book table.
//!
//! One row per book in canonical order: OSIS code, display name, chapter
//! count and the spellings accepted for it. The same alias list drives both
//! reference parsing and the book-to-file-name mapping.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use super::models::Testament;

/// The 66 books of the Protestant canon, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Book {
    Genesis,
    Exodus,
    Leviticus,
    Numbers,
    Deuteronomy,
    Joshua,
    Judges,
    Ruth,
    FirstSamuel,
    SecondSamuel,
    FirstKings,
    SecondKings,
    FirstChronicles,
    SecondChronicles,
    Ezra,
    Nehemiah,
    Esther,
    Job,
    Psalms,
    Proverbs,
    Ecclesiastes,
    SongOfSolomon,
    Isaiah,
    Jeremiah,
    Lamentations,
    Ezekiel,
    Daniel,
    Hosea,
    Joel,
    Amos,
    Obadiah,
    Jonah,
    Micah,
    Nahum,
    Habakkuk,
    Zephaniah,
    Haggai,
    Zechariah,
    Malachi,
    Matthew,
    Mark,
    Luke,
    John,
    Acts,
    Romans,
    FirstCorinthians,
    SecondCorinthians,
    Galatians,
    Ephesians,
    Philippians,
    Colossians,
    FirstThessalonians,
    SecondThessalonians,
    FirstTimothy,
    SecondTimothy,
    Titus,
    Philemon,
    Hebrews,
    James,
    FirstPeter,
    SecondPeter,
    FirstJohn,
    SecondJohn,
    ThirdJohn,
    Jude,
    Revelation,
}

struct BookInfo {
    code: &'static str,
    name: &'static str,
    chapters: u32,
    aliases: &'static [&'static str],
}

const fn row(
    code: &'static str,
    name: &'static str,
    chapters: u32,
    aliases: &'static [&'static str],
) -> BookInfo {
    BookInfo { code, name, chapters, aliases }
}

/// Number of Old Testament books; everything after is New Testament.
const OLD_TESTAMENT_LEN: usize = 39;

const BOOK_TABLE: [BookInfo; 66] = [
    row("Gen", "Genesis", 50, &["gn", "ge"]),
    row("Exod", "Exodus", 40, &["ex", "exo", "exd"]),
    row("Lev", "Leviticus", 27, &["lv", "le"]),
    row("Num", "Numbers", 36, &["nm", "nu", "nb"]),
    row("Deut", "Deuteronomy", 34, &["dt", "de", "deu"]),
    row("Josh", "Joshua", 24, &["jos", "jsh"]),
    row("Judg", "Judges", 21, &["jdg", "jg", "jdgs"]),
    row("Ruth", "Ruth", 4, &["rth", "ru"]),
    row("1Sam", "1 Samuel", 31, &["1sa", "1sm", "isam", "1samuel"]),
    row("2Sam", "2 Samuel", 24, &["2sa", "2sm", "iisam", "2samuel"]),
    row("1Kgs", "1 Kings", 22, &["1kg", "1ki", "1kin", "1kings"]),
    row("2Kgs", "2 Kings", 25, &["2kg", "2ki", "2kin", "2kings"]),
    row("1Chr", "1 Chronicles", 29, &["1ch", "1chron", "1chronicles"]),
    row("2Chr", "2 Chronicles", 36, &["2ch", "2chron", "2chronicles"]),
    row("Ezra", "Ezra", 10, &["ezr"]),
    row("Neh", "Nehemiah", 13, &["ne"]),
    row("Esth", "Esther", 10, &["est", "es"]),
    row("Job", "Job", 42, &["jb"]),
    row("Ps", "Psalms", 150, &["psa", "psalm", "pss", "psm", "pslm"]),
    row("Prov", "Proverbs", 31, &["prv", "pr", "pro"]),
    row("Eccl", "Ecclesiastes", 12, &["ecc", "eccles", "ec", "qoh", "qoheleth"]),
    row("Song", "Song of Solomon", 8, &["sos", "so", "cant", "canticles", "song of songs"]),
    row("Isa", "Isaiah", 66, &["is"]),
    row("Jer", "Jeremiah", 52, &["je", "jr"]),
    row("Lam", "Lamentations", 5, &["la"]),
    row("Ezek", "Ezekiel", 48, &["eze", "ezk"]),
    row("Dan", "Daniel", 12, &["da", "dn"]),
    row("Hos", "Hosea", 14, &["ho"]),
    row("Joel", "Joel", 3, &["jl", "joe"]),
    row("Amos", "Amos", 9, &["am"]),
    row("Obad", "Obadiah", 1, &["ob", "oba"]),
    row("Jonah", "Jonah", 4, &["jon", "jnh"]),
    row("Mic", "Micah", 7, &["mi"]),
    row("Nah", "Nahum", 3, &["na"]),
    row("Hab", "Habakkuk", 3, &["hb"]),
    row("Zeph", "Zephaniah", 3, &["zep", "zp"]),
    row("Hag", "Haggai", 2, &["hg"]),
    row("Zech", "Zechariah", 14, &["zec", "zc"]),
    row("Mal", "Malachi", 4, &["ml"]),
    row("Matt", "Matthew", 28, &["mt", "mat"]),
    row("Mark", "Mark", 16, &["mk", "mrk", "mar", "mr"]),
    row("Luke", "Luke", 24, &["lk", "luk"]),
    row("John", "John", 21, &["jn", "jhn", "joh"]),
    row("Acts", "Acts", 28, &["ac", "act"]),
    row("Rom", "Romans", 16, &["ro", "rm"]),
    row("1Cor", "1 Corinthians", 16, &["1co", "1corinthians"]),
    row("2Cor", "2 Corinthians", 13, &["2co", "2corinthians"]),
    row("Gal", "Galatians", 6, &["ga"]),
    row("Eph", "Ephesians", 6, &["ephes"]),
    row("Phil", "Philippians", 4, &["php", "pp"]),
    row("Col", "Colossians", 4, &["co"]),
    row("1Thess", "1 Thessalonians", 5, &["1th", "1thes", "1thessalonians"]),
    row("2Thess", "2 Thessalonians", 3, &["2th", "2thes", "2thessalonians"]),
    row("1Tim", "1 Timothy", 6, &["1ti", "1timothy"]),
    row("2Tim", "2 Timothy", 4, &["2ti", "2timothy"]),
    row("Titus", "Titus", 3, &["tit", "ti"]),
    row("Phlm", "Philemon", 1, &["philem", "phm", "pm"]),
    row("Heb", "Hebrews", 13, &["he"]),
    row("Jas", "James", 5, &["jm", "jam"]),
    row("1Pet", "1 Peter", 5, &["1pe", "1pt", "1p", "1peter"]),
    row("2Pet", "2 Peter", 3, &["2pe", "2pt", "2p", "2peter"]),
    row("1John", "1 John", 5, &["1jn", "1jo", "1jhn"]),
    row("2John", "2 John", 1, &["2jn", "2jo", "2jhn"]),
    row("3John", "3 John", 1, &["3jn", "3jo", "3jhn"]),
    row("Jude", "Jude", 1, &["jud", "jd"]),
    row("Rev", "Revelation", 22, &["re", "rv", "apoc", "revelations"]),
];

static ALIASES: OnceLock<HashMap<String, Book>> = OnceLock::new();

/// Lowercases and removes every whitespace character.
pub(crate) fn compact(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

fn alias_table() -> &'static HashMap<String, Book> {
    ALIASES.get_or_init(|| {
        let mut table = HashMap::new();
        for book in Book::ALL {
            let info = book.info();
            let spellings = [info.code, info.name]
                .into_iter()
                .chain(info.aliases.iter().copied());
            for spelling in spellings {
                table.insert(spelling.to_lowercase(), book);
                table.insert(compact(spelling), book);
            }
        }
        table
    })
}

impl Book {
    /// Every book in canonical order.
    pub const ALL: [Book; 66] = [
        Book::Genesis,
        Book::Exodus,
        Book::Leviticus,
        Book::Numbers,
        Book::Deuteronomy,
        Book::Joshua,
        Book::Judges,
        Book::Ruth,
        Book::FirstSamuel,
        Book::SecondSamuel,
        Book::FirstKings,
        Book::SecondKings,
        Book::FirstChronicles,
        Book::SecondChronicles,
        Book::Ezra,
        Book::Nehemiah,
        Book::Esther,
        Book::Job,
        Book::Psalms,
        Book::Proverbs,
        Book::Ecclesiastes,
        Book::SongOfSolomon,
        Book::Isaiah,
        Book::Jeremiah,
        Book::Lamentations,
        Book::Ezekiel,
        Book::Daniel,
        Book::Hosea,
        Book::Joel,
        Book::Amos,
        Book::Obadiah,
        Book::Jonah,
        Book::Micah,
        Book::Nahum,
        Book::Habakkuk,
        Book::Zephaniah,
        Book::Haggai,
        Book::Zechariah,
        Book::Malachi,
        Book::Matthew,
        Book::Mark,
        Book::Luke,
        Book::John,
        Book::Acts,
        Book::Romans,
        Book::FirstCorinthians,
        Book::SecondCorinthians,
        Book::Galatians,
        Book::Ephesians,
        Book::Philippians,
        Book::Colossians,
        Book::FirstThessalonians,
        Book::SecondThessalonians,
        Book::FirstTimothy,
        Book::SecondTimothy,
        Book::Titus,
        Book::Philemon,
        Book::Hebrews,
        Book::James,
        Book::FirstPeter,
        Book::SecondPeter,
        Book::FirstJohn,
        Book::SecondJohn,
        Book::ThirdJohn,
        Book::Jude,
        Book::Revelation,
    ];

    fn info(self) -> &'static BookInfo {
        &BOOK_TABLE[self as usize]
    }

    /// The OSIS book code, e.g. `1John`.
    pub fn code(self) -> &'static str {
        self.info().code
    }

    /// The English display name, e.g. `1 John`.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Extra registered spellings besides the code and name.
    pub fn aliases(self) -> &'static [&'static str] {
        self.info().aliases
    }

    pub fn chapters(self) -> u32 {
        self.info().chapters
    }

    pub fn testament(self) -> Testament {
        if (self as usize) < OLD_TESTAMENT_LEN {
            Testament::Old
        } else {
            Testament::New
        }
    }

    /// The book that follows this one in canonical order.
    pub fn next(self) -> Option<Book> {
        Book::ALL.get(self as usize + 1).copied()
    }

    /// The book that precedes this one in canonical order.
    pub fn previous(self) -> Option<Book> {
        (self as usize).checked_sub(1).map(|index| Book::ALL[index])
    }

    /// The canonical file name holding this book's document.
    pub fn file_name(self) -> String {
        format!("{}.xml", self.code())
    }

    /// Looks a spelling up in the alias table.
    ///
    /// Tries the lowercased token as given, then with all whitespace removed,
    /// so "Song of Solomon", "songofsolomon" and "SOS" all match.
    pub fn from_alias(token: &str) -> Option<Book> {
        let table = alias_table();
        let token = token.trim();
        table
            .get(&token.to_lowercase())
            .or_else(|| table.get(&compact(token)))
            .copied()
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The book part of a reference.
///
/// `Unregistered` holds a best-effort code the resolver produced for a token
/// missing from the alias table. It is a valid value that simply matches no
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookCode {
    Canonical(Book),
    Unregistered(String),
}

impl BookCode {
    pub fn as_str(&self) -> &str {
        match self {
            BookCode::Canonical(book) => book.code(),
            BookCode::Unregistered(code) => code,
        }
    }

    pub fn book(&self) -> Option<Book> {
        match self {
            BookCode::Canonical(book) => Some(*book),
            BookCode::Unregistered(_) => None,
        }
    }

    /// Testament used to tag bare Strong's numbers found in this book.
    ///
    /// Unregistered codes are treated as New Testament (Greek).
    pub fn testament(&self) -> Testament {
        self.book().map_or(Testament::New, Book::testament)
    }

    /// Resolves a code (any registered spelling) to its canonical file name.
    pub fn file_name(&self) -> Option<String> {
        match self {
            BookCode::Canonical(book) => Some(book.file_name()),
            BookCode::Unregistered(code) => Book::from_alias(code).map(Book::file_name),
        }
    }
}

impl From<Book> for BookCode {
    fn from(book: Book) -> Self {
        BookCode::Canonical(book)
    }
}

impl fmt::Display for BookCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_and_testaments() {
        assert_eq!(Book::ALL.len(), BOOK_TABLE.len());
        assert_eq!(Book::Malachi.testament(), Testament::Old);
        assert_eq!(Book::Matthew.testament(), Testament::New);
        assert_eq!(Book::Malachi.next(), Some(Book::Matthew));
        assert_eq!(Book::Genesis.previous(), None);
        assert_eq!(Book::Revelation.next(), None);
        for (index, book) in Book::ALL.iter().enumerate() {
            assert_eq!(*book as usize, index, "table out of order at {}", book);
        }
    }

    #[test]
    fn aliases_resolve_many_to_one() {
        for spelling in ["Gen", "gen", "GN", "Genesis", " genesis "] {
            assert_eq!(Book::from_alias(spelling), Some(Book::Genesis), "{}", spelling);
        }
        assert_eq!(Book::from_alias("1 John"), Some(Book::FirstJohn));
        assert_eq!(Book::from_alias("1jn"), Some(Book::FirstJohn));
        assert_eq!(Book::from_alias("Song of Solomon"), Some(Book::SongOfSolomon));
        assert_eq!(Book::from_alias("songofsongs"), Some(Book::SongOfSolomon));
        assert_eq!(Book::from_alias("Philem"), Some(Book::Philemon));
        assert_eq!(Book::from_alias("Nonesuch"), None);
    }

    #[test]
    fn no_alias_is_claimed_twice() {
        let mut seen: HashMap<String, Book> = HashMap::new();
        for book in Book::ALL {
            let info = book.info();
            let spellings = [info.code, info.name]
                .into_iter()
                .chain(info.aliases.iter().copied());
            for spelling in spellings {
                let key = compact(spelling);
                if let Some(previous) = seen.insert(key.clone(), book) {
                    assert_eq!(previous, book, "alias {} claimed by {} and {}", key, previous, book);
                }
            }
        }
    }

    #[test]
    fn file_names_follow_codes() {
        assert_eq!(Book::FirstJohn.file_name(), "1John.xml");
        let code = BookCode::Unregistered("matthew".to_string());
        assert_eq!(code.file_name().as_deref(), Some("Matt.xml"));
        assert_eq!(BookCode::Unregistered("Xyz".to_string()).file_name(), None);
        assert_eq!(BookCode::Unregistered("Xyz".to_string()).testament(), Testament::New);
    }
}
