//! Engine settings.

use std::path::PathBuf;

/// Where the engine finds its files and how far it scans.
///
/// ```
/// use interlinear::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_assets_dir("/srv/bible")
///     .with_verse_scan_ceiling(180);
/// assert_eq!(config.greek_lexicon, "strongs_greek.xml");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Root directory for [`DirectorySource`](crate::bible::source::DirectorySource).
    pub assets_dir: PathBuf,
    pub greek_lexicon: String,
    pub hebrew_lexicon: String,
    /// Highest verse number probed when stepping back into a previous chapter.
    pub verse_scan_ceiling: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("assets"),
            greek_lexicon: "strongs_greek.xml".to_string(),
            hebrew_lexicon: "strongs_hebrew.xml".to_string(),
            verse_scan_ceiling: 200,
        }
    }
}

impl EngineConfig {
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    pub fn with_greek_lexicon(mut self, name: impl Into<String>) -> Self {
        self.greek_lexicon = name.into();
        self
    }

    pub fn with_hebrew_lexicon(mut self, name: impl Into<String>) -> Self {
        self.hebrew_lexicon = name.into();
        self
    }

    pub fn with_verse_scan_ceiling(mut self, ceiling: u32) -> Self {
        self.verse_scan_ceiling = ceiling;
        self
    }
}
