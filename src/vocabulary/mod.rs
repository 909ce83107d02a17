//! Vocabulary entries and the deck they are shown from
//!
//! The reference deck is compiled in. A deck file (TOML, `[[entries]]`
//! tables) can replace it without changing how the page behaves.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One flashcard: a word, how to read it, what it means, and a grouping label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub source_script: String,
    pub transliteration: String,
    pub translation: String,
    pub category: String,  // Free-form label, shared across entries for grouping
}

impl VocabularyEntry {
    pub fn new(
        source_script: impl Into<String>,
        transliteration: impl Into<String>,
        translation: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            source_script: source_script.into(),
            transliteration: transliteration.into(),
            translation: translation.into(),
            category: category.into(),
        }
    }
}

/// (source, transliteration, translation, category)
const REFERENCE_ENTRIES: [(&str, &str, &str, &str); 12] = [
    ("猫", "neko", "Con mèo", "動物"),
    ("本", "hon", "Quyển sách", "学校"),
    ("学校", "gakkou", "Trường học", "学校"),
    ("先生", "sensei", "Giáo viên", "人"),
    ("友達", "tomodachi", "Bạn bè", "人"),
    ("食べる", "taberu", "Ăn", "動詞"),
    ("飲む", "nomu", "Uống", "動詞"),
    ("行く", "iku", "Đi", "動詞"),
    ("来る", "kuru", "Đến", "動詞"),
    ("見る", "miru", "Nhìn", "動詞"),
    ("聞く", "kiku", "Nghe", "動詞"),
    ("話す", "hanasu", "Nói", "動詞"),
];

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("deck has no entries")]
    Empty,

    #[error("entry {index} has a blank {field}")]
    BlankField { index: usize, field: &'static str },

    #[error("could not read deck file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse deck file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// On-disk shape of a deck file
#[derive(Debug, Serialize, Deserialize)]
struct DeckFile {
    #[serde(default)]
    entries: Vec<VocabularyEntry>,
}

/// Ordered, immutable list of entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    entries: Vec<VocabularyEntry>,
}

impl Default for Deck {
    fn default() -> Self {
        let entries = REFERENCE_ENTRIES
            .iter()
            .map(|(src, translit, meaning, category)| {
                VocabularyEntry::new(*src, *translit, *meaning, *category)
            })
            .collect();
        Self { entries }
    }
}

impl Deck {
    /// Build a deck, rejecting empty decks and entries that could not be shown
    pub fn new(entries: Vec<VocabularyEntry>) -> Result<Self, DeckError> {
        if entries.is_empty() {
            return Err(DeckError::Empty);
        }

        for (index, entry) in entries.iter().enumerate() {
            if entry.source_script.trim().is_empty() {
                return Err(DeckError::BlankField { index, field: "source_script" });
            }
            if entry.transliteration.trim().is_empty() {
                return Err(DeckError::BlankField { index, field: "transliteration" });
            }
        }

        Ok(Self { entries })
    }

    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, DeckError> {
        let file: DeckFile = toml::from_str(content).map_err(|source| DeckError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file.entries)
    }

    /// Load a deck file from disk
    pub async fn load(path: &Path) -> Result<Self, DeckError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DeckError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let deck = Self::from_toml_str(&content, path)?;
        tracing::info!("Loaded {} entries from {}", deck.len(), path.display());
        Ok(deck)
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&VocabularyEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.category.as_str()) {
                seen.push(&entry.category);
            }
        }
        seen
    }
}
