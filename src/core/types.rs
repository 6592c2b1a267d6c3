// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A unique identifier for a distinct word stored in a phonetic index.
pub type WordId = usize;

/// The four disjoint kinds of Tamil orthographic unit the encoder knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphKind {
    Vowel,
    Consonant,
    Compound,
    /// Dependent vowel signs, the virama and the aytham.
    Modifier,
}

/// Which of the three derived keys to compare on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyLevel {
    /// Every digit removed. The loosest match.
    Key0,
    /// Only the consonant-disambiguation digit `1` kept.
    #[default]
    Key1,
    /// Full detail: hardened sounds and vowel lengths included.
    Key2,
}

impl KeyLevel {
    pub const ALL: [KeyLevel; 3] = [KeyLevel::Key0, KeyLevel::Key1, KeyLevel::Key2];

    pub(crate) fn slot(self) -> usize {
        match self {
            KeyLevel::Key0 => 0,
            KeyLevel::Key1 => 1,
            KeyLevel::Key2 => 2,
        }
    }
}

/// The three phonetic codes of one word, from coarsest to most specific.
///
/// `key0` is always a subsequence of `key1`, which is always a subsequence of
/// `key2`; the three differ only by deleted digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PhoneticKey {
    pub key0: String,
    pub key1: String,
    pub key2: String,
}

impl PhoneticKey {
    /// Derives the two coarser keys from a fully detailed one.
    pub fn from_full(key2: String) -> Self {
        // key1 keeps `1`, which separates look-alike consonants.
        let key1 = key2.chars().filter(|c| !matches!(c, '2'..='9')).collect();
        let key0 = key2.chars().filter(|c| !matches!(c, '1'..='9')).collect();
        Self { key0, key1, key2 }
    }

    pub fn get(&self, level: KeyLevel) -> &str {
        match level {
            KeyLevel::Key0 => &self.key0,
            KeyLevel::Key1 => &self.key1,
            KeyLevel::Key2 => &self.key2,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key2.is_empty()
    }

    pub fn into_tuple(self) -> (String, String, String) {
        (self.key0, self.key1, self.key2)
    }
}
