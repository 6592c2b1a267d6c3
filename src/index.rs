// File: src/index.rs
use crate::core::engine::TaPhone;
use crate::core::types::{KeyLevel, PhoneticKey, WordId};
use crate::error::{PhoneError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// A stored word together with the keys it was filed under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub key: PhoneticKey,
}

/// Groups distinct words by their phonetic keys, at all three levels at once,
/// so that sound-alike words can be looked up or reported as duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhoneticIndex {
    entries: Vec<WordEntry>,
    ids: HashMap<String, WordId>,
    /// One key -> word ids map per [`KeyLevel`]. Ids stay in insertion order.
    buckets: [HashMap<String, BTreeSet<WordId>>; 3],
}

impl PhoneticIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a word, returning its id. Words with no Tamil content are not
    /// indexed. Adding a word twice returns the id it already has.
    pub fn insert(&mut self, phone: &TaPhone, word: &str) -> Option<WordId> {
        let word = word.trim();
        if let Some(&id) = self.ids.get(word) {
            return Some(id);
        }

        let key = phone.encode(word);
        if key.is_empty() {
            debug!(word, "skipping word without Tamil content");
            return None;
        }

        let id = self.entries.len();
        for level in KeyLevel::ALL {
            self.buckets[level.slot()]
                .entry(key.get(level).to_string())
                .or_default()
                .insert(id);
        }
        debug!(word, id, key2 = %key.key2, "indexed");
        self.ids.insert(word.to_string(), id);
        self.entries.push(WordEntry {
            word: word.to_string(),
            key,
        });
        Some(id)
    }

    /// Every stored word that sounds like `word` at the given level.
    pub fn lookup(&self, phone: &TaPhone, word: &str, level: KeyLevel) -> Vec<&str> {
        let key = phone.encode(word);
        self.lookup_key(key.get(level), level)
    }

    /// Every stored word filed under an already computed key.
    pub fn lookup_key(&self, key: &str, level: KeyLevel) -> Vec<&str> {
        if key.is_empty() {
            return vec![];
        }
        self.buckets[level.slot()]
            .get(key)
            .map(|ids| self.words_for(ids))
            .unwrap_or_default()
    }

    /// Keys shared by at least `min_size` words, sorted by key.
    pub fn groups(&self, level: KeyLevel, min_size: usize) -> Vec<(&str, Vec<&str>)> {
        let mut groups: Vec<(&str, Vec<&str>)> = self.buckets[level.slot()]
            .iter()
            .filter(|(_, ids)| ids.len() >= min_size.max(1))
            .map(|(key, ids)| (key.as_str(), self.words_for(ids)))
            .collect();
        groups.sort_by(|a, b| a.0.cmp(b.0));
        groups
    }

    fn words_for(&self, ids: &BTreeSet<WordId>) -> Vec<&str> {
        ids.iter()
            .filter_map(|&id| self.entries.get(id))
            .map(|entry| entry.word.as_str())
            .collect()
    }

    /// Checks that every id refers to a stored word and that every bucket
    /// agrees with the key stored for that word. Run on indexes read from disk.
    pub fn validate(&self) -> Result<()> {
        if self.ids.len() != self.entries.len() {
            return Err(PhoneError::CorruptIndex(format!(
                "{} word ids for {} entries",
                self.ids.len(),
                self.entries.len()
            )));
        }
        for (word, &id) in &self.ids {
            match self.entries.get(id) {
                Some(entry) if entry.word == *word => {}
                _ => {
                    return Err(PhoneError::CorruptIndex(format!(
                        "word '{word}' points at id {id}"
                    )))
                }
            }
        }
        for level in KeyLevel::ALL {
            for (key, ids) in &self.buckets[level.slot()] {
                for &id in ids {
                    match self.entries.get(id) {
                        Some(entry) if entry.key.get(level) == key.as_str() => {}
                        _ => {
                            return Err(PhoneError::CorruptIndex(format!(
                                "{level:?} bucket '{key}' holds unknown id {id}"
                            )))
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, id: WordId) -> Option<&WordEntry> {
        self.entries.get(id)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.word.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(words: &[&str]) -> (TaPhone, PhoneticIndex) {
        let phone = TaPhone::new();
        let mut index = PhoneticIndex::new();
        for word in words {
            index.insert(&phone, word);
        }
        (phone, index)
    }

    #[test]
    fn reinserting_returns_same_id() {
        let phone = TaPhone::new();
        let mut index = PhoneticIndex::new();
        let first = index.insert(&phone, "காலம்");
        let second = index.insert(&phone, " காலம் ");
        assert_eq!(first, Some(0));
        assert_eq!(first, second);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn non_tamil_words_are_rejected() {
        let phone = TaPhone::new();
        let mut index = PhoneticIndex::new();
        assert_eq!(index.insert(&phone, "hello"), None);
        assert_eq!(index.insert(&phone, ""), None);
        assert!(index.is_empty());
    }

    #[test]
    fn lookup_respects_level() {
        let (phone, index) = build(&["காலம்", "கலம்", "நிலம்"]);
        // K3LM and KLM agree once vowel length is dropped.
        assert_eq!(index.lookup(&phone, "கலம்", KeyLevel::Key1), vec!["காலம்", "கலம்"]);
        assert_eq!(index.lookup(&phone, "கலம்", KeyLevel::Key2), vec!["கலம்"]);
        assert!(index.lookup(&phone, "abc", KeyLevel::Key0).is_empty());
    }

    #[test]
    fn disambiguation_digit_separates_at_key1_only() {
        // கற்க is KR1K, கர்க is KRK.
        let (phone, index) = build(&["கற்க", "கர்க"]);
        assert_eq!(index.lookup(&phone, "கற்க", KeyLevel::Key1), vec!["கற்க"]);
        assert_eq!(index.lookup(&phone, "கற்க", KeyLevel::Key0), vec!["கற்க", "கர்க"]);
    }

    #[test]
    fn groups_report_shared_keys() {
        let (_, index) = build(&["காலம்", "கலம்", "நிலம்", "நீலம்"]);
        let groups = index.groups(KeyLevel::Key0, 2);
        assert_eq!(
            groups,
            vec![("KLM", vec!["காலம்", "கலம்"]), ("NLM", vec!["நிலம்", "நீலம்"])]
        );
        assert_eq!(index.groups(KeyLevel::Key2, 2).len(), 1);
        assert_eq!(index.groups(KeyLevel::Key2, 0).len(), 3);
    }

    #[test]
    fn built_index_validates() {
        let (_, index) = build(&["காலம்", "கலம்", "பச்சை"]);
        assert!(index.validate().is_ok());
        assert!(PhoneticIndex::new().validate().is_ok());
    }

    #[test]
    fn dangling_ids_fail_validation_and_never_panic() {
        let (_, mut index) = build(&["கலம்"]);
        index.buckets[KeyLevel::Key0.slot()].entry("KLM".to_string()).or_default().insert(7);
        assert!(matches!(index.validate(), Err(PhoneError::CorruptIndex(_))));
        assert_eq!(index.lookup_key("KLM", KeyLevel::Key0), vec!["கலம்"]);
        assert_eq!(index.groups(KeyLevel::Key0, 2), vec![("KLM", vec!["கலம்"])]);
    }

    #[test]
    fn entries_keep_their_keys() {
        let (_, index) = build(&["பச்சை"]);
        let entry = index.get(0).unwrap();
        assert_eq!(entry.key.key2, "PCH7");
        assert_eq!(index.words().collect::<Vec<_>>(), vec!["பச்சை"]);
        assert!(index.get(1).is_none());
    }
}
