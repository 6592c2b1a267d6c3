use crate::core::converter::rewrite;
use crate::core::patterns::GlyphPatterns;
use crate::core::types::PhoneticKey;
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// The Tamil phonetic encoder.
///
/// Holds a reference to the compiled glyph matchers and nothing else, so a
/// single instance can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct TaPhone {
    patterns: Arc<GlyphPatterns>,
}

impl TaPhone {
    pub fn new() -> Self {
        Self {
            patterns: GlyphPatterns::shared(),
        }
    }

    /// Builds an encoder with its own freshly compiled matchers, reporting a
    /// compilation failure instead of panicking.
    pub fn try_new() -> Result<Self> {
        Ok(Self {
            patterns: Arc::new(GlyphPatterns::compile()?),
        })
    }

    /// Encodes one word into its three phonetic keys.
    ///
    /// Words should be passed one at a time. A phrase is accepted but its
    /// words fuse into a single code since spaces and punctuation are dropped.
    pub fn encode(&self, word: &str) -> PhoneticKey {
        let key = PhoneticKey::from_full(rewrite(word, &self.patterns));
        debug!(word, key0 = %key.key0, key1 = %key.key1, key2 = %key.key2, "encoded");
        key
    }
}

impl Default for TaPhone {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn encoder_is_shareable() {
        assert_send_sync::<TaPhone>();
    }

    #[test]
    fn encode_returns_all_three_keys() {
        let phone = TaPhone::new();
        let key = phone.encode("எண்ணியல்");
        assert_eq!(
            key.into_tuple(),
            ("ENNYL".to_string(), "EN1N1YL".to_string(), "EN1N14YL".to_string())
        );
    }

    #[test]
    fn fallible_constructor_matches_shared() {
        let own = TaPhone::try_new().unwrap();
        let shared = TaPhone::default();
        assert_eq!(own.encode("பத்ரகாளி"), shared.encode("பத்ரகாளி"));
    }

    #[test]
    fn phrases_fuse_into_one_code() {
        let phone = TaPhone::new();
        assert_eq!(phone.encode("நிலம் காலம்").key2, "N4LMK3LM");
    }
}
