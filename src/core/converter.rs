// File: src/core/converter.rs
use crate::core::patterns::{GlyphMatcher, GlyphPatterns};
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::trace;

static NON_TAMIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\P{Tamil}").unwrap());
static NON_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9A-Z]").unwrap());

const OPEN: char = '{';
const CLOSE: char = '}';

/// Rewrites a Tamil word into its fully detailed Roman code (key2).
///
/// Every replacement is wrapped in `{..}` so that no later pass can match
/// text an earlier pass produced. The groups are dropped at the very end.
pub fn rewrite(word: &str, patterns: &GlyphPatterns) -> String {
    let text = filter_script(word);
    trace!(pass = "script", %text);

    let text = replace_modified(&text, &patterns.compounds);
    let text = replace_bare(&text, &patterns.compounds);
    trace!(pass = "compounds", %text);

    let text = replace_modified(&text, &patterns.consonants);
    let text = replace_modified(&text, &patterns.vowels);
    trace!(pass = "modified", %text);

    let text = replace_bare(&text, &patterns.consonants);
    let text = replace_bare(&text, &patterns.vowels);
    trace!(pass = "bare", %text);

    let text = replace_modifiers(&text, patterns);
    trace!(pass = "modifiers", %text);

    strip_groups(&text)
}

/// Keeps only code points from the Tamil script.
pub fn filter_script(word: &str) -> String {
    NON_TAMIL.replace_all(word, "").into_owned()
}

fn group(code: &str) -> String {
    let mut out = String::with_capacity(code.len() + 2);
    out.push(OPEN);
    out.push_str(code);
    out.push(CLOSE);
    out
}

/// Replaces the glyph of every "glyph + modifier" span with its grouped code.
/// The modifier stays behind for [`replace_modifiers`].
fn replace_modified(text: &str, matcher: &GlyphMatcher) -> String {
    matcher
        .modified()
        .replace_all(text, |caps: &Captures| {
            let glyph = &caps["glyph"];
            // The regex is built from this table's keys, so the lookup always
            // hits; a miss would leave the glyph as it was.
            let code = matcher.table().code(glyph).map_or_else(|| glyph.to_string(), group);
            format!("{}{}", code, &caps["modifier"])
        })
        .into_owned()
}

/// Replaces every remaining glyph of the category with its grouped code.
fn replace_bare(text: &str, matcher: &GlyphMatcher) -> String {
    matcher
        .bare()
        .replace_all(text, |caps: &Captures| {
            let glyph = &caps[0];
            // Always hits, as in `replace_modified`.
            matcher.table().code(glyph).map_or_else(|| glyph.to_string(), group)
        })
        .into_owned()
}

/// Turns each run of signs that follows a converted group into digits (or
/// `H` for the aytham). Signs with nothing converted before them are left
/// alone and vanish in [`strip_groups`].
fn replace_modifiers(text: &str, patterns: &GlyphPatterns) -> String {
    patterns
        .attached_modifiers
        .replace_all(text, |caps: &Captures| {
            let mut out = String::from(CLOSE);
            for sign in caps["signs"].chars() {
                let mut buf = [0u8; 4];
                if let Some(code) = patterns.modifiers.code(sign.encode_utf8(&mut buf)) {
                    out.push_str(code);
                }
            }
            out
        })
        .into_owned()
}

/// Drops everything that is not an uppercase letter or a digit.
pub fn strip_groups(text: &str) -> String {
    NON_CODE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rw(word: &str) -> String {
        rewrite(word, &GlyphPatterns::shared())
    }

    #[test]
    fn source_fixture_words() {
        assert_eq!(rw("நிலம்"), "N4LM");
        assert_eq!(rw("சப்தம்"), "CPTM");
        assert_eq!(rw("பச்சை"), "PCH7");
        assert_eq!(rw("கலம்"), "KLM");
        assert_eq!(rw("காலம்"), "K3LM");
        assert_eq!(rw("மச்சம்"), "MCHM");
        assert_eq!(rw("பச்சரிசி"), "PCHR4C4");
        assert_eq!(rw("பத்ரகாளி"), "PTRK3L14");
        assert_eq!(rw("கற்க"), "KR1K");
        assert_eq!(rw("எண்ணியல்"), "EN1N14YL");
    }

    #[test]
    fn script_filter_drops_everything_else() {
        assert_eq!(filter_script("a{நி}1 லம்!"), "நிலம்");
        assert_eq!(filter_script("hello"), "");
    }

    #[test]
    fn compound_wins_over_consonants() {
        // க்க as a compound is K2; split up it would be K then K.
        assert_eq!(rw("அக்கா"), "AK23");
        assert_eq!(rw("அக்க"), "AK2");
    }

    #[test]
    fn aytham_attaches_to_vowel() {
        assert_eq!(rw("அஃது"), "AHT5");
    }

    #[test]
    fn stray_sign_is_dropped() {
        assert_eq!(rw("ாக"), "K");
        assert_eq!(rw("்"), "");
        assert_eq!(rw("ஃ"), "");
    }

    #[test]
    fn word_initial_aytham_is_dropped() {
        // ஃப spells "f"; with no converted glyph before it the aytham has no
        // code to attach to.
        assert_eq!(rw("ஃப"), "P");
        assert_eq!(rw("ஃபார்ம்"), "P3RM");
    }

    #[test]
    fn decomposed_vowel_sign_keeps_both_digits() {
        // ொ written as ெ + ா.
        assert_eq!(rw("க\u{0BC6}\u{0BBE}"), "K63");
        assert_eq!(rw("கொ"), "K8");
    }

    #[test]
    fn non_tamil_input_is_empty() {
        assert_eq!(rw(""), "");
        assert_eq!(rw("abc 123 {}"), "");
    }

    #[test]
    fn tamil_digits_are_dropped() {
        assert_eq!(rw("க௧"), "K");
    }

    #[test]
    fn strip_groups_collapses_codes() {
        assert_eq!(strip_groups("{K}3{L1}4"), "K3L14");
    }
}
