// File: src/core/patterns.rs
use crate::core::glyphs::{table, GlyphTable};
use crate::core::types::GlyphKind;
use crate::error::Result;
use regex::Regex;
use std::sync::{Arc, LazyLock};

/// Compiled matchers for one glyph category.
#[derive(Debug)]
pub struct GlyphMatcher {
    table: &'static GlyphTable,
    /// `(?P<glyph>..)(?P<modifier>..)`: a glyph immediately followed by a sign.
    modified: Regex,
    /// Any glyph of the category on its own.
    bare: Regex,
}

impl GlyphMatcher {
    fn compile(kind: GlyphKind, modifiers: &str) -> Result<Self> {
        let table = table(kind);
        let glyphs = alternation(table);
        let modified = Regex::new(&format!("(?P<glyph>{glyphs})(?P<modifier>{modifiers})"))?;
        let bare = Regex::new(&glyphs)?;
        Ok(Self { table, modified, bare })
    }

    pub fn table(&self) -> &'static GlyphTable {
        self.table
    }

    pub fn modified(&self) -> &Regex {
        &self.modified
    }

    pub fn bare(&self) -> &Regex {
        &self.bare
    }

    /// All non-overlapping "glyph + modifier" spans, leftmost first.
    pub fn find_modified<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.modified.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// The full set of matchers the rewrite passes run with.
#[derive(Debug)]
pub struct GlyphPatterns {
    pub compounds: GlyphMatcher,
    pub consonants: GlyphMatcher,
    pub vowels: GlyphMatcher,
    /// A run of one or more modifiers directly after a closed `}` group.
    pub attached_modifiers: Regex,
    pub modifiers: &'static GlyphTable,
}

impl GlyphPatterns {
    pub fn compile() -> Result<Self> {
        let modifiers = table(GlyphKind::Modifier);
        let modifier_alt = alternation(modifiers);
        Ok(Self {
            compounds: GlyphMatcher::compile(GlyphKind::Compound, &modifier_alt)?,
            consonants: GlyphMatcher::compile(GlyphKind::Consonant, &modifier_alt)?,
            vowels: GlyphMatcher::compile(GlyphKind::Vowel, &modifier_alt)?,
            attached_modifiers: Regex::new(&format!(r"\}}(?P<signs>(?:{modifier_alt})+)"))?,
            modifiers,
        })
    }

    /// The matchers shared by every encoder in the process.
    ///
    /// The glyph tables are fixed at compile time, so a failure here is a
    /// broken build rather than a runtime condition.
    pub fn shared() -> Arc<GlyphPatterns> {
        static SHARED: LazyLock<Arc<GlyphPatterns>> = LazyLock::new(|| {
            Arc::new(GlyphPatterns::compile().expect("glyph tables must compile into valid patterns"))
        });
        Arc::clone(&SHARED)
    }
}

fn alternation(table: &GlyphTable) -> String {
    let parts: Vec<String> = table.glyphs().into_iter().map(regex::escape).collect();
    format!("(?:{})", parts.join("|"))
}
