// File: src/core/glyphs.rs
use crate::core::types::GlyphKind;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Independent vowels. Length and diphthong differences collapse here; the
/// modifiers carry them when a vowel sign follows a consonant.
pub const VOWELS: &[(&str, &str)] = &[
    ("அ", "A"), ("ஆ", "A"),
    ("இ", "I"), ("ஈ", "I"),
    ("உ", "U"), ("ஊ", "U"),
    ("எ", "E"), ("ஏ", "E"),
    ("ஐ", "AI"),
    ("ஒ", "O"), ("ஓ", "O"), ("ஔ", "O"),
];

/// Base consonants. A trailing `1` (or `2` on ன) separates a consonant from
/// another one that already romanizes to the same letters.
pub const CONSONANTS: &[(&str, &str)] = &[
    ("க", "K"), ("ங", "NG"),
    ("ச", "C"), ("ஞ", "NJ"),
    // Retroflex and dental plosives share "T".
    ("ட", "T"), ("ண", "N1"),
    ("த", "T"), ("ந", "N"),
    ("ப", "P"), ("ம", "M"),
    ("ய", "Y"), ("ர", "R"), ("ல", "L"), ("வ", "V"),
    ("ழ", "Z"), ("ள", "L1"),
    ("ற", "R1"), ("ன", "N2"),
    // Grantha.
    ("ஶ", "S"), ("ஜ", "J"), ("ஷ", "SH"), ("ஸ", "S"), ("ஹ", "H"),
];

/// Geminated and nasal+stop clusters. Each is also a valid run of consonant
/// units, so these must be replaced before the consonant passes.
pub const COMPOUNDS: &[(&str, &str)] = &[
    ("க்க", "K2"), ("ங்க", "NGK"), ("ச்ச", "CH"),
    ("ஞ்ச", "NJC"), ("ட்ட", "T2"), ("ண்ட", "N1T"),
    ("த்த", "T2"), ("ந்த", "NT"), ("ப்ப", "P2"),
    ("ம்ப", "MB"), ("ய்ய", "YY"), ("ல்ல", "L2"),
    ("வ்வ", "VV"), ("ழ்ழ", "Z2"), ("ள்ள", "L12"),
    ("ற்ற", "R2"), ("ன்ன", "N22"),
];

/// Dependent signs. The virama only suppresses the inherent vowel, so it
/// contributes nothing.
pub const MODIFIERS: &[(&str, &str)] = &[
    ("ா", "3"), ("ி", "4"), ("ீ", "4"), ("ு", "5"), ("ூ", "5"),
    ("ெ", "6"), ("ே", "6"), ("ை", "7"), ("ொ", "8"), ("ோ", "8"), ("ௌ", "9"),
    ("்", ""), ("ஃ", "H"),
];

/// An exact-match lookup over one category of glyphs.
#[derive(Debug)]
pub struct GlyphTable {
    kind: GlyphKind,
    codes: HashMap<&'static str, &'static str>,
}

impl GlyphTable {
    fn new(kind: GlyphKind, entries: &'static [(&'static str, &'static str)]) -> Self {
        Self {
            kind,
            codes: entries.iter().copied().collect(),
        }
    }

    pub fn kind(&self) -> GlyphKind {
        self.kind
    }

    /// Returns the Roman code for a glyph, or `None` if it is not in this
    /// category.
    pub fn code(&self, glyph: &str) -> Option<&'static str> {
        self.codes.get(glyph).copied()
    }

    /// Glyphs ordered longest first, then lexically, so an alternation built
    /// from them prefers the longest unit and is stable across runs.
    pub fn glyphs(&self) -> Vec<&'static str> {
        let mut glyphs: Vec<&'static str> = self.codes.keys().copied().collect();
        glyphs.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        glyphs
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

static VOWEL_TABLE: LazyLock<GlyphTable> =
    LazyLock::new(|| GlyphTable::new(GlyphKind::Vowel, VOWELS));
static CONSONANT_TABLE: LazyLock<GlyphTable> =
    LazyLock::new(|| GlyphTable::new(GlyphKind::Consonant, CONSONANTS));
static COMPOUND_TABLE: LazyLock<GlyphTable> =
    LazyLock::new(|| GlyphTable::new(GlyphKind::Compound, COMPOUNDS));
static MODIFIER_TABLE: LazyLock<GlyphTable> =
    LazyLock::new(|| GlyphTable::new(GlyphKind::Modifier, MODIFIERS));

/// The process-wide table for a glyph category.
pub fn table(kind: GlyphKind) -> &'static GlyphTable {
    match kind {
        GlyphKind::Vowel => &*VOWEL_TABLE,
        GlyphKind::Consonant => &*CONSONANT_TABLE,
        GlyphKind::Compound => &*COMPOUND_TABLE,
        GlyphKind::Modifier => &*MODIFIER_TABLE,
    }
}
