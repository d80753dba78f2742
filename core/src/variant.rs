//! Fuzzy variants and search targets.

use crate::key::PhoneticKey;

/// Where a variant came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantSource {
    /// Single-unit phonetic edits (fuzzy initials/finals, phoneme pairs,
    /// kana rules).
    PhoneticFuzzy,
    /// Per-language surface rules: contractions, acronym spacing,
    /// digit/letter confusions, kanji homophones.
    Hardcoded,
    /// Whole-phrase substitutions from the special-syllable map.
    PhraseRule,
    /// The romanised form of a non-Latin canonical.
    Romanisation,
}

/// A phonetically related surface string for a canonical term, generated
/// once per corrector build.
#[derive(Debug, Clone)]
pub struct Variant {
    pub text: String,
    pub key: PhoneticKey,
    /// `1 - normalised_levenshtein(base_key, variant_key)`, possibly
    /// adjusted by rule class. Higher is closer.
    pub score: f64,
    pub source: VariantSource,
}

impl Variant {
    pub fn new(text: impl Into<String>, key: PhoneticKey, score: f64, source: VariantSource) -> Self {
        Self {
            text: text.into(),
            key,
            score: score.clamp(0.0, 1.0),
            source,
        }
    }
}

/// One entry of the corrector's search set: the union of
/// `{canonical} ∪ aliases ∪ variants`, deduplicated by phonetic key per
/// canonical.
#[derive(Debug, Clone)]
pub struct SearchTarget {
    pub surface: String,
    pub key: PhoneticKey,
    pub canonical: String,
    /// Index into the corrector's `NormalizedTermConfig` table.
    pub term_index: usize,
    /// 1.0 for the canonical and aliases; the variant score otherwise.
    /// Used for ambiguity tie-breaking (closer match wins).
    pub variant_score: f64,
}
