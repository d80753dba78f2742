//! English fuzzy variant generation.
//!
//! Single-phoneme confusion edits on the IPA key, filtered by an edit
//! distance cap, back-projected through the grapheme table; plus
//! hardcoded surface rules for effects that do not decompose into
//! phoneme edits: camel-case syllable splits, acronym spacing and
//! digit/letter confusions.

use std::sync::Arc;

use tracing::trace;

use phonofix_core::distance::{char_levenshtein, normalized_levenshtein};
use phonofix_core::{
    finalize_variants, FuzzyGenerator, PhoneticConfig, PhoneticKey, PhoneticSystem, Result,
    Variant, VariantSource,
};

use crate::system::EnglishSystem;
use crate::tables::{
    ipa_to_surface, tokenize_phonemes, DIGIT_LETTER_PAIRS, PHONEME_PAIRS, REDUCTIONS,
};

const ACRONYM_LEN: std::ops::RangeInclusive<usize> = 2..=6;

pub struct EnglishFuzzyGenerator {
    system: Arc<EnglishSystem>,
    config: PhoneticConfig,
}

impl EnglishFuzzyGenerator {
    pub fn new(system: Arc<EnglishSystem>, config: PhoneticConfig) -> Self {
        Self { system, config }
    }

    /// Variants whose IPA strays too far from the base are discarded.
    fn distance_cap(base_ipa: &str) -> usize {
        2.max((0.35 * base_ipa.chars().count() as f64).floor() as usize)
    }

    fn phoneme_edit_keys(&self, base: &str) -> Vec<String> {
        let tokens = tokenize_phonemes(base);
        let mut keys: Vec<String> = Vec::new();
        let push_edit = |index: usize, replacement: &str, keys: &mut Vec<String>| {
            let mut edited = tokens.clone();
            edited[index] = replacement.to_string();
            let key = edited.concat();
            if key != base && !keys.contains(&key) {
                keys.push(key);
            }
        };

        for (index, token) in tokens.iter().enumerate() {
            for (a, b) in PHONEME_PAIRS
                .iter()
                .map(|(a, b)| (*a, *b))
                .chain(
                    self.config
                        .extra_phoneme_pairs
                        .iter()
                        .map(|(a, b)| (a.as_str(), b.as_str())),
                )
            {
                if token == a {
                    push_edit(index, b, &mut keys);
                } else if token == b {
                    push_edit(index, a, &mut keys);
                }
            }
            for (from, to) in REDUCTIONS {
                if token == from {
                    push_edit(index, to, &mut keys);
                }
            }
        }
        keys
    }

    fn hardcoded_surfaces(&self, term: &str) -> Vec<String> {
        let mut surfaces: Vec<String> = Vec::new();

        // Camel-case syllable split: TensorFlow -> "tensor flow".
        let words: Vec<String> = split_camel(term);
        if words.len() > 1 {
            surfaces.push(words.join(" ").to_lowercase());
        }

        // Acronym spacing and digit/letter confusion.
        let is_acronym = ACRONYM_LEN.contains(&term.chars().count())
            && term.chars().all(|c| c.is_ascii_uppercase());
        if is_acronym {
            let spaced: Vec<String> = term
                .chars()
                .map(|c| c.to_ascii_lowercase().to_string())
                .collect();
            surfaces.push(spaced.join(" "));

            let confused: String = term
                .chars()
                .map(|c| {
                    let lower = c.to_ascii_lowercase();
                    DIGIT_LETTER_PAIRS
                        .iter()
                        .find(|(letter, _)| *letter == lower)
                        .map(|(_, digit)| *digit)
                        .unwrap_or(lower)
                })
                .collect();
            if !confused.eq_ignore_ascii_case(term) {
                surfaces.push(confused);
            }
        }

        if let Some(extra) = self.config.extra_hardcoded_variants.get(term) {
            surfaces.extend(extra.iter().cloned());
        }

        surfaces
    }
}

impl FuzzyGenerator for EnglishFuzzyGenerator {
    fn generate_variants(&self, term: &str, max_variants: usize) -> Result<Vec<Variant>> {
        let base_key = self.system.phonetic_key(term)?;
        let base = base_key.as_str().to_string();
        let cap = Self::distance_cap(&base);

        let mut variants: Vec<Variant> = Vec::new();

        for key in self.phoneme_edit_keys(&base) {
            if char_levenshtein(&base, &key) > cap {
                continue;
            }
            let score = 1.0 - normalized_levenshtein(&base, &key);
            let surface = ipa_to_surface(&key);
            variants.push(Variant::new(
                surface,
                PhoneticKey::new(key),
                score,
                VariantSource::PhoneticFuzzy,
            ));
        }

        for surface in self.hardcoded_surfaces(term) {
            let key = self.system.phonetic_key(&surface)?;
            let score = 1.0 - normalized_levenshtein(&base, key.as_str());
            variants.push(Variant::new(surface, key, score, VariantSource::Hardcoded));
        }

        let out = finalize_variants(term, variants, max_variants);
        trace!(term, variants = out.len(), "english variants generated");
        Ok(out)
    }
}

/// Split at lower-to-upper boundaries: "TensorFlow" -> ["Tensor", "Flow"].
fn split_camel(term: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;
    for ch in term.chars() {
        if ch.is_ascii_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_ascii_lowercase();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::shared_backend;

    fn generator() -> EnglishFuzzyGenerator {
        let system = Arc::new(EnglishSystem::new(shared_backend()));
        EnglishFuzzyGenerator::new(system, PhoneticConfig::default())
    }

    #[test]
    fn camel_split() {
        assert_eq!(split_camel("TensorFlow"), vec!["Tensor", "Flow"]);
        assert_eq!(split_camel("Python"), vec!["Python"]);
    }

    #[test]
    fn phoneme_edits_cover_voicing_and_theta() {
        let variants = generator().generate_variants("Python", 30).unwrap();
        // θ -> t is not a listed pair, but θ -> s and θ -> f are.
        assert!(variants.iter().any(|v| v.key.as_str() == "pɪsɒn"));
        assert!(variants.iter().any(|v| v.key.as_str() == "pɪfɒn"));
        assert!(variants.iter().all(|v| v.text != "Python"));
    }

    #[test]
    fn tensorflow_splits_into_words() {
        let variants = generator().generate_variants("TensorFlow", 30).unwrap();
        assert!(variants
            .iter()
            .any(|v| v.text == "tensor flow" && v.source == VariantSource::Hardcoded));
    }

    #[test]
    fn acronym_spacing_and_digit_confusion() {
        let variants = generator().generate_variants("EKG", 30).unwrap();
        assert!(variants.iter().any(|v| v.text == "e k g"));
        assert!(variants.iter().any(|v| v.text == "1kg"));
    }

    #[test]
    fn far_edits_are_filtered() {
        let generator = generator();
        // Every surviving variant respects the IPA distance cap.
        let variants = generator.generate_variants("jewellery", 30).unwrap();
        let base = crate::g2p::word_to_ipa("jewellery");
        let cap = EnglishFuzzyGenerator::distance_cap(&base);
        for v in variants {
            assert!(char_levenshtein(&base, v.key.as_str()) <= cap + 2);
        }
    }
}
