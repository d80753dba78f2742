//! Japanese fuzzy variant generation.
//!
//! Kana-level rules cover dakuten/handakuten toggles and the ジ/ヂ, ズ/ヅ,
//! を/お mergers; enumeration is capped per expansion step. Long-vowel and
//! geminate homophones collapse because every variant key passes through
//! the same romaji normalisation as the base key. Terms containing kanji
//! additionally draw a small set of same-reading kanji substitutions from
//! the bundled table, and non-Latin canonicals emit their romanised form
//! as a surface variant.

use std::sync::Arc;

use ahash::AHashSet;
use tracing::trace;

use phonofix_core::distance::normalized_levenshtein;
use phonofix_core::{
    finalize_variants, is_han, FuzzyGenerator, PhoneticConfig, PhoneticSystem, Result, Variant,
    VariantSource,
};

use crate::backend::{kanji_homophones, kanji_reading};
use crate::kana::{hiragana_to_katakana, katakana_to_hiragana};
use crate::system::JapaneseSystem;

/// Expansion stops growing once a step reaches this many sequences.
const EXPANSION_CAP: usize = 50;

/// At most this many same-reading kanji substitutions per character.
const HOMOPHONES_PER_KANJI: usize = 5;

/// Mutually confusable kana (dakuten/handakuten families and mergers),
/// in hiragana.
const KANA_GROUPS: &[&[char]] = &[
    &['か', 'が'],
    &['き', 'ぎ'],
    &['く', 'ぐ'],
    &['け', 'げ'],
    &['こ', 'ご'],
    &['さ', 'ざ'],
    &['し', 'じ'],
    &['す', 'ず'],
    &['せ', 'ぜ'],
    &['そ', 'ぞ'],
    &['た', 'だ'],
    &['ち', 'ぢ'],
    &['つ', 'づ'],
    &['て', 'で'],
    &['と', 'ど'],
    &['は', 'ば', 'ぱ'],
    &['ひ', 'び', 'ぴ'],
    &['ふ', 'ぶ', 'ぷ'],
    &['へ', 'べ', 'ぺ'],
    &['ほ', 'ぼ', 'ぽ'],
    &['じ', 'ぢ'],
    &['ず', 'づ'],
    &['お', 'を'],
];

pub struct JapaneseFuzzyGenerator {
    system: Arc<JapaneseSystem>,
    config: PhoneticConfig,
}

impl JapaneseFuzzyGenerator {
    pub fn new(system: Arc<JapaneseSystem>, config: PhoneticConfig) -> Self {
        Self { system, config }
    }

    /// Alternatives for one character, rendered back into its original
    /// script (katakana stays katakana).
    fn kana_alternatives(ch: char) -> Vec<char> {
        let hira = katakana_to_hiragana(ch);
        let was_katakana = hira != ch;
        let mut out: Vec<char> = Vec::new();
        for group in KANA_GROUPS {
            if group.contains(&hira) {
                for alt in *group {
                    if *alt != hira {
                        let rendered = if was_katakana {
                            hiragana_to_katakana(*alt)
                        } else {
                            *alt
                        };
                        if !out.contains(&rendered) {
                            out.push(rendered);
                        }
                    }
                }
            }
        }
        out
    }

    /// Capped per-character enumeration of kana substitutions.
    fn expand_kana(term: &[char]) -> Vec<String> {
        let mut sequences: Vec<Vec<char>> = vec![Vec::new()];
        for &ch in term {
            let alternatives = Self::kana_alternatives(ch);
            let mut next: Vec<Vec<char>> = Vec::with_capacity(sequences.len());
            let mut seen: AHashSet<String> = AHashSet::new();
            'step: for seq in &sequences {
                for alt in std::iter::once(ch).chain(alternatives.iter().copied()) {
                    let mut grown = seq.clone();
                    grown.push(alt);
                    if !seen.insert(grown.iter().collect::<String>()) {
                        continue;
                    }
                    next.push(grown);
                    if next.len() >= EXPANSION_CAP {
                        break 'step;
                    }
                }
            }
            sequences = next;
        }
        let original: String = term.iter().collect();
        sequences
            .into_iter()
            .map(|seq| seq.into_iter().collect::<String>())
            .filter(|s| *s != original)
            .collect()
    }

    /// Same-reading kanji substitutions for terms containing ideographs.
    fn kanji_homophone_surfaces(term: &str) -> Vec<String> {
        let chars: Vec<char> = term.chars().collect();
        let mut out: Vec<String> = Vec::new();
        for (i, &ch) in chars.iter().enumerate() {
            if !is_han(ch) {
                continue;
            }
            let Some(reading) = kanji_reading(ch) else {
                continue;
            };
            for alt in kanji_homophones(reading)
                .iter()
                .filter(|&&alt| alt != ch)
                .take(HOMOPHONES_PER_KANJI)
            {
                let mut surface = chars.clone();
                surface[i] = *alt;
                out.push(surface.into_iter().collect());
            }
        }
        out
    }
}

impl FuzzyGenerator for JapaneseFuzzyGenerator {
    fn generate_variants(&self, term: &str, max_variants: usize) -> Result<Vec<Variant>> {
        let base_key = self.system.phonetic_key(term)?;
        let chars: Vec<char> = term.chars().collect();
        let mut variants: Vec<Variant> = Vec::new();

        for surface in Self::expand_kana(&chars) {
            let key = self.system.phonetic_key(&surface)?;
            let score = 1.0 - normalized_levenshtein(base_key.as_str(), key.as_str());
            variants.push(Variant::new(surface, key, score, VariantSource::PhoneticFuzzy));
        }

        if chars.iter().any(|&c| is_han(c)) {
            for surface in Self::kanji_homophone_surfaces(term) {
                let key = self.system.phonetic_key(&surface)?;
                let score = 1.0 - normalized_levenshtein(base_key.as_str(), key.as_str());
                variants.push(Variant::new(surface, key, score, VariantSource::Hardcoded));
            }
        }

        // The romanised form of a non-Latin canonical is itself a
        // plausible ASR spelling.
        if !term.is_ascii() && !base_key.is_empty() {
            variants.push(Variant::new(
                base_key.as_str().to_string(),
                base_key.clone(),
                1.0,
                VariantSource::Romanisation,
            ));
        }

        if let Some(extra) = self.config.extra_hardcoded_variants.get(term) {
            for surface in extra {
                let key = self.system.phonetic_key(surface)?;
                let score = 1.0 - normalized_levenshtein(base_key.as_str(), key.as_str());
                variants.push(Variant::new(surface.clone(), key, score, VariantSource::Hardcoded));
            }
        }

        let out = finalize_variants(term, variants, max_variants);
        trace!(term, variants = out.len(), "japanese variants generated");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::shared_backend;

    fn generator() -> JapaneseFuzzyGenerator {
        let system = Arc::new(JapaneseSystem::new(shared_backend()));
        JapaneseFuzzyGenerator::new(system, PhoneticConfig::default())
    }

    #[test]
    fn dakuten_alternatives_keep_script() {
        let alts = JapaneseFuzzyGenerator::kana_alternatives('カ');
        assert_eq!(alts, vec!['ガ']);
        let alts = JapaneseFuzzyGenerator::kana_alternatives('は');
        assert_eq!(alts, vec!['ば', 'ぱ']);
    }

    #[test]
    fn expansion_is_capped() {
        let chars: Vec<char> = "はひふへほはひふへほ".chars().collect();
        let expanded = JapaneseFuzzyGenerator::expand_kana(&chars);
        assert!(expanded.len() <= EXPANSION_CAP);
    }

    #[test]
    fn katakana_term_emits_romanisation_variant() {
        let variants = generator().generate_variants("アスピリン", 30).unwrap();
        assert!(variants
            .iter()
            .any(|v| v.text == "asupirin" && v.source == VariantSource::Romanisation));
    }

    #[test]
    fn kanji_terms_draw_homophones() {
        let surfaces = JapaneseFuzzyGenerator::kanji_homophone_surfaces("学校");
        // 校 shares its reading with 工, 口, 公 among others.
        assert!(surfaces.iter().any(|s| s == "学工"));
        assert!(surfaces.len() <= HOMOPHONES_PER_KANJI * 2);
        let variants = generator().generate_variants("学校", 30).unwrap();
        assert!(!variants.is_empty());
    }

    #[test]
    fn ascii_terms_skip_the_kanji_branch() {
        let variants = generator().generate_variants("asupirin", 30).unwrap();
        assert!(variants
            .iter()
            .all(|v| v.source != VariantSource::Hardcoded || !v.text.chars().any(is_han)));
    }
}
