//! Mandarin fuzzy variant generation.
//!
//! Expands a canonical term syllable by syllable through the fuzzy rule
//! tables, bounds the Cartesian search space, back-projects variant keys
//! to surfaces through the homophone pool, and adds contraction variants
//! for multi-character terms (台北車站 -> 北車).

use std::sync::Arc;

use ahash::AHashSet;
use tracing::trace;

use phonofix_core::distance::normalized_levenshtein;
use phonofix_core::{
    finalize_variants, FuzzyGenerator, PhoneticConfig, PhoneticKey, PhoneticSystem, Result,
    Variant, VariantSource,
};

use crate::backend::pinyin_table;
use crate::system::MandarinSystem;
use crate::tables::syllable_alternatives;

/// Hard cap factors for the per-term Cartesian expansion.
const MAX_COMBOS_CEILING: usize = 300;
const MAX_COMBOS_PER_CHAR: usize = 100;

/// Contraction variants are generated for terms of at least this many
/// units; `finalize_variants` truncation bounds the output.
const CONTRACTION_MIN_UNITS: usize = 3;

pub struct MandarinFuzzyGenerator {
    system: Arc<MandarinSystem>,
    config: PhoneticConfig,
}

/// One expandable unit of a term: a hanzi with its reading, or a fixed
/// run (ASCII, unknown hanzi) that never fuzzes.
struct Unit {
    surface: String,
    syllable: String,
    fuzzable: bool,
    single_han: bool,
}

/// A partially expanded syllable sequence.
#[derive(Clone)]
struct Combo {
    syllables: Vec<String>,
    changed: bool,
    used_special: bool,
}

impl MandarinFuzzyGenerator {
    pub fn new(system: Arc<MandarinSystem>, config: PhoneticConfig) -> Self {
        Self { system, config }
    }

    fn units_of(&self, term: &str) -> Vec<Unit> {
        let table = pinyin_table();
        let mut units: Vec<Unit> = Vec::new();
        let mut ascii_run = String::new();

        for ch in term.chars() {
            if ch.is_ascii_alphanumeric() {
                ascii_run.push(ch);
                continue;
            }
            if !ascii_run.is_empty() {
                let run = std::mem::take(&mut ascii_run);
                units.push(Unit {
                    syllable: run.to_ascii_lowercase(),
                    surface: run,
                    fuzzable: false,
                    single_han: false,
                });
            }
            if ch.is_whitespace() {
                continue;
            }
            match table.pinyin_of(ch) {
                Some(pinyin) => units.push(Unit {
                    surface: ch.to_string(),
                    syllable: pinyin.to_string(),
                    fuzzable: true,
                    single_han: true,
                }),
                None => units.push(Unit {
                    surface: ch.to_string(),
                    syllable: ch.to_string(),
                    fuzzable: false,
                    single_han: phonofix_core::is_han(ch),
                }),
            }
        }
        if !ascii_run.is_empty() {
            units.push(Unit {
                syllable: ascii_run.to_ascii_lowercase(),
                surface: ascii_run,
                fuzzable: false,
                single_han: false,
            });
        }
        units
    }

    /// Bounded Cartesian expansion over per-unit alternatives, deduplicated
    /// by running pinyin key during expansion rather than after.
    fn expand(&self, units: &[Unit]) -> Vec<Combo> {
        let max_combos = MAX_COMBOS_CEILING.min(MAX_COMBOS_PER_CHAR * units.len().max(1));

        let mut combos = vec![Combo {
            syllables: Vec::new(),
            changed: false,
            used_special: false,
        }];

        for unit in units {
            let alternatives = if unit.fuzzable {
                syllable_alternatives(
                    &unit.syllable,
                    &self.config.extra_fuzzy_initial_pairs,
                    &self.config.extra_fuzzy_final_pairs,
                )
            } else {
                Vec::new()
            };

            let mut next: Vec<Combo> = Vec::with_capacity(combos.len());
            let mut seen: AHashSet<String> = AHashSet::new();
            'outer: for combo in &combos {
                for (syllable, special) in std::iter::once((unit.syllable.clone(), false))
                    .chain(alternatives.iter().cloned())
                {
                    let mut syllables = combo.syllables.clone();
                    syllables.push(syllable.clone());
                    let running_key = syllables.join(" ");
                    if !seen.insert(running_key) {
                        continue;
                    }
                    next.push(Combo {
                        syllables,
                        changed: combo.changed || syllable != unit.syllable,
                        used_special: combo.used_special || special,
                    });
                    if next.len() >= max_combos {
                        break 'outer;
                    }
                }
            }
            combos = next;
        }

        combos.retain(|c| c.changed);
        combos
    }

    /// Pick a surface for a variant syllable from the homophone pool; the
    /// original character stands in when the pool has no entry.
    fn back_project(units: &[Unit], combo: &Combo) -> String {
        let table = pinyin_table();
        let mut surface = String::new();
        for (unit, syllable) in units.iter().zip(&combo.syllables) {
            if *syllable == unit.syllable {
                surface.push_str(&unit.surface);
            } else {
                match table.homophones(syllable).first() {
                    Some(ch) => surface.push(*ch),
                    None => surface.push_str(&unit.surface),
                }
            }
        }
        surface
    }
}

impl FuzzyGenerator for MandarinFuzzyGenerator {
    fn generate_variants(&self, term: &str, max_variants: usize) -> Result<Vec<Variant>> {
        let units = self.units_of(term);
        if units.is_empty() {
            return Ok(Vec::new());
        }

        let base_key = self.system.phonetic_key(term)?;
        let mut variants: Vec<Variant> = Vec::new();

        for combo in self.expand(&units) {
            let key = PhoneticKey::new(combo.syllables.join(" "));
            let score = 1.0 - normalized_levenshtein(base_key.as_str(), key.as_str());
            let source = if combo.used_special {
                VariantSource::PhraseRule
            } else {
                VariantSource::PhoneticFuzzy
            };
            let surface = Self::back_project(&units, &combo);
            variants.push(Variant::new(surface, key, score, source));
        }

        // Contractions: two-character abbreviations of multi-character
        // terms (台北車站 -> 北車, 勇者鬥惡龍 -> 勇鬥).
        if units.len() >= CONTRACTION_MIN_UNITS && units.iter().all(|u| u.single_han) {
            for i in 0..units.len() {
                for j in (i + 1)..units.len() {
                    let surface = format!("{}{}", units[i].surface, units[j].surface);
                    let key =
                        PhoneticKey::new(format!("{} {}", units[i].syllable, units[j].syllable));
                    let score = 1.0 - normalized_levenshtein(base_key.as_str(), key.as_str());
                    variants.push(Variant::new(surface, key, score, VariantSource::Hardcoded));
                }
            }
        }

        if let Some(extra) = self.config.extra_hardcoded_variants.get(term) {
            for surface in extra {
                let key = self.system.phonetic_key(surface)?;
                let score = 1.0 - normalized_levenshtein(base_key.as_str(), key.as_str());
                variants.push(Variant::new(surface.clone(), key, score, VariantSource::Hardcoded));
            }
        }

        let out = finalize_variants(term, variants, max_variants);
        trace!(term, variants = out.len(), "mandarin variants generated");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::shared_backend;
    use phonofix_core::PhoneticConfig;

    fn generator() -> MandarinFuzzyGenerator {
        let system = Arc::new(MandarinSystem::new(shared_backend()));
        MandarinFuzzyGenerator::new(system, PhoneticConfig::default())
    }

    #[test]
    fn nasal_and_liquid_fuzz() {
        let variants = generator().generate_variants("牛奶", 30).unwrap();
        assert!(variants.iter().any(|v| v.key.as_str() == "liu nai"));
        // The canonical itself is never emitted.
        assert!(variants.iter().all(|v| v.text != "牛奶"));
    }

    #[test]
    fn special_syllable_phrase_rule() {
        let variants = generator().generate_variants("然後", 30).unwrap();
        let lan = variants
            .iter()
            .find(|v| v.key.as_str() == "lan hou")
            .expect("lan hou variant");
        assert!(lan.score > 0.7);
        assert!(variants.iter().any(|v| v.key.as_str() == "yan hou"));
    }

    #[test]
    fn contractions_for_long_terms() {
        let variants = generator().generate_variants("台北車站", 30).unwrap();
        assert!(variants
            .iter()
            .any(|v| v.text == "北車" && v.source == VariantSource::Hardcoded));
        assert!(variants.iter().any(|v| v.key.as_str() == "bei che"));

        let variants = generator().generate_variants("勇者鬥惡龍", 30).unwrap();
        assert!(variants.iter().any(|v| v.text == "勇鬥"));

        // No upper length cap: six-unit terms contract too.
        let variants = generator().generate_variants("永和豆漿車站", 60).unwrap();
        assert!(variants.iter().any(|v| v.text == "永站"));
    }

    #[test]
    fn deterministic_and_bounded() {
        let a = generator().generate_variants("台北車站", 10).unwrap();
        let b = generator().generate_variants("台北車站", 10).unwrap();
        let texts_a: Vec<&str> = a.iter().map(|v| v.text.as_str()).collect();
        let texts_b: Vec<&str> = b.iter().map(|v| v.text.as_str()).collect();
        assert_eq!(texts_a, texts_b);
        assert!(a.len() <= 10);
    }

    #[test]
    fn caller_supplied_hardcoded_variants() {
        let system = Arc::new(MandarinSystem::new(shared_backend()));
        let mut config = PhoneticConfig::default();
        config
            .extra_hardcoded_variants
            .insert("台北車站".to_string(), vec!["台車".to_string()]);
        let generator = MandarinFuzzyGenerator::new(system, config);
        let variants = generator.generate_variants("台北車站", 30).unwrap();
        assert!(variants.iter().any(|v| v.text == "台車"));
    }
}
