//! Fuzzy variant generation: the language-agnostic half.
//!
//! Each language crate implements `FuzzyGenerator` by running its rule
//! tables, then hands the raw set to `finalize_variants` for the shared
//! tail of the pipeline: dedup by key, self-drop, deterministic ordering,
//! truncation.

use ahash::AHashMap;

use crate::error::Result;
use crate::key::PhoneticKey;
use crate::variant::Variant;

pub trait FuzzyGenerator: Send + Sync {
    /// Expand a canonical term into phonetically plausible spellings.
    /// The canonical itself is never part of the output; the Engine adds
    /// it to the search set.
    fn generate_variants(&self, term: &str, max_variants: usize) -> Result<Vec<Variant>>;
}

/// Shared tail of variant generation:
///
/// 1. deduplicate by phonetic key, keeping the highest-scoring surface;
/// 2. drop any variant whose surface equals the term (case-folded);
/// 3. sort stably by `(-score, len(text), text)`;
/// 4. truncate to `max_variants`.
///
/// The sort key guarantees identical output across runs and across
/// concurrent generations, so truncation is deterministic.
pub fn finalize_variants(term: &str, variants: Vec<Variant>, max_variants: usize) -> Vec<Variant> {
    let folded_term = casefold(term);

    let mut best_by_key: AHashMap<PhoneticKey, Variant> = AHashMap::new();
    for variant in variants {
        if casefold(&variant.text) == folded_term {
            continue;
        }
        match best_by_key.get(&variant.key) {
            Some(existing) if better_surface(existing, &variant) => {}
            _ => {
                best_by_key.insert(variant.key.clone(), variant);
            }
        }
    }

    let mut out: Vec<Variant> = best_by_key.into_values().collect();
    out.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.text.chars().count().cmp(&b.text.chars().count()))
            .then_with(|| a.text.cmp(&b.text))
    });
    out.truncate(max_variants);
    out
}

fn better_surface(existing: &Variant, challenger: &Variant) -> bool {
    if existing.score != challenger.score {
        return existing.score > challenger.score;
    }
    // Equal score: keep the lexicographically smaller surface so the
    // winner does not depend on map iteration order.
    existing.text <= challenger.text
}

fn casefold(s: &str) -> String {
    s.chars().flat_map(|c| c.to_lowercase()).collect()
}
