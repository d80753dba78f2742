//! Runtime configuration shared by all language engines.
//!
//! Rule tables themselves live in the language crates as immutable data;
//! this config carries the knobs callers may override (variant budgets,
//! context windows, tolerance steps, extra fuzzy pairs) plus TOML
//! round-trip helpers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CorrectionError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhoneticConfig {
    /// Variant budget per canonical when the dictionary entry does not set
    /// its own `max_variants`.
    pub max_variants_default: usize,
    /// Backend LRU cache capacity (entries).
    pub cache_capacity: usize,
    /// Keyword proximity window, in characters of the context string.
    pub keyword_window: usize,
    /// Exclusion proximity window, in characters of the context string.
    pub exclusion_window: usize,
    /// Weight of the distance-weighted keyword bonus.
    pub context_bonus_weight: f64,
    /// Falloff of the bonus across the keyword window.
    pub context_distance_falloff: f64,
    /// Build-time cap on the protected-term set.
    pub max_protected_terms: usize,
    /// Build-time cap on the total search-target set.
    pub max_search_targets: usize,
    /// Call-time cap on input length, in characters. Longer inputs pass
    /// through unchanged with a `degraded` event.
    pub max_input_chars: usize,
    /// Override of the per-window-length tolerance table. Each entry is
    /// `(min_window_len, tolerance)`; the entry with the largest
    /// `min_window_len <= len` wins.
    #[serde(default)]
    pub tolerance_override: Vec<(usize, f64)>,
    /// Extra fuzzy initial pairs merged into the Mandarin rule table.
    #[serde(default)]
    pub extra_fuzzy_initial_pairs: Vec<(String, String)>,
    /// Extra fuzzy final pairs merged into the Mandarin rule table.
    #[serde(default)]
    pub extra_fuzzy_final_pairs: Vec<(String, String)>,
    /// Extra phoneme confusion pairs merged into the English rule table.
    #[serde(default)]
    pub extra_phoneme_pairs: Vec<(String, String)>,
    /// Extra hardcoded surface variants, canonical -> variant surfaces.
    #[serde(default)]
    pub extra_hardcoded_variants: BTreeMap<String, Vec<String>>,
}

impl Default for PhoneticConfig {
    fn default() -> Self {
        Self {
            max_variants_default: 30,
            cache_capacity: 10_000,
            keyword_window: 10,
            exclusion_window: 10,
            context_bonus_weight: 0.8,
            context_distance_falloff: 0.6,
            max_protected_terms: 10_000,
            max_search_targets: 200_000,
            max_input_chars: 100_000,
            tolerance_override: Vec::new(),
            extra_fuzzy_initial_pairs: Vec::new(),
            extra_fuzzy_final_pairs: Vec::new(),
            extra_phoneme_pairs: Vec::new(),
            extra_hardcoded_variants: BTreeMap::new(),
        }
    }
}

impl PhoneticConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| CorrectionError::Config(format!("read {}: {e}", path.as_ref().display())))?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(&path, content)
            .map_err(|e| CorrectionError::Config(format!("write {}: {e}", path.as_ref().display())))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CorrectionError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CorrectionError::Config(e.to_string()))
    }

    /// Distance-weighted keyword bonus. Zero outside the keyword window.
    pub fn context_bonus(&self, distance: usize) -> f64 {
        let w = self.keyword_window;
        if w == 0 || distance > w {
            return 0.0;
        }
        self.context_bonus_weight
            * (1.0 - (distance as f64 / w as f64) * self.context_distance_falloff)
    }

    /// Caller tolerance override for a window length, if any.
    pub fn tolerance_for(&self, window_len: usize) -> Option<f64> {
        self.tolerance_override
            .iter()
            .filter(|(min_len, _)| *min_len <= window_len)
            .max_by_key(|(min_len, _)| *min_len)
            .map(|(_, tol)| *tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = PhoneticConfig::default();
        assert_eq!(cfg.max_variants_default, 30);
        assert_eq!(cfg.cache_capacity, 10_000);
        assert_eq!(cfg.keyword_window, 10);
    }

    #[test]
    fn bonus_shape() {
        let cfg = PhoneticConfig::default();
        // Adjacent keyword: full bonus.
        assert!((cfg.context_bonus(0) - 0.8).abs() < 1e-9);
        // Edge of the window: weight * (1 - falloff).
        assert!((cfg.context_bonus(10) - 0.8 * 0.4).abs() < 1e-9);
        // Outside the window: no bonus.
        assert_eq!(cfg.context_bonus(11), 0.0);
    }

    #[test]
    fn toml_round_trip() {
        let mut cfg = PhoneticConfig::default();
        cfg.keyword_window = 16;
        cfg.extra_fuzzy_initial_pairs.push(("l".into(), "n".into()));
        let text = cfg.to_toml_string().unwrap();
        let back = PhoneticConfig::from_toml_str(&text).unwrap();
        assert_eq!(back.keyword_window, 16);
        assert_eq!(back.extra_fuzzy_initial_pairs.len(), 1);
    }

    #[test]
    fn tolerance_override_steps() {
        let mut cfg = PhoneticConfig::default();
        cfg.tolerance_override = vec![(2, 0.1), (4, 0.5)];
        assert_eq!(cfg.tolerance_for(1), None);
        assert_eq!(cfg.tolerance_for(2), Some(0.1));
        assert_eq!(cfg.tolerance_for(3), Some(0.1));
        assert_eq!(cfg.tolerance_for(6), Some(0.5));
    }
}
