//! Term dictionary input shapes and normalisation.
//!
//! Three shapes are accepted at `create_corrector`, all normalised to the
//! same internal representation:
//!
//! - `["台北車站", "牛奶"]`: canonicals only
//! - `{"台北車站": ["北車"]}`: canonical -> aliases
//! - `{"EKG": {"aliases": [...], "keywords": [...], "exclude_when": [...],
//!   "weight": 0.3, "max_variants": 30}}`: the full form
//!
//! Validation happens here and only here: `correct()` never raises for
//! content reasons.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::PhoneticConfig;
use crate::error::{CorrectionError, Result};
use crate::utils;

/// Full-form dictionary entry. Unspecified fields default to empty lists,
/// weight 0.0 and the engine-wide variant budget.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TermEntry {
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub exclude_when: Vec<String>,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub max_variants: Option<usize>,
}

/// The three accepted input shapes. `BTreeMap` keeps canonical iteration
/// order stable so corrector builds are deterministic.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TermDict {
    List(Vec<String>),
    AliasMap(BTreeMap<String, Vec<String>>),
    Full(BTreeMap<String, TermEntry>),
}

impl TermDict {
    /// Parse a dictionary from JSON in any of the three shapes.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CorrectionError::InvalidInput(e.to_string()))
    }

    pub fn len(&self) -> usize {
        match self {
            TermDict::List(v) => v.len(),
            TermDict::AliasMap(m) => m.len(),
            TermDict::Full(m) => m.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Normalise into per-term configs: NFC fold, trim, alias dedup,
    /// canonical removed from its own aliases, bounds checked.
    pub fn normalize(self, config: &PhoneticConfig) -> Result<Vec<NormalizedTermConfig>> {
        let entries: Vec<(String, TermEntry)> = match self {
            TermDict::List(canonicals) => canonicals
                .into_iter()
                .map(|c| (c, TermEntry::default()))
                .collect(),
            TermDict::AliasMap(map) => map
                .into_iter()
                .map(|(c, aliases)| {
                    (
                        c,
                        TermEntry {
                            aliases,
                            ..TermEntry::default()
                        },
                    )
                })
                .collect(),
            TermDict::Full(map) => map.into_iter().collect(),
        };

        let mut out = Vec::with_capacity(entries.len());
        for (canonical, entry) in entries {
            out.push(NormalizedTermConfig::build(canonical, entry, config)?);
        }
        Ok(out)
    }
}

impl From<Vec<String>> for TermDict {
    fn from(canonicals: Vec<String>) -> Self {
        TermDict::List(canonicals)
    }
}

impl From<&[&str]> for TermDict {
    fn from(canonicals: &[&str]) -> Self {
        TermDict::List(canonicals.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for TermDict {
    fn from(canonicals: [&str; N]) -> Self {
        TermDict::List(canonicals.iter().map(|s| s.to_string()).collect())
    }
}

impl From<BTreeMap<String, Vec<String>>> for TermDict {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        TermDict::AliasMap(map)
    }
}

impl From<BTreeMap<String, TermEntry>> for TermDict {
    fn from(map: BTreeMap<String, TermEntry>) -> Self {
        TermDict::Full(map)
    }
}

/// A canonical entry after input normalisation. Immutable once the
/// corrector is built.
#[derive(Debug, Clone)]
pub struct NormalizedTermConfig {
    pub canonical: String,
    pub aliases: Vec<String>,
    pub keywords: Vec<String>,
    pub exclude_when: Vec<String>,
    pub weight: f64,
    pub max_variants: usize,
}

impl NormalizedTermConfig {
    fn build(canonical: String, entry: TermEntry, config: &PhoneticConfig) -> Result<Self> {
        let canonical = utils::normalize(&canonical);
        if canonical.is_empty() {
            return Err(CorrectionError::InvalidInput(
                "empty canonical term".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&entry.weight) {
            return Err(CorrectionError::InvalidInput(format!(
                "weight {} for '{canonical}' outside [0, 1]",
                entry.weight
            )));
        }
        let max_variants = entry.max_variants.unwrap_or(config.max_variants_default);
        if max_variants == 0 {
            return Err(CorrectionError::InvalidInput(format!(
                "max_variants for '{canonical}' must be >= 1"
            )));
        }

        let mut aliases = Vec::new();
        for alias in entry.aliases {
            let alias = utils::normalize(&alias);
            if alias.is_empty() {
                return Err(CorrectionError::InvalidInput(format!(
                    "empty alias for '{canonical}'"
                )));
            }
            if alias != canonical && !aliases.contains(&alias) {
                aliases.push(alias);
            }
        }

        let clean = |words: Vec<String>| -> Vec<String> {
            let mut out: Vec<String> = Vec::new();
            for w in words {
                let w = utils::normalize(&w);
                if !w.is_empty() && !out.contains(&w) {
                    out.push(w);
                }
            }
            out
        };

        Ok(Self {
            canonical,
            aliases,
            keywords: clean(entry.keywords),
            exclude_when: clean(entry.exclude_when),
            weight: entry.weight,
            max_variants,
        })
    }
}
