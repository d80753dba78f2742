//! The per-language engine: builds lightweight correctors from term
//! dictionaries.
//!
//! Engines are long-lived and cheap to share; the expensive part (backend
//! initialisation) is amortised across every corrector the engine builds.
//! Once the backend is warm, a corrector build is dominated by variant
//! generation for the dictionary at hand.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::config::PhoneticConfig;
use crate::corrector::{Corrector, Mode};
use crate::error::{CorrectionError, Result};
use crate::generator::FuzzyGenerator;
use crate::key::PhoneticKey;
use crate::system::PhoneticSystem;
use crate::term::{NormalizedTermConfig, TermDict};
use crate::tokenizer::Tokenizer;
use crate::utils;
use crate::variant::SearchTarget;

/// What to do when the backend (or variant generation) fails at build
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailPolicy {
    /// Propagate the error out of `create_corrector`.
    #[default]
    Raise,
    /// Return a pass-through corrector that emits `degraded` events.
    Degrade,
}

#[derive(Debug, Clone, Default)]
pub struct CorrectorOptions {
    pub protected_terms: Vec<String>,
    pub fail_policy: FailPolicy,
    pub mode: Mode,
}

pub struct Engine {
    system: Arc<dyn PhoneticSystem>,
    tokenizer: Arc<dyn Tokenizer>,
    generator: Arc<dyn FuzzyGenerator>,
    config: Arc<PhoneticConfig>,
}

impl Engine {
    pub fn new(
        system: Arc<dyn PhoneticSystem>,
        tokenizer: Arc<dyn Tokenizer>,
        generator: Arc<dyn FuzzyGenerator>,
        config: PhoneticConfig,
    ) -> Self {
        Self {
            system,
            tokenizer,
            generator,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &PhoneticConfig {
        &self.config
    }

    pub fn system(&self) -> &Arc<dyn PhoneticSystem> {
        &self.system
    }

    /// Force backend initialisation now instead of at the first corrector
    /// build.
    pub fn warm_up(&self) -> Result<()> {
        self.system.backend().warm_up()
    }

    /// Build a corrector with default options.
    pub fn create_corrector(&self, dict: impl Into<TermDict>) -> Result<Corrector> {
        self.create_corrector_with(dict, CorrectorOptions::default())
    }

    /// Build a corrector. Auto-fuzzy is mandatory for every input shape:
    /// the generator expands every canonical, the results merge with
    /// user-supplied aliases, and the canonical itself always joins the
    /// search set.
    pub fn create_corrector_with(
        &self,
        dict: impl Into<TermDict>,
        options: CorrectorOptions,
    ) -> Result<Corrector> {
        let started = Instant::now();

        // Dictionary validation always raises; degrade mode only covers
        // backend and generation failures.
        let terms = dict.into().normalize(&self.config)?;

        let protected_terms: Vec<String> = options
            .protected_terms
            .iter()
            .map(|p| utils::normalize(p))
            .filter(|p| !p.is_empty())
            .collect();
        if protected_terms.len() > self.config.max_protected_terms {
            return Err(CorrectionError::ResourceLimit {
                what: "protected terms",
                actual: protected_terms.len(),
                limit: self.config.max_protected_terms,
            });
        }

        let targets = match self.build_targets(&terms) {
            Ok(targets) => targets,
            Err(err) => {
                return match options.fail_policy {
                    FailPolicy::Raise => Err(err),
                    FailPolicy::Degrade => {
                        warn!(
                            language = %self.system.language(),
                            error = %err,
                            "corrector degraded to pass-through"
                        );
                        Ok(Corrector::pass_through(
                            Arc::clone(&self.system),
                            Arc::clone(&self.tokenizer),
                            Arc::clone(&self.config),
                            options.mode,
                            err.to_string(),
                        ))
                    }
                };
            }
        };

        let corrector = Corrector::build(
            Arc::clone(&self.system),
            Arc::clone(&self.tokenizer),
            Arc::clone(&self.config),
            options.mode,
            terms,
            targets,
            protected_terms,
        )?;

        debug!(
            language = %self.system.language(),
            terms = corrector.term_count(),
            targets = corrector.target_count(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "corrector built"
        );
        Ok(corrector)
    }

    /// The search set for one dictionary:
    /// `{canonical} ∪ aliases ∪ generated variants`, deduplicated by
    /// phonetic key per canonical.
    fn build_targets(&self, terms: &[NormalizedTermConfig]) -> Result<Vec<SearchTarget>> {
        self.system.backend().warm_up()?;

        let mut targets: Vec<SearchTarget> = Vec::new();
        for (term_index, term) in terms.iter().enumerate() {
            let mut seen_keys: Vec<PhoneticKey> = Vec::new();

            // The canonical is always searchable, whatever the generator
            // back-projects.
            let canonical_key = self.system.phonetic_key(&term.canonical)?;
            Self::push_target(
                &mut targets,
                &mut seen_keys,
                &term.canonical,
                canonical_key,
                term,
                term_index,
                1.0,
            );

            for alias in &term.aliases {
                let key = self.system.phonetic_key(alias)?;
                Self::push_target(&mut targets, &mut seen_keys, alias, key, term, term_index, 1.0);
            }

            let variants = self
                .generator
                .generate_variants(&term.canonical, term.max_variants)?;
            for variant in variants {
                Self::push_target(
                    &mut targets,
                    &mut seen_keys,
                    &variant.text,
                    variant.key,
                    term,
                    term_index,
                    variant.score,
                );
            }
        }

        if targets.len() > self.config.max_search_targets {
            return Err(CorrectionError::ResourceLimit {
                what: "search targets",
                actual: targets.len(),
                limit: self.config.max_search_targets,
            });
        }
        Ok(targets)
    }

    fn push_target(
        targets: &mut Vec<SearchTarget>,
        seen_keys: &mut Vec<PhoneticKey>,
        surface: &str,
        key: PhoneticKey,
        term: &NormalizedTermConfig,
        term_index: usize,
        variant_score: f64,
    ) {
        // Per-canonical dedup: two targets of one canonical never share a
        // key. The first arrival wins, and canonicals arrive first.
        if seen_keys.contains(&key) {
            return;
        }
        seen_keys.push(key.clone());
        targets.push(SearchTarget {
            surface: surface.to_string(),
            key,
            canonical: term.canonical.clone(),
            term_index,
            variant_score,
        });
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("language", &self.system.language())
            .finish()
    }
}
