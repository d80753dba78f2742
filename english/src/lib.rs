//! phonofix-english
//!
//! English support for phonofix: rule-based grapheme-to-IPA (with an
//! optional espeak-style subprocess), the phoneme confusion tables, the
//! variant generator and an `Engine` factory.

pub mod backend;
pub mod fuzzy;
pub mod g2p;
pub mod system;
pub mod tables;

use std::sync::Arc;

use phonofix_core::{Engine, PhoneticConfig, WordTokenizer};

pub use backend::{shared_backend, EspeakSource, RuleG2pSource, ESPEAK_PATH_VAR};
pub use fuzzy::EnglishFuzzyGenerator;
pub use system::EnglishSystem;

/// Build an English engine on the process-wide IPA backend.
pub fn new_engine(config: PhoneticConfig) -> Engine {
    let system = Arc::new(EnglishSystem::new(shared_backend()));
    let generator = Arc::new(EnglishFuzzyGenerator::new(Arc::clone(&system), config.clone()));
    Engine::new(system, Arc::new(WordTokenizer::new()), generator, config)
}
