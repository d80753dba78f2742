//! phonofix-japanese
//!
//! Japanese support for phonofix: Hepburn romaji transliteration with
//! long-vowel/geminate normalisation, the bundled kanji reading and
//! homophone tables, the kana-level variant generator and an `Engine`
//! factory.

pub mod backend;
pub mod fuzzy;
pub mod kana;
pub mod system;

use std::sync::Arc;

use phonofix_core::{CharTokenizer, Engine, PhoneticConfig, TargetScript};

pub use backend::{kanji_homophones, kanji_reading, shared_backend, RomajiSource};
pub use fuzzy::JapaneseFuzzyGenerator;
pub use kana::{kana_run_to_romaji, normalize_romaji};
pub use system::JapaneseSystem;

/// Build a Japanese engine on the process-wide romaji backend.
pub fn new_engine(config: PhoneticConfig) -> Engine {
    let system = Arc::new(JapaneseSystem::new(shared_backend()));
    let generator = Arc::new(JapaneseFuzzyGenerator::new(Arc::clone(&system), config.clone()));
    Engine::new(
        system,
        Arc::new(CharTokenizer::new(TargetScript::Kana)),
        generator,
        config,
    )
}
