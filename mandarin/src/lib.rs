//! phonofix-mandarin
//!
//! Mandarin support for phonofix: the bundled pinyin backend, the fuzzy
//! rule tables (initials, finals, special syllables), the variant
//! generator and an `Engine` factory.
//!
//! ```no_run
//! let engine = phonofix_mandarin::new_engine(Default::default());
//! let corrector = engine.create_corrector(["台北車站", "牛奶", "然後"]).unwrap();
//! assert_eq!(corrector.correct("我在北車買了流奶"), "我在台北車站買了牛奶");
//! ```

pub mod backend;
pub mod fuzzy;
pub mod system;
pub mod tables;

use std::sync::Arc;

use phonofix_core::{CharTokenizer, Engine, PhoneticConfig, TargetScript};

pub use backend::{pinyin_table, shared_backend, PinyinSource, PinyinTable};
pub use fuzzy::MandarinFuzzyGenerator;
pub use system::MandarinSystem;

/// Build a Mandarin engine on the process-wide pinyin backend.
pub fn new_engine(config: PhoneticConfig) -> Engine {
    let system = Arc::new(MandarinSystem::new(shared_backend()));
    let generator = Arc::new(MandarinFuzzyGenerator::new(Arc::clone(&system), config.clone()));
    Engine::new(
        system,
        Arc::new(CharTokenizer::new(TargetScript::Han)),
        generator,
        config,
    )
}
