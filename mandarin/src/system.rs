//! The Mandarin phonetic system: pinyin keys, window lengths and
//! tolerance steps.

use std::ops::RangeInclusive;
use std::sync::Arc;

use phonofix_core::{Language, PhoneticBackend, PhoneticSystem};

pub struct MandarinSystem {
    backend: Arc<PhoneticBackend>,
}

impl MandarinSystem {
    pub fn new(backend: Arc<PhoneticBackend>) -> Self {
        Self { backend }
    }
}

impl PhoneticSystem for MandarinSystem {
    fn language(&self) -> Language {
        Language::Mandarin
    }

    fn backend(&self) -> &Arc<PhoneticBackend> {
        &self.backend
    }

    fn window_range(&self) -> RangeInclusive<usize> {
        2..=6
    }

    fn tolerance(&self, window_units: usize) -> f64 {
        match window_units {
            0 | 1 => 0.05,
            2 => 0.20,
            3 => 0.30,
            _ => 0.40,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::shared_backend;
    use phonofix_core::PhoneticSystem as _;

    #[test]
    fn tolerance_steps() {
        let system = MandarinSystem::new(shared_backend());
        assert_eq!(system.tolerance(2), 0.20);
        assert_eq!(system.tolerance(3), 0.30);
        assert_eq!(system.tolerance(4), 0.40);
        assert_eq!(system.tolerance(6), 0.40);
    }

    #[test]
    fn keys_come_from_the_pinyin_backend() {
        let system = MandarinSystem::new(shared_backend());
        let key = system.phonetic_key("北車").unwrap();
        assert_eq!(key.as_str(), "bei che");
    }
}
