//! The Japanese phonetic system: normalised romaji keys, character
//! windows, length-dependent tolerance.

use std::ops::RangeInclusive;
use std::sync::Arc;

use phonofix_core::{Language, PhoneticBackend, PhoneticSystem};

pub struct JapaneseSystem {
    backend: Arc<PhoneticBackend>,
}

impl JapaneseSystem {
    pub fn new(backend: Arc<PhoneticBackend>) -> Self {
        Self { backend }
    }
}

impl PhoneticSystem for JapaneseSystem {
    fn language(&self) -> Language {
        Language::Japanese
    }

    fn backend(&self) -> &Arc<PhoneticBackend> {
        &self.backend
    }

    fn window_range(&self) -> RangeInclusive<usize> {
        // Windows start at one unit so a whole ASCII romaji run can match
        // a kana canonical by itself.
        1..=8
    }

    fn tolerance(&self, window_units: usize) -> f64 {
        match window_units {
            0..=3 => 0.20,
            4..=6 => 0.30,
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
        let system = JapaneseSystem::new(shared_backend());
        assert_eq!(system.tolerance(2), 0.20);
        assert_eq!(system.tolerance(5), 0.30);
        assert_eq!(system.tolerance(8), 0.40);
    }

    #[test]
    fn keys_are_normalised_romaji() {
        let system = JapaneseSystem::new(shared_backend());
        assert_eq!(system.phonetic_key("コーヒー").unwrap().as_str(), "kohi");
    }
}
