//! The English phonetic system: IPA keys, word windows, tolerance.

use std::ops::RangeInclusive;
use std::sync::Arc;

use phonofix_core::{Language, PhoneticBackend, PhoneticSystem};

pub struct EnglishSystem {
    backend: Arc<PhoneticBackend>,
}

impl EnglishSystem {
    pub fn new(backend: Arc<PhoneticBackend>) -> Self {
        Self { backend }
    }
}

impl PhoneticSystem for EnglishSystem {
    fn language(&self) -> Language {
        Language::English
    }

    fn backend(&self) -> &Arc<PhoneticBackend> {
        &self.backend
    }

    fn window_range(&self) -> RangeInclusive<usize> {
        1..=4
    }

    fn tolerance(&self, window_units: usize) -> f64 {
        // Single words are short windows; multi-word spans get more slack.
        if window_units <= 1 {
            0.35
        } else {
            0.45
        }
    }
}
