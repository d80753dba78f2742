//! Per-language phonetic system: the glue between a backend and the
//! matcher.
//!
//! A system knows which language it serves, how to turn a surface span
//! into a phonetic key (backend call plus any language-level key
//! normalisation, e.g. Japanese long-vowel collapse), the window lengths
//! the matcher should slide, and the per-length edit-distance tolerance.

use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::backend::PhoneticBackend;
use crate::error::Result;
use crate::key::PhoneticKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Mandarin,
    English,
    Japanese,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Mandarin => "mandarin",
            Language::English => "english",
            Language::Japanese => "japanese",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait PhoneticSystem: Send + Sync {
    fn language(&self) -> Language;

    fn backend(&self) -> &Arc<PhoneticBackend>;

    /// Compute the phonetic key for a surface span. The same transform is
    /// applied to dictionary terms at build time and to windows at match
    /// time; matching happens in one, and only one, domain per language.
    fn phonetic_key(&self, text: &str) -> Result<PhoneticKey> {
        self.backend().to_phonetic(text)
    }

    /// Window lengths, in matchable units, the matcher slides from longest
    /// to shortest.
    fn window_range(&self) -> RangeInclusive<usize>;

    /// Maximum normalised phonetic edit distance at which a window of the
    /// given unit length is still a candidate.
    fn tolerance(&self, window_units: usize) -> f64;
}
