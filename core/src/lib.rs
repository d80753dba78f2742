//! phonofix-core
//!
//! Language-agnostic runtime shared by the phonofix language crates
//! (phonofix-mandarin, phonofix-english, phonofix-japanese): term
//! dictionaries, phonetic backends, the fuzzy-variant pipeline, the
//! sliding-window corrector and the script-based language router.
//!
//! Public API:
//! - `PhoneticBackend` / `PhoneticSource` - memoised text -> phonetic key
//! - `Engine` - per-language factory for lightweight `Corrector`s
//! - `Corrector` - `correct(text)` with events, protection and context
//! - `LanguageRouter` - mixed-language segmentation and dispatch
//! - `PhoneticConfig` - runtime knobs with TOML round-trip

pub mod backend;
pub mod config;
pub mod corrector;
pub mod distance;
pub mod engine;
pub mod error;
pub mod event;
pub mod generator;
pub mod key;
pub mod router;
pub mod system;
pub mod term;
pub mod tokenizer;
pub mod variant;

pub use backend::{CacheStats, PhoneticBackend, PhoneticSource, DEFAULT_CACHE_CAPACITY};
pub use config::PhoneticConfig;
pub use corrector::{Corrector, Mode, ProtectionInterval};
pub use engine::{CorrectorOptions, Engine, FailPolicy};
pub use error::{CorrectionError, Result};
pub use event::{Event, EventBuffer, EventObserver, RejectedCheck};
pub use generator::{finalize_variants, FuzzyGenerator};
pub use key::PhoneticKey;
pub use router::{LanguageRouter, RoutedSegment};
pub use system::{Language, PhoneticSystem};
pub use term::{NormalizedTermConfig, TermDict, TermEntry};
pub use tokenizer::{is_han, is_kana, CharTokenizer, TargetScript, Token, Tokenizer, WordTokenizer};
pub use variant::{SearchTarget, Variant, VariantSource};

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace. Applied at every
    /// dictionary boundary; never to `correct()` input, whose byte offsets
    /// must survive.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }

    /// Convert full-width characters back to ASCII (half-width).
    pub fn to_halfwidth(s: &str) -> String {
        s.chars().map(halfwidth_char).collect()
    }

    fn halfwidth_char(ch: char) -> char {
        match ch {
            // Ideographic space -> ASCII space
            '\u{3000}' => ' ',
            // Full-width range (0xFF01-0xFF5E) -> ASCII (0x21-0x7E)
            '\u{FF01}'..='\u{FF5E}' => {
                let code = ch as u32;
                char::from_u32(code - 0xFF01 + 0x21).unwrap_or(ch)
            }
            _ => ch,
        }
    }

    /// Per-char fold used for context scanning: full-width to ASCII, then
    /// ASCII lowercase. One char in, one char out, so char distances in
    /// folded text match the original.
    pub fn fold_char(ch: char) -> char {
        halfwidth_char(ch).to_ascii_lowercase()
    }

    /// Fold a string into a char vector for distance scans.
    pub fn fold_chars(s: &str) -> Vec<char> {
        s.chars().map(fold_char).collect()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn normalize_trims_and_composes() {
            assert_eq!(normalize("  café  "), "café");
        }

        #[test]
        fn halfwidth_fold() {
            assert_eq!(to_halfwidth("ＥＫＧ　１ｋｇ"), "EKG 1kg");
            assert_eq!(fold_char('Ｅ'), 'e');
            assert_eq!(fold_char('中'), '中');
        }
    }
}
