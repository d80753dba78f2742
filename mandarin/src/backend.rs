//! Pinyin backend: bundled hanzi -> toneless-pinyin table behind the
//! process-wide `PhoneticBackend` singleton.
//!
//! The table is embedded in the crate and parsed once at warm-up. Keys
//! are space-separated syllables, one per hanzi; ASCII alphanumeric runs
//! pass through lowercased as single units; unknown hanzi pass through as
//! themselves so a single rare character degrades one unit instead of the
//! whole window.

use std::sync::Arc;

use ahash::AHashMap;
use once_cell::sync::Lazy;
use tracing::debug;

use phonofix_core::{CorrectionError, PhoneticBackend, PhoneticSource, Result};

const PINYIN_DATA: &str = include_str!("../data/pinyin.tsv");

pub struct PinyinTable {
    char_to_pinyin: AHashMap<char, &'static str>,
    /// Homophone pool: reading -> hanzi in table order.
    pinyin_to_chars: AHashMap<&'static str, Vec<char>>,
}

impl PinyinTable {
    fn parse(data: &'static str) -> Self {
        let mut char_to_pinyin = AHashMap::new();
        let mut pinyin_to_chars: AHashMap<&'static str, Vec<char>> = AHashMap::new();
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((ch, pinyin)) = line.split_once('\t') else {
                continue;
            };
            let Some(ch) = ch.chars().next() else {
                continue;
            };
            let pinyin = pinyin.trim();
            if pinyin.is_empty() {
                continue;
            }
            // First entry wins for polyphones listed twice.
            if char_to_pinyin.contains_key(&ch) {
                continue;
            }
            char_to_pinyin.insert(ch, pinyin);
            let pool = pinyin_to_chars.entry(pinyin).or_default();
            if !pool.contains(&ch) {
                pool.push(ch);
            }
        }
        Self {
            char_to_pinyin,
            pinyin_to_chars,
        }
    }

    pub fn pinyin_of(&self, ch: char) -> Option<&'static str> {
        self.char_to_pinyin.get(&ch).copied()
    }

    /// Hanzi sharing a reading, in table order.
    pub fn homophones(&self, pinyin: &str) -> &[char] {
        self.pinyin_to_chars
            .get(pinyin)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.char_to_pinyin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.char_to_pinyin.is_empty()
    }
}

static TABLE: Lazy<PinyinTable> = Lazy::new(|| {
    let table = PinyinTable::parse(PINYIN_DATA);
    debug!(entries = table.len(), "pinyin table loaded");
    table
});

pub fn pinyin_table() -> &'static PinyinTable {
    &TABLE
}

/// The grapheme-to-phonetic source for Mandarin.
pub struct PinyinSource;

impl PhoneticSource for PinyinSource {
    fn name(&self) -> &'static str {
        "pinyin"
    }

    fn install_hint(&self) -> &'static str {
        "the bundled pinyin table failed to load; rebuild the crate"
    }

    fn warm_up(&self) -> Result<()> {
        if pinyin_table().is_empty() {
            return Err(CorrectionError::BackendUnavailable {
                backend: self.name().to_string(),
                reason: "empty pinyin table".to_string(),
                hint: self.install_hint().to_string(),
            });
        }
        Ok(())
    }

    fn convert(&self, text: &str) -> Result<String> {
        let table = pinyin_table();
        // Full-width ASCII (ＡＩ, １ｋｇ) reads the same as half-width.
        let text = phonofix_core::utils::to_halfwidth(text);
        let mut units: Vec<String> = Vec::new();
        let mut ascii_run = String::new();

        for ch in text.chars() {
            if ch.is_ascii_alphanumeric() {
                ascii_run.push(ch.to_ascii_lowercase());
                continue;
            }
            if !ascii_run.is_empty() {
                units.push(std::mem::take(&mut ascii_run));
            }
            match table.pinyin_of(ch) {
                Some(pinyin) => units.push(pinyin.to_string()),
                None if ch.is_whitespace() => {}
                None if phonofix_core::tokenizer::is_han(ch) => {
                    // Unknown hanzi: keep the character itself as a unit.
                    units.push(ch.to_string());
                }
                None => {}
            }
        }
        if !ascii_run.is_empty() {
            units.push(ascii_run);
        }

        Ok(units.join(" "))
    }
}

/// Process-wide backend singleton; initialisation happens once, at first
/// use or at `Engine::warm_up`.
pub fn shared_backend() -> Arc<PhoneticBackend> {
    static BACKEND: Lazy<Arc<PhoneticBackend>> =
        Lazy::new(|| Arc::new(PhoneticBackend::new(Box::new(PinyinSource))));
    Arc::clone(&BACKEND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_mixed_text() {
        let source = PinyinSource;
        assert_eq!(source.convert("台北車站").unwrap(), "tai bei che zhan");
        assert_eq!(source.convert("牛奶").unwrap(), "niu nai");
        assert_eq!(source.convert("買 1kg").unwrap(), "mai 1kg");
        // Full-width ASCII folds before conversion.
        assert_eq!(source.convert("買 １ｋｇ").unwrap(), "mai 1kg");
    }

    #[test]
    fn unknown_hanzi_pass_through() {
        let source = PinyinSource;
        // U+9FFF is a valid ideograph unlikely to be in the table.
        let out = source.convert("牛\u{9FFF}").unwrap();
        assert!(out.starts_with("niu "));
    }

    #[test]
    fn homophone_pool_contains_expected_readings() {
        let table = pinyin_table();
        assert!(table.homophones("liu").contains(&'流'));
        assert!(table.homophones("lan").contains(&'蘭'));
        assert_eq!(table.pinyin_of('站'), Some("zhan"));
    }

    #[test]
    fn backend_caches_conversions() {
        let backend = shared_backend();
        let a = backend.to_phonetic("然後").unwrap();
        let b = backend.to_phonetic("然後").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "ran hou");
        assert!(backend.is_initialized());
    }
}
