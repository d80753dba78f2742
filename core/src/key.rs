//! Phonetic keys.
//!
//! A `PhoneticKey` is an opaque string in the phonetic domain: Pinyin
//! syllables separated by spaces, IPA symbols, or Hepburn romaji. Equality
//! and edit distance (see `distance`) are the only operations the matcher
//! consumes; everything language-specific happens before a key is built.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhoneticKey(String);

impl PhoneticKey {
    /// Build a key from raw backend output. Interior whitespace collapses to
    /// single spaces so that the same pronunciation always yields the same
    /// key regardless of how the backend padded its output.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let normalized = raw
            .as_ref()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        PhoneticKey(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whitespace-separated units (Pinyin syllables, IPA words).
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|u| !u.is_empty())
    }

    pub fn unit_count(&self) -> usize {
        self.units().count()
    }

    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PhoneticKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PhoneticKey {
    fn from(s: String) -> Self {
        PhoneticKey::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_collapses() {
        let key = PhoneticKey::new("  tai  bei\tche zhan ");
        assert_eq!(key.as_str(), "tai bei che zhan");
        assert_eq!(key.unit_count(), 4);
    }

    #[test]
    fn empty_key() {
        let key = PhoneticKey::new("");
        assert!(key.is_empty());
        assert_eq!(key.unit_count(), 0);
    }
}
