//! Phonetic backend: deterministic text -> phonetic conversion with
//! memoised results.
//!
//! A backend wraps an external grapheme-to-phonetic engine behind the
//! `PhoneticSource` trait. Initialisation is expensive (table loads or a
//! subprocess probe) and happens once per process per language; language
//! crates hold their backend in a process-wide singleton. Conversion
//! results are cached in an LRU bounded by the configured capacity.
//!
//! Cache statistics are exact: hits and misses are incremented atomically,
//! the cache itself is serialised behind a mutex.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

use lru::LruCache;
use tracing::debug;

use crate::error::{CorrectionError, Result};
use crate::key::PhoneticKey;

pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// The external engine boundary: one function from text to a phonetic
/// string, plus a one-time warm-up.
pub trait PhoneticSource: Send + Sync {
    fn name(&self) -> &'static str;

    /// Surfaced on `BackendUnavailable`, e.g. what to install and which
    /// environment variable selects the binary.
    fn install_hint(&self) -> &'static str {
        ""
    }

    /// One-time expensive initialisation: load tables, probe a subprocess.
    /// A failure here marks the backend unavailable for the process.
    fn warm_up(&self) -> Result<()> {
        Ok(())
    }

    fn convert(&self, text: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

pub struct PhoneticBackend {
    source: Box<dyn PhoneticSource>,
    cache: Mutex<LruCache<String, PhoneticKey>>,
    hits: AtomicU64,
    misses: AtomicU64,
    /// First warm-up outcome; an Err is sticky for the process lifetime.
    init: OnceLock<std::result::Result<(), String>>,
}

impl PhoneticBackend {
    pub fn new(source: Box<dyn PhoneticSource>) -> Self {
        Self::with_cache_capacity(source, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_cache_capacity(source: Box<dyn PhoneticSource>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            source,
            cache: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            init: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.source.name()
    }

    /// Force initialisation now instead of lazily at first conversion.
    pub fn warm_up(&self) -> Result<()> {
        self.ensure_initialized()
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.init.get(), Some(Ok(())))
    }

    fn ensure_initialized(&self) -> Result<()> {
        let outcome = self.init.get_or_init(|| {
            let started = std::time::Instant::now();
            let result = self.source.warm_up().map_err(|e| e.to_string());
            debug!(
                backend = self.source.name(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                ok = result.is_ok(),
                "backend warm-up"
            );
            result
        });
        outcome
            .as_ref()
            .map(|_| ())
            .map_err(|reason| CorrectionError::BackendUnavailable {
                backend: self.source.name().to_string(),
                reason: reason.clone(),
                hint: self.source.install_hint().to_string(),
            })
    }

    /// Convert text to its phonetic key, memoised by the exact input
    /// string.
    pub fn to_phonetic(&self, text: &str) -> Result<PhoneticKey> {
        self.ensure_initialized()?;

        if let Ok(mut cache) = self.cache.lock() {
            if let Some(key) = cache.get(text) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                return Ok(key.clone());
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let raw = self.source.convert(text)?;
        let key = PhoneticKey::new(raw);
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(text.to_string(), key.clone());
        }
        Ok(key)
    }

    pub fn cache_stats(&self) -> CacheStats {
        let size = self.cache.lock().map(|c| c.len()).unwrap_or(0);
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size,
        }
    }
}

impl std::fmt::Debug for PhoneticBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhoneticBackend")
            .field("source", &self.source.name())
            .field("initialized", &self.is_initialized())
            .field("stats", &self.cache_stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct UpperSource;

    impl PhoneticSource for UpperSource {
        fn name(&self) -> &'static str {
            "upper"
        }
        fn convert(&self, text: &str) -> Result<String> {
            Ok(text.to_uppercase())
        }
    }

    struct BrokenSource;

    impl PhoneticSource for BrokenSource {
        fn name(&self) -> &'static str {
            "broken"
        }
        fn install_hint(&self) -> &'static str {
            "install the thing"
        }
        fn warm_up(&self) -> Result<()> {
            Err(CorrectionError::BackendUnavailable {
                backend: "broken".into(),
                reason: "missing binary".into(),
                hint: "install the thing".into(),
            })
        }
        fn convert(&self, _text: &str) -> Result<String> {
            unreachable!("warm_up always fails")
        }
    }

    #[test]
    fn caches_and_counts() {
        let backend = PhoneticBackend::new(Box::new(UpperSource));
        assert!(!backend.is_initialized());
        assert_eq!(backend.to_phonetic("abc").unwrap().as_str(), "ABC");
        assert!(backend.is_initialized());
        assert_eq!(backend.to_phonetic("abc").unwrap().as_str(), "ABC");
        let stats = backend.cache_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.size, 1);
    }

    #[test]
    fn unavailable_is_sticky() {
        let backend = PhoneticBackend::new(Box::new(BrokenSource));
        for _ in 0..2 {
            match backend.to_phonetic("x") {
                Err(CorrectionError::BackendUnavailable { hint, .. }) => {
                    assert!(!hint.is_empty())
                }
                other => panic!("expected BackendUnavailable, got {other:?}"),
            }
        }
        assert!(!backend.is_initialized());
    }

    #[test]
    fn eviction_respects_capacity() {
        let backend = PhoneticBackend::with_cache_capacity(Box::new(UpperSource), 2);
        backend.to_phonetic("a").unwrap();
        backend.to_phonetic("b").unwrap();
        backend.to_phonetic("c").unwrap();
        assert_eq!(backend.cache_stats().size, 2);
    }
}
