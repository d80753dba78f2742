//! Error taxonomy for corrector construction and phonetic conversion.
//!
//! Build-time errors (`InvalidInput`, `BackendUnavailable`, `ResourceLimit`)
//! propagate out of `Engine::create_corrector` unless the caller asked for
//! degrade mode. Call-time failures are recovered inside `Corrector::correct`
//! and surface only as events.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorrectionError {
    /// Malformed term dictionary: empty canonical, weight out of range, etc.
    /// Raised at `create_corrector`, never during `correct()`.
    #[error("invalid term dictionary: {0}")]
    InvalidInput(String),

    /// The external phonetic engine is missing or mis-configured.
    #[error("phonetic backend '{backend}' unavailable: {reason} ({hint})")]
    BackendUnavailable {
        backend: String,
        reason: String,
        /// Install hint surfaced to the operator, e.g. which binary to
        /// install and which environment variable selects it.
        hint: String,
    },

    /// Transient failure converting a single span. Recovered locally: the
    /// offending window is treated as non-matching.
    #[error("phonetic conversion failed for {span:?}: {reason}")]
    Fuzzy { span: String, reason: String },

    /// A configured bound was exceeded at build time.
    #[error("resource limit exceeded: {what} ({actual} > {limit})")]
    ResourceLimit {
        what: &'static str,
        actual: usize,
        limit: usize,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CorrectionError>;
