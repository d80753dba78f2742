//! English IPA backend.
//!
//! Two sources share the `PhoneticBackend` singleton: the built-in
//! rule-based G2P, and an optional espeak-style subprocess selected by
//! the `PHONOFIX_ESPEAK_PATH` environment variable. The subprocess is
//! probed once at warm-up; a missing binary surfaces a clear install
//! hint instead of failing mid-correction.

use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use phonofix_core::{CorrectionError, PhoneticBackend, PhoneticSource, Result};

use crate::g2p::text_to_ipa;

/// Environment variable naming the external phonemizer binary.
pub const ESPEAK_PATH_VAR: &str = "PHONOFIX_ESPEAK_PATH";

/// The built-in rule-based source.
pub struct RuleG2pSource;

impl PhoneticSource for RuleG2pSource {
    fn name(&self) -> &'static str {
        "en-g2p"
    }

    fn convert(&self, text: &str) -> Result<String> {
        Ok(text_to_ipa(text))
    }
}

/// Subprocess-backed source invoking an espeak-compatible binary.
pub struct EspeakSource {
    path: PathBuf,
}

impl EspeakSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PhoneticSource for EspeakSource {
    fn name(&self) -> &'static str {
        "espeak"
    }

    fn install_hint(&self) -> &'static str {
        "install espeak-ng and point PHONOFIX_ESPEAK_PATH at the binary"
    }

    fn warm_up(&self) -> Result<()> {
        let probe = Command::new(&self.path).arg("--version").output();
        match probe {
            Ok(output) if output.status.success() => Ok(()),
            Ok(output) => Err(CorrectionError::BackendUnavailable {
                backend: self.name().to_string(),
                reason: format!("probe exited with {}", output.status),
                hint: self.install_hint().to_string(),
            }),
            Err(e) => Err(CorrectionError::BackendUnavailable {
                backend: self.name().to_string(),
                reason: format!("cannot run {}: {e}", self.path.display()),
                hint: self.install_hint().to_string(),
            }),
        }
    }

    fn convert(&self, text: &str) -> Result<String> {
        let output = Command::new(&self.path)
            .args(["-q", "--ipa"])
            .arg(text)
            .output()
            .map_err(|e| CorrectionError::Fuzzy {
                span: text.to_string(),
                reason: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(CorrectionError::Fuzzy {
                span: text.to_string(),
                reason: format!("espeak exited with {}", output.status),
            });
        }
        String::from_utf8(output.stdout)
            .map(|s| s.trim().to_string())
            .map_err(|e| CorrectionError::Fuzzy {
                span: text.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Process-wide backend singleton. The subprocess source is chosen only
/// when the environment variable is set; everything else uses the
/// built-in rules.
pub fn shared_backend() -> Arc<PhoneticBackend> {
    static BACKEND: Lazy<Arc<PhoneticBackend>> = Lazy::new(|| {
        let source: Box<dyn PhoneticSource> = match std::env::var(ESPEAK_PATH_VAR) {
            Ok(path) if !path.is_empty() => {
                debug!(path = path.as_str(), "using external phonemizer");
                Box::new(EspeakSource::new(path))
            }
            _ => Box::new(RuleG2pSource),
        };
        Arc::new(PhoneticBackend::new(source))
    });
    Arc::clone(&BACKEND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_source_converts() {
        let source = RuleG2pSource;
        assert_eq!(source.convert("Python").unwrap(), "pɪθɒn");
    }

    #[test]
    fn missing_espeak_binary_reports_hint() {
        let source = EspeakSource::new("/nonexistent/espeak-binary");
        match source.warm_up() {
            Err(CorrectionError::BackendUnavailable { hint, .. }) => {
                assert!(hint.contains(ESPEAK_PATH_VAR));
            }
            other => panic!("expected BackendUnavailable, got {other:?}"),
        }
    }
}
