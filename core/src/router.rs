//! Script-based language routing for mixed-language input.
//!
//! The router segments text by Unicode block heuristics (Han, kana,
//! Latin/alphanumeric), dispatches each segment to the corrector
//! registered for its language, and reassembles the output. A rule-based
//! override routes short alphanumeric codes (device names, unit strings)
//! to a configured language instead of the default Latin target.
//!
//! Matching must happen in one phonetic domain per segment: a corrector
//! only ever sees text the router classified for it, with the full input
//! supplied as scoring context.

use std::sync::Arc;

use tracing::debug;

use crate::corrector::Corrector;
use crate::system::Language;
use crate::tokenizer::{is_han, is_kana};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedSegment {
    pub start: usize,
    pub end: usize,
    pub text: String,
    /// `None` for neutral-only segments (whitespace, punctuation).
    pub language: Option<Language>,
}

/// Longest alphanumeric run still treated as a "code" by the override.
const CODE_MAX_CHARS: usize = 6;

pub struct LanguageRouter {
    correctors: Vec<(Language, Arc<Corrector>)>,
    /// Surface -> canonical rewrites applied before segmentation so that
    /// mixed-script names are not split apart.
    cross_lingual: Vec<(String, String)>,
    /// Where short alphanumeric codes go. Defaults to English.
    code_language: Language,
}

impl Default for LanguageRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageRouter {
    pub fn new() -> Self {
        Self {
            correctors: Vec::new(),
            cross_lingual: Vec::new(),
            code_language: Language::English,
        }
    }

    pub fn with_corrector(mut self, language: Language, corrector: Arc<Corrector>) -> Self {
        self.correctors.retain(|(l, _)| *l != language);
        self.correctors.push((language, corrector));
        self
    }

    /// Cross-lingual pre-matching: exact surface spans rewritten to their
    /// canonical before any routing decision.
    pub fn with_cross_lingual(mut self, mut map: Vec<(String, String)>) -> Self {
        // Longest surfaces first so nested spans cannot shadow each other.
        map.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()).then(a.0.cmp(&b.0)));
        self.cross_lingual = map;
        self
    }

    pub fn with_code_language(mut self, language: Language) -> Self {
        self.code_language = language;
        self
    }

    fn corrector_for(&self, language: Language) -> Option<&Arc<Corrector>> {
        self.correctors
            .iter()
            .find(|(l, _)| *l == language)
            .map(|(_, c)| c)
    }

    /// Split text into language-tagged segments covering the input.
    pub fn segment(&self, text: &str) -> Vec<RoutedSegment> {
        #[derive(Clone, Copy, PartialEq)]
        enum Class {
            Han,
            Kana,
            Latin,
            Neutral,
        }

        let classify = |ch: char| {
            if is_kana(ch) {
                Class::Kana
            } else if is_han(ch) {
                Class::Han
            } else if ch.is_ascii_alphanumeric() || ch.is_alphabetic() {
                Class::Latin
            } else {
                Class::Neutral
            }
        };

        // Pass 1: raw runs of one class; neutral chars extend the current
        // run, and a neutral run adopts the class of the first non-neutral
        // char that follows it.
        let mut runs: Vec<(usize, usize, Class)> = Vec::new();
        for (idx, ch) in text.char_indices() {
            let class = classify(ch);
            let end = idx + ch.len_utf8();
            let merged_class = match runs.last() {
                Some(&(_, _, run_class)) if class == run_class || class == Class::Neutral => {
                    Some(run_class)
                }
                Some(&(_, _, Class::Neutral)) => Some(class),
                _ => None,
            };
            match (runs.last_mut(), merged_class) {
                (Some(last), Some(new_class)) => {
                    last.1 = end;
                    last.2 = new_class;
                }
                _ => runs.push((idx, end, class)),
            }
        }

        // Pass 2: Han runs adjacent to kana belong to Japanese text.
        let mut languages: Vec<Option<Language>> = runs
            .iter()
            .map(|(_, _, class)| match class {
                Class::Han => Some(Language::Mandarin),
                Class::Kana => Some(Language::Japanese),
                Class::Latin => Some(Language::English),
                Class::Neutral => None,
            })
            .collect();
        for i in 0..runs.len() {
            if runs[i].2 == Class::Han {
                let kana_before = i > 0 && runs[i - 1].2 == Class::Kana;
                let kana_after = i + 1 < runs.len() && runs[i + 1].2 == Class::Kana;
                if kana_before || kana_after {
                    languages[i] = Some(Language::Japanese);
                }
            }
        }

        // Pass 3: the short-code override.
        for (i, (start, end, class)) in runs.iter().enumerate() {
            if *class == Class::Latin {
                let run_text = text[*start..*end].trim();
                let chars = run_text.chars().count();
                let is_code = chars > 0
                    && chars <= CODE_MAX_CHARS
                    && run_text.chars().all(|c| c.is_ascii_alphanumeric())
                    && (run_text.chars().any(|c| c.is_ascii_digit())
                        || run_text.chars().all(|c| c.is_ascii_uppercase()));
                if is_code {
                    languages[i] = Some(self.code_language);
                }
            }
        }

        // Merge adjacent runs that resolved to the same language.
        let mut segments: Vec<RoutedSegment> = Vec::new();
        for (i, (start, end, _)) in runs.iter().enumerate() {
            match segments.last_mut() {
                Some(last) if last.language == languages[i] && last.end == *start => {
                    last.end = *end;
                    last.text.push_str(&text[*start..*end]);
                }
                _ => segments.push(RoutedSegment {
                    start: *start,
                    end: *end,
                    text: text[*start..*end].to_string(),
                    language: languages[i],
                }),
            }
        }
        segments
    }

    /// Route, correct, reassemble. Segments without a registered
    /// corrector pass through unchanged; every corrector receives the
    /// whole input as scoring context.
    pub fn correct(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let prepared = self.apply_cross_lingual(text);

        let mut output = String::with_capacity(prepared.len());
        for segment in self.segment(&prepared) {
            match segment.language.and_then(|l| self.corrector_for(l)) {
                Some(corrector) => {
                    debug!(
                        language = %segment.language.map(|l| l.as_str()).unwrap_or("-"),
                        segment = segment.text.as_str(),
                        "dispatching segment"
                    );
                    output.push_str(&corrector.correct_with(&segment.text, Some(&prepared), false));
                }
                None => output.push_str(&segment.text),
            }
        }
        output
    }

    fn apply_cross_lingual(&self, text: &str) -> String {
        let mut out = text.to_string();
        for (surface, canonical) in &self.cross_lingual {
            if surface.is_empty() || surface == canonical {
                continue;
            }
            out = out.replace(surface.as_str(), canonical);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> LanguageRouter {
        LanguageRouter::new()
    }

    #[test]
    fn segments_cover_input() {
        let text = "我在 use Python 寫程式";
        let segments = router().segment(text);
        let mut pos = 0;
        for s in &segments {
            assert_eq!(s.start, pos);
            pos = s.end;
            assert_eq!(&text[s.start..s.end], s.text);
        }
        assert_eq!(pos, text.len());
    }

    #[test]
    fn han_near_kana_is_japanese() {
        let segments = router().segment("頭が痛い");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].language, Some(Language::Japanese));
    }

    #[test]
    fn pure_han_is_mandarin() {
        let segments = router().segment("台北車站");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].language, Some(Language::Mandarin));
    }

    #[test]
    fn short_codes_follow_override() {
        let r = router().with_code_language(Language::English);
        let segments = r.segment("這個 1kg設備");
        let code = segments
            .iter()
            .find(|s| s.text.contains("1kg"))
            .expect("code segment");
        assert_eq!(code.language, Some(Language::English));
    }

    #[test]
    fn cross_lingual_prepass_rewrites_before_split() {
        let r = router().with_cross_lingual(vec![("AI課".to_string(), "人工智慧課".to_string())]);
        assert_eq!(r.correct("我想上AI課"), "我想上人工智慧課");
    }
}
