//! Tokenisers mapping a text segment to matchable units with byte offsets.
//!
//! Character-granularity languages get one unit per code point of the
//! target scripts, with runs of other characters collapsed into a single
//! opaque unit. Word-granularity languages split on whitespace and
//! punctuation. Units cover the input without overlap so the matcher can
//! always recover surface spans from `(start, end)`.

/// One matchable (or opaque) unit of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Byte offset of the first byte in the original string.
    pub start: usize,
    /// Byte offset one past the last byte.
    pub end: usize,
    /// Opaque units carry their span but never participate in windows.
    pub matchable: bool,
}

pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// Word-granularity tokenisers allow whitespace gaps inside a window
    /// and require candidate spans to align with word edges.
    fn word_boundaries(&self) -> bool {
        false
    }
}

/// Which scripts a `CharTokenizer` treats as matchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetScript {
    /// CJK ideographs only (Mandarin).
    Han,
    /// Kana plus CJK ideographs (Japanese).
    Kana,
}

impl TargetScript {
    fn contains(self, ch: char) -> bool {
        match self {
            TargetScript::Han => is_han(ch),
            TargetScript::Kana => is_kana(ch) || is_han(ch),
        }
    }
}

pub fn is_han(ch: char) -> bool {
    matches!(ch,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}')
}

pub fn is_kana(ch: char) -> bool {
    matches!(ch,
        '\u{3040}'..='\u{309F}'   // hiragana
        | '\u{30A0}'..='\u{30FF}' // katakana
        | '\u{31F0}'..='\u{31FF}')
}

/// One unit per target-script code point. ASCII alphanumeric runs (ASR
/// romanisations, device codes) become one matchable unit each; everything
/// else becomes opaque runs carrying their surface span.
#[derive(Debug, Clone, Copy)]
pub struct CharTokenizer {
    script: TargetScript,
}

impl CharTokenizer {
    pub fn new(script: TargetScript) -> Self {
        Self { script }
    }
}

impl Tokenizer for CharTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut run_start: Option<usize> = None;
        let mut run_matchable = false;

        let flush = |tokens: &mut Vec<Token>, start: usize, end: usize, matchable: bool| {
            if start < end {
                tokens.push(Token {
                    text: text[start..end].to_string(),
                    start,
                    end,
                    matchable,
                });
            }
        };

        for (idx, ch) in text.char_indices() {
            if self.script.contains(ch) {
                if let Some(start) = run_start.take() {
                    flush(&mut tokens, start, idx, run_matchable);
                }
                tokens.push(Token {
                    text: ch.to_string(),
                    start: idx,
                    end: idx + ch.len_utf8(),
                    matchable: true,
                });
            } else {
                let matchable = ch.is_ascii_alphanumeric();
                match run_start {
                    Some(start) if run_matchable != matchable => {
                        flush(&mut tokens, start, idx, run_matchable);
                        run_start = Some(idx);
                        run_matchable = matchable;
                    }
                    Some(_) => {}
                    None => {
                        run_start = Some(idx);
                        run_matchable = matchable;
                    }
                }
            }
        }
        if let Some(start) = run_start {
            flush(&mut tokens, start, text.len(), run_matchable);
        }
        tokens
    }
}

/// Splits on whitespace and punctuation, preserving exact offsets so a
/// replacement reconstructs the original spacing.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn is_word_char(ch: char) -> bool {
        ch.is_alphanumeric() || ch == '\'' || ch == '-'
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut word_start: Option<usize> = None;

        for (idx, ch) in text.char_indices() {
            if Self::is_word_char(ch) {
                if word_start.is_none() {
                    word_start = Some(idx);
                }
            } else if let Some(start) = word_start.take() {
                tokens.push(Token {
                    text: text[start..idx].to_string(),
                    start,
                    end: idx,
                    matchable: true,
                });
            }
        }
        if let Some(start) = word_start {
            tokens.push(Token {
                text: text[start..].to_string(),
                start,
                end: text.len(),
                matchable: true,
            });
        }
        tokens
    }

    fn word_boundaries(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn han_units_and_runs() {
        let tok = CharTokenizer::new(TargetScript::Han);
        let tokens = tok.tokenize("我在 1kg北");
        let matchable: Vec<&str> = tokens
            .iter()
            .filter(|t| t.matchable)
            .map(|t| t.text.as_str())
            .collect();
        // Hanzi are per-char units; the ASCII run is one matchable unit.
        assert_eq!(matchable, vec!["我", "在", "1kg", "北"]);
        let opaque: Vec<&str> = tokens
            .iter()
            .filter(|t| !t.matchable)
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(opaque, vec![" "]);
        // Units cover the input without overlap.
        let mut pos = 0;
        for t in &tokens {
            assert_eq!(t.start, pos);
            pos = t.end;
        }
        assert_eq!(pos, "我在 1kg北".len());
    }

    #[test]
    fn kana_includes_han_and_romaji_runs() {
        let tok = CharTokenizer::new(TargetScript::Kana);
        let tokens = tok.tokenize("頭がasupirinを");
        let texts: Vec<(&str, bool)> = tokens.iter().map(|t| (t.text.as_str(), t.matchable)).collect();
        assert_eq!(
            texts,
            vec![("頭", true), ("が", true), ("asupirin", true), ("を", true)]
        );
    }

    #[test]
    fn words_keep_offsets() {
        let tok = WordTokenizer::new();
        let text = "I use Pyton, briefly.";
        let tokens = tok.tokenize(text);
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["I", "use", "Pyton", "briefly"]);
        for t in &tokens {
            assert_eq!(&text[t.start..t.end], t.text);
        }
    }
}
