//! Japanese romaji backend.
//!
//! Kana runs transliterate through the Hepburn tables; kanji resolve
//! through a bundled reading table (unknown kanji pass through as
//! themselves); ASCII alphanumerics lower-case in place so ASR romaji
//! output lands in the same key space as the kana it transcribes. Keys
//! are long-vowel- and geminate-normalised.

use std::sync::Arc;

use once_cell::sync::Lazy;
use phf::phf_map;

use phonofix_core::{is_han, is_kana, PhoneticBackend, PhoneticSource, Result};

use crate::kana::{kana_run_to_romaji, normalize_romaji};

/// Bundled kanji -> romaji reading table. Compound-position (on) readings
/// dominate because dictionary terms are mostly compounds.
static KANJI_READINGS: phf::Map<char, &'static str> = phf_map! {
    '頭' => "tou", '痛' => "tsuu", '飲' => "in", '薬' => "yaku",
    '病' => "byou", '院' => "in", '医' => "i", '者' => "sha",
    '学' => "gaku", '校' => "kou", '生' => "sei", '先' => "sen",
    '電' => "den", '車' => "sha", '駅' => "eki", '東' => "tou",
    '京' => "kyou", '大' => "dai", '小' => "shou", '中' => "chuu",
    '山' => "san", '川' => "sen", '水' => "sui", '火' => "ka",
    '木' => "moku", '金' => "kin", '土' => "do", '日' => "nichi",
    '月' => "getsu", '年' => "nen", '時' => "ji", '間' => "kan",
    '分' => "bun", '人' => "jin", '本' => "hon", '国' => "koku",
    '語' => "go", '文' => "bun", '字' => "ji", '空' => "kuu",
    '港' => "kou", '新' => "shin", '聞' => "bun", '食' => "shoku",
    '堂' => "dou", '会' => "kai", '社' => "sha", '高' => "kou",
    '工' => "kou", '口' => "kou", '公' => "kou", '光' => "kou",
    '好' => "kou", '心' => "shin", '真' => "shin", '感' => "kan",
    '漢' => "kan", '館' => "kan", '千' => "sen", '線' => "sen",
    '回' => "kai", '海' => "kai", '道' => "dou", '動' => "dou",
    '商' => "shou", '勝' => "shou", '正' => "sei", '成' => "sei",
    '清' => "sei", '花' => "ka", '家' => "ka", '化' => "ka",
    '黒' => "koku", '刻' => "koku", '神' => "jin",
};

/// Same-reading kanji pools for homophone variant generation.
const HOMOPHONE_KANJI: &[(&str, &[char])] = &[
    ("kou", &['工', '口', '公', '光', '好', '校', '高', '港']),
    ("sha", &['車', '者', '社']),
    ("ji", &['時', '字']),
    ("bun", &['分', '文', '聞']),
    ("tou", &['頭', '東']),
    ("in", &['飲', '院']),
    ("sei", &['生', '正', '成', '清']),
    ("shin", &['新', '心', '真']),
    ("kan", &['間', '感', '漢', '館']),
    ("sen", &['川', '先', '千', '線']),
    ("kai", &['会', '回', '海']),
    ("dou", &['堂', '道', '動']),
    ("shou", &['小', '商', '勝']),
    ("ka", &['火', '花', '家', '化']),
    ("koku", &['国', '黒', '刻']),
    ("jin", &['人', '神']),
];

pub fn kanji_reading(ch: char) -> Option<&'static str> {
    KANJI_READINGS.get(&ch).copied()
}

pub fn kanji_homophones(reading: &str) -> &'static [char] {
    HOMOPHONE_KANJI
        .iter()
        .find(|(r, _)| *r == reading)
        .map(|(_, chars)| *chars)
        .unwrap_or(&[])
}

pub struct RomajiSource;

impl PhoneticSource for RomajiSource {
    fn name(&self) -> &'static str {
        "romaji"
    }

    fn convert(&self, text: &str) -> Result<String> {
        // Full-width romaji (ａｓｕｐｉｒｉｎ) reads the same as ASCII.
        let text = phonofix_core::utils::to_halfwidth(text);
        let mut out = String::new();
        let mut kana_run = String::new();

        let flush = |run: &mut String, out: &mut String| {
            if !run.is_empty() {
                out.push_str(&kana_run_to_romaji(run));
                run.clear();
            }
        };

        for ch in text.chars() {
            if is_kana(ch) {
                kana_run.push(ch);
                continue;
            }
            flush(&mut kana_run, &mut out);
            if is_han(ch) {
                match kanji_reading(ch) {
                    Some(reading) => out.push_str(reading),
                    None => out.push(ch),
                }
            } else if ch.is_ascii_alphanumeric() {
                out.push(ch.to_ascii_lowercase());
            } else if ch.is_whitespace() {
                out.push(' ');
            } else {
                out.push(' ');
            }
        }
        flush(&mut kana_run, &mut out);

        Ok(normalize_romaji(&out))
    }
}

/// Process-wide backend singleton.
pub fn shared_backend() -> Arc<PhoneticBackend> {
    static BACKEND: Lazy<Arc<PhoneticBackend>> =
        Lazy::new(|| Arc::new(PhoneticBackend::new(Box::new(RomajiSource))));
    Arc::clone(&BACKEND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn katakana_and_ascii_share_keys() {
        let source = RomajiSource;
        assert_eq!(
            source.convert("アスピリン").unwrap(),
            source.convert("asupirin").unwrap()
        );
        // Full-width romaji folds before conversion.
        assert_eq!(
            source.convert("ａｓｕｐｉｒｉｎ").unwrap(),
            source.convert("asupirin").unwrap()
        );
    }

    #[test]
    fn kanji_resolve_through_the_reading_table() {
        let source = RomajiSource;
        // toutsuu collapses to totsu under long-vowel normalisation.
        assert_eq!(source.convert("頭痛").unwrap(), "totsu");
        assert_eq!(source.convert("学校").unwrap(), "gakuko");
    }

    #[test]
    fn homophone_pools_are_bundled() {
        assert!(kanji_homophones("kou").contains(&'高'));
        assert!(kanji_homophones("tou").contains(&'東'));
        assert!(kanji_homophones("zzz").is_empty());
        // The bundled table covers at least fifteen readings.
        assert!(HOMOPHONE_KANJI.len() >= 15);
    }
}
