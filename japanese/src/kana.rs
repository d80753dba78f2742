//! Kana transliteration to Hepburn romaji.
//!
//! Katakana folds to hiragana before lookup; small-y digraphs, sokuon
//! gemination and the long-vowel mark are handled positionally.
//! `normalize_romaji` collapses long vowels (ou/oo/ei/ee and doubled
//! vowels) and geminates so that homophone spellings share one key; it is
//! applied both when computing phonetic keys and when generating
//! variants.

use phf::phf_map;

static HIRAGANA_ROMAJI: phf::Map<char, &'static str> = phf_map! {
    'あ' => "a", 'い' => "i", 'う' => "u", 'え' => "e", 'お' => "o",
    'か' => "ka", 'き' => "ki", 'く' => "ku", 'け' => "ke", 'こ' => "ko",
    'さ' => "sa", 'し' => "shi", 'す' => "su", 'せ' => "se", 'そ' => "so",
    'た' => "ta", 'ち' => "chi", 'つ' => "tsu", 'て' => "te", 'と' => "to",
    'な' => "na", 'に' => "ni", 'ぬ' => "nu", 'ね' => "ne", 'の' => "no",
    'は' => "ha", 'ひ' => "hi", 'ふ' => "fu", 'へ' => "he", 'ほ' => "ho",
    'ま' => "ma", 'み' => "mi", 'む' => "mu", 'め' => "me", 'も' => "mo",
    'や' => "ya", 'ゆ' => "yu", 'よ' => "yo",
    'ら' => "ra", 'り' => "ri", 'る' => "ru", 'れ' => "re", 'ろ' => "ro",
    'わ' => "wa", 'ゐ' => "i", 'ゑ' => "e", 'を' => "o", 'ん' => "n",
    'が' => "ga", 'ぎ' => "gi", 'ぐ' => "gu", 'げ' => "ge", 'ご' => "go",
    'ざ' => "za", 'じ' => "ji", 'ず' => "zu", 'ぜ' => "ze", 'ぞ' => "zo",
    'だ' => "da", 'ぢ' => "ji", 'づ' => "zu", 'で' => "de", 'ど' => "do",
    'ば' => "ba", 'び' => "bi", 'ぶ' => "bu", 'べ' => "be", 'ぼ' => "bo",
    'ぱ' => "pa", 'ぴ' => "pi", 'ぷ' => "pu", 'ぺ' => "pe", 'ぽ' => "po",
    'ぁ' => "a", 'ぃ' => "i", 'ぅ' => "u", 'ぇ' => "e", 'ぉ' => "o",
    'ゔ' => "vu",
};

/// Fold katakana into the hiragana range; everything else is unchanged.
pub fn katakana_to_hiragana(ch: char) -> char {
    match ch {
        '\u{30A1}'..='\u{30F6}' => {
            char::from_u32(ch as u32 - 0x60).unwrap_or(ch)
        }
        _ => ch,
    }
}

/// The inverse fold, used to keep variant surfaces in the original
/// script.
pub fn hiragana_to_katakana(ch: char) -> char {
    match ch {
        '\u{3041}'..='\u{3096}' => {
            char::from_u32(ch as u32 + 0x60).unwrap_or(ch)
        }
        _ => ch,
    }
}

pub fn romaji_of(hiragana: char) -> Option<&'static str> {
    HIRAGANA_ROMAJI.get(&hiragana).copied()
}

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// Transliterate a run of kana (hiragana, katakana, ー) to romaji.
pub fn kana_run_to_romaji(run: &str) -> String {
    let chars: Vec<char> = run.chars().map(katakana_to_hiragana).collect();
    let mut out = String::new();
    let mut geminate = false;
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        if ch == 'っ' {
            geminate = true;
            i += 1;
            continue;
        }
        if ch == 'ー' {
            if let Some(v) = out.chars().rev().find(|c| is_vowel(*c)) {
                out.push(v);
            }
            i += 1;
            continue;
        }

        let Some(base) = romaji_of(ch) else {
            out.push(ch);
            i += 1;
            continue;
        };

        let mut romaji = base.to_string();
        let mut consumed = 1;
        if let Some(&next) = chars.get(i + 1) {
            if matches!(next, 'ゃ' | 'ゅ' | 'ょ') && romaji.ends_with('i') {
                let stem = romaji[..romaji.len() - 1].to_string();
                let vowel = match next {
                    'ゃ' => "a",
                    'ゅ' => "u",
                    _ => "o",
                };
                romaji = if stem.ends_with("sh") || stem.ends_with("ch") || stem == "j" {
                    format!("{stem}{vowel}")
                } else {
                    format!("{stem}y{vowel}")
                };
                consumed = 2;
            }
        }

        if geminate {
            if let Some(first) = romaji.chars().next() {
                if !is_vowel(first) {
                    out.push(first);
                }
            }
            geminate = false;
        }
        out.push_str(&romaji);
        i += consumed;
    }
    out
}

/// Collapse long vowels and geminates so homophone spellings share one
/// key: おう/おお -> o, えい/ええ -> e, doubled vowels and consonants
/// fold to one.
pub fn normalize_romaji(romaji: &str) -> String {
    let mut out = String::new();
    for ch in romaji.chars() {
        if let Some(last) = out.chars().last() {
            if last == ch && ch.is_ascii_alphabetic() {
                continue;
            }
            if (last == 'o' && ch == 'u') || (last == 'e' && ch == 'i') {
                continue;
            }
        }
        out.push(ch);
    }
    out
}
