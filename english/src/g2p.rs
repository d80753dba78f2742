//! Rule-based grapheme -> IPA approximation.
//!
//! Not a pronunciation dictionary: a deterministic letter-to-phoneme
//! mapping good enough to put dictionary terms and input windows into the
//! same phonetic space. Digraphs and vowel teams apply longest-first,
//! soft `c` and word-initial `y` are special-cased, a silent final `e` is
//! stripped. Digits spell out as their names so unit strings like `1kg`
//! stay comparable.

/// Ordered digraph/trigraph table; first match wins.
const DIGRAPHS: &[(&str, &str)] = &[
    ("tch", "tʃ"),
    ("igh", "aɪ"),
    ("ch", "tʃ"),
    ("sh", "ʃ"),
    ("th", "θ"),
    ("ph", "f"),
    ("wh", "w"),
    ("ck", "k"),
    ("ng", "ŋ"),
    ("qu", "kw"),
    ("ee", "iː"),
    ("ea", "iː"),
    ("oo", "uː"),
    ("ou", "aʊ"),
    ("ow", "aʊ"),
    ("ai", "eɪ"),
    ("ay", "eɪ"),
    ("oa", "əʊ"),
    ("oe", "əʊ"),
    ("oy", "ɔɪ"),
    ("oi", "ɔɪ"),
    ("au", "ɔː"),
    ("aw", "ɔː"),
    ("ar", "ɑː"),
    ("or", "ɔː"),
    ("er", "ə"),
    ("ir", "ɜː"),
    ("ur", "ɜː"),
];

fn letter_to_ipa(ch: char, word_initial: bool) -> Option<&'static str> {
    Some(match ch {
        'a' => "æ",
        'b' => "b",
        'c' => "k",
        'd' => "d",
        'e' => "ɛ",
        'f' => "f",
        'g' => "ɡ",
        'h' => "h",
        'i' => "ɪ",
        'j' => "dʒ",
        'k' => "k",
        'l' => "l",
        'm' => "m",
        'n' => "n",
        'o' => "ɒ",
        'p' => "p",
        'q' => "k",
        'r' => "r",
        's' => "s",
        't' => "t",
        'u' => "ʌ",
        'v' => "v",
        'w' => "w",
        'x' => "ks",
        'y' => {
            if word_initial {
                "j"
            } else {
                "ɪ"
            }
        }
        'z' => "z",
        _ => return None,
    })
}

fn digit_to_ipa(ch: char) -> Option<&'static str> {
    Some(match ch {
        '0' => "zɪərəʊ",
        '1' => "wʌn",
        '2' => "tuː",
        '3' => "θriː",
        '4' => "fɔː",
        '5' => "faɪv",
        '6' => "sɪks",
        '7' => "sɛvən",
        '8' => "eɪt",
        '9' => "naɪn",
        _ => return None,
    })
}

/// Convert one word. Unknown characters (CJK in mixed text) pass through
/// unchanged so they still count against the edit distance.
pub fn word_to_ipa(word: &str) -> String {
    let lower = word.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();

    // Silent final e after a consonant.
    let effective_len = if chars.len() > 3
        && chars.last() == Some(&'e')
        && chars
            .get(chars.len() - 2)
            .is_some_and(|c| !"aeiou".contains(*c) && c.is_ascii_alphabetic())
    {
        chars.len() - 1
    } else {
        chars.len()
    };

    let mut out = String::new();
    let mut i = 0;
    'outer: while i < effective_len {
        let rest: String = chars[i..effective_len].iter().collect();
        for (pattern, ipa) in DIGRAPHS {
            if rest.starts_with(pattern) {
                out.push_str(ipa);
                i += pattern.chars().count();
                continue 'outer;
            }
        }

        let ch = chars[i];
        // Soft c before e/i/y.
        if ch == 'c'
            && chars
                .get(i + 1)
                .is_some_and(|c| matches!(c, 'e' | 'i' | 'y'))
        {
            out.push('s');
            i += 1;
            continue;
        }
        if let Some(ipa) = letter_to_ipa(ch, i == 0) {
            out.push_str(ipa);
        } else if let Some(ipa) = digit_to_ipa(ch) {
            out.push_str(ipa);
        } else {
            out.push(ch);
        }
        i += 1;
    }
    out
}

/// Convert running text: word-character runs become IPA words joined by
/// single spaces.
pub fn text_to_ipa(text: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_alphanumeric() || ch == '\'' {
            current.push(ch);
        } else if !current.is_empty() {
            words.push(word_to_ipa(&current));
            current.clear();
        }
    }
    if !current.is_empty() {
        words.push(word_to_ipa(&current));
    }
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digraphs_and_soft_c() {
        assert_eq!(word_to_ipa("python"), "pɪθɒn");
        assert_eq!(word_to_ipa("pyton"), "pɪtɒn");
        assert_eq!(word_to_ipa("city"), "sɪtɪ");
        assert_eq!(word_to_ipa("ship"), "ʃɪp");
    }

    #[test]
    fn silent_final_e() {
        assert_eq!(word_to_ipa("care"), "kɑː");
        // Short words keep their e.
        assert_eq!(word_to_ipa("the"), "θɛ");
    }

    #[test]
    fn digits_spell_out() {
        assert_eq!(word_to_ipa("1kg"), "wʌnkɡ");
    }

    #[test]
    fn text_joins_words() {
        assert_eq!(text_to_ipa("ten so"), "tɛn sɒ");
        assert_eq!(text_to_ipa("I use Python."), "ɪ ʌsɛ pɪθɒn");
    }
}
