//! Phoneme confusion rules and the phoneme-to-grapheme back-projection
//! table for English.

/// Symmetric confusion pairs: voicing, similar phones, vowel length.
pub const PHONEME_PAIRS: &[(&str, &str)] = &[
    // Voicing
    ("p", "b"),
    ("t", "d"),
    ("k", "ɡ"),
    ("f", "v"),
    ("s", "z"),
    ("θ", "ð"),
    ("ʃ", "ʒ"),
    // Similar phones
    ("θ", "f"),
    ("θ", "s"),
    ("l", "r"),
    ("v", "w"),
    ("ð", "z"),
    // Vowel length
    ("iː", "ɪ"),
    ("uː", "ʊ"),
    ("ɔː", "ɒ"),
    ("ɑː", "ʌ"),
    ("ɜː", "ə"),
];

/// Directional reductions.
pub const REDUCTIONS: &[(&str, &str)] = &[("ɪŋ", "ɪn"), ("ər", "ə")];

/// Multi-character phonemes, longest first, for key tokenisation.
const MULTI_PHONEMES: &[&str] = &[
    "iː", "uː", "ɔː", "ɑː", "ɜː", "eɪ", "aʊ", "əʊ", "aɪ", "ɔɪ", "tʃ", "dʒ", "ɪŋ", "ər",
];

/// Split an IPA string into phoneme tokens; unknown characters stand
/// alone.
pub fn tokenize_phonemes(ipa: &str) -> Vec<String> {
    let chars: Vec<char> = ipa.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let mut matched = false;
        for phoneme in MULTI_PHONEMES {
            let len = phoneme.chars().count();
            if i + len <= chars.len() && chars[i..i + len].iter().collect::<String>() == **phoneme {
                out.push((*phoneme).to_string());
                i += len;
                matched = true;
                break;
            }
        }
        if !matched {
            out.push(chars[i].to_string());
            i += 1;
        }
    }
    out
}

/// Default spelling per phoneme for back-projection.
const GRAPHEMES: &[(&str, &str)] = &[
    ("θ", "th"),
    ("ð", "th"),
    ("ʃ", "sh"),
    ("ʒ", "s"),
    ("tʃ", "ch"),
    ("dʒ", "j"),
    ("ŋ", "ng"),
    ("iː", "ee"),
    ("uː", "oo"),
    ("ɔː", "or"),
    ("ɑː", "ar"),
    ("ɜː", "ir"),
    ("eɪ", "ay"),
    ("aʊ", "ow"),
    ("əʊ", "o"),
    ("aɪ", "i"),
    ("ɔɪ", "oy"),
    ("ɪŋ", "ing"),
    ("ər", "er"),
    ("æ", "a"),
    ("ɛ", "e"),
    ("ɪ", "i"),
    ("ɒ", "o"),
    ("ʌ", "u"),
    ("ə", "e"),
    ("ʊ", "u"),
    ("ɡ", "g"),
];

/// Back-project an IPA key (possibly multi-word) to a representative
/// surface spelling.
pub fn ipa_to_surface(ipa: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    for word in ipa.split(' ') {
        let mut surface = String::new();
        for token in tokenize_phonemes(word) {
            match GRAPHEMES.iter().find(|(p, _)| **p == token) {
                Some((_, spelling)) => surface.push_str(spelling),
                None => surface.push_str(&token),
            }
        }
        words.push(surface);
    }
    words.join(" ")
}

/// Letter -> lookalike/soundalike digit, used for acronym confusions
/// (EKG <-> 1kg).
pub const DIGIT_LETTER_PAIRS: &[(char, char)] = &[('e', '1'), ('i', '1'), ('o', '0'), ('b', '8'), ('a', '4')];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_long_vowels_and_affricates() {
        assert_eq!(
            tokenize_phonemes("tʃiːz"),
            vec!["tʃ".to_string(), "iː".to_string(), "z".to_string()]
        );
        assert_eq!(tokenize_phonemes("pɪθɒn").len(), 5);
    }

    #[test]
    fn back_projection_spells_thorn_as_th() {
        assert_eq!(ipa_to_surface("pɪθɒn"), "pithon");
        assert_eq!(ipa_to_surface("tɛn sɒ"), "ten so");
    }
}
