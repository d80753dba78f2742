//! Fuzzy rule tables for Mandarin Pinyin.
//!
//! Initial groups cover the retroflex and liquid confusions common in
//! Taiwanese and southern-accented Mandarin; final pairs cover front/back
//! nasal merges; the special-syllable map covers whole-syllable
//! substitutions that do not decompose into an initial or final swap.

/// Mutually confusable initials.
pub const FUZZY_INITIAL_GROUPS: &[&[&str]] = &[
    &["z", "zh"],
    &["c", "ch"],
    &["s", "sh"],
    &["n", "l"],
    &["r", "l"],
    &["f", "h"],
];

/// Mutually confusable finals.
pub const FUZZY_FINAL_PAIRS: &[(&str, &str)] = &[
    ("in", "ing"),
    ("en", "eng"),
    ("an", "ang"),
    ("ian", "iang"),
    ("uan", "uang"),
    ("uan", "an"),
    ("ong", "eng"),
    ("uo", "o"),
    ("ue", "ie"),
];

/// Whole-syllable substitutions.
pub const SPECIAL_SYLLABLES: &[(&str, &str)] = &[
    ("fa", "hua"),
    ("hua", "fa"),
    ("xue", "xie"),
    ("xie", "xue"),
    ("ran", "lan"),
    ("ran", "yan"),
];

/// Pinyin initials, longest first so `zh`/`ch`/`sh` win over `z`/`c`/`s`.
const INITIALS: &[&str] = &[
    "zh", "ch", "sh", "b", "p", "m", "f", "d", "t", "n", "l", "g", "k", "h", "j", "q", "x", "r",
    "z", "c", "s", "y", "w",
];

/// Split a syllable into `(initial, final)`. Zero-initial syllables
/// return an empty initial.
pub fn split_syllable(syllable: &str) -> (&str, &str) {
    for initial in INITIALS {
        if let Some(rest) = syllable.strip_prefix(initial) {
            if !rest.is_empty() {
                return (initial, rest);
            }
        }
    }
    ("", syllable)
}

/// Fuzzy alternatives for one syllable, excluding the syllable itself.
/// `is_special` marks whole-syllable substitutions from the special map.
pub fn syllable_alternatives(
    syllable: &str,
    extra_initial_pairs: &[(String, String)],
    extra_final_pairs: &[(String, String)],
) -> Vec<(String, bool)> {
    let mut out: Vec<(String, bool)> = Vec::new();
    let push = |alt: String, special: bool, out: &mut Vec<(String, bool)>| {
        if alt != syllable && !out.iter().any(|(existing, _)| *existing == alt) {
            out.push((alt, special));
        }
    };

    let (initial, final_) = split_syllable(syllable);

    for group in FUZZY_INITIAL_GROUPS {
        if group.contains(&initial) {
            for other in *group {
                if *other != initial {
                    push(format!("{other}{final_}"), false, &mut out);
                }
            }
        }
    }
    for (a, b) in extra_initial_pairs {
        if initial == a {
            push(format!("{b}{final_}"), false, &mut out);
        } else if initial == b {
            push(format!("{a}{final_}"), false, &mut out);
        }
    }

    for (a, b) in FUZZY_FINAL_PAIRS {
        if final_ == *a {
            push(format!("{initial}{b}"), false, &mut out);
        } else if final_ == *b {
            push(format!("{initial}{a}"), false, &mut out);
        }
    }
    for (a, b) in extra_final_pairs {
        if final_ == a {
            push(format!("{initial}{b}"), false, &mut out);
        } else if final_ == b {
            push(format!("{initial}{a}"), false, &mut out);
        }
    }

    for (from, to) in SPECIAL_SYLLABLES {
        if syllable == *from {
            push((*to).to_string(), true, &mut out);
        }
    }

    out
}
