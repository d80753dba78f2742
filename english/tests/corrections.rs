//! End-to-end English correction scenarios.

use std::collections::BTreeMap;

use phonofix_core::{Event, EventBuffer, PhoneticConfig, TermDict, TermEntry};
use phonofix_english::new_engine;

#[test]
fn phoneme_similar_and_syllable_split_aliases() {
    let engine = new_engine(PhoneticConfig::default());
    let mut dict = BTreeMap::new();
    dict.insert(
        "TensorFlow".to_string(),
        vec!["ten so floor".to_string()],
    );
    dict.insert("Python".to_string(), vec!["Pyton".to_string()]);
    let corrector = engine.create_corrector(TermDict::from(dict)).unwrap();

    assert_eq!(
        corrector.correct("I use Pyton to write ten so floor code"),
        "I use Python to write TensorFlow code"
    );
}

#[test]
fn exclusion_dominates_keywords() {
    let engine = new_engine(PhoneticConfig::default());
    let mut dict = BTreeMap::new();
    dict.insert(
        "EKG".to_string(),
        TermEntry {
            aliases: vec!["1kg".to_string()],
            keywords: vec!["設備".to_string(), "醫療".to_string()],
            exclude_when: vec!["重".to_string(), "公斤".to_string()],
            ..TermEntry::default()
        },
    );
    let corrector = engine.create_corrector(TermDict::from(dict)).unwrap();

    // Excluded by 重 next to the span.
    assert_eq!(corrector.correct("這個設備有 1kg重"), "這個設備有 1kg重");
    // Keyword adjacent, no exclusion: rewritten.
    assert_eq!(corrector.correct("這個 1kg設備"), "這個 EKG設備");
    // Keywords configured but absent: rejected.
    assert_eq!(corrector.correct("買了 1kg的東西"), "買了 1kg的東西");
}

#[test]
fn surface_matches_respect_word_boundaries() {
    let engine = new_engine(PhoneticConfig::default());
    let mut dict = BTreeMap::new();
    dict.insert("Python".to_string(), vec!["Pyton".to_string()]);
    let corrector = engine.create_corrector(TermDict::from(dict)).unwrap();

    // "Pyton" embedded in a longer word is not an exact hit, and the
    // whole word is too far phonetically to pass the tolerance.
    assert_eq!(corrector.correct("Pytonizer tool"), "Pytonizer tool");
}

#[test]
fn near_misses_beyond_tolerance_stay_put() {
    let engine = new_engine(PhoneticConfig::default());
    let corrector = engine.create_corrector(["Python"]).unwrap();
    // "parrot" is a surface near-miss of nothing phonetic here.
    assert_eq!(corrector.correct("a parrot speaks"), "a parrot speaks");
}

#[test]
fn case_insensitive_alias_hits() {
    let engine = new_engine(PhoneticConfig::default());
    let mut dict = BTreeMap::new();
    dict.insert("Python".to_string(), vec!["Pyton".to_string()]);
    let corrector = engine.create_corrector(TermDict::from(dict)).unwrap();
    assert_eq!(corrector.correct("pyton rocks"), "Python rocks");
}

#[test]
fn canonical_text_is_left_alone() {
    let engine = new_engine(PhoneticConfig::default());
    let mut dict = BTreeMap::new();
    dict.insert(
        "TensorFlow".to_string(),
        vec!["ten so floor".to_string()],
    );
    dict.insert("Python".to_string(), vec!["Pyton".to_string()]);
    let buffer = EventBuffer::new();
    let mut corrector = engine.create_corrector(TermDict::from(dict)).unwrap();
    corrector.register_observer(buffer.clone());

    let text = "I use Python to write TensorFlow code";
    assert_eq!(corrector.correct(text), text);
    assert!(!buffer
        .snapshot()
        .iter()
        .any(|e| matches!(e, Event::Correction { .. })));
}

#[test]
fn double_correction_is_stable() {
    let engine = new_engine(PhoneticConfig::default());
    let mut dict = BTreeMap::new();
    dict.insert(
        "TensorFlow".to_string(),
        vec!["ten so floor".to_string()],
    );
    dict.insert("Python".to_string(), vec!["Pyton".to_string()]);
    let corrector = engine.create_corrector(TermDict::from(dict)).unwrap();

    let once = corrector.correct("I use Pyton to write ten so floor code");
    let twice = corrector.correct(&once);
    assert_eq!(once, twice);
}
