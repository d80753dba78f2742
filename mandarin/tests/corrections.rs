//! End-to-end Mandarin correction scenarios.

use std::collections::BTreeMap;

use phonofix_core::{CorrectorOptions, Event, EventBuffer, PhoneticConfig, TermDict, TermEntry};
use phonofix_mandarin::new_engine;

fn corrections(buffer: &EventBuffer) -> Vec<(usize, usize, String, String)> {
    buffer
        .snapshot()
        .into_iter()
        .filter_map(|e| match e {
            Event::Correction {
                start,
                end,
                surface,
                canonical,
                ..
            } => Some((start, end, surface, canonical)),
            _ => None,
        })
        .collect()
}

#[test]
fn fuzzy_aliases_rewrite_to_canonicals() {
    let engine = new_engine(PhoneticConfig::default());
    let corrector = engine
        .create_corrector(["台北車站", "牛奶", "然後"])
        .unwrap();

    assert_eq!(
        corrector.correct("我在北車買了流奶,蘭後回家"),
        "我在台北車站買了牛奶,然後回家"
    );
}

#[test]
fn keywords_disambiguate_homophone_aliases() {
    let engine = new_engine(PhoneticConfig::default());
    let mut dict = BTreeMap::new();
    dict.insert(
        "永和豆漿".to_string(),
        TermEntry {
            aliases: vec!["永豆".to_string(), "勇豆".to_string()],
            keywords: vec![
                "吃".to_string(),
                "喝".to_string(),
                "買".to_string(),
                "宵夜".to_string(),
            ],
            weight: 0.3,
            ..TermEntry::default()
        },
    );
    dict.insert(
        "勇者鬥惡龍".to_string(),
        TermEntry {
            aliases: vec!["勇鬥".to_string(), "永鬥".to_string()],
            keywords: vec![
                "玩".to_string(),
                "遊戲".to_string(),
                "攻略".to_string(),
            ],
            weight: 0.2,
            ..TermEntry::default()
        },
    );
    let corrector = engine.create_corrector(TermDict::from(dict)).unwrap();

    assert_eq!(
        corrector.correct("我去買永豆當宵夜,然後玩勇鬥遊戲"),
        "我去買永和豆漿當宵夜,然後玩勇者鬥惡龍遊戲"
    );
}

#[test]
fn protected_terms_block_near_misses() {
    let engine = new_engine(PhoneticConfig::default());
    let mut dict = BTreeMap::new();
    dict.insert("台北車站".to_string(), vec!["北車".to_string()]);
    let buffer = EventBuffer::new();
    let mut corrector = engine
        .create_corrector_with(
            TermDict::from(dict),
            CorrectorOptions {
                protected_terms: vec!["北側".to_string()],
                ..CorrectorOptions::default()
            },
        )
        .unwrap();
    corrector.register_observer(buffer.clone());

    assert_eq!(corrector.correct("我在北側等你"), "我在北側等你");
    assert!(buffer.snapshot().is_empty());
}

#[test]
fn canonicals_are_idempotent() {
    let engine = new_engine(PhoneticConfig::default());
    let corrector = engine
        .create_corrector(["台北車站", "牛奶", "然後"])
        .unwrap();

    for canonical in ["台北車站", "牛奶", "然後"] {
        assert_eq!(corrector.correct(canonical), canonical);
    }

    let once = corrector.correct("我在北車買了流奶,蘭後回家");
    let twice = corrector.correct(&once);
    assert_eq!(once, twice);
}

#[test]
fn single_alias_text_rewrites() {
    let engine = new_engine(PhoneticConfig::default());
    let mut dict = BTreeMap::new();
    dict.insert("台北車站".to_string(), vec!["北車".to_string()]);
    let corrector = engine.create_corrector(TermDict::from(dict)).unwrap();
    assert_eq!(corrector.correct("北車"), "台北車站");
}

#[test]
fn events_are_monotone_and_disjoint() {
    let engine = new_engine(PhoneticConfig::default());
    let buffer = EventBuffer::new();
    let mut corrector = engine
        .create_corrector(["台北車站", "牛奶", "然後"])
        .unwrap();
    corrector.register_observer(buffer.clone());

    corrector.correct("我在北車買了流奶,蘭後回家");
    let events = corrections(&buffer);
    assert_eq!(events.len(), 3);
    for pair in events.windows(2) {
        assert!(pair[0].0 < pair[1].0);
        assert!(pair[0].1 <= pair[1].0);
    }
    assert_eq!(events[0].3, "台北車站");
    assert_eq!(events[1].3, "牛奶");
    assert_eq!(events[2].3, "然後");
}

#[test]
fn far_candidates_stay_rejected() {
    let engine = new_engine(PhoneticConfig::default());
    let corrector = engine.create_corrector(["台北車站"]).unwrap();
    // 公園 (gong yuan) is nowhere near tai bei che zhan.
    assert_eq!(corrector.correct("我在公園等你"), "我在公園等你");
}

#[test]
fn determinism_across_correctors() {
    let a = new_engine(PhoneticConfig::default())
        .create_corrector(["台北車站", "牛奶", "然後"])
        .unwrap();
    let b = new_engine(PhoneticConfig::default())
        .create_corrector(["台北車站", "牛奶", "然後"])
        .unwrap();
    let text = "我在北車買了流奶,蘭後回家";
    assert_eq!(a.correct(text), b.correct(text));
}
