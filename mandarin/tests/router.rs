//! Mixed-language routing across the Mandarin and English correctors.

use std::collections::BTreeMap;
use std::sync::Arc;

use phonofix_core::{Language, LanguageRouter, PhoneticConfig, TermDict};

#[test]
fn segments_dispatch_to_their_correctors() {
    let zh = phonofix_mandarin::new_engine(PhoneticConfig::default());
    let mut zh_dict = BTreeMap::new();
    zh_dict.insert("台北車站".to_string(), vec!["北車".to_string()]);
    let zh_corrector = Arc::new(zh.create_corrector(TermDict::from(zh_dict)).unwrap());

    let en = phonofix_english::new_engine(PhoneticConfig::default());
    let mut en_dict = BTreeMap::new();
    en_dict.insert("Python".to_string(), vec!["Pyton".to_string()]);
    let en_corrector = Arc::new(en.create_corrector(TermDict::from(en_dict)).unwrap());

    let router = LanguageRouter::new()
        .with_corrector(Language::Mandarin, zh_corrector)
        .with_corrector(Language::English, en_corrector);

    assert_eq!(
        router.correct("我在北車用Pyton寫程式"),
        "我在台北車站用Python寫程式"
    );
}

#[test]
fn unrouted_segments_pass_through() {
    let zh = phonofix_mandarin::new_engine(PhoneticConfig::default());
    let mut zh_dict = BTreeMap::new();
    zh_dict.insert("台北車站".to_string(), vec!["北車".to_string()]);
    let zh_corrector = Arc::new(zh.create_corrector(TermDict::from(zh_dict)).unwrap());

    let router = LanguageRouter::new().with_corrector(Language::Mandarin, zh_corrector);

    // The Latin segment has no corrector and survives untouched.
    assert_eq!(router.correct("北車 rocks"), "台北車站 rocks");
}

#[test]
fn cross_lingual_prepass_keeps_mixed_spans_whole() {
    let zh = phonofix_mandarin::new_engine(PhoneticConfig::default());
    let zh_corrector = Arc::new(zh.create_corrector(["人工智慧課"]).unwrap());

    let router = LanguageRouter::new()
        .with_corrector(Language::Mandarin, zh_corrector)
        .with_cross_lingual(vec![("AI課".to_string(), "人工智慧課".to_string())]);

    assert_eq!(router.correct("我想上AI課"), "我想上人工智慧課");
}
