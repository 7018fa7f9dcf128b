//! Loading alternate rule tables and settings from disk.

use std::io::Write;
use std::sync::Arc;

use crate::rules::{RuleConfigError, RuleTable};
use crate::settings::parse_settings_toml;
use crate::Engine;

const DIALECT_TOML: &str = r#"
version = "dialect-test"

[consonants]
k = "ක"
m = "ම"
t = "ට"

[vowels]
a = { independent = "අ", sign = "" }
aa = { independent = "ආ", sign = "ා" }

[markers]
k = "ක්"

[literals]
brands = ["Kotte"]
english = ["Kat"]
"#;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_rules_from_file() {
    let file = write_temp(DIALECT_TOML);
    let content = std::fs::read_to_string(file.path()).unwrap();
    let rules = Arc::new(RuleTable::from_toml(&content).unwrap());
    assert_eq!(rules.version(), "dialect-test");

    let engine = Engine::new(rules);
    assert_eq!(engine.convert("maata 3k"), "මාට 3ක්");
    // english entries are matched lowercased
    assert_eq!(engine.convert("kat Kotte"), "kat Kotte");
}

#[test]
fn test_default_rules_roundtrip_through_file() {
    let file = write_temp(crate::rules::default_toml());
    let content = std::fs::read_to_string(file.path()).unwrap();
    let rules = RuleTable::from_toml(&content).unwrap();
    assert_eq!(rules.len(), RuleTable::default_shared().len());
}

#[test]
fn test_broken_rules_file_is_rejected() {
    let file = write_temp("version = \"x\"\n[consonants]\n");
    let content = std::fs::read_to_string(file.path()).unwrap();
    assert!(matches!(
        RuleTable::from_toml(&content),
        Err(RuleConfigError::Empty(_))
    ));
}

#[test]
fn test_settings_disable_sentence_initial_transliteration() {
    let settings = parse_settings_toml(
        r#"
[classifier]
min_acronym_len = 2
sentence_initial_transliteration = false

[composition]
rakaransaya = true
yansaya = true

[controller]
debounce_ms = 150
"#,
    )
    .unwrap();
    let engine = Engine::builder().settings(settings).build();
    assert_eq!(engine.convert("Oyaa enne"), "Oyaa එන්නෙ");
}
