use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Deserialize;

use super::{Glyph, RuleContext, RuleEntry, RuleTable};

#[derive(Deserialize)]
struct RulesConfig {
    version: String,
    #[serde(default)]
    consonants: BTreeMap<String, String>,
    #[serde(default)]
    vowels: BTreeMap<String, VowelConfig>,
    #[serde(default)]
    symbols: BTreeMap<String, String>,
    #[serde(default)]
    contextual: Vec<ContextualConfig>,
    #[serde(default)]
    markers: BTreeMap<String, String>,
    #[serde(default)]
    literals: LiteralsConfig,
}

#[derive(Deserialize)]
struct VowelConfig {
    independent: String,
    sign: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum GlyphKind {
    Consonant,
    Vowel,
    Symbol,
}

#[derive(Deserialize)]
struct ContextualConfig {
    pattern: String,
    kind: GlyphKind,
    output: String,
    #[serde(default)]
    sign: Option<String>,
    context: RuleContext,
    #[serde(default)]
    priority: i32,
}

#[derive(Deserialize, Default)]
struct LiteralsConfig {
    #[serde(default)]
    brands: Vec<String>,
    #[serde(default)]
    english: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RuleConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[{0}] table is empty")]
    Empty(&'static str),
    #[error("version must not be empty")]
    EmptyVersion,
    #[error("non-ASCII pattern: {0}")]
    NonAsciiPattern(String),
    #[error("empty pattern in [{0}]")]
    EmptyPattern(&'static str),
    #[error("empty output for pattern: {0}")]
    EmptyOutput(String),
    #[error("more than one inherent vowel (empty sign): {0}")]
    MultipleInherentVowels(String),
    #[error("vowel rule {0} needs a sign")]
    MissingSign(String),
    #[error("marker must be a single lowercase ASCII letter: {0}")]
    InvalidMarker(String),
    #[error("rule table already initialized")]
    AlreadyInitialized,
}

/// Parse TOML text into a ready-to-use [`RuleTable`].
///
/// Entries keep section order (consonants, vowels, symbols, contextual);
/// within a map section they are sorted by pattern.
pub fn parse_rules_toml(toml_str: &str) -> Result<RuleTable, RuleConfigError> {
    let config: RulesConfig =
        toml::from_str(toml_str).map_err(|e| RuleConfigError::Parse(e.to_string()))?;

    if config.version.trim().is_empty() {
        return Err(RuleConfigError::EmptyVersion);
    }
    if config.consonants.is_empty() {
        return Err(RuleConfigError::Empty("consonants"));
    }
    if config.vowels.is_empty() {
        return Err(RuleConfigError::Empty("vowels"));
    }

    let mut entries = Vec::with_capacity(
        config.consonants.len()
            + config.vowels.len()
            + config.symbols.len()
            + config.contextual.len(),
    );

    for (pattern, output) in config.consonants {
        check_pattern("consonants", &pattern)?;
        check_output(&pattern, &output)?;
        entries.push(RuleEntry::any(pattern, Glyph::Consonant(output)));
    }

    let mut inherent: Option<String> = None;
    for (pattern, vowel) in config.vowels {
        check_pattern("vowels", &pattern)?;
        check_output(&pattern, &vowel.independent)?;
        if vowel.sign.is_empty() {
            if inherent.is_some() {
                return Err(RuleConfigError::MultipleInherentVowels(pattern));
            }
            inherent = Some(pattern.clone());
        }
        entries.push(RuleEntry::any(
            pattern,
            Glyph::Vowel {
                independent: vowel.independent,
                sign: vowel.sign,
            },
        ));
    }

    for (pattern, output) in config.symbols {
        check_pattern("symbols", &pattern)?;
        check_output(&pattern, &output)?;
        entries.push(RuleEntry::any(pattern, Glyph::Symbol(output)));
    }

    for rule in config.contextual {
        check_pattern("contextual", &rule.pattern)?;
        check_output(&rule.pattern, &rule.output)?;
        let glyph = match rule.kind {
            GlyphKind::Consonant => Glyph::Consonant(rule.output),
            GlyphKind::Symbol => Glyph::Symbol(rule.output),
            GlyphKind::Vowel => {
                let sign = rule
                    .sign
                    .ok_or_else(|| RuleConfigError::MissingSign(rule.pattern.clone()))?;
                Glyph::Vowel {
                    independent: rule.output,
                    sign,
                }
            }
        };
        entries.push(RuleEntry {
            pattern: rule.pattern,
            glyph,
            context: rule.context,
            priority: rule.priority,
        });
    }

    let mut markers = HashMap::with_capacity(config.markers.len());
    for (key, glyph) in config.markers {
        let mut chars = key.chars();
        let marker = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => c,
            _ => return Err(RuleConfigError::InvalidMarker(key)),
        };
        check_output(&key, &glyph)?;
        markers.insert(marker, glyph);
    }

    let brands: HashSet<String> = config.literals.brands.into_iter().collect();
    let english: HashSet<String> = config
        .literals
        .english
        .into_iter()
        .map(|w| w.to_ascii_lowercase())
        .collect();

    Ok(RuleTable::new(
        config.version,
        entries,
        markers,
        brands,
        english,
    ))
}

fn check_pattern(section: &'static str, pattern: &str) -> Result<(), RuleConfigError> {
    if pattern.is_empty() {
        return Err(RuleConfigError::EmptyPattern(section));
    }
    if !pattern.is_ascii() {
        return Err(RuleConfigError::NonAsciiPattern(pattern.to_string()));
    }
    Ok(())
}

fn check_output(pattern: &str, output: &str) -> Result<(), RuleConfigError> {
    if output.is_empty() {
        return Err(RuleConfigError::EmptyOutput(pattern.to_string()));
    }
    Ok(())
}
