//! Phoneme rule table.
//!
//! Maps Latin spellings to Sinhala glyphs. The table is loaded from TOML
//! once and shared read-only through `Arc`; an embedded default is used
//! unless `init_custom` is called before the first `default_shared()`.

mod config;
mod trie;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

pub use config::{parse_rules_toml, RuleConfigError};
use trie::RuleTrie;

pub const DEFAULT_RULES_TOML: &str = include_str!("default_rules.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Returns the embedded default rule table TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_RULES_TOML
}

/// Where inside a token a pattern may match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleContext {
    /// Match must start at the first character.
    Initial,
    /// Match must neither start the token nor reach its end.
    Medial,
    /// Match must end at the last character without starting the token.
    Final,
    Any,
}

impl RuleContext {
    /// Whether a match spanning `start..end` of a `len`-char token is allowed.
    pub fn admits(self, start: usize, end: usize, len: usize) -> bool {
        match self {
            RuleContext::Any => true,
            RuleContext::Initial => start == 0,
            RuleContext::Final => start != 0 && end == len,
            RuleContext::Medial => start != 0 && end != len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Glyph {
    Consonant(String),
    /// `sign` is empty for the inherent vowel.
    Vowel { independent: String, sign: String },
    Symbol(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleEntry {
    pub pattern: String,
    pub glyph: Glyph,
    pub context: RuleContext,
    pub priority: i32,
}

impl RuleEntry {
    pub(crate) fn any(pattern: String, glyph: Glyph) -> Self {
        Self {
            pattern,
            glyph,
            context: RuleContext::Any,
            priority: 0,
        }
    }
}

/// A rule selected at a cursor position; `len` counts chars.
#[derive(Debug, Clone, Copy)]
pub struct Match<'t> {
    pub rule: &'t RuleEntry,
    pub len: usize,
}

pub struct RuleTable {
    version: String,
    entries: Vec<RuleEntry>,
    trie: RuleTrie,
    markers: HashMap<char, String>,
    brands: HashSet<String>,
    english: HashSet<String>,
}

impl std::fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleTable")
            .field("version", &self.version)
            .field("entries", &self.entries.len())
            .field("markers", &self.markers.len())
            .field("brands", &self.brands.len())
            .field("english", &self.english.len())
            .finish()
    }
}

impl RuleTable {
    pub(crate) fn new(
        version: String,
        entries: Vec<RuleEntry>,
        markers: HashMap<char, String>,
        brands: HashSet<String>,
        english: HashSet<String>,
    ) -> Self {
        let trie = RuleTrie::build(&entries);
        Self {
            version,
            entries,
            trie,
            markers,
            brands,
            english,
        }
    }

    /// Parse a table from TOML text.
    pub fn from_toml(toml_str: &str) -> Result<Self, RuleConfigError> {
        parse_rules_toml(toml_str)
    }

    /// Set custom TOML before first `default_shared()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RuleConfigError> {
        // Validate eagerly
        parse_rules_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RuleConfigError::AlreadyInitialized)
    }

    /// Get or initialize the process-wide table.
    pub fn default_shared() -> Arc<RuleTable> {
        static INSTANCE: OnceLock<Arc<RuleTable>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                let toml_str = CUSTOM_TOML
                    .get()
                    .map(|s| s.as_str())
                    .unwrap_or(DEFAULT_RULES_TOML);
                Arc::new(parse_rules_toml(toml_str).expect("rule TOML must be valid"))
            })
            .clone()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn entries(&self) -> &[RuleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Length of the longest pattern, in chars.
    pub fn max_pattern_len(&self) -> usize {
        self.trie.max_depth()
    }

    /// Longest rule matching `chars` at `cursor`, honoring rule contexts.
    pub fn longest_match(&self, chars: &[char], cursor: usize) -> Option<Match<'_>> {
        self.trie
            .longest_match(&self.entries, chars, cursor)
            .map(|(idx, len)| Match {
                rule: &self.entries[idx],
                len,
            })
    }

    /// Classifier glyph for a numeral marker letter.
    pub fn marker(&self, letter: char) -> Option<&str> {
        self.markers.get(&letter).map(String::as_str)
    }

    /// Case-sensitive brand / proper-noun lookup.
    pub fn is_brand(&self, word: &str) -> bool {
        self.brands.contains(word)
    }

    /// English vocabulary lookup; `word` is expected in lowercase.
    pub fn is_english(&self, word: &str) -> bool {
        self.english.contains(word)
    }
}
