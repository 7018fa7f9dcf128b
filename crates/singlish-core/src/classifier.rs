//! Word-level decision between transliteration and literal passthrough.
//!
//! The decision is heuristic; [`Classifier`] is the seam for swapping it
//! without touching the transliterator.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::rules::RuleTable;
use crate::settings::ClassifierSettings;
use crate::tokenizer::Token;
use crate::unicode::contains_sinhala;

/// Spellings that only show up in phonetic Singlish, used to admit a
/// capitalized sentence-initial word.
const SINGLISH_MARKERS: [&str; 8] = ["aa", "ee", "ii", "oo", "uu", "ae", "dh", "th"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreserveReason {
    /// Already contains Sinhala script.
    NativeScript,
    /// Pinned by the caller.
    Pinned,
    Brand,
    /// Known English word.
    Vocabulary,
    Acronym,
    Capitalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "reason")]
pub enum Disposition {
    Transliterate,
    PreserveLiteral(PreserveReason),
}

impl Disposition {
    pub fn is_transliterate(self) -> bool {
        self == Disposition::Transliterate
    }
}

/// Position of a word relative to the surrounding text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordContext {
    /// First word of the buffer, or first word after `.`, `!`, `?` or a line break.
    pub sentence_initial: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifiedWord<'a> {
    pub token: Token<'a>,
    pub disposition: Disposition,
}

pub trait Classifier: Send + Sync {
    fn classify(&self, word: &str, ctx: WordContext) -> Disposition;

    fn classify_token<'a>(&self, token: Token<'a>, ctx: WordContext) -> ClassifiedWord<'a> {
        ClassifiedWord {
            token,
            disposition: self.classify(token.text, ctx),
        }
    }
}

/// Default strategy: native-script check, allow-lists from the rule table,
/// then casing heuristics.
pub struct HeuristicClassifier {
    rules: Arc<RuleTable>,
    pinned: HashSet<String>,
    min_acronym_len: usize,
    sentence_initial_transliteration: bool,
}

impl HeuristicClassifier {
    pub fn new(rules: Arc<RuleTable>, settings: &ClassifierSettings) -> Self {
        Self {
            rules,
            pinned: HashSet::new(),
            min_acronym_len: settings.min_acronym_len,
            sentence_initial_transliteration: settings.sentence_initial_transliteration,
        }
    }

    pub fn with_pinned<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pinned.extend(words.into_iter().map(Into::into));
        self
    }

    fn is_acronym(&self, word: &str) -> bool {
        word.chars().count() >= self.min_acronym_len
            && word.chars().all(|c| c.is_ascii_uppercase())
    }

    fn capitalized_disposition(&self, word: &str, ctx: WordContext) -> Disposition {
        let camel_case = word.chars().skip(1).any(|c| c.is_ascii_uppercase());
        if ctx.sentence_initial
            && self.sentence_initial_transliteration
            && !camel_case
            && looks_singlish(&word.to_ascii_lowercase())
        {
            Disposition::Transliterate
        } else {
            Disposition::PreserveLiteral(PreserveReason::Capitalized)
        }
    }
}

impl Classifier for HeuristicClassifier {
    fn classify(&self, word: &str, ctx: WordContext) -> Disposition {
        use PreserveReason::*;

        if contains_sinhala(word) || !word.is_ascii() {
            return Disposition::PreserveLiteral(NativeScript);
        }
        if self.pinned.contains(word) {
            return Disposition::PreserveLiteral(Pinned);
        }
        if self.rules.is_brand(word) {
            return Disposition::PreserveLiteral(Brand);
        }
        if self.is_acronym(word) {
            return Disposition::PreserveLiteral(Acronym);
        }
        if self.rules.is_english(&word.to_ascii_lowercase()) {
            return Disposition::PreserveLiteral(Vocabulary);
        }
        if word.starts_with(|c: char| c.is_ascii_uppercase()) {
            return self.capitalized_disposition(word, ctx);
        }
        Disposition::Transliterate
    }
}

fn looks_singlish(lower: &str) -> bool {
    SINGLISH_MARKERS.iter().any(|m| lower.contains(m)) || lower.ends_with('a')
}
