//! Longest-match phonetic transliteration with Sinhala glyph composition.
//!
//! A single cursor walks the word left to right. After a consonant the
//! engine remembers that the glyph is "bare" (still carrying its inherent
//! vowel slot); what comes next decides whether it receives a vowel sign,
//! joins the following consonant with a virama, or is closed at the end.

use serde::Serialize;
use tracing::trace;

use crate::rules::{Glyph, RuleTable};
use crate::settings::CompositionSettings;
use crate::unicode::{VIRAMA, ZWJ};

const RAYANNA: &str = "ර";
const YAYANNA: &str = "ය";

/// One cursor advance, recorded for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Source characters consumed.
    pub source: String,
    /// Pattern of the rule that fired; `None` for an unmapped character.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Text appended to the output by this step.
    pub emitted: String,
}

pub struct Transliterator<'r> {
    rules: &'r RuleTable,
    composition: CompositionSettings,
}

impl<'r> Transliterator<'r> {
    pub fn new(rules: &'r RuleTable, composition: CompositionSettings) -> Self {
        Self { rules, composition }
    }

    pub fn transliterate(&self, word: &str) -> String {
        self.compose(word, None)
    }

    /// Like [`transliterate`](Self::transliterate), also returning every step taken.
    pub fn transliterate_traced(&self, word: &str) -> (String, Vec<Step>) {
        let mut steps = Vec::new();
        let out = self.compose(word, Some(&mut steps));
        (out, steps)
    }

    fn joins_with_zwj(&self, previous: &str, next: &str) -> bool {
        previous != next
            && ((self.composition.rakaransaya && next == RAYANNA)
                || (self.composition.yansaya && next == YAYANNA))
    }

    fn compose(&self, word: &str, mut steps: Option<&mut Vec<Step>>) -> String {
        let chars: Vec<char> = word.chars().collect();
        let mut out = String::with_capacity(word.len() * 3);
        // Consonant text still waiting for a vowel, if any.
        let mut bare: Option<&str> = None;
        let mut cursor = 0;

        while cursor < chars.len() {
            let before = out.len();
            let consumed;
            let mut pattern = None;

            match self.rules.longest_match(&chars, cursor) {
                Some(m) => {
                    match &m.rule.glyph {
                        Glyph::Consonant(text) => {
                            if let Some(previous) = bare {
                                out.push(VIRAMA);
                                if self.joins_with_zwj(previous, text) {
                                    out.push(ZWJ);
                                }
                            }
                            out.push_str(text);
                            bare = Some(text.as_str());
                        }
                        Glyph::Vowel { independent, sign } => {
                            if bare.take().is_some() {
                                out.push_str(sign);
                            } else {
                                out.push_str(independent);
                            }
                        }
                        Glyph::Symbol(text) => {
                            // a bare consonant keeps its inherent vowel
                            bare = None;
                            out.push_str(text);
                        }
                    }
                    consumed = m.len;
                    pattern = Some(m.rule.pattern.clone());
                }
                None => {
                    if bare.take().is_some() {
                        out.push(VIRAMA);
                    }
                    out.push(chars[cursor]);
                    consumed = 1;
                }
            }

            if let Some(steps) = steps.as_deref_mut() {
                steps.push(Step {
                    source: chars[cursor..cursor + consumed].iter().collect(),
                    pattern,
                    emitted: out[before..].to_string(),
                });
            }
            cursor += consumed;
        }

        if bare.is_some() {
            out.push(VIRAMA);
            if let Some(last) = steps.as_deref_mut().and_then(|s| s.last_mut()) {
                last.emitted.push(VIRAMA);
            }
        }
        trace!(word = %word, output = %out, "transliterated");
        out
    }
}
