use std::borrow::Cow;
use std::sync::Arc;

use tracing::{debug, debug_span};

use crate::assemble::{assemble, Piece};
use crate::classifier::{
    ClassifiedWord, Classifier, Disposition, HeuristicClassifier, PreserveReason, WordContext,
};
use crate::literal::format_literal;
use crate::rules::RuleTable;
use crate::settings::{settings, Settings};
use crate::tokenizer::{tokenize, Token, TokenKind};
use crate::transliterate::{Step, Transliterator};
use crate::unicode::{contains_sinhala, is_sentence_terminal};

/// A token after classification and rendering.
pub(crate) struct RenderedToken<'a> {
    pub piece: Piece<'a>,
    pub disposition: Option<Disposition>,
    pub steps: Vec<Step>,
}

/// Singlish → Sinhala converter.
///
/// Holds a shared, read-only rule table and a classification strategy.
/// `convert` is a pure function of its input: no state survives between
/// calls, so one engine can serve any number of threads.
pub struct Engine {
    rules: Arc<RuleTable>,
    settings: Settings,
    classifier: Box<dyn Classifier>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("rules", &self.rules)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Engine over `rules` with global settings and the heuristic classifier.
    pub fn new(rules: Arc<RuleTable>) -> Self {
        Self::builder().rules(rules).build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn rules(&self) -> &Arc<RuleTable> {
        &self.rules
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Convert a whole buffer. Total and deterministic; empty in, empty out.
    pub fn convert(&self, buffer: &str) -> String {
        let _span = debug_span!("convert", len = buffer.len()).entered();
        let pieces: Vec<Piece<'_>> = self
            .render(buffer, false)
            .into_iter()
            .map(|r| r.piece)
            .collect();
        debug!(token_count = pieces.len());
        assemble(&pieces)
    }

    pub(crate) fn render<'a>(&self, buffer: &'a str, traced: bool) -> Vec<RenderedToken<'a>> {
        let transliterator = Transliterator::new(&self.rules, self.settings.composition);
        let mut sentence_initial = true;
        let mut rendered = Vec::new();

        for token in tokenize(buffer) {
            let ctx = WordContext { sentence_initial };
            let (disposition, output, steps) = match token.kind {
                TokenKind::Word => self.render_word(&transliterator, token, ctx, traced),
                TokenKind::Mixed if contains_sinhala(token.text) => (
                    Some(Disposition::PreserveLiteral(PreserveReason::NativeScript)),
                    format_literal(&self.rules, &token),
                    Vec::new(),
                ),
                _ => (None, format_literal(&self.rules, &token), Vec::new()),
            };

            sentence_initial = match token.kind {
                TokenKind::Whitespace => sentence_initial || token.text.contains('\n'),
                TokenKind::Punctuation => {
                    sentence_initial || token.text.chars().any(is_sentence_terminal)
                }
                TokenKind::Word | TokenKind::Numeric | TokenKind::Mixed => false,
            };

            rendered.push(RenderedToken {
                piece: Piece { token, output },
                disposition,
                steps,
            });
        }
        rendered
    }

    fn render_word<'a>(
        &self,
        transliterator: &Transliterator<'_>,
        token: Token<'a>,
        ctx: WordContext,
        traced: bool,
    ) -> (Option<Disposition>, Cow<'a, str>, Vec<Step>) {
        let ClassifiedWord { token, disposition } = self.classifier.classify_token(token, ctx);
        if !disposition.is_transliterate() {
            return (Some(disposition), Cow::Borrowed(token.text), Vec::new());
        }

        // An admitted capitalized sentence start is spelled in lowercase.
        let word = if token.text.starts_with(|c: char| c.is_ascii_uppercase()) {
            Cow::Owned(lowercase_first(token.text))
        } else {
            Cow::Borrowed(token.text)
        };
        let (output, steps) = if traced {
            transliterator.transliterate_traced(&word)
        } else {
            (transliterator.transliterate(&word), Vec::new())
        };
        (Some(disposition), Cow::Owned(output), steps)
    }
}

fn lowercase_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// Builder for [`Engine`]. Unset fields fall back to the process-wide
/// defaults.
#[derive(Default)]
pub struct EngineBuilder {
    rules: Option<Arc<RuleTable>>,
    settings: Option<Settings>,
    classifier: Option<Box<dyn Classifier>>,
    pinned: Vec<String>,
}

impl EngineBuilder {
    pub fn rules(mut self, rules: Arc<RuleTable>) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Replace the heuristic classifier. Pinned words only apply to the
    /// heuristic classifier.
    pub fn classifier(mut self, classifier: impl Classifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Always pass `word` through unchanged (case-sensitive).
    pub fn pin(mut self, word: impl Into<String>) -> Self {
        self.pinned.push(word.into());
        self
    }

    pub fn build(self) -> Engine {
        let rules = self.rules.unwrap_or_else(RuleTable::default_shared);
        let settings = self.settings.unwrap_or_else(|| settings().clone());
        let classifier = match self.classifier {
            Some(classifier) => classifier,
            None => Box::new(
                HeuristicClassifier::new(Arc::clone(&rules), &settings.classifier)
                    .with_pinned(self.pinned),
            ),
        };
        Engine {
            rules,
            settings,
            classifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        Engine::new(RuleTable::default_shared())
    }

    #[test]
    fn converts_simple_sentence() {
        assert_eq!(engine().convert("api heta gedhara yamu"), "අපි හෙට ගෙදර යමු");
        assert_eq!(engine().convert("mata eeka karanna baee"), "මට ඒක කරන්න බෑ");
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert_eq!(engine().convert(""), "");
    }

    #[test]
    fn numeral_marker_adjoins_digits() {
        assert_eq!(
            engine().convert("Rs. 2500k vatinavaa"),
            "Rs. 2500ක් වටිනවා"
        );
    }

    #[test]
    fn sentence_initial_capital_is_transliterated() {
        assert_eq!(engine().convert("Oyaa enne"), "ඔයා එන්නෙ");
        assert_eq!(
            engine().convert("hari. Oyaa enne"),
            "හරි. ඔයා එන්නෙ"
        );
        // mid-sentence it stays a literal
        assert_eq!(engine().convert("hari Oyaa"), "හරි Oyaa");
    }

    #[test]
    fn capitalized_english_at_sentence_start_stays_latin() {
        assert_eq!(engine().convert("Meeting eka"), "Meeting එක");
        assert_eq!(engine().convert("hari. Weekend yamu"), "හරි. Weekend යමු");
    }

    #[test]
    fn bare_ng_is_not_an_anusvara() {
        assert_eq!(engine().convert("ng"), "න්ග්");
        assert_eq!(engine().convert("mang"), "මං");
    }

    #[test]
    fn kunddaliya_ends_a_sentence() {
        assert_eq!(engine().convert("hari෴ Mama"), "හරි෴ මම");
    }

    #[test]
    fn line_break_starts_a_sentence() {
        assert_eq!(engine().convert("hari\nMama"), "හරි\nමම");
    }

    #[test]
    fn pinned_word_passes_through() {
        let engine = Engine::builder().pin("eka").build();
        assert_eq!(engine.convert("meeka eka"), "මේක eka");
    }

    #[test]
    fn custom_classifier_is_used() {
        struct PreserveAll;
        impl Classifier for PreserveAll {
            fn classify(&self, _word: &str, _ctx: WordContext) -> Disposition {
                Disposition::PreserveLiteral(PreserveReason::Pinned)
            }
        }
        let engine = Engine::builder().classifier(PreserveAll).build();
        assert_eq!(engine.convert("api yamu 5k"), "api yamu 5ක්");
    }

    #[test]
    fn alternate_rule_table() {
        let toml = r#"
version = "tiny"
[consonants]
k = "ක"
[vowels]
a = { independent = "අ", sign = "" }
"#;
        let rules = Arc::new(RuleTable::from_toml(toml).unwrap());
        let engine = Engine::new(rules);
        assert_eq!(engine.convert("kaka"), "කක");
        // unmapped letters pass through, the bare consonant is closed
        assert_eq!(engine.convert("kim"), "ක්im");
        assert_eq!(engine.rules().version(), "tiny");
    }

    #[test]
    fn lowercase_first_only_touches_first_char() {
        assert_eq!(lowercase_first("OyaA"), "oyaA");
        assert_eq!(lowercase_first(""), "");
    }
}
