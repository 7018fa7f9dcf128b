use serde::Serialize;

use crate::classifier::Disposition;
use crate::engine::Engine;
use crate::tokenizer::TokenKind;
use crate::transliterate::Step;

/// Full diagnostic result for one buffer.
#[derive(Debug, Serialize)]
pub struct Explanation {
    pub input: String,
    pub output: String,
    pub rules_version: String,
    pub tokens: Vec<TokenExplanation>,
}

/// How a single token was handled.
#[derive(Debug, Serialize)]
pub struct TokenExplanation {
    pub kind: TokenKind,
    pub text: String,
    /// Byte offsets into the input.
    pub start: usize,
    pub end: usize,
    /// Classifier verdict; only words (and Sinhala-bearing mixed tokens) get one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disposition: Option<Disposition>,
    pub output: String,
    /// Rule matches, for transliterated words.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<Step>,
}

impl Engine {
    /// Convert `buffer` and report every decision taken along the way.
    ///
    /// `explain(buffer).output` always equals `convert(buffer)`.
    pub fn explain(&self, buffer: &str) -> Explanation {
        let tokens: Vec<TokenExplanation> = self
            .render(buffer, true)
            .into_iter()
            .map(|r| TokenExplanation {
                kind: r.piece.token.kind,
                text: r.piece.token.text.to_string(),
                start: r.piece.token.start,
                end: r.piece.token.end,
                disposition: r.disposition,
                output: r.piece.output.into_owned(),
                steps: r.steps,
            })
            .collect();
        let output = tokens.iter().map(|t| t.output.as_str()).collect();
        Explanation {
            input: buffer.to_string(),
            output,
            rules_version: self.rules().version().to_string(),
            tokens,
        }
    }
}

/// Format an explanation as human-readable text.
pub fn format_text(result: &Explanation) -> String {
    use unicode_width::UnicodeWidthStr;
    let mut out = String::new();

    out.push_str(&format!(
        "=== \"{}\" ({} tokens, rules v{}) ===\n",
        result.input,
        result.tokens.len(),
        result.rules_version,
    ));

    for token in &result.tokens {
        if token.kind == TokenKind::Whitespace {
            continue;
        }
        let verdict = match token.disposition {
            Some(Disposition::Transliterate) => "transliterate".to_string(),
            Some(Disposition::PreserveLiteral(reason)) => format!("keep ({reason:?})"),
            None => format!("{:?}", token.kind).to_lowercase(),
        };
        let pad_width = 16;
        let display_width = UnicodeWidthStr::width(token.text.as_str());
        let padded = if display_width < pad_width {
            format!("{}{}", token.text, " ".repeat(pad_width - display_width))
        } else {
            token.text.clone()
        };
        out.push_str(&format!(
            "  [{},{}] {} {:<20} -> {}\n",
            token.start, token.end, padded, verdict, token.output,
        ));
        for step in &token.steps {
            let rule = step.pattern.as_deref().unwrap_or("-");
            out.push_str(&format!(
                "      {:<4} rule={:<5} emit=\"{}\"\n",
                step.source, rule, step.emitted,
            ));
        }
    }

    out.push_str(&format!("\n=> {}\n", result.output));
    out
}
