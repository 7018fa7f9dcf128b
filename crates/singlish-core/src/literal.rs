//! Surface formatting for tokens that are not transliterated.

use std::borrow::Cow;

use crate::rules::RuleTable;
use crate::tokenizer::{Token, TokenKind};

/// Output for a token that bypasses the transliterator.
///
/// Only a numeral's trailing marker letter is ever rewritten; everything
/// else is returned borrowed and byte-identical.
pub fn format_literal<'a>(rules: &RuleTable, token: &Token<'a>) -> Cow<'a, str> {
    if token.kind != TokenKind::Numeric {
        return Cow::Borrowed(token.text);
    }
    let Some(marker) = token.text.chars().last().filter(char::is_ascii_lowercase) else {
        return Cow::Borrowed(token.text);
    };
    match rules.marker(marker) {
        Some(glyph) => {
            let digits = &token.text[..token.text.len() - marker.len_utf8()];
            Cow::Owned(format!("{digits}{glyph}"))
        }
        None => Cow::Borrowed(token.text),
    }
}
