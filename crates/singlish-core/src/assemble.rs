use std::borrow::Cow;

use crate::tokenizer::Token;

/// A token paired with its rendered output.
#[derive(Debug, Clone)]
pub struct Piece<'a> {
    pub token: Token<'a>,
    pub output: Cow<'a, str>,
}

/// Concatenate rendered pieces in token order.
///
/// Separators are expected to arrive as borrowed originals, so whitespace
/// runs and punctuation come out byte-identical.
pub fn assemble(pieces: &[Piece<'_>]) -> String {
    debug_assert!(
        pieces
            .windows(2)
            .all(|w| w[0].token.end == w[1].token.start),
        "token offsets must be contiguous"
    );
    let capacity = pieces.iter().map(|p| p.output.len()).sum();
    let mut out = String::with_capacity(capacity);
    for piece in pieces {
        out.push_str(&piece.output);
    }
    out
}
