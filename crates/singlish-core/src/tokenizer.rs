//! Splits a buffer into typed spans that cover it with no gaps or overlaps.
//!
//! Whitespace runs are kept whole so the assembler can reproduce irregular
//! spacing byte-for-byte. Unspaced Latin runs are never segmented.

use serde::Serialize;

use crate::unicode::is_word_char;

/// Separators allowed between digit groups inside a numeral
/// (`7.30`, `2026-05-21`, `1,000`, `10:45`, `12/05`).
const NUMERIC_SEPARATORS: [char; 5] = ['.', ',', ':', '/', '-'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Latin letters only.
    Word,
    Whitespace,
    Punctuation,
    /// Digits with optional inner separators and one trailing marker letter.
    Numeric,
    /// Contains native script, non-Latin letters, or letters mixed with digits.
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// Byte offset of the first byte (inclusive).
    pub start: usize,
    /// Byte offset past the last byte (exclusive).
    pub end: usize,
}

impl Token<'_> {
    pub fn is_separator(&self) -> bool {
        matches!(self.kind, TokenKind::Whitespace | TokenKind::Punctuation)
    }
}

pub fn tokenize(buffer: &str) -> Vec<Token<'_>> {
    let chars: Vec<(usize, char)> = buffer.char_indices().collect();
    let byte_at = |i: usize| chars.get(i).map_or(buffer.len(), |&(b, _)| b);

    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i].1;
        let (kind, next) = if c.is_whitespace() {
            (
                TokenKind::Whitespace,
                scan_while(&chars, i, char::is_whitespace),
            )
        } else if c.is_ascii_digit() {
            scan_numeric(&chars, i)
        } else if is_word_char(c) {
            scan_word(&chars, i)
        } else {
            (TokenKind::Punctuation, i + 1)
        };
        let (start, end) = (byte_at(i), byte_at(next));
        tokens.push(Token {
            kind,
            text: &buffer[start..end],
            start,
            end,
        });
        i = next;
    }
    tokens
}

fn scan_while(chars: &[(usize, char)], from: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut j = from;
    while j < chars.len() && pred(chars[j].1) {
        j += 1;
    }
    j
}

fn is_alnum(c: char) -> bool {
    is_word_char(c) || c.is_ascii_digit()
}

fn scan_numeric(chars: &[(usize, char)], from: usize) -> (TokenKind, usize) {
    let mut j = scan_while(chars, from, |c| c.is_ascii_digit());
    while j + 1 < chars.len()
        && NUMERIC_SEPARATORS.contains(&chars[j].1)
        && chars[j + 1].1.is_ascii_digit()
    {
        j = scan_while(chars, j + 1, |c| c.is_ascii_digit());
    }

    if j < chars.len() && is_word_char(chars[j].1) {
        let end = scan_while(chars, j, is_alnum);
        if end == j + 1 && chars[j].1.is_ascii_lowercase() {
            return (TokenKind::Numeric, end);
        }
        // "5th", "10kg", "3ක්": keep the whole run as a literal
        return (TokenKind::Mixed, end);
    }
    (TokenKind::Numeric, j)
}

fn scan_word(chars: &[(usize, char)], from: usize) -> (TokenKind, usize) {
    let end = scan_while(chars, from, is_alnum);
    // Native script, other scripts or digits anywhere in the run make it a literal.
    let kind = if chars[from..end].iter().all(|&(_, c)| c.is_ascii_alphabetic()) {
        TokenKind::Word
    } else {
        TokenKind::Mixed
    };
    (kind, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(TokenKind, &str)> {
        tokenize(input).iter().map(|t| (t.kind, t.text)).collect()
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn words_and_single_spaces() {
        assert_eq!(
            kinds("api heta yamu"),
            vec![
                (TokenKind::Word, "api"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Word, "heta"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Word, "yamu"),
            ]
        );
    }

    #[test]
    fn whitespace_runs_stay_whole() {
        assert_eq!(
            kinds("mama   gedhara\n\noyaa"),
            vec![
                (TokenKind::Word, "mama"),
                (TokenKind::Whitespace, "   "),
                (TokenKind::Word, "gedhara"),
                (TokenKind::Whitespace, "\n\n"),
                (TokenKind::Word, "oyaa"),
            ]
        );
    }

    #[test]
    fn punctuation_splits_off_words() {
        assert_eq!(
            kinds("hari, inne?"),
            vec![
                (TokenKind::Word, "hari"),
                (TokenKind::Punctuation, ","),
                (TokenKind::Whitespace, " "),
                (TokenKind::Word, "inne"),
                (TokenKind::Punctuation, "?"),
            ]
        );
    }

    #[test]
    fn numeral_with_marker_letter() {
        assert_eq!(
            kinds("Rs. 2500k vatinavaa"),
            vec![
                (TokenKind::Word, "Rs"),
                (TokenKind::Punctuation, "."),
                (TokenKind::Whitespace, " "),
                (TokenKind::Numeric, "2500k"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Word, "vatinavaa"),
            ]
        );
    }

    #[test]
    fn dates_and_times_are_single_numerals() {
        assert_eq!(kinds("2026-05-21"), vec![(TokenKind::Numeric, "2026-05-21")]);
        assert_eq!(
            kinds("7.30 AM"),
            vec![
                (TokenKind::Numeric, "7.30"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Word, "AM"),
            ]
        );
    }

    #[test]
    fn trailing_separator_is_punctuation() {
        assert_eq!(
            kinds("2500."),
            vec![(TokenKind::Numeric, "2500"), (TokenKind::Punctuation, ".")]
        );
    }

    #[test]
    fn multi_letter_suffix_is_mixed() {
        assert_eq!(kinds("10kg"), vec![(TokenKind::Mixed, "10kg")]);
        assert_eq!(kinds("2500K"), vec![(TokenKind::Mixed, "2500K")]);
        assert_eq!(kinds("mp3"), vec![(TokenKind::Mixed, "mp3")]);
    }

    #[test]
    fn sinhala_runs_are_mixed() {
        assert_eq!(
            kinds("අපි yamu"),
            vec![
                (TokenKind::Mixed, "අපි"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Word, "yamu"),
            ]
        );
        // conjunct with ZWJ stays a single token
        assert_eq!(kinds("ප්\u{200D}රශ්න"), vec![(TokenKind::Mixed, "ප්\u{200D}රශ්න")]);
        assert_eq!(kinds("officeඑක"), vec![(TokenKind::Mixed, "officeඑක")]);
    }

    #[test]
    fn unspaced_run_is_one_word() {
        assert_eq!(
            kinds("mamagedharayanavaa"),
            vec![(TokenKind::Word, "mamagedharayanavaa")]
        );
    }

    #[test]
    fn offsets_are_contiguous() {
        let input = "meeting eka 7.30 AM dha?  අද\tok";
        let tokens = tokenize(input);
        let mut pos = 0;
        for t in &tokens {
            assert_eq!(t.start, pos);
            assert_eq!(&input[t.start..t.end], t.text);
            pos = t.end;
        }
        assert_eq!(pos, input.len());
    }
}
