//! Character-level Unicode classification for Sinhala text.

/// Al-lakuna: suppresses a consonant's inherent vowel.
pub const VIRAMA: char = '\u{0DCA}';

/// Zero-width joiner, used for rakaransaya / yansaya conjuncts.
pub const ZWJ: char = '\u{200D}';

pub const ZWNJ: char = '\u{200C}';

pub fn is_sinhala(c: char) -> bool {
    ('\u{0D80}'..='\u{0DFF}').contains(&c)
}

pub fn is_joiner(c: char) -> bool {
    c == ZWJ || c == ZWNJ
}

/// Kunddaliya, the Sinhala full stop.
pub const KUNDDALIYA: char = '\u{0DF4}';

/// Characters that continue a word-like run.
pub fn is_word_char(c: char) -> bool {
    c != KUNDDALIYA && (c.is_alphabetic() || is_sinhala(c) || is_joiner(c))
}

pub fn contains_sinhala(s: &str) -> bool {
    s.chars().any(is_sinhala)
}

/// Sentence-ending punctuation after which the next word counts as
/// sentence-initial.
pub fn is_sentence_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | KUNDDALIYA)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_classification() {
        assert!(is_sinhala('ක'));
        assert!(is_sinhala(VIRAMA));
        assert!(is_sinhala('ා'));
        assert!(!is_sinhala('k'));
        assert!(is_joiner(ZWJ));
        assert!(!is_joiner(' '));
    }

    #[test]
    fn test_word_chars() {
        assert!(is_word_char('a'));
        assert!(is_word_char('Z'));
        assert!(is_word_char(VIRAMA));
        assert!(is_word_char(ZWJ));
        assert!(!is_word_char('1'));
        assert!(!is_word_char('.'));
        assert!(!is_word_char(' '));
        assert!(!is_word_char(KUNDDALIYA));
        assert!(is_sentence_terminal(KUNDDALIYA));
    }

    #[test]
    fn test_contains_sinhala() {
        assert!(contains_sinhala("අපි"));
        assert!(contains_sinhala("office-ඒක"));
        assert!(!contains_sinhala("office"));
        assert!(!contains_sinhala(""));
    }
}
