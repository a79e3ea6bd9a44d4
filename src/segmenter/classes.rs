// WHY: Boundary detection and parity checks must agree on one set of character
// tables, so they live here as process-wide constants

/// Double-quote class: typographic double quotes, double-prime marks,
/// the straight ASCII quote, and guillemets.
/// `“ ” „ ‟ ″ ‶ " « »`
pub const DOUBLE_QUOTES: &str =
    "\u{201C}\u{201D}\u{201E}\u{201F}\u{2033}\u{2036}\"\u{00AB}\u{00BB}";

/// Single-quote class: typographic single quotes, single guillemets, and the
/// straight apostrophe. Participates in the boundary lookahead only; counting
/// apostrophes for parity would merge on every contraction.
/// `‘ ’ ‚ ‛ ‹ › '`
pub const SINGLE_QUOTES: &str = "\u{2018}\u{2019}\u{201A}\u{201B}\u{2039}\u{203A}'";

/// Terminal punctuation, matched as a run of one or more.
pub const TERMINALS: &str = ".?!\u{2026}";

/// Bracket class counted for parity suppression.
pub const BRACKETS: &str = "(){}[]";

/// Built-in abbreviation tokens. Each token suppresses the candidate boundary
/// after "<token>." so honorifics and shorthand never end a sentence on their
/// own.
pub const EXCEPTIONS: &[&str] = &[
    "Dr", "etc", "Jr", "M", "Mgr", "Mr", "Mrs", "Ms", "Mme", "Mlle", "Prof", "Sr", "St",
];

/// Number of characters of `text` that belong to `class`.
pub(crate) fn class_count(text: &str, class: &str) -> usize {
    text.chars().filter(|c| class.contains(*c)).count()
}

/// True for any character of either quote class.
pub(crate) fn is_quote(c: char) -> bool {
    DOUBLE_QUOTES.contains(c) || SINGLE_QUOTES.contains(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_membership() {
        for c in ['"', '\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}', '\u{201E}'] {
            assert!(DOUBLE_QUOTES.contains(c), "double-quote class should contain {c:?}");
        }
        for c in ['\'', '\u{2018}', '\u{2019}', '\u{2039}'] {
            assert!(SINGLE_QUOTES.contains(c), "single-quote class should contain {c:?}");
        }
        assert!(!DOUBLE_QUOTES.contains('\''));
        assert!(!SINGLE_QUOTES.contains('"'));
        assert_eq!(DOUBLE_QUOTES.chars().count(), 9);
        assert_eq!(SINGLE_QUOTES.chars().count(), 7);
        assert_eq!(TERMINALS.chars().count(), 4);
        assert_eq!(BRACKETS.chars().count(), 6);
    }

    #[test]
    fn test_class_count() {
        assert_eq!(class_count("He said \u{201C}no\u{201D} twice", DOUBLE_QUOTES), 2);
        assert_eq!(class_count("(a [b] {c})", BRACKETS), 6);
        assert_eq!(class_count("plain text", DOUBLE_QUOTES), 0);
        assert_eq!(class_count("", BRACKETS), 0);
    }

    #[test]
    fn test_builtin_exceptions() {
        assert_eq!(EXCEPTIONS.len(), 13);
        for token in ["Dr", "etc", "St", "Mlle"] {
            assert!(EXCEPTIONS.contains(&token), "built-ins should contain {token}");
        }
        // Tokens are bare; the trailing period is added at compile time.
        assert!(!EXCEPTIONS.contains(&"Dr."));
    }

    #[test]
    fn test_is_quote() {
        assert!(is_quote('"'));
        assert!(is_quote('\u{2019}'));
        assert!(!is_quote('('));
        assert!(!is_quote('a'));
    }
}
