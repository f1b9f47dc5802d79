//! Lexicon: keyword, operator and delimiter tables used by the scanner
use super::symbols::Terminal;

/// Operators in match priority order: every multi-character operator comes
/// before any single-character operator that is its prefix.
pub const OPERATORS: [(&str, Terminal); 20] = [
    ("==", Terminal::EqEq),
    ("!=", Terminal::NotEq),
    (">=", Terminal::GreaterEq),
    ("<=", Terminal::LessEq),
    ("&&", Terminal::AndAnd),
    ("||", Terminal::OrOr),
    ("++", Terminal::PlusPlus),
    ("--", Terminal::MinusMinus),
    ("+=", Terminal::PlusAssign),
    ("-=", Terminal::MinusAssign),
    ("*=", Terminal::StarAssign),
    ("/=", Terminal::SlashAssign),
    ("=", Terminal::Assign),
    ("!", Terminal::Not),
    (">", Terminal::Greater),
    ("<", Terminal::Less),
    ("+", Terminal::Plus),
    ("-", Terminal::Minus),
    ("*", Terminal::Star),
    ("/", Terminal::Slash),
];

/// Keyword category for a whole word, if it is reserved
pub fn keyword(word: &str) -> Option<Terminal> {
    Terminal::from_symbol(word).filter(|t| t.is_keyword())
}

/// First operator in priority order that prefixes `rest`
pub fn match_operator(rest: &str) -> Option<(&'static str, Terminal)> {
    OPERATORS
        .iter()
        .copied()
        .find(|(op, _)| rest.starts_with(op))
}

pub fn delimiter(ch: char) -> Option<Terminal> {
    match ch {
        '{' => Some(Terminal::LBrace),
        '}' => Some(Terminal::RBrace),
        '(' => Some(Terminal::LParen),
        ')' => Some(Terminal::RParen),
        '[' => Some(Terminal::LBracket),
        ']' => Some(Terminal::RBracket),
        ';' => Some(Terminal::Semicolon),
        ',' => Some(Terminal::Comma),
        '.' => Some(Terminal::Dot),
        ':' => Some(Terminal::Colon),
        '@' => Some(Terminal::At),
        _ => None,
    }
}

pub fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

pub fn is_identifier_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_priority_prefers_longest() {
        assert_eq!(match_operator(">= b"), Some((">=", Terminal::GreaterEq)));
        assert_eq!(match_operator("++x"), Some(("++", Terminal::PlusPlus)));
        assert_eq!(match_operator("+ x"), Some(("+", Terminal::Plus)));
        assert_eq!(match_operator("/= 2"), Some(("/=", Terminal::SlashAssign)));
        assert_eq!(match_operator("%"), None);
    }

    #[test]
    fn test_no_operator_shadowed_by_its_prefix() {
        for (i, (longer, _)) in OPERATORS.iter().enumerate() {
            for (shorter, _) in &OPERATORS[..i] {
                assert!(
                    !longer.starts_with(shorter) || longer == shorter,
                    "{} is unreachable behind {}",
                    longer,
                    shorter
                );
            }
        }
    }

    #[test]
    fn test_operator_table_matches_terminal_set() {
        for (text, terminal) in OPERATORS {
            assert_eq!(terminal.as_str(), text);
            assert!(terminal.is_operator());
        }
    }

    #[test]
    fn test_keywords() {
        assert_eq!(keyword("class"), Some(Terminal::Class));
        assert_eq!(keyword("while"), Some(Terminal::While));
        assert_eq!(keyword("classy"), None);
        assert_eq!(keyword("ID"), None);
        assert_eq!(keyword("=="), None);
        assert_eq!(keyword("instanceof"), None);
    }

    #[test]
    fn test_delimiters() {
        for ch in "{}()[];,.:@".chars() {
            let terminal = delimiter(ch).unwrap();
            assert_eq!(terminal.as_str(), ch.to_string());
        }
        assert_eq!(delimiter('#'), None);
    }
}
