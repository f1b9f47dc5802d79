//! Ordered token sequence handed from the scanner to the parser

use crate::grammar::Terminal;
use crate::tokens::token::Token;
use serde::Serialize;
use std::fmt;

/// One parser input symbol: a terminal category and, when known, the
/// source line it was scanned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InputSymbol {
    pub category: Terminal,
    pub line: Option<u32>,
}

impl InputSymbol {
    pub fn new(category: Terminal, line: u32) -> Self {
        Self {
            category,
            line: Some(line),
        }
    }

    /// A category with no source position (hand-built input)
    pub fn bare(category: Terminal) -> Self {
        Self {
            category,
            line: None,
        }
    }
}

impl From<Terminal> for InputSymbol {
    fn from(category: Terminal) -> Self {
        Self::bare(category)
    }
}

impl fmt::Display for InputSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}@{}", self.category, line),
            None => write!(f, "{}", self.category),
        }
    }
}

/// Tokens in source order. Immutable once the scan that produced it ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Terminal categories only, in order
    pub fn categories(&self) -> Vec<Terminal> {
        self.tokens.iter().map(|token| token.category).collect()
    }

    /// Parser input: every category with its line. The end marker is not
    /// included; the parser appends its own.
    pub fn input_symbols(&self) -> Vec<InputSymbol> {
        self.tokens
            .iter()
            .map(|token| InputSymbol::new(token.category, token.line()))
            .collect()
    }

    /// Last line holding a token, used to position end-of-input diagnostics
    pub fn last_line(&self) -> Option<u32> {
        self.tokens.last().map(Token::line)
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenKind;
    use crate::utils::{Position, Span};

    fn token(category: Terminal, kind: TokenKind, lexeme: &str, line: u32) -> Token {
        let start = Position::new(0, line, 1);
        let end = Position::new(lexeme.len(), line, 1 + lexeme.len() as u32);
        Token::new(category, kind, lexeme, Span::new(start, end))
    }

    fn sample() -> TokenStream {
        vec![
            token(Terminal::Identifier, TokenKind::Identifier, "x", 1),
            token(Terminal::Assign, TokenKind::Operator, "=", 1),
            token(Terminal::Number, TokenKind::NumberFloat, "2.5", 2),
            token(Terminal::Semicolon, TokenKind::Delimiter, ";", 2),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_categories_preserve_order() {
        let stream = sample();
        assert_eq!(
            stream.categories(),
            vec![
                Terminal::Identifier,
                Terminal::Assign,
                Terminal::Number,
                Terminal::Semicolon
            ]
        );
        assert_eq!(stream.len(), 4);
        assert_eq!(stream.get(2).map(|t| t.lexeme.as_str()), Some("2.5"));
    }

    #[test]
    fn test_input_symbols_carry_lines() {
        let symbols = sample().input_symbols();
        assert_eq!(symbols[0], InputSymbol::new(Terminal::Identifier, 1));
        assert_eq!(symbols[3].line, Some(2));
        assert!(!symbols.iter().any(|s| s.category == Terminal::End));
        assert_eq!(symbols[2].to_string(), "D@2");
    }

    #[test]
    fn test_empty_stream() {
        let stream = TokenStream::default();
        assert!(stream.is_empty());
        assert_eq!(stream.last_line(), None);
        assert!(stream.input_symbols().is_empty());
    }
}
