//! Classified tokens produced by the scanner
use crate::grammar::Terminal;
use crate::utils::Span;
use serde::Serialize;
use std::fmt;

/// Fine-grained lexical class; the parser only ever sees the coarser
/// [`Terminal`] category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    Keyword,
    Identifier,
    Operator,
    Delimiter,
    StringLiteral,
    NumberInt,
    NumberFloat,
}

impl TokenKind {
    pub const ALL: [TokenKind; 7] = [
        Self::Keyword,
        Self::Identifier,
        Self::Operator,
        Self::Delimiter,
        Self::StringLiteral,
        Self::NumberInt,
        Self::NumberFloat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keyword => "KEYWORD",
            Self::Identifier => "IDENTIFIER",
            Self::Operator => "OPERATOR",
            Self::Delimiter => "DELIMITER",
            Self::StringLiteral => "STRING_LITERAL",
            Self::NumberInt => "NUMBER_INT",
            Self::NumberFloat => "NUMBER_FLOAT",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }

    /// Kind implied by a fixed-symbol terminal
    pub fn for_terminal(terminal: Terminal) -> Option<Self> {
        if terminal.is_keyword() {
            Some(Self::Keyword)
        } else if terminal.is_operator() {
            Some(Self::Operator)
        } else if terminal.is_delimiter() {
            Some(Self::Delimiter)
        } else {
            None
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pad through the formatter so listing columns line up
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub span: Span,
    pub category: Terminal,
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    pub fn new(category: Terminal, kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            span,
            category,
            kind,
            lexeme: lexeme.into(),
        }
    }

    /// 1-based source line the token starts on
    pub fn line(&self) -> u32 {
        self.span.start().line
    }

    pub fn column(&self) -> u32 {
        self.span.start().column
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    pub fn is_keyword(&self) -> bool {
        self.kind == TokenKind::Keyword
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::StringLiteral | TokenKind::NumberInt | TokenKind::NumberFloat
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' ({})", self.kind, self.lexeme, self.category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in TokenKind::ALL {
            assert_eq!(TokenKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(TokenKind::from_name("NUMDEC"), None);
        assert_eq!(format!("{:<10}|", TokenKind::Keyword), "KEYWORD   |");
    }

    #[test]
    fn test_kind_for_terminal() {
        assert_eq!(TokenKind::for_terminal(Terminal::While), Some(TokenKind::Keyword));
        assert_eq!(TokenKind::for_terminal(Terminal::OrOr), Some(TokenKind::Operator));
        assert_eq!(TokenKind::for_terminal(Terminal::At), Some(TokenKind::Delimiter));
        assert_eq!(TokenKind::for_terminal(Terminal::Identifier), None);
    }

    #[test]
    fn test_token_position_and_serialization() {
        let span = Span::new(Position::new(14, 3, 5), Position::new(19, 3, 10));
        let token = Token::new(Terminal::Identifier, TokenKind::Identifier, "total", span);

        assert_eq!(token.line(), 3);
        assert_eq!(token.column(), 5);
        assert!(token.is_identifier());
        assert!(!token.is_literal());
        assert_eq!(token.to_string(), "IDENTIFIER 'total' (ID)");

        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["category"], "ID");
        assert_eq!(json["kind"], "IDENTIFIER");
        assert_eq!(json["lexeme"], "total");
        assert_eq!(json["span"]["start"]["line"], 3);
    }
}
