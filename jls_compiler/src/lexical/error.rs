//! Lexical errors
//!
//! A lexical error never stops a scan: it is recorded and scanning resumes
//! after the offending text. Errors are therefore data on the scan output,
//! not `Err` values.

use crate::config::compile_time::lexical::MAX_LEXEME_DISPLAY_LENGTH;
use crate::logging::codes;
use crate::utils::Span;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LexicalErrorKind {
    /// A non-whitespace run no rule matches
    InvalidLexeme,
    /// A `"` with no closing quote on the same line
    UnterminatedString,
    /// A `/*` never closed before end of input
    UnterminatedBlockComment,
}

impl LexicalErrorKind {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::InvalidLexeme => codes::lexical::INVALID_LEXEME,
            Self::UnterminatedString => codes::lexical::UNTERMINATED_STRING,
            Self::UnterminatedBlockComment => codes::lexical::UNTERMINATED_BLOCK_COMMENT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidLexeme => "invalid lexeme",
            Self::UnterminatedString => "unterminated string literal",
            Self::UnterminatedBlockComment => "unterminated block comment",
        }
    }
}

impl fmt::Display for LexicalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexicalError {
    pub span: Span,
    pub lexeme: String,
    pub kind: LexicalErrorKind,
}

impl LexicalError {
    pub fn new(kind: LexicalErrorKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            span,
            lexeme: lexeme.into(),
            kind,
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        self.kind.error_code()
    }

    pub fn line(&self) -> u32 {
        self.span.start().line
    }

    pub fn column(&self) -> u32 {
        self.span.start().column
    }

    /// Lexeme clipped for messages; listings keep the full text
    pub fn display_lexeme(&self) -> String {
        if self.lexeme.chars().count() <= MAX_LEXEME_DISPLAY_LENGTH {
            return self.lexeme.clone();
        }
        let clipped: String = self
            .lexeme
            .chars()
            .take(MAX_LEXEME_DISPLAY_LENGTH - 3)
            .collect();
        format!("{}...", clipped)
    }
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: '{}' - {}",
            self.line(),
            self.display_lexeme(),
            self.kind
        )
    }
}

impl std::error::Error for LexicalError {}
