//! Core scanner
//!
//! Every call to [`LexicalAnalyzer::scan`] builds a fresh [`ScanRun`] that
//! owns the token buffer, identifier table, error list and comment state for
//! that one input. Nothing survives between scans.

use super::error::{LexicalError, LexicalErrorKind};
use crate::config::compile_time::lexical::MAX_LOGGED_ERRORS;
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::grammar::keywords::{
    delimiter, is_identifier_continue, is_identifier_start, keyword, match_operator,
};
use crate::grammar::Terminal;
use crate::logging::codes;
use crate::symbols::IdentifierTable;
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error, log_performance, log_success, log_warning};
use serde::Serialize;
use std::time::Instant;

/// Counters gathered during one scan
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub error_count: usize,
    pub lines: usize,

    // Detailed counters, gathered only when enabled
    pub keywords: usize,
    pub identifiers: usize,
    pub operators: usize,
    pub delimiters: usize,
    pub string_literals: usize,
    pub int_literals: usize,
    pub float_literals: usize,
    pub line_comments: usize,
    pub block_comments: usize,
}

impl LexicalMetrics {
    fn record_token(&mut self, kind: TokenKind, detailed: bool) {
        self.total_tokens += 1;
        if !detailed {
            return;
        }
        match kind {
            TokenKind::Keyword => self.keywords += 1,
            TokenKind::Identifier => self.identifiers += 1,
            TokenKind::Operator => self.operators += 1,
            TokenKind::Delimiter => self.delimiters += 1,
            TokenKind::StringLiteral => self.string_literals += 1,
            TokenKind::NumberInt => self.int_literals += 1,
            TokenKind::NumberFloat => self.float_literals += 1,
        }
    }
}

/// Everything one scan produces
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanOutput {
    pub tokens: TokenStream,
    pub identifiers: IdentifierTable,
    pub errors: Vec<LexicalError>,
    pub metrics: LexicalMetrics,
}

impl ScanOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

pub struct LexicalAnalyzer {
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self {
            preferences: LexicalPreferences::default(),
        }
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Scan source text. Lexical errors are collected, never fatal.
    pub fn scan(&self, source: &str) -> ScanOutput {
        ScanRun::new(source, self.preferences.collect_detailed_metrics).run()
    }

    /// Scan a loaded file with file-aware logging
    pub fn scan_file_result(&self, file_result: &FileProcessingResult) -> ScanOutput {
        let file_path = file_result.metadata.path.display().to_string();

        log_debug!("Starting lexical analysis",
            "file" => file_path.as_str(),
            "char_count" => file_result.char_count(),
            "line_count" => file_result.metadata.line_count
        );

        let start = Instant::now();
        let output = self.scan(&file_result.source);
        let duration = start.elapsed();

        for error in output.errors.iter().take(MAX_LOGGED_ERRORS) {
            let message = if self.preferences.include_position_in_errors {
                format!(
                    "{} at line {}, column {}",
                    error.kind,
                    error.line(),
                    error.column()
                )
            } else {
                error.kind.to_string()
            };

            log_error!(error.error_code(), &message,
                span = error.span,
                "lexeme" => error.display_lexeme(),
                "file" => file_path.as_str()
            );
        }

        if output.errors.len() > MAX_LOGGED_ERRORS {
            log_warning!("Further lexical errors not logged",
                "suppressed" => output.errors.len() - MAX_LOGGED_ERRORS,
                "file" => file_path.as_str()
            );
        }

        log_performance!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed",
            duration = duration,
            "file" => file_path.as_str(),
            "tokens" => output.tokens.len(),
            "identifiers" => output.identifiers.len(),
            "errors" => output.errors.len()
        );

        if !output.has_errors() {
            log_success!(codes::success::LEXICAL_VALIDATION_PASSED,
                "No lexical errors",
                "file" => file_path.as_str()
            );
        }

        output
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SCAN RUN
// ============================================================================

/// Per-invocation scanner state
struct ScanRun<'a> {
    source: &'a str,
    offset: usize,
    line: u32,
    column: u32,
    detailed: bool,
    tokens: Vec<Token>,
    identifiers: IdentifierTable,
    errors: Vec<LexicalError>,
    metrics: LexicalMetrics,
}

impl<'a> ScanRun<'a> {
    fn new(source: &'a str, detailed: bool) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
            detailed,
            tokens: Vec::new(),
            identifiers: IdentifierTable::new(),
            errors: Vec::new(),
            metrics: LexicalMetrics::default(),
        }
    }

    fn run(mut self) -> ScanOutput {
        // First matching rule wins; rules are tried in this order
        while let Some(ch) = self.peek() {
            let rest = self.rest();

            if ch.is_whitespace() {
                self.advance_by(ch.len_utf8());
            } else if rest.starts_with("//") {
                self.skip_line_comment();
            } else if rest.starts_with("/*") {
                self.skip_block_comment();
            } else if ch == '"' {
                self.scan_string();
            } else if is_identifier_start(ch) {
                self.scan_word();
            } else if let Some((text, terminal)) = match_operator(rest) {
                self.emit(terminal, TokenKind::Operator, text.len());
            } else if let Some(terminal) = delimiter(ch) {
                self.emit(terminal, TokenKind::Delimiter, ch.len_utf8());
            } else if ch.is_ascii_digit() {
                self.scan_number();
            } else {
                self.scan_invalid_run();
            }
        }

        self.metrics.lines = self.source.lines().count();
        self.metrics.error_count = self.errors.len();

        ScanOutput {
            tokens: TokenStream::new(self.tokens),
            identifiers: self.identifiers,
            errors: self.errors,
            metrics: self.metrics,
        }
    }

    // ------------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------------

    fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn position(&self) -> Position {
        Position::new(self.offset, self.line, self.column)
    }

    /// Move forward `len` bytes, keeping line and column in step
    fn advance_by(&mut self, len: usize) {
        let consumed = &self.source[self.offset..self.offset + len];
        for ch in consumed.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset += len;
    }

    /// Consume `len` bytes and return their text and span
    fn take(&mut self, len: usize) -> (&'a str, Span) {
        let start = self.position();
        let text = &self.rest()[..len];
        self.advance_by(len);
        (text, Span::new(start, self.position()))
    }

    // ------------------------------------------------------------------------
    // Rules
    // ------------------------------------------------------------------------

    fn emit(&mut self, category: Terminal, kind: TokenKind, len: usize) {
        let (lexeme, span) = self.take(len);
        self.metrics.record_token(kind, self.detailed);
        self.tokens.push(Token::new(category, kind, lexeme, span));
    }

    fn error(&mut self, kind: LexicalErrorKind, len: usize) {
        let (lexeme, span) = self.take(len);
        self.errors.push(LexicalError::new(kind, lexeme, span));
    }

    fn skip_line_comment(&mut self) {
        let len = self.rest().find('\n').unwrap_or(self.rest().len());
        self.advance_by(len);
        if self.detailed {
            self.metrics.line_comments += 1;
        }
    }

    /// Skip through the matching `*/`, across lines if needed. Text after the
    /// close resumes normal scanning.
    fn skip_block_comment(&mut self) {
        match self.rest()[2..].find("*/") {
            Some(body) => {
                self.advance_by(2 + body + 2);
                if self.detailed {
                    self.metrics.block_comments += 1;
                }
            }
            None => {
                // The rest of the input is comment; reported once, at end of input
                let remaining = self.rest().len();
                self.advance_by(remaining);
                self.errors.push(LexicalError::new(
                    LexicalErrorKind::UnterminatedBlockComment,
                    "/*",
                    Span::new(self.position(), self.position()),
                ));
            }
        }
    }

    /// `"` up to the next `"` on the same line; no escapes
    fn scan_string(&mut self) {
        let rest = self.rest();
        let line_end = rest.find('\n').unwrap_or(rest.len());

        match rest[1..line_end].find('"') {
            Some(close) => self.emit(Terminal::StringLiteral, TokenKind::StringLiteral, close + 2),
            None => {
                // The rest of the line is abandoned
                let lexeme_len = rest[..line_end].trim_end_matches('\r').len();
                self.error(LexicalErrorKind::UnterminatedString, lexeme_len);
                self.advance_by(line_end - lexeme_len);
            }
        }
    }

    fn scan_word(&mut self) {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|(_, c)| !is_identifier_continue(*c))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        let word = &rest[..len];

        match keyword(word) {
            Some(terminal) => self.emit(terminal, TokenKind::Keyword, len),
            None => {
                self.identifiers.insert(word, self.line);
                self.emit(Terminal::Identifier, TokenKind::Identifier, len);
            }
        }
    }

    /// Digits, optionally `.` and at least one more digit
    fn scan_number(&mut self) {
        let rest = self.rest();
        let digits = |s: &str| s.bytes().take_while(u8::is_ascii_digit).count();

        let int_len = digits(rest);
        let after = &rest[int_len..];
        let fraction_len = if after.starts_with('.') {
            digits(&after[1..])
        } else {
            0
        };

        if fraction_len > 0 {
            self.emit(
                Terminal::Number,
                TokenKind::NumberFloat,
                int_len + 1 + fraction_len,
            );
        } else {
            self.emit(Terminal::Number, TokenKind::NumberInt, int_len);
        }
    }

    /// The maximal non-whitespace run is one invalid lexeme
    fn scan_invalid_run(&mut self) {
        let rest = self.rest();
        let len = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.error(LexicalErrorKind::InvalidLexeme, len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn scan(source: &str) -> ScanOutput {
        LexicalAnalyzer::new().scan(source)
    }

    fn categories(source: &str) -> Vec<&'static str> {
        scan(source)
            .tokens
            .iter()
            .map(|t| t.category.as_str())
            .collect()
    }

    fn lexemes(output: &ScanOutput) -> Vec<&str> {
        output.tokens.iter().map(|t| t.lexeme.as_str()).collect()
    }

    #[test]
    fn test_declaration() {
        let output = scan("int x = 10;");
        assert_eq!(lexemes(&output), vec!["int", "x", "=", "10", ";"]);
        assert_eq!(categories("int x = 10;"), vec!["int", "ID", "=", "D", ";"]);

        let kinds: Vec<_> = output.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::Operator,
                TokenKind::NumberInt,
                TokenKind::Delimiter
            ]
        );
        assert!(!output.has_errors());
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(categories("a>=b"), vec!["ID", ">=", "ID"]);
        assert_eq!(categories("x+++y"), vec!["ID", "++", "+", "ID"]);
        assert_eq!(categories("a&&!b||c"), vec!["ID", "&&", "!", "ID", "||", "ID"]);
        assert_eq!(categories("n/=2"), vec!["ID", "/=", "D"]);
        assert_eq!(categories("a = = b"), vec!["ID", "=", "=", "ID"]);
    }

    #[test]
    fn test_line_comment_discarded() {
        let output = scan("x = 1; // y = 2\nz;");
        assert_eq!(lexemes(&output), vec!["x", "=", "1", ";", "z", ";"]);
        assert!(!output.identifiers.contains("y"));
        assert_eq!(output.tokens.get(4).map(Token::line), Some(2));
    }

    #[test]
    fn test_block_comment_across_lines() {
        let output = scan("a /* b\n c */ d\ne");
        assert_eq!(lexemes(&output), vec!["a", "d", "e"]);

        let d = output.tokens.get(1).unwrap();
        assert_eq!(d.line(), 2);
        assert_eq!(d.column(), 7);
        assert_eq!(output.tokens.get(2).map(Token::line), Some(3));
        assert!(!output.has_errors());
    }

    #[test]
    fn test_block_comment_on_one_line() {
        assert_eq!(categories("x /* note */ = 1;"), vec!["ID", "=", "D", ";"]);
    }

    #[test]
    fn test_unterminated_block_comment_reported_once() {
        let output = scan("x = 1;\n/* never\nclosed\n");
        assert_eq!(lexemes(&output), vec!["x", "=", "1", ";"]);
        assert_eq!(output.errors.len(), 1);

        let error = &output.errors[0];
        assert_eq!(error.kind, LexicalErrorKind::UnterminatedBlockComment);
        assert_eq!(error.lexeme, "/*");
        assert_eq!(error.line(), 4);
    }

    #[test]
    fn test_unterminated_block_comment_at_end_of_input() {
        let output = scan("a /* open\nb\nc\nd");
        assert_eq!(lexemes(&output), vec!["a"]);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].line(), 4);
        assert_eq!(output.errors[0].column(), 2);
    }

    #[test]
    fn test_string_literal_is_not_escaping() {
        let output = scan(r#"s = "a // b /* c";"#);
        assert_eq!(lexemes(&output), vec!["s", "=", r#""a // b /* c""#, ";"]);
        assert_eq!(output.tokens.get(2).map(|t| t.category), Some(Terminal::StringLiteral));

        // A backslash does not escape the quote
        let output = scan(r#""a\" b"#);
        assert_eq!(output.tokens.get(0).map(|t| t.lexeme.as_str()), Some(r#""a\""#));
        assert_eq!(output.tokens.get(1).map(|t| t.lexeme.as_str()), Some("b"));
    }

    #[test]
    fn test_unterminated_string_abandons_line() {
        let output = scan("x = \"abc; y = 2;\r\nz = 3;");
        assert_eq!(lexemes(&output), vec!["x", "=", "z", "=", "3", ";"]);
        assert_eq!(output.errors.len(), 1);
        assert_eq!(output.errors[0].kind, LexicalErrorKind::UnterminatedString);
        assert_eq!(output.errors[0].lexeme, "\"abc; y = 2;");
        assert!(!output.identifiers.contains("y"));
    }

    #[test]
    fn test_numbers() {
        let output = scan("3.14 42 1.x 7.");
        assert_eq!(lexemes(&output), vec!["3.14", "42", "1", ".", "x", "7", "."]);

        let kinds: Vec<_> = output.tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds[0], TokenKind::NumberFloat);
        assert_eq!(kinds[1], TokenKind::NumberInt);
        assert_eq!(kinds[2], TokenKind::NumberInt);
        assert!(output
            .tokens
            .iter()
            .filter(|t| t.is_literal())
            .all(|t| t.category == Terminal::Number));

        assert_eq!(lexemes(&scan("1.2.3")), vec!["1.2", ".", "3"]);
        assert_eq!(categories("12ab"), vec!["D", "ID"]);
    }

    #[test]
    fn test_keywords_stay_out_of_identifier_table() {
        let output = scan("public class Foo { int count = count + Foo; }");
        let names: Vec<_> = output.identifiers.iter().collect();
        assert_eq!(names, vec!["Foo", "count"]);
        assert_eq!(output.identifiers.get("count").unwrap().occurrences, 2);
        assert_eq!(categories("while do for"), vec!["while", "do", "for"]);
        assert_eq!(categories("classy instanceof"), vec!["ID", "ID"]);
    }

    #[test]
    fn test_invalid_lexeme_is_maximal_run() {
        let output = scan("a = #b$c d;\n%");
        assert_eq!(lexemes(&output), vec!["a", "=", "d", ";"]);
        assert_eq!(output.errors.len(), 2);

        assert_eq!(output.errors[0].lexeme, "#b$c");
        assert_eq!(output.errors[0].kind, LexicalErrorKind::InvalidLexeme);
        assert_eq!(output.errors[0].column(), 5);
        assert_eq!(output.errors[1].lexeme, "%");
        assert_eq!(output.errors[1].line(), 2);
        assert_eq!(output.metrics.error_count, 2);
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            categories("{ } ( ) [ ] ; , . : @"),
            vec!["{", "}", "(", ")", "[", "]", ";", ",", ".", ":", "@"]
        );
    }

    #[test]
    fn test_spans_track_columns() {
        let output = scan("if (a) {\n  b++;\n}");
        let b = output.tokens.iter().find(|t| t.lexeme == "b").unwrap();
        assert_eq!(b.span.start().line, 2);
        assert_eq!(b.span.start().column, 3);
        assert_eq!(b.span.slice("if (a) {\n  b++;\n}"), "b");
    }

    #[test]
    fn test_scans_are_independent() {
        let analyzer = LexicalAnalyzer::new();
        let first = analyzer.scan("alpha = 1;");
        let second = analyzer.scan("beta = 2;");

        assert!(first.identifiers.contains("alpha"));
        assert!(!second.identifiers.contains("alpha"));
        assert_eq!(second.tokens.len(), 4);
    }

    #[test]
    fn test_metrics() {
        let output = scan("int x = 2; // c\n/* d */ x = 1.5;");
        let m = &output.metrics;
        assert_eq!(m.total_tokens, 9);
        assert_eq!(m.keywords, 1);
        assert_eq!(m.identifiers, 2);
        assert_eq!(m.operators, 2);
        assert_eq!(m.delimiters, 2);
        assert_eq!(m.int_literals, 1);
        assert_eq!(m.float_literals, 1);
        assert_eq!(m.line_comments, 1);
        assert_eq!(m.block_comments, 1);
        assert_eq!(m.lines, 2);
    }

    #[test]
    fn test_metrics_without_detail() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: false,
            include_position_in_errors: true,
        };
        let output = LexicalAnalyzer::with_preferences(preferences).scan("x = 1; // c");
        assert_eq!(output.metrics.total_tokens, 4);
        assert_eq!(output.metrics.operators, 0);
        assert_eq!(output.metrics.line_comments, 0);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(scan("").tokens.is_empty());
        let output = scan("  \n\t\r\n ");
        assert!(output.tokens.is_empty());
        assert_matches!(output.errors.as_slice(), []);
    }
}
