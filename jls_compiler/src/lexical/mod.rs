//! Lexical analysis
//!
//! Turns source text into a classified token stream, an identifier table and
//! a list of lexical errors. Scanning never fails: unknown text is reported
//! and skipped.

pub mod analyzer;
pub mod error;

use crate::config::compile_time::lexical::*;
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;

pub use analyzer::{LexicalAnalyzer, LexicalMetrics, ScanOutput};
pub use error::{LexicalError, LexicalErrorKind};

/// Scan source text with default preferences
pub fn scan(source: &str) -> ScanOutput {
    LexicalAnalyzer::new().scan(source)
}

/// Scan a loaded file with file-aware logging
pub fn scan_file_result(file_result: &FileProcessingResult) -> ScanOutput {
    LexicalAnalyzer::new().scan_file_result(file_result)
}

pub fn scan_file_result_with_preferences(
    file_result: &FileProcessingResult,
    preferences: LexicalPreferences,
) -> ScanOutput {
    LexicalAnalyzer::with_preferences(preferences).scan_file_result(file_result)
}

pub fn create_analyzer() -> LexicalAnalyzer {
    LexicalAnalyzer::new()
}

pub fn create_analyzer_with_preferences(preferences: LexicalPreferences) -> LexicalAnalyzer {
    LexicalAnalyzer::with_preferences(preferences)
}

/// Check that every lexical code has registry metadata (system startup)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let lexical_codes = [
        codes::lexical::INVALID_LEXEME,
        codes::lexical::UNTERMINATED_STRING,
        codes::lexical::UNTERMINATED_BLOCK_COMMENT,
    ];

    for code in &lexical_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_debug!("Lexical limits initialized",
        "max_lexeme_display_length" => MAX_LEXEME_DISPLAY_LENGTH,
        "max_logged_errors" => MAX_LOGGED_ERRORS
    );

    Ok(())
}

/// Token counts by kind, for summaries
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenCounts {
    pub total: usize,
    pub keywords: usize,
    pub identifiers: usize,
    pub operators: usize,
    pub delimiters: usize,
    pub literals: usize,
}

pub fn get_token_counts(tokens: &crate::tokens::TokenStream) -> TokenCounts {
    use crate::tokens::TokenKind;

    let mut counts = TokenCounts::default();
    for token in tokens {
        counts.total += 1;
        match token.kind {
            TokenKind::Keyword => counts.keywords += 1,
            TokenKind::Identifier => counts.identifiers += 1,
            TokenKind::Operator => counts.operators += 1,
            TokenKind::Delimiter => counts.delimiters += 1,
            TokenKind::StringLiteral | TokenKind::NumberInt | TokenKind::NumberFloat => {
                counts.literals += 1
            }
        }
    }
    counts
}
