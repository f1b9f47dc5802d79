//! Token listing: the text hand-off between a scan run and a later parse run
//!
//! A listing has three sections. Only the token section is read back; the
//! identifier table and the lexical errors are for people.
//!
//! ```text
//! === Recognized Tokens ===
//! Line   1: KEYWORD         int             int
//! Line   1: IDENTIFIER      ID              x
//!
//! === Symbol Table ===
//!   x
//!
//! === Lexical Errors ===
//! Line   2: '#' - invalid lexeme
//! ```

use super::token_stream::InputSymbol;
use crate::grammar::Terminal;
use crate::lexical::ScanOutput;
use crate::logging::codes;
use crate::{log_error, log_success};
use std::fmt::Write as _;
use std::path::Path;

pub const TOKENS_HEADER: &str = "=== Recognized Tokens ===";
pub const SYMBOLS_HEADER: &str = "=== Symbol Table ===";
pub const ERRORS_HEADER: &str = "=== Lexical Errors ===";

const LINE_PREFIX: &str = "Line";
const CATEGORY_FIELD: usize = 3;
const MIN_FIELDS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Malformed token line {listing_line}: '{content}'")]
    MalformedLine { listing_line: usize, content: String },

    #[error("Unknown token category '{category}' on listing line {listing_line}")]
    UnknownCategory {
        listing_line: usize,
        category: String,
    },

    #[error("Cannot access token listing '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ListingError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::MalformedLine { .. } => codes::listing::MALFORMED_LINE,
            Self::UnknownCategory { .. } => codes::listing::UNKNOWN_CATEGORY,
            Self::Io { .. } => codes::listing::LISTING_IO_ERROR,
        }
    }
}

// ============================================================================
// WRITING
// ============================================================================

/// Render a scan result as a listing
pub fn render_listing(scan: &ScanOutput) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", TOKENS_HEADER);
    for token in scan.tokens.iter() {
        let _ = writeln!(
            out,
            "{} {:3}: {:<15} {:<15} {}",
            LINE_PREFIX,
            token.line(),
            token.kind,
            token.category.as_str(),
            token.lexeme
        );
    }

    let _ = writeln!(out, "\n{}", SYMBOLS_HEADER);
    for identifier in scan.identifiers.iter() {
        let _ = writeln!(out, "  {}", identifier);
    }

    let _ = writeln!(out, "\n{}", ERRORS_HEADER);
    for error in &scan.errors {
        let _ = writeln!(
            out,
            "{} {:3}: '{}' - {}",
            LINE_PREFIX,
            error.line(),
            error.lexeme,
            error.kind
        );
    }

    out
}

pub fn write_listing<P: AsRef<Path>>(path: P, scan: &ScanOutput) -> Result<(), ListingError> {
    let path = path.as_ref();
    std::fs::write(path, render_listing(scan)).map_err(|source| {
        let error = ListingError::Io {
            path: path.display().to_string(),
            source,
        };
        log_error!(error.error_code(), &error.to_string());
        error
    })?;

    log_success!(codes::success::LISTING_WRITTEN, "Token listing written",
        "path" => path.display(),
        "tokens" => scan.tokens.len()
    );
    Ok(())
}

// ============================================================================
// READING
// ============================================================================

/// Read parser input back from a listing.
///
/// Token lines are `Line <n>: <KIND> <CATEGORY> <LEXEME...>`; the category is
/// the fourth whitespace-separated field. Reading stops at the next section
/// header, so lexical error lines are never taken for tokens. Text without
/// any header is read as a bare token section.
pub fn parse_listing(content: &str) -> Result<Vec<InputSymbol>, ListingError> {
    let mut symbols = Vec::new();
    let mut in_tokens = !content.lines().any(|line| line.trim() == TOKENS_HEADER);

    for (index, raw) in content.lines().enumerate() {
        let listing_line = index + 1;
        let line = raw.trim();

        if line.starts_with("===") {
            in_tokens = line == TOKENS_HEADER;
            continue;
        }
        if !in_tokens || !line.starts_with(LINE_PREFIX) {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS || fields[0] != LINE_PREFIX {
            return Err(ListingError::MalformedLine {
                listing_line,
                content: line.to_string(),
            });
        }

        let source_line = fields[1]
            .strip_suffix(':')
            .and_then(|n| n.parse::<u32>().ok())
            .ok_or_else(|| ListingError::MalformedLine {
                listing_line,
                content: line.to_string(),
            })?;

        let category = fields[CATEGORY_FIELD];
        let terminal = Terminal::from_symbol(category)
            .filter(|t| *t != Terminal::End)
            .ok_or_else(|| ListingError::UnknownCategory {
                listing_line,
                category: category.to_string(),
            })?;

        symbols.push(InputSymbol::new(terminal, source_line));
    }

    Ok(symbols)
}

pub fn read_listing<P: AsRef<Path>>(path: P) -> Result<Vec<InputSymbol>, ListingError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ListingError::Io {
        path: path.display().to_string(),
        source,
    })?;

    match parse_listing(&content) {
        Ok(symbols) => {
            log_success!(codes::success::LISTING_LOADED, "Token listing loaded",
                "path" => path.display(),
                "symbols" => symbols.len()
            );
            Ok(symbols)
        }
        Err(error) => {
            log_error!(error.error_code(), &error.to_string(),
                "path" => path.display()
            );
            Err(error)
        }
    }
}
