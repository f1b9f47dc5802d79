//! Syntax analysis
//!
//! Drives the predictive parser over a scanned token stream. The parser sees
//! only terminal categories; lexemes never influence the verdict.

mod error;
mod parser;
pub mod trace;

pub use error::{SyntaxError, SyntaxResult};
pub use parser::{AppliedProduction, ParseRun, PredictiveParser, Verdict};
pub use trace::{Action, ParseTrace, TraceStep};

use crate::config::compile_time::syntax::{MAX_STACK_DEPTH, MAX_TRACE_STEPS};
use crate::config::runtime::SyntaxPreferences;
use crate::grammar::{verify_table, ParseTable, Terminal, RULES};
use crate::logging::codes;
use crate::tokens::{InputSymbol, TokenStream};
use crate::{log_debug, log_error, log_success, log_warning};

/// Parse a token stream with default preferences
pub fn parse_tokens(tokens: &TokenStream) -> ParseRun {
    parse_tokens_with_preferences(tokens, &SyntaxPreferences::default())
}

pub fn parse_tokens_with_preferences(
    tokens: &TokenStream,
    preferences: &SyntaxPreferences,
) -> ParseRun {
    log_debug!("Starting syntax analysis", "tokens" => tokens.len());

    let run = parse_symbols(&tokens.input_symbols(), preferences.record_trace);

    match &run.verdict {
        Verdict::Accept => {
            log_success!(codes::success::PARSE_ACCEPTED, "Input accepted",
                "tokens" => tokens.len(),
                "productions" => run.productions.len()
            );
        }
        Verdict::Reject(error) => {
            log_error!(error.error_code(), "Input rejected",
                "error" => error,
                "productions" => run.productions.len()
            );
        }
    }

    if run.trace.truncated {
        log_warning!("Parse trace truncated", "limit" => MAX_TRACE_STEPS);
    }

    run
}

/// Parse bare categories, as when reading a persisted token listing
pub fn parse_categories(categories: &[Terminal]) -> ParseRun {
    let input: Vec<InputSymbol> = categories.iter().copied().map(InputSymbol::bare).collect();
    parse_symbols(&input, true)
}

/// Accept/reject only, without a trace
pub fn recognize(tokens: &TokenStream) -> SyntaxResult<()> {
    parse_symbols(&tokens.input_symbols(), false)
        .into_result()
        .map(|_| ())
}

fn parse_symbols(input: &[InputSymbol], record_trace: bool) -> ParseRun {
    match ParseTable::standard() {
        Ok(table) => PredictiveParser::new(table)
            .with_trace(record_trace)
            .run(input),
        Err(error) => ParseRun {
            verdict: Verdict::Reject(error.into()),
            trace: ParseTrace::new(input.iter().map(|symbol| symbol.category).collect()),
            productions: Vec::new(),
        },
    }
}

/// Build the standard table and check every entry against FIRST sets
pub fn validate_grammar_integration() -> SyntaxResult<()> {
    log_debug!("Validating grammar table");

    let table = ParseTable::standard().map_err(|error| {
        log_error!(error.error_code(), "Parse table construction failed",
            "error" => error
        );
        SyntaxError::from(error)
    })?;

    if let Some(error) = verify_table(RULES).into_iter().next() {
        log_error!(error.error_code(), "Parse table inconsistent with grammar",
            "error" => error
        );
        return Err(error.into());
    }

    log_success!(codes::success::GRAMMAR_TABLE_VERIFIED, "Parse table verified",
        "entries" => table.len(),
        "max_stack_depth" => MAX_STACK_DEPTH
    );
    Ok(())
}

/// Check that every syntax code has registry metadata (system startup)
pub fn init_syntax_logging() -> Result<(), String> {
    let syntax_codes = [
        codes::syntax::TERMINAL_MISMATCH,
        codes::syntax::NO_PRODUCTION,
        codes::syntax::MAX_STACK_DEPTH,
        codes::syntax::TABLE_CONFLICT,
        codes::syntax::TABLE_INCONSISTENT,
        codes::syntax::INTERNAL_PARSER_ERROR,
    ];

    for code in &syntax_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Syntax error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("Syntax limits initialized",
        "max_stack_depth" => MAX_STACK_DEPTH,
        "max_trace_steps" => MAX_TRACE_STEPS
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::scan;
    use assert_matches::assert_matches;

    #[test]
    fn test_init_validates_codes() {
        assert!(init_syntax_logging().is_ok());
    }

    #[test]
    fn test_grammar_integration() {
        assert!(validate_grammar_integration().is_ok());
    }

    #[test]
    fn test_parse_tokens_accepts_declaration() {
        let output = scan("int x = 1;");
        let run = parse_tokens(&output.tokens);
        assert!(run.is_accepted());
        assert_eq!(run.trace.input.last(), Some(&Terminal::End));
    }

    #[test]
    fn test_parse_categories() {
        let accepted = parse_categories(&[
            Terminal::Int,
            Terminal::Identifier,
            Terminal::Assign,
            Terminal::Number,
            Terminal::Semicolon,
        ]);
        assert!(accepted.is_accepted());

        let rejected = parse_categories(&[
            Terminal::Int,
            Terminal::Identifier,
            Terminal::Assign,
            Terminal::Number,
        ]);
        assert_matches!(
            rejected.error(),
            Some(SyntaxError::TerminalMismatch {
                expected: Terminal::Semicolon,
                found: Terminal::End,
                line: None,
                ..
            })
        );
    }

    #[test]
    fn test_recognize() {
        assert!(recognize(&scan("while (a) b = c;").tokens).is_ok());

        let error = recognize(&scan("while a").tokens).unwrap_err();
        assert!(error.is_input_rejection());
        assert_eq!(error.line(), Some(1));
    }

    #[test]
    fn test_preferences_disable_trace() {
        let preferences = SyntaxPreferences {
            record_trace: false,
            trace_column_width: 20,
        };
        let run = parse_tokens_with_preferences(&scan("x = 1;").tokens, &preferences);
        assert!(run.is_accepted());
        assert!(run.trace.is_empty());
    }

    #[test]
    fn test_repeated_parses_agree() {
        let tokens = scan("if (a == b) { c = d; } else").tokens;
        let first = parse_tokens(&tokens);
        let second = parse_tokens(&tokens);
        assert_eq!(first.verdict, second.verdict);
        assert_eq!(first.productions, second.productions);
    }
}
