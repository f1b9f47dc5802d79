use crate::grammar::{GrammarError, NonTerminal, Terminal};
use crate::logging::codes;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Why a parse run rejected its input. The first error ends the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// Stack top is a terminal different from the current input symbol
    #[error("expected '{expected}' but found '{found}' at {}", location(.position, .line))]
    TerminalMismatch {
        expected: Terminal,
        found: Terminal,
        position: usize,
        line: Option<u32>,
    },

    /// The table has no expansion for the stack top under this lookahead
    #[error(
        "no production for {non_terminal} with lookahead '{lookahead}' at {}",
        location(.position, .line)
    )]
    NoProduction {
        non_terminal: NonTerminal,
        lookahead: Terminal,
        position: usize,
        line: Option<u32>,
    },

    #[error("parse stack depth {depth} exceeds limit {limit}")]
    StackDepthExceeded { depth: usize, limit: usize },

    #[error("invalid parse table: {0}")]
    Grammar(#[from] GrammarError),

    #[error("internal parser error: {message}")]
    InternalParserError { message: String },
}

fn location(position: &usize, line: &Option<u32>) -> String {
    match line {
        Some(line) => format!("line {}, input symbol {}", line, position),
        None => format!("input symbol {}", position),
    }
}

impl SyntaxError {
    pub fn terminal_mismatch(
        expected: Terminal,
        found: Terminal,
        position: usize,
        line: Option<u32>,
    ) -> Self {
        Self::TerminalMismatch {
            expected,
            found,
            position,
            line,
        }
    }

    pub fn no_production(
        non_terminal: NonTerminal,
        lookahead: Terminal,
        position: usize,
        line: Option<u32>,
    ) -> Self {
        Self::NoProduction {
            non_terminal,
            lookahead,
            position,
            line,
        }
    }

    pub fn stack_depth_exceeded(depth: usize, limit: usize) -> Self {
        Self::StackDepthExceeded { depth, limit }
    }

    pub fn internal_parser_error(message: &str) -> Self {
        Self::InternalParserError {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::TerminalMismatch { .. } => codes::syntax::TERMINAL_MISMATCH,
            Self::NoProduction { .. } => codes::syntax::NO_PRODUCTION,
            Self::StackDepthExceeded { .. } => codes::syntax::MAX_STACK_DEPTH,
            Self::Grammar(inner) => inner.error_code(),
            Self::InternalParserError { .. } => codes::syntax::INTERNAL_PARSER_ERROR,
        }
    }

    /// Index of the offending symbol in the parser input
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::TerminalMismatch { position, .. } | Self::NoProduction { position, .. } => {
                Some(*position)
            }
            _ => None,
        }
    }

    /// Source line of the offending symbol, when known
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::TerminalMismatch { line, .. } | Self::NoProduction { line, .. } => *line,
            _ => None,
        }
    }

    /// The input symbol the parser stopped on
    pub fn found(&self) -> Option<Terminal> {
        match self {
            Self::TerminalMismatch { found, .. } => Some(*found),
            Self::NoProduction { lookahead, .. } => Some(*lookahead),
            _ => None,
        }
    }

    /// A rejection of the input rather than a defect in the parser or table
    pub fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            Self::TerminalMismatch { .. } | Self::NoProduction { .. }
        )
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let mismatch =
            SyntaxError::terminal_mismatch(Terminal::Semicolon, Terminal::End, 4, Some(1));
        assert_eq!(mismatch.error_code().as_str(), "E040");

        let missing = SyntaxError::no_production(
            NonTerminal::Expression,
            Terminal::Semicolon,
            2,
            None,
        );
        assert_eq!(missing.error_code().as_str(), "E041");

        let depth = SyntaxError::stack_depth_exceeded(11, 10);
        assert_eq!(depth.error_code().as_str(), "E042");

        let grammar: SyntaxError =
            GrammarError::conflict(NonTerminal::Statement, Terminal::Identifier).into();
        assert_eq!(grammar.error_code().as_str(), "E043");

        let internal = SyntaxError::internal_parser_error("empty stack");
        assert_eq!(internal.error_code().as_str(), "E049");
    }

    #[test]
    fn test_messages() {
        let mismatch =
            SyntaxError::terminal_mismatch(Terminal::Semicolon, Terminal::End, 4, Some(1));
        assert_eq!(
            mismatch.to_string(),
            "expected ';' but found '$' at line 1, input symbol 4"
        );

        let missing = SyntaxError::no_production(
            NonTerminal::ExpressionTail,
            Terminal::Identifier,
            3,
            None,
        );
        assert_eq!(
            missing.to_string(),
            "no production for G' with lookahead 'ID' at input symbol 3"
        );
    }

    #[test]
    fn test_accessors() {
        let mismatch =
            SyntaxError::terminal_mismatch(Terminal::RParen, Terminal::Semicolon, 7, Some(3));
        assert_eq!(mismatch.position(), Some(7));
        assert_eq!(mismatch.line(), Some(3));
        assert_eq!(mismatch.found(), Some(Terminal::Semicolon));
        assert!(mismatch.is_input_rejection());

        let depth = SyntaxError::stack_depth_exceeded(11, 10);
        assert_eq!(depth.position(), None);
        assert!(!depth.is_input_rejection());
    }

    #[test]
    fn test_rejections_halt() {
        let mismatch = SyntaxError::terminal_mismatch(Terminal::Semicolon, Terminal::End, 0, None);
        assert!(mismatch.requires_halt());
        assert!(!mismatch.is_recoverable());
        assert_eq!(mismatch.severity(), "High");
        assert_eq!(mismatch.category(), "Syntax");
    }
}
