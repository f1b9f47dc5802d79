//! Errors raised while building or verifying the predictive parse table

use super::symbols::{NonTerminal, Terminal};
use crate::logging::codes;

pub type GrammarResult<T> = Result<T, GrammarError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// Two rules claim the same (non-terminal, lookahead) cell
    #[error("Parse table conflict: M[{non_terminal}, {lookahead}] has more than one production")]
    Conflict {
        non_terminal: NonTerminal,
        lookahead: Terminal,
    },

    /// A table entry predicts a production that cannot start with its lookahead
    #[error(
        "Parse table entry M[{non_terminal}, {lookahead}] -> {production} cannot begin with '{lookahead}'"
    )]
    Inconsistent {
        non_terminal: NonTerminal,
        lookahead: Terminal,
        production: String,
    },
}

impl GrammarError {
    pub fn conflict(non_terminal: NonTerminal, lookahead: Terminal) -> Self {
        Self::Conflict {
            non_terminal,
            lookahead,
        }
    }

    pub fn inconsistent(non_terminal: NonTerminal, lookahead: Terminal, production: &str) -> Self {
        Self::Inconsistent {
            non_terminal,
            lookahead,
            production: production.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::Conflict { .. } => codes::syntax::TABLE_CONFLICT,
            Self::Inconsistent { .. } => codes::syntax::TABLE_INCONSISTENT,
        }
    }

    /// The table cell the error refers to
    pub fn cell(&self) -> (NonTerminal, Terminal) {
        match self {
            Self::Conflict {
                non_terminal,
                lookahead,
            }
            | Self::Inconsistent {
                non_terminal,
                lookahead,
                ..
            } => (*non_terminal, *lookahead),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let conflict = GrammarError::conflict(NonTerminal::Statement, Terminal::Identifier);
        assert_eq!(conflict.error_code().as_str(), "E043");
        assert_eq!(
            conflict.to_string(),
            "Parse table conflict: M[U, ID] has more than one production"
        );

        let inconsistent =
            GrammarError::inconsistent(NonTerminal::Expression, Terminal::Semicolon, "ID G'");
        assert_eq!(inconsistent.error_code().as_str(), "E044");
        assert_eq!(
            inconsistent.cell(),
            (NonTerminal::Expression, Terminal::Semicolon)
        );
    }
}
