//! Table-driven predictive parser
//!
//! A single left-to-right pass over the input categories. The stack starts
//! as `[$, S]`; each step pops the top and either matches it against the
//! current input symbol or replaces it with the table production selected by
//! that symbol, pushed in reverse so the leftmost symbol ends up on top. The
//! first failure ends the run.

use crate::config::compile_time::syntax::MAX_STACK_DEPTH;
use crate::grammar::{format_production, NonTerminal, ParseTable, Symbol, Terminal};
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::syntax::trace::{Action, ParseTrace};
use crate::tokens::InputSymbol;
use serde::Serialize;
use std::fmt;

/// Outcome of one parse run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject(SyntaxError),
}

/// A non-terminal expansion applied during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedProduction {
    pub non_terminal: NonTerminal,
    pub production: &'static [Symbol],
}

impl fmt::Display for AppliedProduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}",
            self.non_terminal,
            format_production(self.production)
        )
    }
}

/// Everything a run produced. Owned by the caller; the parser keeps nothing.
#[derive(Debug, Clone)]
pub struct ParseRun {
    pub verdict: Verdict,
    pub trace: ParseTrace,
    /// Expansions in the order they were applied, up to the point of failure
    pub productions: Vec<AppliedProduction>,
}

impl ParseRun {
    pub fn is_accepted(&self) -> bool {
        matches!(self.verdict, Verdict::Accept)
    }

    pub fn error(&self) -> Option<&SyntaxError> {
        match &self.verdict {
            Verdict::Accept => None,
            Verdict::Reject(error) => Some(error),
        }
    }

    pub fn into_result(self) -> SyntaxResult<Vec<AppliedProduction>> {
        match self.verdict {
            Verdict::Accept => Ok(self.productions),
            Verdict::Reject(error) => Err(error),
        }
    }
}

pub struct PredictiveParser {
    table: &'static ParseTable,
    record_trace: bool,
}

impl PredictiveParser {
    pub fn new(table: &'static ParseTable) -> Self {
        Self {
            table,
            record_trace: true,
        }
    }

    /// Turn step recording on or off; the verdict is unaffected
    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// Decide whether `input` derives from the start symbol. `input` must not
    /// contain the end marker; it is appended here, positioned on the line of
    /// the last symbol.
    pub fn run(&self, input: &[InputSymbol]) -> ParseRun {
        let end_line = input.last().and_then(|symbol| symbol.line);
        let mut symbols = input.to_vec();
        symbols.push(InputSymbol {
            category: Terminal::End,
            line: end_line,
        });

        let mut trace = ParseTrace::new(symbols.iter().map(|symbol| symbol.category).collect());
        let mut productions = Vec::new();

        let verdict = match self.drive(&symbols, &mut trace, &mut productions) {
            Ok(()) => Verdict::Accept,
            Err((error, stack, cursor)) => {
                if self.record_trace {
                    trace.record(
                        &stack,
                        cursor,
                        Action::Reject {
                            reason: error.to_string(),
                        },
                    );
                }
                Verdict::Reject(error)
            }
        };

        ParseRun {
            verdict,
            trace,
            productions,
        }
    }

    /// The automaton. On failure returns the error with the stack as it was
    /// before the failing pop, so the reject step reads like the others.
    fn drive(
        &self,
        symbols: &[InputSymbol],
        trace: &mut ParseTrace,
        productions: &mut Vec<AppliedProduction>,
    ) -> Result<(), (SyntaxError, Vec<Symbol>, usize)> {
        let end = symbols.len() - 1;
        if let Some(position) = symbols[..end]
            .iter()
            .position(|symbol| symbol.category == Terminal::End)
        {
            let error = SyntaxError::internal_parser_error(&format!(
                "end marker inside input at symbol {}",
                position
            ));
            return Err((error, Vec::new(), position));
        }

        let mut stack = vec![
            Symbol::Terminal(Terminal::End),
            Symbol::NonTerminal(NonTerminal::START),
        ];
        let mut cursor = 0;

        loop {
            let current = symbols[cursor.min(end)];
            let Some(&top) = stack.last() else {
                let error = SyntaxError::internal_parser_error("parse stack emptied before end of input");
                return Err((error, stack, cursor));
            };

            match top {
                Symbol::Terminal(expected) if expected == current.category => {
                    if self.record_trace {
                        let action = if expected == Terminal::End {
                            Action::Accept
                        } else {
                            Action::Match { terminal: expected }
                        };
                        trace.record(&stack, cursor, action);
                    }
                    stack.pop();
                    if expected == Terminal::End {
                        return Ok(());
                    }
                    cursor += 1;
                }
                Symbol::Terminal(expected) => {
                    let error = SyntaxError::terminal_mismatch(
                        expected,
                        current.category,
                        cursor,
                        current.line,
                    );
                    return Err((error, stack, cursor));
                }
                Symbol::NonTerminal(non_terminal) => {
                    let Some(production) = self.table.production(non_terminal, current.category)
                    else {
                        let error = SyntaxError::no_production(
                            non_terminal,
                            current.category,
                            cursor,
                            current.line,
                        );
                        return Err((error, stack, cursor));
                    };

                    if self.record_trace {
                        trace.record(
                            &stack,
                            cursor,
                            Action::Expand {
                                non_terminal,
                                production,
                            },
                        );
                    }
                    productions.push(AppliedProduction {
                        non_terminal,
                        production,
                    });

                    stack.pop();
                    let depth = stack.len() + production.len();
                    if depth > MAX_STACK_DEPTH {
                        let error = SyntaxError::stack_depth_exceeded(depth, MAX_STACK_DEPTH);
                        return Err((error, stack, cursor));
                    }
                    stack.extend(production.iter().rev());
                }
            }
        }
    }
}
