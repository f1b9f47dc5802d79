//! Step-by-step record of a parse run
//!
//! Each step snapshots the stack as it was before the top was popped, the
//! input cursor, and what the parser did with that top.

use crate::config::compile_time::syntax::MAX_TRACE_STEPS;
use crate::grammar::{format_production, NonTerminal, Symbol, Terminal};
use serde::Serialize;
use std::fmt;
use std::fmt::Write as _;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Terminal on the stack matched the input symbol
    Match { terminal: Terminal },
    /// Non-terminal replaced by its table production
    Expand {
        non_terminal: NonTerminal,
        production: &'static [Symbol],
    },
    /// End marker matched end marker
    Accept,
    Reject { reason: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Match { terminal } => write!(f, "match '{}'", terminal),
            Action::Expand {
                non_terminal,
                production,
            } => write!(f, "{} -> {}", non_terminal, format_production(production)),
            Action::Accept => f.write_str("ACCEPT"),
            Action::Reject { reason } => write!(f, "REJECT: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceStep {
    /// Bottom first, top last
    pub stack: Vec<Symbol>,
    /// Index of the current input symbol
    pub cursor: usize,
    #[serde(flatten)]
    pub action: Action,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseTrace {
    /// Input categories with the end marker appended
    pub input: Vec<Terminal>,
    pub steps: Vec<TraceStep>,
    /// Set once `MAX_TRACE_STEPS` steps have been recorded; the final
    /// accept or reject step is still kept after that
    pub truncated: bool,
}

impl ParseTrace {
    pub fn new(input: Vec<Terminal>) -> Self {
        Self {
            input,
            steps: Vec::new(),
            truncated: false,
        }
    }

    pub(crate) fn record(&mut self, stack: &[Symbol], cursor: usize, action: Action) {
        let terminal = matches!(action, Action::Accept | Action::Reject { .. });
        if self.steps.len() >= MAX_TRACE_STEPS && !terminal {
            self.truncated = true;
            return;
        }
        self.steps.push(TraceStep {
            stack: stack.to_vec(),
            cursor,
            action,
        });
    }

    /// Input still unconsumed at `step`
    pub fn remaining(&self, step: &TraceStep) -> &[Terminal] {
        self.input.get(step.cursor..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Productions expanded, in order
    pub fn expansions(&self) -> impl Iterator<Item = &TraceStep> {
        self.steps
            .iter()
            .filter(|step| matches!(step.action, Action::Expand { .. }))
    }

    /// STACK / INPUT / ACTION table; columns wider than `column_width`
    /// overflow rather than wrap.
    pub fn render(&self, column_width: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<w$} {:<w$} ACTION",
            "STACK",
            "INPUT",
            w = column_width
        );

        for step in &self.steps {
            let stack = join(step.stack.iter().map(|s| s.as_str()));
            let input = join(self.remaining(step).iter().map(|t| t.as_str()));
            let _ = writeln!(
                out,
                "{:<w$} {:<w$} {}",
                stack,
                input,
                step.action,
                w = column_width
            );
        }

        if self.truncated {
            let _ = writeln!(out, "... trace truncated after {} steps", self.steps.len());
        }

        out
    }
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join(" ")
}
