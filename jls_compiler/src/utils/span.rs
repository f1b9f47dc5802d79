//! Source location tracking
//!
//! Positions and spans attach tokens, lexical errors and log events to the
//! source text they came from.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based, counted in chars)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Offset 0, line 1, column 1
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start (inclusive) to end (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Create a single-character span
    pub fn single(pos: Position) -> Self {
        let end = Position {
            offset: pos.offset + 1,
            line: pos.line,
            column: pos.column + 1,
        };
        Self { start: pos, end }
    }

    /// Merge two spans into one covering both
    pub fn merge(self, other: Self) -> Self {
        let start = if self.start.offset < other.start.offset {
            self.start
        } else {
            other.start
        };

        let end = if self.end.offset > other.end.offset {
            self.end
        } else {
            other.end
        };

        Self { start, end }
    }

    /// Byte length of this span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Source text for this span
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start.offset..self.end.offset]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge_and_slice() {
        let source = "int x = 1;";
        let a = Span::new(Position::new(0, 1, 1), Position::new(3, 1, 4));
        let b = Span::new(Position::new(4, 1, 5), Position::new(5, 1, 6));

        let merged = a.merge(b);
        assert_eq!(merged.slice(source), "int x");
        assert_eq!(merged.len(), 5);
        assert_eq!(merged.to_string(), "1:1-6");
    }
}
