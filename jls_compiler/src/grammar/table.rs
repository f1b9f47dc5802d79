//! Predictive parse table
//!
//! The grammar is written as a static list of rules, each naming the
//! lookaheads that select it. `ParseTable::from_rules` flattens that list into
//! the `(non-terminal, lookahead) -> production` map the parser drives, and
//! refuses to build a table in which any cell is claimed twice.

use super::error::{GrammarError, GrammarResult};
use super::symbols::{NonTerminal as N, Symbol, Terminal as T};
use std::collections::HashMap;
use std::sync::OnceLock;

/// One grammar production together with the lookaheads that predict it.
/// An empty `rhs` is the ε-production.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub lhs: N,
    pub lookaheads: &'static [T],
    pub rhs: &'static [Symbol],
}

impl Rule {
    pub fn is_epsilon(&self) -> bool {
        self.rhs.is_empty()
    }
}

const fn t(terminal: T) -> Symbol {
    Symbol::Terminal(terminal)
}

const fn n(non_terminal: N) -> Symbol {
    Symbol::NonTerminal(non_terminal)
}

// ============================================================================
// LOOKAHEAD SETS
// ============================================================================

pub const MODIFIERS: &[T] = &[
    T::Public,
    T::Private,
    T::Protected,
    T::Static,
    T::Final,
    T::Abstract,
];

pub const COMMAND_STARTS: &[T] = &[
    T::If,
    T::While,
    T::Do,
    T::For,
    T::Break,
    T::Continue,
    T::Return,
    T::Try,
    T::Throw,
    T::LBrace,
];

pub const STATEMENT_STARTS: &[T] = &[
    T::Public,
    T::Private,
    T::Protected,
    T::Static,
    T::Final,
    T::Abstract,
    T::Int,
    T::Boolean,
    T::Identifier,
    T::If,
    T::While,
    T::Do,
    T::For,
    T::Break,
    T::Continue,
    T::Return,
    T::Try,
    T::Throw,
    T::LBrace,
];

pub const EXPRESSION_STARTS: &[T] = &[
    T::Identifier,
    T::Number,
    T::LParen,
    T::Not,
    T::Minus,
    T::Plus,
    T::LBrace,
];

/// Operators that continue an expression with another expression
const BINARY_OPERATORS: &[T] = &[
    T::Assign,
    T::PlusAssign,
    T::MinusAssign,
    T::StarAssign,
    T::SlashAssign,
    T::Plus,
    T::Minus,
    T::Star,
    T::Slash,
    T::EqEq,
    T::NotEq,
    T::Greater,
    T::Less,
    T::GreaterEq,
    T::LessEq,
    T::AndAnd,
    T::OrOr,
];

// ============================================================================
// RULES
// ============================================================================

/// The standard grammar
pub static RULES: &[Rule] = &[
    // S
    Rule {
        lhs: N::StatementList,
        lookaheads: STATEMENT_STARTS,
        rhs: &[n(N::Statement), n(N::StatementList)],
    },
    Rule {
        lhs: N::StatementList,
        lookaheads: &[T::RBrace, T::End],
        rhs: &[],
    },
    // U
    Rule {
        lhs: N::Statement,
        lookaheads: MODIFIERS,
        rhs: &[
            n(N::Modifier),
            n(N::ClassKind),
            t(T::Identifier),
            t(T::LBrace),
            n(N::Block),
            t(T::RBrace),
        ],
    },
    Rule {
        lhs: N::Statement,
        lookaheads: COMMAND_STARTS,
        rhs: &[n(N::Command)],
    },
    Rule {
        lhs: N::Statement,
        lookaheads: &[T::Identifier],
        rhs: &[n(N::Expression), t(T::Semicolon)],
    },
    Rule {
        lhs: N::Statement,
        lookaheads: &[T::Int],
        rhs: &[
            t(T::Int),
            n(N::ArraySuffix),
            t(T::Identifier),
            t(T::Assign),
            n(N::Expression),
            t(T::Semicolon),
        ],
    },
    Rule {
        lhs: N::Statement,
        lookaheads: &[T::Boolean],
        rhs: &[
            t(T::Boolean),
            n(N::ArraySuffix),
            t(T::Identifier),
            t(T::Assign),
            n(N::Expression),
            t(T::Semicolon),
        ],
    },
    // T'
    Rule {
        lhs: N::ArraySuffix,
        lookaheads: &[T::LBracket],
        rhs: &[t(T::LBracket), t(T::RBracket)],
    },
    Rule {
        lhs: N::ArraySuffix,
        lookaheads: &[T::Identifier],
        rhs: &[],
    },
    // M
    Rule {
        lhs: N::Modifier,
        lookaheads: &[T::Public],
        rhs: &[t(T::Public)],
    },
    Rule {
        lhs: N::Modifier,
        lookaheads: &[T::Private],
        rhs: &[t(T::Private)],
    },
    Rule {
        lhs: N::Modifier,
        lookaheads: &[T::Protected],
        rhs: &[t(T::Protected)],
    },
    Rule {
        lhs: N::Modifier,
        lookaheads: &[T::Static],
        rhs: &[t(T::Static)],
    },
    Rule {
        lhs: N::Modifier,
        lookaheads: &[T::Final],
        rhs: &[t(T::Final)],
    },
    Rule {
        lhs: N::Modifier,
        lookaheads: &[T::Abstract],
        rhs: &[t(T::Abstract)],
    },
    // K
    Rule {
        lhs: N::ClassKind,
        lookaheads: &[T::Class],
        rhs: &[t(T::Class)],
    },
    Rule {
        lhs: N::ClassKind,
        lookaheads: &[T::Interface],
        rhs: &[t(T::Interface)],
    },
    // C
    Rule {
        lhs: N::Command,
        lookaheads: &[T::If],
        rhs: &[
            t(T::If),
            t(T::LParen),
            n(N::Expression),
            t(T::RParen),
            n(N::StatementList),
        ],
    },
    Rule {
        lhs: N::Command,
        lookaheads: &[T::While],
        rhs: &[
            t(T::While),
            t(T::LParen),
            n(N::Expression),
            t(T::RParen),
            n(N::StatementList),
        ],
    },
    Rule {
        lhs: N::Command,
        lookaheads: &[T::Do],
        rhs: &[
            t(T::Do),
            n(N::StatementList),
            t(T::While),
            t(T::LParen),
            n(N::Expression),
            t(T::RParen),
            t(T::Semicolon),
        ],
    },
    Rule {
        lhs: N::Command,
        lookaheads: &[T::For],
        rhs: &[
            t(T::For),
            t(T::LParen),
            n(N::Expression),
            t(T::Semicolon),
            n(N::Expression),
            t(T::Semicolon),
            n(N::Expression),
            t(T::RParen),
            n(N::StatementList),
        ],
    },
    Rule {
        lhs: N::Command,
        lookaheads: &[T::Break],
        rhs: &[t(T::Break), t(T::Semicolon)],
    },
    Rule {
        lhs: N::Command,
        lookaheads: &[T::Continue],
        rhs: &[t(T::Continue), t(T::Semicolon)],
    },
    Rule {
        lhs: N::Command,
        lookaheads: &[T::Return],
        rhs: &[t(T::Return), n(N::Expression), t(T::Semicolon)],
    },
    Rule {
        lhs: N::Command,
        lookaheads: &[T::Try],
        rhs: &[
            t(T::Try),
            t(T::LBrace),
            n(N::Block),
            t(T::RBrace),
            t(T::Catch),
            t(T::LParen),
            t(T::Identifier),
            t(T::RParen),
            t(T::LBrace),
            n(N::Block),
            t(T::RBrace),
            t(T::Finally),
            t(T::LBrace),
            n(N::Block),
            t(T::RBrace),
        ],
    },
    Rule {
        lhs: N::Command,
        lookaheads: &[T::Throw],
        rhs: &[t(T::Throw), n(N::Expression), t(T::Semicolon)],
    },
    Rule {
        lhs: N::Command,
        lookaheads: &[T::LBrace],
        rhs: &[t(T::LBrace), n(N::Block), t(T::RBrace)],
    },
    // H
    Rule {
        lhs: N::Block,
        lookaheads: STATEMENT_STARTS,
        rhs: &[n(N::StatementList), n(N::BlockTail)],
    },
    Rule {
        lhs: N::Block,
        lookaheads: &[T::RBrace],
        rhs: &[],
    },
    // H'
    Rule {
        lhs: N::BlockTail,
        lookaheads: STATEMENT_STARTS,
        rhs: &[n(N::StatementList), n(N::BlockTail)],
    },
    Rule {
        lhs: N::BlockTail,
        lookaheads: &[T::RBrace],
        rhs: &[],
    },
    // G
    Rule {
        lhs: N::Expression,
        lookaheads: &[T::Identifier],
        rhs: &[t(T::Identifier), n(N::ExpressionTail)],
    },
    Rule {
        lhs: N::Expression,
        lookaheads: &[T::Number],
        rhs: &[t(T::Number), n(N::ExpressionTail)],
    },
    Rule {
        lhs: N::Expression,
        lookaheads: &[T::LParen],
        rhs: &[
            t(T::LParen),
            n(N::Expression),
            t(T::RParen),
            n(N::ExpressionTail),
        ],
    },
    Rule {
        lhs: N::Expression,
        lookaheads: &[T::Not],
        rhs: &[t(T::Not), n(N::Expression)],
    },
    Rule {
        lhs: N::Expression,
        lookaheads: &[T::Minus],
        rhs: &[t(T::Minus), n(N::Expression)],
    },
    Rule {
        lhs: N::Expression,
        lookaheads: &[T::Plus],
        rhs: &[t(T::Plus), n(N::Expression)],
    },
    Rule {
        lhs: N::Expression,
        lookaheads: &[T::LBrace],
        rhs: &[t(T::LBrace), n(N::InitializerList), t(T::RBrace)],
    },
    // G'
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::Assign],
        rhs: &[t(T::Assign), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::PlusAssign],
        rhs: &[t(T::PlusAssign), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::MinusAssign],
        rhs: &[t(T::MinusAssign), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::StarAssign],
        rhs: &[t(T::StarAssign), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::SlashAssign],
        rhs: &[t(T::SlashAssign), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::Plus],
        rhs: &[t(T::Plus), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::Minus],
        rhs: &[t(T::Minus), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::Star],
        rhs: &[t(T::Star), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::Slash],
        rhs: &[t(T::Slash), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::EqEq],
        rhs: &[t(T::EqEq), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::NotEq],
        rhs: &[t(T::NotEq), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::Greater],
        rhs: &[t(T::Greater), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::Less],
        rhs: &[t(T::Less), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::GreaterEq],
        rhs: &[t(T::GreaterEq), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::LessEq],
        rhs: &[t(T::LessEq), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::AndAnd],
        rhs: &[t(T::AndAnd), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::OrOr],
        rhs: &[t(T::OrOr), n(N::Expression)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::PlusPlus],
        rhs: &[t(T::PlusPlus)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::MinusMinus],
        rhs: &[t(T::MinusMinus)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::LParen],
        rhs: &[t(T::LParen), n(N::ArgumentList), t(T::RParen)],
    },
    Rule {
        lhs: N::ExpressionTail,
        lookaheads: &[T::Semicolon, T::RParen, T::Comma, T::RBracket, T::End],
        rhs: &[],
    },
    // I
    Rule {
        lhs: N::InitializerList,
        lookaheads: &[T::Number],
        rhs: &[t(T::Number), n(N::InitializerTail)],
    },
    // I'
    Rule {
        lhs: N::InitializerTail,
        lookaheads: &[T::Comma],
        rhs: &[t(T::Comma), t(T::Number), n(N::InitializerTail)],
    },
    Rule {
        lhs: N::InitializerTail,
        lookaheads: &[T::RBrace],
        rhs: &[],
    },
    // A
    Rule {
        lhs: N::ArgumentList,
        lookaheads: EXPRESSION_STARTS,
        rhs: &[n(N::Expression), n(N::ArgumentTail)],
    },
    Rule {
        lhs: N::ArgumentList,
        lookaheads: &[T::RParen],
        rhs: &[],
    },
    // A'
    Rule {
        lhs: N::ArgumentTail,
        lookaheads: &[T::Comma],
        rhs: &[t(T::Comma), n(N::Expression), n(N::ArgumentTail)],
    },
    Rule {
        lhs: N::ArgumentTail,
        lookaheads: &[T::RParen],
        rhs: &[],
    },
];

// ============================================================================
// TABLE
// ============================================================================

/// `(non-terminal, lookahead) -> production`
#[derive(Debug, Clone)]
pub struct ParseTable {
    entries: HashMap<(N, T), &'static [Symbol]>,
}

impl ParseTable {
    /// Flatten `rules` into a table; any cell claimed twice is a conflict
    pub fn from_rules(rules: &'static [Rule]) -> GrammarResult<Self> {
        let mut entries = HashMap::new();

        for rule in rules {
            for &lookahead in rule.lookaheads {
                if entries.insert((rule.lhs, lookahead), rule.rhs).is_some() {
                    return Err(GrammarError::conflict(rule.lhs, lookahead));
                }
            }
        }

        Ok(Self { entries })
    }

    /// The process-wide table for [`RULES`], built on first use
    pub fn standard() -> GrammarResult<&'static ParseTable> {
        static STANDARD: OnceLock<GrammarResult<ParseTable>> = OnceLock::new();
        STANDARD
            .get_or_init(|| ParseTable::from_rules(RULES))
            .as_ref()
            .map_err(Clone::clone)
    }

    pub fn production(&self, non_terminal: N, lookahead: T) -> Option<&'static [Symbol]> {
        self.entries.get(&(non_terminal, lookahead)).copied()
    }

    /// Every cell, ordered by non-terminal then lookahead
    pub fn entries(&self) -> Vec<(N, T, &'static [Symbol])> {
        let mut cells: Vec<_> = self
            .entries
            .iter()
            .map(|(&(nt, la), &rhs)| (nt, la, rhs))
            .collect();
        cells.sort_by_key(|&(nt, la, _)| (nt, la));
        cells
    }

    /// Lookaheads with an entry for `non_terminal`, in terminal order
    pub fn expected_lookaheads(&self, non_terminal: N) -> Vec<T> {
        T::ALL
            .iter()
            .copied()
            .filter(|&la| self.entries.contains_key(&(non_terminal, la)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Space-separated production body, `ε` when empty
pub fn format_production(rhs: &[Symbol]) -> String {
    if rhs.is_empty() {
        return "ε".to_string();
    }
    rhs.iter()
        .map(|symbol| symbol.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashSet;

    #[test]
    fn test_standard_table_is_deterministic() {
        // Every (non-terminal, lookahead) pair claimed by the rule list
        let mut seen = HashSet::new();
        for rule in RULES {
            for &lookahead in rule.lookaheads {
                assert!(
                    seen.insert((rule.lhs, lookahead)),
                    "M[{}, {}] claimed twice",
                    rule.lhs,
                    lookahead
                );
            }
        }

        let table = ParseTable::standard().unwrap();
        assert_eq!(table.len(), seen.len());
    }

    #[test]
    fn test_every_non_terminal_has_entries() {
        let table = ParseTable::standard().unwrap();
        for nt in N::ALL {
            assert!(
                !table.expected_lookaheads(nt).is_empty(),
                "{} has no productions",
                nt
            );
        }
    }

    #[test]
    fn test_entry_spot_checks() {
        let table = ParseTable::standard().unwrap();

        assert_eq!(table.production(N::StatementList, T::End), Some(&[][..]));
        assert_eq!(table.production(N::StatementList, T::RBrace), Some(&[][..]));
        assert_eq!(
            table.production(N::Statement, T::Identifier),
            Some(&[n(N::Expression), t(T::Semicolon)][..])
        );
        assert_eq!(
            table.production(N::ExpressionTail, T::LParen),
            Some(&[t(T::LParen), n(N::ArgumentList), t(T::RParen)][..])
        );
        assert_eq!(table.production(N::ExpressionTail, T::End), Some(&[][..]));
        assert_eq!(table.production(N::Expression, T::Semicolon), None);
        assert_eq!(table.production(N::Expression, T::StringLiteral), None);
    }

    #[test]
    fn test_expected_lookaheads_follow_terminal_order() {
        let table = ParseTable::standard().unwrap();
        assert_eq!(
            table.expected_lookaheads(N::ClassKind),
            vec![T::Class, T::Interface]
        );
        assert_eq!(
            table.expected_lookaheads(N::InitializerTail),
            vec![T::RBrace, T::Comma]
        );
    }

    #[test]
    fn test_conflicting_rules_rejected() {
        static CONFLICTING: &[Rule] = &[
            Rule {
                lhs: N::ArraySuffix,
                lookaheads: &[T::LBracket],
                rhs: &[t(T::LBracket), t(T::RBracket)],
            },
            Rule {
                lhs: N::ArraySuffix,
                lookaheads: &[T::Identifier, T::LBracket],
                rhs: &[],
            },
        ];

        let result = ParseTable::from_rules(CONFLICTING);
        assert_matches!(
            result,
            Err(GrammarError::Conflict {
                non_terminal: N::ArraySuffix,
                lookahead: T::LBracket
            })
        );
    }

    #[test]
    fn test_entries_sorted() {
        let table = ParseTable::standard().unwrap();
        let entries = table.entries();
        assert_eq!(entries.len(), table.len());
        assert_eq!(entries[0].0, N::StatementList);
        assert!(entries.windows(2).all(|w| (w[0].0, w[0].1) < (w[1].0, w[1].1)));
    }

    #[test]
    fn test_format_production() {
        assert_eq!(format_production(&[]), "ε");
        assert_eq!(
            format_production(&[t(T::Int), n(N::ArraySuffix), t(T::Identifier)]),
            "int T' ID"
        );
    }
}
