//! FIRST-set analysis over a rule list
//!
//! Used to cross-check hand-written lookaheads: a rule predicted by a
//! terminal must be able to derive a string starting with that terminal,
//! unless the rule can derive ε (its lookaheads then come from FOLLOW).

use super::error::GrammarError;
use super::symbols::{NonTerminal, Symbol, Terminal};
use super::table::{format_production, Rule};
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct FirstSets {
    nullable: HashSet<NonTerminal>,
    first: HashMap<NonTerminal, BTreeSet<Terminal>>,
}

impl FirstSets {
    /// Fixed-point computation of nullable non-terminals and FIRST sets
    pub fn compute(rules: &[Rule]) -> Self {
        let mut sets = Self::default();

        let mut changed = true;
        while changed {
            changed = false;

            for rule in rules {
                if !sets.nullable.contains(&rule.lhs) && sets.is_sequence_nullable(rule.rhs) {
                    sets.nullable.insert(rule.lhs);
                    changed = true;
                }

                let additions = sets.first_of_sequence(rule.rhs);
                let entry = sets.first.entry(rule.lhs).or_default();
                let before = entry.len();
                entry.extend(additions);
                if entry.len() != before {
                    changed = true;
                }
            }
        }

        sets
    }

    pub fn is_nullable(&self, non_terminal: NonTerminal) -> bool {
        self.nullable.contains(&non_terminal)
    }

    pub fn first(&self, non_terminal: NonTerminal) -> BTreeSet<Terminal> {
        self.first.get(&non_terminal).cloned().unwrap_or_default()
    }

    pub fn is_sequence_nullable(&self, symbols: &[Symbol]) -> bool {
        symbols.iter().all(|symbol| match symbol {
            Symbol::Terminal(_) => false,
            Symbol::NonTerminal(nt) => self.nullable.contains(nt),
        })
    }

    /// FIRST of a symbol sequence, not including ε
    pub fn first_of_sequence(&self, symbols: &[Symbol]) -> BTreeSet<Terminal> {
        let mut result = BTreeSet::new();
        for symbol in symbols {
            match symbol {
                Symbol::Terminal(t) => {
                    result.insert(*t);
                    return result;
                }
                Symbol::NonTerminal(nt) => {
                    if let Some(first) = self.first.get(nt) {
                        result.extend(first.iter().copied());
                    }
                    if !self.nullable.contains(nt) {
                        return result;
                    }
                }
            }
        }
        result
    }
}

/// Every rule lookahead that FIRST of its production does not predict
pub fn verify_table(rules: &[Rule]) -> Vec<GrammarError> {
    let sets = FirstSets::compute(rules);
    let mut problems = Vec::new();

    for rule in rules {
        if rule.is_epsilon() || sets.is_sequence_nullable(rule.rhs) {
            continue;
        }

        let first = sets.first_of_sequence(rule.rhs);
        for &lookahead in rule.lookaheads {
            if !first.contains(&lookahead) {
                problems.push(GrammarError::inconsistent(
                    rule.lhs,
                    lookahead,
                    &format_production(rule.rhs),
                ));
            }
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::table::RULES;
    use assert_matches::assert_matches;

    #[test]
    fn test_standard_rules_are_first_consistent() {
        let problems = verify_table(RULES);
        assert!(problems.is_empty(), "{:?}", problems);
    }

    #[test]
    fn test_nullable_non_terminals() {
        let sets = FirstSets::compute(RULES);

        for nt in [
            NonTerminal::StatementList,
            NonTerminal::ArraySuffix,
            NonTerminal::Block,
            NonTerminal::BlockTail,
            NonTerminal::ExpressionTail,
            NonTerminal::InitializerTail,
            NonTerminal::ArgumentList,
            NonTerminal::ArgumentTail,
        ] {
            assert!(sets.is_nullable(nt), "{} should be nullable", nt);
        }

        assert!(!sets.is_nullable(NonTerminal::Statement));
        assert!(!sets.is_nullable(NonTerminal::Expression));
        assert!(!sets.is_nullable(NonTerminal::InitializerList));
    }

    #[test]
    fn test_first_sets() {
        let sets = FirstSets::compute(RULES);

        let expression: Vec<_> = sets.first(NonTerminal::Expression).into_iter().collect();
        assert_eq!(
            expression,
            vec![
                Terminal::Not,
                Terminal::Plus,
                Terminal::Minus,
                Terminal::LBrace,
                Terminal::LParen,
                Terminal::Identifier,
                Terminal::Number,
            ]
        );

        let modifiers = sets.first(NonTerminal::Modifier);
        assert_eq!(modifiers.len(), 6);
        assert!(sets.first(NonTerminal::Statement).is_superset(&modifiers));
    }

    #[test]
    fn test_mispredicted_rule_reported() {
        static BROKEN: &[Rule] = &[Rule {
            lhs: NonTerminal::ClassKind,
            lookaheads: &[Terminal::Class, Terminal::Identifier],
            rhs: &[Symbol::Terminal(Terminal::Class)],
        }];

        let problems = verify_table(BROKEN);
        assert_eq!(problems.len(), 1);
        assert_matches!(
            &problems[0],
            GrammarError::Inconsistent {
                non_terminal: NonTerminal::ClassKind,
                lookahead: Terminal::Identifier,
                production,
            } if production == "class"
        );
    }
}
