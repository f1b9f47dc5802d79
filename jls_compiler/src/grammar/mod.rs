//! Grammar definitions: symbols, lexicon and the predictive parse table

pub mod analysis;
pub mod error;
pub mod keywords;
pub mod symbols;
pub mod table;

pub use analysis::{verify_table, FirstSets};
pub use error::{GrammarError, GrammarResult};
pub use keywords::{delimiter, keyword, match_operator, OPERATORS};
pub use symbols::{NonTerminal, Symbol, Terminal};
pub use table::{format_production, ParseTable, Rule, RULES};
