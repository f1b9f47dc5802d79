//! Symbol tracking for scanned sources
//!
//! The scanner records every identifier lexeme it classifies in an
//! [`IdentifierTable`]. Keywords never enter the table.

pub mod table;

pub use table::{IdentifierEntry, IdentifierTable};
