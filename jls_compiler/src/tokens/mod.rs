//! Token model for the Java-like subset
//!
//! The scanner turns source text into a [`TokenStream`] of [`Token`]s. Each
//! token carries two classifications:
//!
//! - a fine-grained [`TokenKind`] (`KEYWORD`, `NUMBER_FLOAT`, ...) used in
//!   listings and metrics
//! - a coarse [`Terminal`](crate::grammar::Terminal) category, which is all
//!   the parser sees
//!
//! A stream can be written out as a text listing and read back later as
//! parser input; see [`listing`].

pub mod listing;
pub mod token;
pub mod token_stream;

pub use listing::{parse_listing, read_listing, render_listing, write_listing, ListingError};
pub use token::{Token, TokenKind};
pub use token_stream::{InputSymbol, TokenStream};

// Re-export span types from utils
pub use crate::utils::{Position, Span};
