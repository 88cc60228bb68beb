//! Token kinds for the G language
//!
//! The scanner reports a [`TokenKind`] per token and keeps the token's text in its lexeme
//! buffer. Reserved words live in the sorted [`KEYWORDS`] table; the operator words
//! (`and`, `or`, `not`, `equ`, `neq`, `lt`, `lte`, `gt`, `gte`) share kinds with their symbolic
//! spellings so the grammar never has to tell them apart.

pub mod token;

pub use token::{lookup_keyword, ScannedToken, TokenClass, TokenKind, KEYWORDS};
