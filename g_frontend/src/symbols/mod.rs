//! Symbol table with decorated names
//!
//! Classes, methods, variables and constants are keyed by their decorated name (see
//! [`decoration`]). Overloaded methods differ in their type components, and block-local
//! variables carry the serial of the anonymous block they live in, so a flat table covers
//! every nesting level.

pub mod decoration;
pub mod error;
pub mod symbol;
pub mod table;

pub use decoration::{
    extract_class, extract_name, extract_type, render_human_readable, DecoratedName, Segment,
};
pub use error::{SymbolError, SymbolResult};
pub use symbol::{AssignType, Scope, Symbol, SymbolKind, SymbolMask, SymbolValue};
pub use table::SymbolTable;
