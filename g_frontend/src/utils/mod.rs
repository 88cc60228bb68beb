//! Shared location types used by the scanner and the logging layer

pub mod span;

pub use span::{Position, Span};
