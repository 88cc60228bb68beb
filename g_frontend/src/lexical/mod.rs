//! Lexical analysis over a stack of sources
//!
//! The [`Scanner`] pulls bytes from the innermost open source, classifies one token per
//! `next_token` call, and reports problems through its [`Reporter`](crate::logging::Reporter).
//! Scan errors are local: the scanner reports, resynchronizes and keeps going. Only
//! resource failures (an unopenable source, too many nested sources) surface as
//! [`ScannerError`].

mod comments;
pub mod error;
mod numbers;
pub mod scanner;
pub mod source;
mod strings;

pub use error::{ScannerError, ScannerResult};
pub use scanner::{ScanMetrics, Scanner};
pub use source::{is_space, ScanChar, SourceFrame};

use crate::logging::Reporter;
use std::path::Path;

/// Scanner over a single file with default preferences
pub fn scan_file<P: AsRef<Path>>(path: P, reporter: Reporter) -> ScannerResult<Scanner> {
    let mut scanner = Scanner::new(reporter);
    scanner.open_source(path)?;
    Ok(scanner)
}

/// Scanner over in-memory text
pub fn scan_text(name: &str, text: &str, reporter: Reporter) -> ScannerResult<Scanner> {
    let mut scanner = Scanner::new(reporter);
    scanner.push_source(name, Box::new(std::io::Cursor::new(text.as_bytes().to_vec())))?;
    Ok(scanner)
}
