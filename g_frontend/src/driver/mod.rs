//! Top-level dispatch over a source and its imports
//!
//! The [`Driver`] owns the scanner, the symbol table, the import resolver and the shared
//! [`Reporter`]. At the top level of a source it accepts `class` definitions, `import`
//! statements and out-of-class definitions; class and method bodies are skipped as
//! brace-balanced blocks. Anything else is reported and the driver resynchronizes on the
//! next brace.

mod error;

pub use error::DriverError;

use crate::config::runtime::RuntimeConfig;
use crate::imports::ImportResolver;
use crate::lexical::Scanner;
use crate::logging::codes;
use crate::logging::Reporter;
use crate::symbols::{render_human_readable, Symbol, SymbolError, SymbolTable};
use crate::tokens::{ScannedToken, TokenKind};
use std::io::Write;
use std::path::Path;

/// Counts for one finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub errors: usize,
    pub warnings: usize,
    pub tokens: usize,
    pub symbols: usize,
    pub sources: usize,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.errors == 0
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "errors: {} warnings: {}", self.errors, self.warnings)
    }
}

pub struct Driver {
    scanner: Scanner,
    symbols: SymbolTable,
    resolver: ImportResolver,
    reporter: Reporter,
}

impl Driver {
    pub fn new(config: &RuntimeConfig, reporter: Reporter) -> Self {
        Self::with_resolver(config, ImportResolver::new(&config.imports), reporter)
    }

    pub fn with_resolver(
        config: &RuntimeConfig,
        resolver: ImportResolver,
        reporter: Reporter,
    ) -> Self {
        Self {
            scanner: Scanner::with_preferences(reporter.clone(), config.scanner.clone()),
            symbols: SymbolTable::new(reporter.clone()),
            resolver,
            reporter,
        }
    }

    /// Scan `path` and everything it imports, declaring the classes found
    pub fn run<P: AsRef<Path>>(&mut self, path: P) -> Result<RunSummary, DriverError> {
        let path = path.as_ref();
        log_info!("Scanning source", "file" => path.display());
        self.scanner.open_source(path)?;

        loop {
            match self.scanner.next_token() {
                TokenKind::Class => self.class_definition()?,
                TokenKind::Import => self.import_statement()?,
                TokenKind::Symbol
                | TokenKind::Public
                | TokenKind::Private
                | TokenKind::Protected => self.skip_definition(),
                TokenKind::Error => self.eat_block(),
                TokenKind::EndOfInput => break,
                other => {
                    let message =
                        format!("expected 'class', symbol, or 'import' but got a {}", other);
                    self.reporter.syntax(
                        codes::syntax::UNEXPECTED_TOKEN,
                        &self.scanner.token_location(),
                        &message,
                    );
                }
            }
        }

        let summary = self.summary();
        log_success!(codes::success::SCAN_COMPLETED, "Scan completed",
            "file" => path.display(),
            "symbols" => summary.symbols,
            "errors" => summary.errors
        );
        Ok(summary)
    }

    /// Write one line per token of `path` and its imports
    pub fn dump_tokens<P: AsRef<Path>>(
        &mut self,
        path: P,
        out: &mut dyn Write,
    ) -> Result<RunSummary, DriverError> {
        self.scanner.open_source(path.as_ref())?;

        let mut after_import = false;
        loop {
            let kind = self.scanner.next_token();
            if kind == TokenKind::EndOfInput {
                break;
            }
            writeln!(out, "{}", self.scanned(kind)).map_err(DriverError::output)?;

            if after_import && kind == TokenKind::QStrg {
                let name = self.scanner.current_lexeme_text();
                self.open_import(&name)?;
            }
            after_import = kind == TokenKind::Import;
        }
        Ok(self.summary())
    }

    /// Write every declared symbol, undecorated, in name order
    pub fn write_symbols(&self, out: &mut dyn Write) -> Result<(), DriverError> {
        for name in self.symbols.names() {
            let symbol = self.symbols.resolve(&name)?;
            writeln!(
                out,
                "{:<10} {}",
                symbol.kind.as_str(),
                render_human_readable(&name)
            )
            .map_err(DriverError::output)?;
        }
        Ok(())
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn summary(&self) -> RunSummary {
        let metrics = self.scanner.metrics();
        RunSummary {
            errors: self.reporter.error_count(),
            warnings: self.reporter.warning_count(),
            tokens: metrics.total_tokens,
            symbols: self.symbols.len(),
            sources: metrics.sources_opened,
        }
    }

    fn scanned(&self, kind: TokenKind) -> ScannedToken {
        let location = self.scanner.token_location();
        ScannedToken {
            kind,
            text: self.scanner.current_lexeme_text(),
            file: location.file,
            line: location.line,
            column: location.column,
        }
    }

    // ========================================================================
    // Top-level forms
    // ========================================================================

    /// `class NAME ... { body }`
    fn class_definition(&mut self) -> Result<(), DriverError> {
        if self.scanner.expect(TokenKind::Symbol) != TokenKind::Symbol {
            self.eat_block();
            return Ok(());
        }

        let name = self.scanner.current_lexeme_text();
        self.symbols.begin_decoration();
        self.symbols.add_name_component(&name);
        match self.symbols.declare(Symbol::class()) {
            // already reported; the duplicate body is still skipped
            Ok(()) | Err(SymbolError::AlreadyExists { .. }) => {}
            Err(err) => return Err(err.into()),
        }

        self.skip_definition();
        Ok(())
    }

    /// `import "name"`
    fn import_statement(&mut self) -> Result<(), DriverError> {
        if self.scanner.expect(TokenKind::QStrg) != TokenKind::QStrg {
            return Ok(());
        }
        let name = self.scanner.current_lexeme_text();
        self.open_import(&name)
    }

    fn open_import(&mut self, name: &str) -> Result<(), DriverError> {
        let location = self.scanner.token_location();
        let resolved = match self.resolver.resolve(name) {
            Ok(resolved) => resolved,
            Err(err) => {
                self.reporter
                    .syntax(err.error_code(), &location, &err.to_string());
                return Err(err.into());
            }
        };

        if resolved.redundant_extension {
            self.reporter.warning(
                codes::imports::REDUNDANT_EXTENSION,
                &location,
                "do not include the file extension for import names",
            );
        }
        self.scanner.open_source(&resolved.path)?;
        Ok(())
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Skip a definition header up to `;`, or through its brace-balanced body
    fn skip_definition(&mut self) {
        loop {
            match self.scanner.next_token() {
                TokenKind::OpenCurly => {
                    self.skip_block();
                    return;
                }
                TokenKind::Semicolon | TokenKind::EndOfInput => return,
                _ => {}
            }
        }
    }

    /// Called just after an opening brace
    fn skip_block(&mut self) {
        let mut depth = 1usize;
        loop {
            match self.scanner.next_token() {
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                TokenKind::EndOfInput => {
                    let message = format!(
                        "expected a {} but got a {}.",
                        TokenKind::CloseCurly,
                        TokenKind::EndOfInput
                    );
                    self.reporter.syntax(
                        codes::syntax::UNEXPECTED_TOKEN,
                        &self.scanner.token_location(),
                        &message,
                    );
                    return;
                }
                _ => {}
            }
        }
    }

    /// Discard tokens through the next brace
    fn eat_block(&mut self) {
        loop {
            match self.scanner.next_token() {
                TokenKind::OpenCurly | TokenKind::CloseCurly | TokenKind::EndOfInput => return,
                _ => {}
            }
        }
    }
}

impl std::fmt::Debug for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("scanner", &self.scanner)
            .field("symbols", &self.symbols.len())
            .field("resolver", &self.resolver)
            .finish()
    }
}
