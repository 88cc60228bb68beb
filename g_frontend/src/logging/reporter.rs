//! Diagnostic sink shared by the scanner, the symbol table and the driver.
//!
//! A `Reporter` is a cheap clone handle: every clone writes into the same ledger, so error and
//! warning counts cover a whole run. Each diagnostic is rendered as one line (see
//! [`LogEvent::format`]) and recorded whole. The stderr echo is capped in length and skipped
//! for quiet reporters. Events are forwarded to the global `ErrorCollector` when logging is
//! initialized.

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use crate::utils::{Position, Span};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

/// Where a diagnostic points. A non-positive line means "no position".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: String,
    pub line: i32,
    pub column: i32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: i32, column: i32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    fn span(&self) -> Option<Span> {
        if self.line > 0 {
            let column = self.column.max(1) as u32;
            Some(Span::single(Position::new(0, self.line as u32, column)))
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
struct Ledger {
    errors: usize,
    warnings: usize,
    events: Vec<LogEvent>,
    lines: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Reporter {
    ledger: Arc<Mutex<Ledger>>,
    echo: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    /// Reporter that prints every diagnostic to stderr
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(Mutex::new(Ledger::default())),
            echo: true,
        }
    }

    /// Reporter that only records, for tests and embedding
    pub fn quiet() -> Self {
        Self {
            ledger: Arc::new(Mutex::new(Ledger::default())),
            echo: false,
        }
    }

    fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record one diagnostic and return the rendered line
    pub fn report(
        &self,
        level: LogLevel,
        code: Code,
        location: Option<&SourceLocation>,
        message: &str,
    ) -> String {
        let mut event = match level {
            LogLevel::Warning => LogEvent::warning(code, message),
            _ => LogEvent::error(code, message),
        };

        if let Some(location) = location {
            event = event.with_context("file", &location.file);
            if let Some(span) = location.span() {
                event = event.with_span(span);
            }
        }

        let line = event.format();

        if self.echo {
            if config::use_structured_logging() {
                eprintln!("{}", event.format_json().unwrap_or_else(|_| line.clone()));
            } else {
                eprintln!(
                    "{}",
                    truncate_line(&line, config::get_max_log_message_length())
                );
            }
        }

        if let Some(collector) = super::try_get_global_error_collector() {
            let file = location.map(|l| l.file.as_str()).unwrap_or("<input>");
            collector.record_event(Path::new(file), event.clone());
        }

        let mut ledger = self.ledger();
        if event.is_warning() {
            ledger.warnings += 1;
        } else {
            ledger.errors += 1;
        }
        ledger.events.push(event);
        ledger.lines.push(line.clone());
        line
    }

    /// `Syntax Error: file: line: col: msg`
    pub fn syntax(&self, code: Code, location: &SourceLocation, message: &str) -> String {
        self.report(LogLevel::Error, code, Some(location), message)
    }

    /// `Warning: file: line: col: msg`
    pub fn warning(&self, code: Code, location: &SourceLocation, message: &str) -> String {
        self.report(LogLevel::Warning, code, Some(location), message)
    }

    /// `FATAL ERROR: msg`. `code` should be one whose metadata requires a halt; the caller is
    /// responsible for stopping.
    pub fn fatal(&self, code: Code, message: &str) -> String {
        self.report(LogLevel::Error, code, None, message)
    }

    pub fn error_count(&self) -> usize {
        self.ledger().errors
    }

    pub fn warning_count(&self) -> usize {
        self.ledger().warnings
    }

    /// Whether any recorded error requires stopping the run
    pub fn has_fatal(&self) -> bool {
        self.ledger()
            .events
            .iter()
            .any(|e| e.is_error() && e.requires_halt())
    }

    pub fn events(&self) -> Vec<LogEvent> {
        self.ledger().events.clone()
    }

    /// Rendered diagnostic lines in emission order
    pub fn lines(&self) -> Vec<String> {
        self.ledger().lines.clone()
    }

    pub fn summary_line(&self) -> String {
        let ledger = self.ledger();
        format!("errors: {} warnings: {}", ledger.errors, ledger.warnings)
    }
}

/// Cap a rendered line below `max` characters, never splitting a character
fn truncate_line(line: &str, max: usize) -> String {
    let limit = max.saturating_sub(1);
    match line.char_indices().nth(limit) {
        Some((cut, _)) => line[..cut].to_string(),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_counts_are_shared_between_clones() {
        let reporter = Reporter::quiet();
        let clone = reporter.clone();
        let location = SourceLocation::new("main.g", 2, 5);

        reporter.syntax(codes::lexical::UNTERMINATED_STRING, &location, "unterminated string");
        clone.warning(codes::lexical::INVALID_CHARACTER, &location, "unrecognized character");

        assert_eq!(reporter.error_count(), 1);
        assert_eq!(reporter.warning_count(), 1);
        assert_eq!(clone.summary_line(), "errors: 1 warnings: 1");
    }

    #[test]
    fn test_rendered_lines() {
        let reporter = Reporter::quiet();
        let located = SourceLocation::new("main.g", 3, 14);
        let unplaced = SourceLocation::new("no open file", -1, -1);

        let line = reporter.syntax(codes::lexical::MALFORMED_NUMBER, &located, "malformed hex number");
        assert_eq!(line, "Syntax Error: main.g: 3: 14: malformed hex number");

        let line = reporter.warning(codes::lexical::INVALID_CHARACTER, &unplaced, "unrecognized character");
        assert_eq!(line, "Warning: unrecognized character");

        let line = reporter.fatal(codes::lexical::NESTING_TOO_DEEP, "too many nested imports");
        assert_eq!(line, "FATAL ERROR: too many nested imports");
        assert!(reporter.has_fatal());
        assert_eq!(reporter.lines().len(), 3);
    }

    #[test]
    fn test_long_messages_are_recorded_whole() {
        let reporter = Reporter::quiet();
        let location = SourceLocation::new("main.g", 1, 1);
        let run = "7".repeat(500);
        let message = format!("malformed octal number: 0{}9", run);

        let line = reporter.syntax(codes::lexical::MALFORMED_NUMBER, &location, &message);
        assert!(line.ends_with(&format!("0{}9", run)));
        assert_eq!(reporter.lines(), vec![line.clone()]);

        let echoed = truncate_line(&line, config::get_max_log_message_length());
        assert_eq!(echoed.chars().count(), config::get_max_log_message_length() - 1);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_line("héllo", 3), "hé");
        assert_eq!(truncate_line("short", 100), "short");
    }
}
