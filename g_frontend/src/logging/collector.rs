//! Per-source collection of diagnostics with cargo-style output

use super::events::LogEvent;
use super::codes;
use crate::config::compile_time::logging::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub clean_files: usize,
    pub failed_files: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe store of diagnostics keyed by source path
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
        }
    }

    fn events(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Vec<LogEvent>>> {
        self.file_events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record an event; past the per-file limit a single overflow warning is kept
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = self.events();
        let file_events = events.entry(file_path.to_path_buf()).or_default();

        if file_events.len() < MAX_LOG_EVENTS_PER_FILE {
            file_events.push(event);
        } else if file_events.len() == MAX_LOG_EVENTS_PER_FILE {
            file_events.push(LogEvent::warning(
                codes::system::INTERNAL_ERROR,
                &format!(
                    "Too many events for file (limit: {})",
                    MAX_LOG_EVENTS_PER_FILE
                ),
            ));
        }
    }

    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        self.events().clone()
    }

    pub fn get_summary(&self) -> ProcessingSummary {
        let events = self.events();

        let mut summary = ProcessingSummary {
            total_files: events.len(),
            ..Default::default()
        };

        for file_events in events.values() {
            let errors = file_events.iter().filter(|e| e.is_error()).count();
            let warnings = file_events.iter().filter(|e| e.is_warning()).count();

            if errors > 0 {
                summary.failed_files += 1;
            } else if warnings > 0 {
                summary.files_with_warnings += 1;
            } else {
                summary.clean_files += 1;
            }

            summary.total_errors += errors;
            summary.total_warnings += warnings;
        }

        summary
    }
}

impl Default for ErrorCollector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CARGO-STYLE FORMATTING
// ============================================================================

pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (file_path, events) in &collector.get_all_file_events() {
        let reportable: Vec<_> = events
            .iter()
            .filter(|e| e.is_error() || e.is_warning())
            .collect();
        if reportable.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", file_path.display()));

        for event in reportable {
            let kind = if event.is_error() { "error" } else { "warning" };
            let location = event
                .span
                .as_ref()
                .map(|s| {
                    format!(
                        " --> {}:{}:{}",
                        file_path.display(),
                        s.start().line,
                        s.start().column
                    )
                })
                .unwrap_or_default();

            output.push_str(&format!(
                "{}[{}]: {}{}\n",
                kind,
                event.code.as_str(),
                event.message,
                location
            ));

            if event.is_error() {
                output.push_str(&format!(
                    "  = severity: {}, category: {}\n",
                    event.severity(),
                    event.category()
                ));

                let action = event.recommended_action();
                if action != "No specific action available" {
                    output.push_str(&format!("  = help: {}\n", action));
                }
            }
        }

        output.push('\n');
    }

    let summary = collector.get_summary();
    if summary.total_errors > 0 {
        output.push_str(&format!("Total errors: {}\n", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{Position, Span};

    #[test]
    fn test_error_collector_basic() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("main.g");

        collector.record_event(
            &file_path,
            LogEvent::error(codes::lexical::UNTERMINATED_STRING, "unterminated string"),
        );

        let recorded = collector.get_all_file_events();
        assert_eq!(recorded.len(), 1);
        assert!(recorded[&file_path][0].is_error());
    }

    #[test]
    fn test_processing_summary() {
        let collector = ErrorCollector::new();

        collector.record_event(
            Path::new("a.g"),
            LogEvent::error(codes::lexical::MALFORMED_NUMBER, "malformed hex number"),
        );
        collector.record_event(
            Path::new("b.g"),
            LogEvent::warning(codes::lexical::INVALID_CHARACTER, "unrecognized character"),
        );
        collector.record_event(
            Path::new("c.g"),
            LogEvent::success(codes::success::SOURCE_OPENED, "opened"),
        );

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.failed_files, 1);
        assert_eq!(summary.files_with_warnings, 1);
        assert_eq!(summary.clean_files, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
    }

    #[test]
    fn test_per_file_limit() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("noisy.g");

        for _ in 0..MAX_LOG_EVENTS_PER_FILE + 10 {
            collector.record_event(
                &file_path,
                LogEvent::warning(codes::lexical::INVALID_CHARACTER, "unrecognized character"),
            );
        }

        assert_eq!(
            collector.get_all_file_events()[&file_path].len(),
            MAX_LOG_EVENTS_PER_FILE + 1
        );
    }

    #[test]
    fn test_cargo_style_output() {
        let collector = ErrorCollector::new();
        collector.record_event(
            Path::new("main.g"),
            LogEvent::error(codes::syntax::UNEXPECTED_TOKEN, "expected a symbol")
                .with_span(Span::single(Position::new(0, 4, 2))),
        );

        let output = format_cargo_style_errors(&collector);
        assert!(output.contains("Checking main.g..."));
        assert!(output.contains("error[E030]: expected a symbol --> main.g:4:2"));
        assert!(output.contains("Total errors: 1"));
    }
}
