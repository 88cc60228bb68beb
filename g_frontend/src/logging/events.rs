//! Log events emitted by the front end

use super::codes::Code;
use crate::utils::Span;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// Core log event structure
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    pub span: Option<Span>,
    pub context: HashMap<String, String>,
}

impl LogEvent {
    fn with_level(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            code,
            message: message.to_string(),
            span: None,
            context: HashMap::new(),
        }
    }

    pub fn error(error_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Error, error_code, message)
    }

    pub fn warning(warning_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Warning, warning_code, message)
    }

    /// Info without a specific code
    pub fn info(message: &str) -> Self {
        Self::with_level(LogLevel::Info, Code::new("I000"), message)
    }

    /// Info carrying a success code
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Info, success_code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::with_level(LogLevel::Debug, Code::new("D000"), message)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.insert(key.to_string(), value.to_string());
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    pub fn is_debug(&self) -> bool {
        self.level == LogLevel::Debug
    }

    pub fn requires_halt(&self) -> bool {
        super::codes::requires_halt(self.code.as_str())
    }

    pub fn severity(&self) -> &'static str {
        super::codes::get_severity(self.code.as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        super::codes::get_category(self.code.as_str())
    }

    pub fn description(&self) -> &'static str {
        super::codes::get_description(self.code.as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        super::codes::get_action(self.code.as_str())
    }

    /// Source file recorded in the event context, if any
    pub fn file(&self) -> Option<&str> {
        self.context.get("file").map(String::as_str)
    }

    /// Render as a user-facing diagnostic line.
    ///
    /// Errors and warnings that carry a position read `Syntax Error: file: line: col: msg`
    /// or `Warning: file: line: col: msg`; without a position the location is omitted.
    /// Halting errors read `FATAL ERROR: msg`. Other levels fall back to `[LEVEL] code - msg`.
    pub fn format(&self) -> String {
        let prefix = match self.level {
            LogLevel::Error if self.requires_halt() => return format!("FATAL ERROR: {}", self.message),
            LogLevel::Error => "Syntax Error",
            LogLevel::Warning => "Warning",
            _ => {
                return format!(
                    "[{}] {} - {}",
                    self.level.as_str(),
                    self.code.as_str(),
                    self.message
                )
            }
        };

        match (self.file(), &self.span) {
            (Some(file), Some(span)) => format!(
                "{}: {}: {}: {}: {}",
                prefix,
                file,
                span.start().line,
                span.start().column,
                self.message
            ),
            _ => format!("{}: {}", prefix, self.message),
        }
    }

    /// Format with code metadata, for verbose output
    pub fn format_detailed(&self) -> String {
        let mut output = self.format();

        output.push_str(&format!("\n  Code: {}", self.code));
        output.push_str(&format!("\n  Category: {}", self.category()));
        output.push_str(&format!("\n  Severity: {}", self.severity()));

        let description = self.description();
        if description != "Unknown error" {
            output.push_str(&format!("\n  Description: {}", description));
        }

        let action = self.recommended_action();
        if action != "No specific action available" {
            output.push_str(&format!("\n  Recommended action: {}", action));
        }

        output
    }

    /// Format as JSON for structured logging
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let mut json = serde_json::json!({
            "timestamp": self.timestamp.to_rfc3339(),
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "message": self.message,
            "category": self.category(),
            "severity": self.severity(),
        });

        if self.is_error() {
            json["error_metadata"] = serde_json::json!({
                "requires_halt": self.requires_halt(),
                "description": self.description(),
                "recommended_action": self.recommended_action(),
            });
        }

        if let Some(span) = &self.span {
            json["span"] = serde_json::json!({
                "line": span.start().line,
                "column": span.start().column,
            });
        }

        if !self.context.is_empty() {
            json["context"] = serde_json::Value::Object(
                self.context
                    .iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                    .collect(),
            );
        }

        serde_json::to_string(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::Position;

    #[test]
    fn test_syntax_error_format_with_position() {
        let event = LogEvent::error(codes::lexical::UNTERMINATED_STRING, "unterminated string")
            .with_span(Span::single(Position::new(0, 3, 14)))
            .with_context("file", "main.g");

        assert_eq!(
            event.format(),
            "Syntax Error: main.g: 3: 14: unterminated string"
        );
    }

    #[test]
    fn test_warning_format_without_position() {
        let event = LogEvent::warning(codes::lexical::INVALID_CHARACTER, "unrecognized character");
        assert!(event.is_warning());
        assert_eq!(event.format(), "Warning: unrecognized character");
    }

    #[test]
    fn test_fatal_format() {
        let event = LogEvent::error(codes::lexical::NESTING_TOO_DEEP, "nesting too deep");
        assert!(event.requires_halt());
        assert_eq!(event.format(), "FATAL ERROR: nesting too deep");
    }

    #[test]
    fn test_success_event_format() {
        let event = LogEvent::success(codes::success::SCAN_COMPLETED, "done");
        assert!(event.is_info());
        assert_eq!(event.format(), "[INFO] I020 - done");
    }

    #[test]
    fn test_json_formatting() {
        let event = LogEvent::error(codes::symbols::DUPLICATE_SYMBOL, "name already exists: a")
            .with_context("file", "a.g");

        let json = event.format_json().unwrap();
        assert!(json.contains("\"level\":\"ERROR\""));
        assert!(json.contains("\"code\":\"E040\""));
        assert!(json.contains("\"category\":\"Symbols\""));
        assert!(json.contains("\"file\":\"a.g\""));
    }

    #[test]
    fn test_detailed_format_includes_metadata() {
        let event = LogEvent::error(codes::imports::FILE_NOT_FOUND, "cannot find import");
        let detailed = event.format_detailed();
        assert!(detailed.contains("Category: Imports"));
        assert!(detailed.contains("Recommended action"));
    }
}
