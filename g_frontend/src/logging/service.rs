//! Logging service and its output targets

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::Arc;

/// Destination for log events
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level-filtering front for a `Logger`
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Build the service from the runtime preferences
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let logger: Arc<dyn Logger> = if config::use_structured_logging() {
            Arc::new(StructuredLogger::new(min_level))
        } else {
            Arc::new(ConsoleLogger::new(min_level))
        };

        Self::new(logger, min_level)
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    pub fn log_success(&self, success_code: Code, message: &str) {
        self.log_event(LogEvent::success(success_code, message));
    }
}

/// Plain text to the terminal; errors and warnings go to stderr
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            match event.level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", event.format()),
                _ => println!("{}", event.format()),
            }
        }
    }
}

/// One JSON object per line
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            let line = event.format_json().unwrap_or_else(|_| event.format());
            match event.level {
                LogLevel::Error | LogLevel::Warning => eprintln!("{}", line),
                _ => println!("{}", line),
            }
        }
    }
}

pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Captured(Mutex<Vec<LogEvent>>);

    impl Logger for Captured {
        fn log(&self, event: &LogEvent) {
            if let Ok(mut events) = self.0.lock() {
                events.push(event.clone());
            }
        }
    }

    #[test]
    fn test_log_level_filtering() {
        let captured = Arc::new(Captured::default());
        let service = LoggingService::new(captured.clone(), LogLevel::Warning);

        service.log_event(LogEvent::debug("Debug message"));
        service.log_event(LogEvent::info("Info message"));
        service.log_success(codes::success::SCAN_COMPLETED, "done");
        service.log_event(LogEvent::warning(codes::imports::REDUNDANT_EXTENSION, "extension"));
        service.log_event(LogEvent::error(codes::system::INTERNAL_ERROR, "Error message"));

        let events = captured.0.lock().unwrap();
        let kept: Vec<_> = events.iter().map(|e| e.code).collect();
        assert_eq!(
            kept,
            vec![codes::imports::REDUNDANT_EXTENSION, codes::system::INTERNAL_ERROR]
        );
        assert!(!service.should_log(LogLevel::Debug));
    }

    #[test]
    fn test_console_and_structured_loggers_do_not_panic() {
        let event = LogEvent::error(codes::imports::FILE_NOT_FOUND, "Test error")
            .with_context("file", "a.g");
        ConsoleLogger::new(LogLevel::Debug).log(&event);
        StructuredLogger::new(LogLevel::Debug).log(&event);
    }
}
