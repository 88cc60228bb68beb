//! Global logging for the G front end
//!
//! Two layers live here. The global `LoggingService` carries operational messages (sources
//! opened, symbols declared, debug traces) and is filtered by the user's verbosity. The
//! `Reporter` carries user-facing diagnostics, counts them, and feeds the global
//! `ErrorCollector` for the cargo-style summary.

#[macro_use]
pub mod macros;
pub mod codes;
pub mod collector;
pub mod config;
pub mod events;
pub mod reporter;
pub mod service;

use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use collector::{ErrorCollector, ProcessingSummary};
pub use events::{LogEvent, LogLevel};
pub use reporter::{Reporter, SourceLocation};
pub use service::{ConsoleLogger, Logger, LoggingService, StructuredLogger};

// ============================================================================
// GLOBAL STATE
// ============================================================================

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();
static GLOBAL_ERROR_COLLECTOR: OnceLock<Arc<ErrorCollector>> = OnceLock::new();

// ============================================================================
// INITIALIZATION
// ============================================================================

/// Initialize global logging from the runtime preferences
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());
    install_global_service(logging_service.clone())?;

    let required = [
        codes::system::INTERNAL_ERROR,
        codes::imports::FILE_NOT_FOUND,
        codes::lexical::NESTING_TOO_DEEP,
        codes::symbols::DUPLICATE_SYMBOL,
    ];
    for code in required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    logging_service.log_success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    );

    Ok(())
}

fn install_global_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized")?;

    GLOBAL_ERROR_COLLECTOR
        .set(Arc::new(ErrorCollector::new()))
        .map_err(|_| "Global error collector already initialized")?;

    Ok(())
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

pub fn try_get_global_error_collector() -> Option<&'static ErrorCollector> {
    GLOBAL_ERROR_COLLECTOR
        .get()
        .map(|collector| collector.as_ref())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

fn build_event(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    event
}

/// Used by `log_error!`
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(build_event(LogEvent::error(code, message), context));
    }
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(build_event(LogEvent::success(code, message), context));
    }
}

/// Used by `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(build_event(LogEvent::info(message), context));
    }
}

// ============================================================================
// COLLECTED DIAGNOSTICS
// ============================================================================

/// Totals over every source that produced a diagnostic
pub fn get_processing_summary() -> ProcessingSummary {
    try_get_global_error_collector()
        .map(|collector| collector.get_summary())
        .unwrap_or_default()
}

pub fn print_cargo_style_summary() {
    if let Some(collector) = try_get_global_error_collector() {
        println!("{}", collector::format_cargo_style_errors(collector));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_functions_without_initialization() {
        // Only meaningful before any other test initializes the globals
        if try_get_global_logger().is_some() {
            return;
        }
        log_error_with_context(codes::system::INTERNAL_ERROR, "internal", vec![]);
        log_info_with_context("info", vec![("key", "value")]);
        let summary = get_processing_summary();
        assert_eq!(summary.total_errors, 0);
        assert!(!summary.has_errors());
    }
}
