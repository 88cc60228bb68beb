//! Diagnostic codes and their classification
//!
//! Every diagnostic the front end emits carries one of these codes. Metadata (severity,
//! recoverability, whether the run must stop) lives in a single registry next to the constants.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Code attached to every log event, for errors and successes alike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Locating and opening imported sources
pub mod imports {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const CANNOT_OPEN: Code = Code::new("E009");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const REDUNDANT_EXTENSION: Code = Code::new("W005");
}

pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const MALFORMED_NUMBER: Code = Code::new("E022");
    pub const LINE_BREAK_IN_STRING: Code = Code::new("E023");
    pub const INVALID_STRING_CONTINUATION: Code = Code::new("E024");
    pub const INVALID_ESCAPE: Code = Code::new("E025");
    pub const UNTERMINATED_COMMENT: Code = Code::new("E026");
    pub const NESTING_TOO_DEEP: Code = Code::new("E027");
    pub const SOURCE_OPEN_FAILED: Code = Code::new("E028");
    pub const READ_FAILURE: Code = Code::new("E029");
}

pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_TOKEN: Code = Code::new("E030");
}

pub mod symbols {
    use super::Code;

    pub const DUPLICATE_SYMBOL: Code = Code::new("E040");
    pub const SYMBOL_NOT_FOUND: Code = Code::new("E041");
    pub const SYMBOL_ENCODING: Code = Code::new("E042");
    pub const PAYLOAD_MISMATCH: Code = Code::new("E043");
}

pub mod hashtable {
    use super::Code;

    pub const KEY_EXISTS: Code = Code::new("E050");
    pub const KEY_NOT_FOUND: Code = Code::new("E051");
    pub const EMPTY_VALUE: Code = Code::new("E052");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I001");
    pub const SOURCE_OPENED: Code = Code::new("I010");
    pub const SOURCE_CLOSED: Code = Code::new("I011");
    pub const SCAN_COMPLETED: Code = Code::new("I020");
    pub const SYMBOL_DECLARED: Code = Code::new("I040");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();
        let mut add = |code: Code,
                       category: &'static str,
                       severity: Severity,
                       recoverable: bool,
                       requires_halt: bool,
                       description: &'static str,
                       recommended_action: &'static str| {
            registry.insert(
                code.as_str(),
                ErrorMetadata {
                    code: code.as_str(),
                    category,
                    severity,
                    recoverable,
                    requires_halt,
                    description,
                    recommended_action,
                },
            );
        };

        // System
        add(
            system::INTERNAL_ERROR,
            "System",
            Severity::Critical,
            false,
            true,
            "Critical internal error",
            "File a bug report with the input that triggered it",
        );
        add(
            system::INITIALIZATION_FAILURE,
            "System",
            Severity::Critical,
            false,
            true,
            "Front end initialization failure",
            "Check the configuration and environment variables",
        );

        // Imports
        add(
            imports::FILE_NOT_FOUND,
            "Imports",
            Severity::High,
            false,
            false,
            "Imported source not found on the search path",
            "Check the import name, the -i directories and G_INCLUDE",
        );
        add(
            imports::CANNOT_OPEN,
            "Imports",
            Severity::High,
            false,
            false,
            "Imported source exists but cannot be opened",
            "Check file permissions",
        );
        add(
            imports::IO_ERROR,
            "Imports",
            Severity::Medium,
            false,
            false,
            "I/O error while locating a source",
            "Check the file system",
        );
        add(
            imports::INVALID_PATH,
            "Imports",
            Severity::Medium,
            true,
            false,
            "Import name does not form a valid path",
            "Use a plain module name",
        );
        add(
            imports::REDUNDANT_EXTENSION,
            "Imports",
            Severity::Low,
            true,
            false,
            "Import name includes the source extension",
            "Drop the extension from the import name",
        );

        // Lexical
        add(
            lexical::INVALID_CHARACTER,
            "Lexical",
            Severity::Low,
            true,
            false,
            "Unrecognized character in source text",
            "Remove the character",
        );
        add(
            lexical::UNTERMINATED_STRING,
            "Lexical",
            Severity::Medium,
            true,
            false,
            "String literal not terminated before end of file",
            "Add the closing quote",
        );
        add(
            lexical::MALFORMED_NUMBER,
            "Lexical",
            Severity::Medium,
            true,
            false,
            "Numeric literal is malformed",
            "Fix the digits, exponent or radix prefix",
        );
        add(
            lexical::LINE_BREAK_IN_STRING,
            "Lexical",
            Severity::Medium,
            true,
            false,
            "String literal contains a raw line break",
            "Split the string into continued segments",
        );
        add(
            lexical::INVALID_STRING_CONTINUATION,
            "Lexical",
            Severity::Medium,
            true,
            false,
            "Comma after a string is not followed by another segment",
            "Start another string segment with the same quote",
        );
        add(
            lexical::INVALID_ESCAPE,
            "Lexical",
            Severity::Low,
            true,
            false,
            "Numeric escape has no digits",
            "Add digits after the escape or remove it",
        );
        add(
            lexical::UNTERMINATED_COMMENT,
            "Lexical",
            Severity::Medium,
            true,
            false,
            "Block comment not closed before end of file",
            "Close the comment with */",
        );
        add(
            lexical::NESTING_TOO_DEEP,
            "Lexical",
            Severity::Critical,
            false,
            true,
            "Too many nested imports",
            "Look for an import cycle",
        );
        add(
            lexical::SOURCE_OPEN_FAILED,
            "Lexical",
            Severity::Critical,
            false,
            true,
            "Source could not be opened for scanning",
            "Check that the file exists and is readable",
        );
        add(
            lexical::READ_FAILURE,
            "Lexical",
            Severity::High,
            false,
            false,
            "Read failed while scanning a source",
            "Check the file system",
        );

        // Syntax
        add(
            syntax::UNEXPECTED_TOKEN,
            "Syntax",
            Severity::Medium,
            true,
            false,
            "Token does not match what the grammar expects here",
            "Fix the syntax at the reported position",
        );

        // Symbols
        add(
            symbols::DUPLICATE_SYMBOL,
            "Symbols",
            Severity::Medium,
            true,
            false,
            "Name declared twice in the same scope",
            "Rename or remove one of the declarations",
        );
        add(
            symbols::SYMBOL_NOT_FOUND,
            "Symbols",
            Severity::Medium,
            true,
            false,
            "Name used but never declared",
            "Declare the name or fix the spelling",
        );
        add(
            symbols::SYMBOL_ENCODING,
            "Symbols",
            Severity::Critical,
            false,
            true,
            "Stored symbol could not be encoded or decoded",
            "File a bug report",
        );
        add(
            symbols::PAYLOAD_MISMATCH,
            "Symbols",
            Severity::Medium,
            true,
            false,
            "Symbol value does not match its assignment type",
            "Assign a value of the declared type",
        );

        // Hash table
        add(
            hashtable::KEY_EXISTS,
            "HashTable",
            Severity::Low,
            true,
            false,
            "Key already present",
            "Use replace to overwrite an existing entry",
        );
        add(
            hashtable::KEY_NOT_FOUND,
            "HashTable",
            Severity::Low,
            true,
            false,
            "Key not present",
            "Insert the key before replacing it",
        );
        add(
            hashtable::EMPTY_VALUE,
            "HashTable",
            Severity::Low,
            true,
            false,
            "Value blob is empty",
            "Store at least one byte",
        );

        // Success
        add(
            success::SYSTEM_INITIALIZATION_COMPLETED,
            "Success",
            Severity::Low,
            true,
            false,
            "Logging initialized",
            "None",
        );
        add(
            success::SOURCE_OPENED,
            "Success",
            Severity::Low,
            true,
            false,
            "Source pushed onto the scanner",
            "None",
        );
        add(
            success::SOURCE_CLOSED,
            "Success",
            Severity::Low,
            true,
            false,
            "Source popped from the scanner",
            "None",
        );
        add(
            success::SCAN_COMPLETED,
            "Success",
            Severity::Low,
            true,
            false,
            "All sources scanned",
            "None",
        );
        add(
            success::SYMBOL_DECLARED,
            "Success",
            Severity::Low,
            true,
            false,
            "Symbol declared",
            "None",
        );

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Whether a diagnostic with this code stops the run
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_has_metadata() {
        let all = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            imports::FILE_NOT_FOUND,
            imports::CANNOT_OPEN,
            imports::IO_ERROR,
            imports::INVALID_PATH,
            imports::REDUNDANT_EXTENSION,
            lexical::INVALID_CHARACTER,
            lexical::UNTERMINATED_STRING,
            lexical::MALFORMED_NUMBER,
            lexical::LINE_BREAK_IN_STRING,
            lexical::INVALID_STRING_CONTINUATION,
            lexical::INVALID_ESCAPE,
            lexical::UNTERMINATED_COMMENT,
            lexical::NESTING_TOO_DEEP,
            lexical::SOURCE_OPEN_FAILED,
            lexical::READ_FAILURE,
            syntax::UNEXPECTED_TOKEN,
            symbols::DUPLICATE_SYMBOL,
            symbols::SYMBOL_NOT_FOUND,
            symbols::SYMBOL_ENCODING,
            symbols::PAYLOAD_MISMATCH,
            hashtable::KEY_EXISTS,
            hashtable::KEY_NOT_FOUND,
            hashtable::EMPTY_VALUE,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::SOURCE_OPENED,
            success::SOURCE_CLOSED,
            success::SCAN_COMPLETED,
            success::SYMBOL_DECLARED,
        ];

        for code in all {
            let metadata = get_error_metadata(code.as_str());
            assert!(metadata.is_some(), "missing metadata for {}", code);
            assert_eq!(metadata.unwrap().code, code.as_str());
        }
    }

    #[test]
    fn test_fatal_codes_require_halt() {
        assert!(requires_halt(lexical::NESTING_TOO_DEEP.as_str()));
        assert!(requires_halt(lexical::SOURCE_OPEN_FAILED.as_str()));
        assert!(!requires_halt(lexical::UNTERMINATED_STRING.as_str()));
        assert!(!requires_halt("E999"));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X000"), "Unknown error");
        assert_eq!(get_category("X000"), "Unknown");
        assert_eq!(get_severity("X000"), Severity::Medium);
        assert!(is_recoverable("X000"));
    }
}
