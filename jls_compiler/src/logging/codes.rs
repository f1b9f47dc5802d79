//! Consolidated error codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
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

/// Error severity levels
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

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Critical" => Some(Severity::Critical),
            "High" => Some(Severity::High),
            "Medium" => Some(Severity::Medium),
            "Low" => Some(Severity::Low),
            _ => None,
        }
    }
}

/// Complete metadata for an error code
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

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("E070");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_LEXEME: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const UNTERMINATED_BLOCK_COMMENT: Code = Code::new("E022");
}

/// Syntax analysis and grammar table error codes
pub mod syntax {
    use super::Code;

    pub const TERMINAL_MISMATCH: Code = Code::new("E040");
    pub const NO_PRODUCTION: Code = Code::new("E041");
    pub const MAX_STACK_DEPTH: Code = Code::new("E042");
    pub const TABLE_CONFLICT: Code = Code::new("E043");
    pub const TABLE_INCONSISTENT: Code = Code::new("E044");
    pub const INTERNAL_PARSER_ERROR: Code = Code::new("E049");
}

/// Token listing error codes
pub mod listing {
    use super::Code;

    pub const MALFORMED_LINE: Code = Code::new("E060");
    pub const UNKNOWN_CATEGORY: Code = Code::new("E061");
    pub const LISTING_IO_ERROR: Code = Code::new("E062");
}

/// Batch processing error codes
pub mod batch {
    use super::Code;

    pub const DIRECTORY_READ_ERROR: Code = Code::new("E080");
    pub const NO_FILES_FOUND: Code = Code::new("E081");
    pub const TOO_MANY_FILES: Code = Code::new("E082");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    // General success codes
    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing success codes
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const FILE_VALIDATION_PASSED: Code = Code::new("I007");

    // Lexical success codes
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const LEXICAL_VALIDATION_PASSED: Code = Code::new("I021");

    // Syntax success codes
    pub const PARSE_ACCEPTED: Code = Code::new("I040");
    pub const GRAMMAR_TABLE_VERIFIED: Code = Code::new("I041");

    // Token listing success codes
    pub const LISTING_WRITTEN: Code = Code::new("I060");
    pub const LISTING_LOADED: Code = Code::new("I061");

    // Batch success codes
    pub const BATCH_COMPLETED: Code = Code::new("I080");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();

        // System errors
        registry.insert(
            "ERR001",
            ErrorMetadata::new(
                "ERR001",
                "System",
                Severity::Critical,
                false,
                true,
                "Critical internal system error",
                "Contact system administrator or file bug report",
            ),
        );
        registry.insert(
            "ERR002",
            ErrorMetadata::new(
                "ERR002",
                "System",
                Severity::Critical,
                false,
                true,
                "System initialization failure",
                "Check system configuration and dependencies",
            ),
        );
        registry.insert(
            "E070",
            ErrorMetadata::new(
                "E070",
                "Configuration",
                Severity::High,
                false,
                true,
                "Runtime configuration could not be loaded",
                "Check the preferences file path and its TOML syntax",
            ),
        );

        // File processing errors
        registry.insert(
            "E005",
            ErrorMetadata::new(
                "E005",
                "FileProcessing",
                Severity::Medium,
                false,
                false,
                "Source file not found",
                "Verify the file path exists and is accessible",
            ),
        );
        registry.insert(
            "E006",
            ErrorMetadata::new(
                "E006",
                "FileProcessing",
                Severity::Medium,
                true,
                false,
                "File does not have a recognized source extension",
                "Use a .java or .txt file or disable the extension requirement",
            ),
        );
        registry.insert(
            "E007",
            ErrorMetadata::new(
                "E007",
                "FileProcessing",
                Severity::High,
                false,
                false,
                "File exceeds the maximum allowed size",
                "Split the source into smaller files",
            ),
        );
        registry.insert(
            "E009",
            ErrorMetadata::new(
                "E009",
                "FileProcessing",
                Severity::High,
                false,
                false,
                "Permission denied reading file",
                "Check file permissions",
            ),
        );
        registry.insert(
            "E010",
            ErrorMetadata::new(
                "E010",
                "FileProcessing",
                Severity::Medium,
                false,
                false,
                "File is not valid UTF-8",
                "Convert the file to UTF-8 encoding",
            ),
        );
        registry.insert(
            "E011",
            ErrorMetadata::new(
                "E011",
                "FileProcessing",
                Severity::High,
                false,
                false,
                "I/O error while reading file",
                "Check disk and file system health",
            ),
        );
        registry.insert(
            "E012",
            ErrorMetadata::new(
                "E012",
                "FileProcessing",
                Severity::Medium,
                false,
                false,
                "Invalid file path",
                "Provide a path to a regular file",
            ),
        );
        registry.insert(
            "E013",
            ErrorMetadata::new(
                "E013",
                "FileProcessing",
                Severity::Medium,
                false,
                false,
                "File exceeds the maximum line count for analysis",
                "Split the source into smaller files",
            ),
        );

        // Lexical errors
        registry.insert(
            "E020",
            ErrorMetadata::new(
                "E020",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Character run matches no lexical rule",
                "Remove or replace the unrecognized characters",
            ),
        );
        registry.insert(
            "E021",
            ErrorMetadata::new(
                "E021",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "String literal not closed before end of line",
                "Add the closing double quote on the same line",
            ),
        );
        registry.insert(
            "E022",
            ErrorMetadata::new(
                "E022",
                "Lexical",
                Severity::Medium,
                true,
                false,
                "Block comment not closed before end of input",
                "Add the closing */ delimiter",
            ),
        );

        // Syntax errors
        registry.insert(
            "E040",
            ErrorMetadata::new(
                "E040",
                "Syntax",
                Severity::High,
                false,
                true,
                "Expected terminal does not match the input symbol",
                "Insert or correct the expected symbol at the reported position",
            ),
        );
        registry.insert(
            "E041",
            ErrorMetadata::new(
                "E041",
                "Syntax",
                Severity::High,
                false,
                true,
                "No production for the non-terminal under the current lookahead",
                "Check the statement structure around the reported symbol",
            ),
        );
        registry.insert(
            "E042",
            ErrorMetadata::new(
                "E042",
                "Syntax",
                Severity::High,
                false,
                true,
                "Parse stack exceeded the configured depth limit",
                "Reduce nesting or raise max_stack_depth",
            ),
        );
        registry.insert(
            "E043",
            ErrorMetadata::new(
                "E043",
                "Grammar",
                Severity::Critical,
                false,
                true,
                "Parse table has two productions for one entry",
                "Fix the grammar rules so every entry is unique",
            ),
        );
        registry.insert(
            "E044",
            ErrorMetadata::new(
                "E044",
                "Grammar",
                Severity::Critical,
                false,
                true,
                "Parse table entry is not predicted by FIRST of its production",
                "Fix the lookahead set of the reported rule",
            ),
        );
        registry.insert(
            "E049",
            ErrorMetadata::new(
                "E049",
                "Syntax",
                Severity::Critical,
                false,
                true,
                "Internal parser state error",
                "File bug report with the input that triggered it",
            ),
        );

        // Token listing errors
        registry.insert(
            "E060",
            ErrorMetadata::new(
                "E060",
                "Listing",
                Severity::Medium,
                false,
                false,
                "Token listing line is malformed",
                "Regenerate the listing with --tokens-out",
            ),
        );
        registry.insert(
            "E061",
            ErrorMetadata::new(
                "E061",
                "Listing",
                Severity::Medium,
                false,
                false,
                "Token listing names an unknown category",
                "Regenerate the listing with --tokens-out",
            ),
        );
        registry.insert(
            "E062",
            ErrorMetadata::new(
                "E062",
                "Listing",
                Severity::High,
                false,
                false,
                "Token listing could not be read or written",
                "Check the listing path and permissions",
            ),
        );

        // Batch errors
        registry.insert(
            "E080",
            ErrorMetadata::new(
                "E080",
                "Batch",
                Severity::Medium,
                false,
                false,
                "Directory could not be read",
                "Check the directory path and permissions",
            ),
        );
        registry.insert(
            "E081",
            ErrorMetadata::new(
                "E081",
                "Batch",
                Severity::Low,
                true,
                false,
                "No source files found",
                "Check the directory contents and extension filter",
            ),
        );
        registry.insert(
            "E082",
            ErrorMetadata::new(
                "E082",
                "Batch",
                Severity::Medium,
                true,
                false,
                "Too many files for one batch",
                "Use --max-files or split the directory",
            ),
        );

        // Success codes
        registry.insert(
            "I001",
            ErrorMetadata::new(
                "I001",
                "System",
                Severity::Low,
                true,
                false,
                "Operation completed successfully",
                "No action required",
            ),
        );
        registry.insert(
            "I004",
            ErrorMetadata::new(
                "I004",
                "System",
                Severity::Low,
                true,
                false,
                "System initialization completed",
                "No action required",
            ),
        );
        registry.insert(
            "I006",
            ErrorMetadata::new(
                "I006",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File processed successfully",
                "No action required",
            ),
        );
        registry.insert(
            "I007",
            ErrorMetadata::new(
                "I007",
                "FileProcessing",
                Severity::Low,
                true,
                false,
                "File validation passed",
                "No action required",
            ),
        );
        registry.insert(
            "I020",
            ErrorMetadata::new(
                "I020",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Tokenization completed",
                "No action required",
            ),
        );
        registry.insert(
            "I021",
            ErrorMetadata::new(
                "I021",
                "Lexical",
                Severity::Low,
                true,
                false,
                "Source scanned without lexical errors",
                "No action required",
            ),
        );
        registry.insert(
            "I040",
            ErrorMetadata::new(
                "I040",
                "Syntax",
                Severity::Low,
                true,
                false,
                "Token stream accepted by the grammar",
                "No action required",
            ),
        );
        registry.insert(
            "I041",
            ErrorMetadata::new(
                "I041",
                "Grammar",
                Severity::Low,
                true,
                false,
                "Parse table verified deterministic and consistent",
                "No action required",
            ),
        );
        registry.insert(
            "I060",
            ErrorMetadata::new(
                "I060",
                "Listing",
                Severity::Low,
                true,
                false,
                "Token listing written",
                "No action required",
            ),
        );
        registry.insert(
            "I061",
            ErrorMetadata::new(
                "I061",
                "Listing",
                Severity::Low,
                true,
                false,
                "Token listing loaded",
                "No action required",
            ),
        );
        registry.insert(
            "I080",
            ErrorMetadata::new(
                "I080",
                "Batch",
                Severity::Low,
                true,
                false,
                "Batch processing completed",
                "No action required",
            ),
        );
        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
