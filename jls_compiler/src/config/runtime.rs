// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProcessorPreferences {
    /// Whether to require a .java or .txt extension
    pub require_source_extension: bool,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_source_extension: env::var(env_vars::REQUIRE_SOURCE_EXTENSION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_performance_logging: env::var(env_vars::ENABLE_PERFORMANCE_LOGGING)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalPreferences {
    /// Whether to collect per-kind token metrics
    pub collect_detailed_metrics: bool,

    /// Whether to show line numbers in lexical error messages
    pub include_position_in_errors: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var(env_vars::LEXICAL_DETAILED_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_position_in_errors: env::var(env_vars::LEXICAL_INCLUDE_POSITIONS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxPreferences {
    /// Whether the parser records a step trace
    pub record_trace: bool,

    /// Column width used when rendering the stack and input columns
    pub trace_column_width: usize,
}

impl Default for SyntaxPreferences {
    fn default() -> Self {
        Self {
            record_trace: env::var(env_vars::SYNTAX_RECORD_TRACE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            trace_column_width: env::var(env_vars::SYNTAX_TRACE_COLUMN_WIDTH)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(40),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,

    /// Whether to enable cargo-style error reporting
    pub enable_cargo_style_output: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            enable_cargo_style_output: env::var(env_vars::LOGGING_CARGO_STYLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            include_file_context: env::var(env_vars::LOGGING_INCLUDE_FILE_CONTEXT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
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

    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

/// Errors loading a runtime preferences file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read configuration file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        crate::logging::codes::system::CONFIGURATION_ERROR
    }
}

/// Runtime preferences, layered as environment defaults overridden by an optional TOML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub syntax: SyntaxPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse preferences from TOML text; missing keys keep their environment defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load preferences from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRE_SOURCE_EXTENSION: &str = "JLS_REQUIRE_SOURCE_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "JLS_ENABLE_PERFORMANCE_LOGGING";

    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "JLS_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_INCLUDE_POSITIONS: &str = "JLS_LEXICAL_INCLUDE_POSITIONS";

    // Syntax
    pub const SYNTAX_RECORD_TRACE: &str = "JLS_SYNTAX_RECORD_TRACE";
    pub const SYNTAX_TRACE_COLUMN_WIDTH: &str = "JLS_SYNTAX_TRACE_COLUMN_WIDTH";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "JLS_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "JLS_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "JLS_LOGGING_MIN_LEVEL";
    pub const LOGGING_CARGO_STYLE: &str = "JLS_LOGGING_CARGO_STYLE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "JLS_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_toml_overrides_selected_keys() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [syntax]
            record_trace = false
            trace_column_width = 24

            [logging]
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert!(!config.syntax.record_trace);
        assert_eq!(config.syntax.trace_column_width, 24);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = RuntimeConfig::from_toml_str("[syntax]\nrecord_trace = \"maybe\"");
        assert_matches!(result, Err(ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[lexical]\ncollect_detailed_metrics = false").unwrap();

        let config = RuntimeConfig::load(file.path()).unwrap();
        assert!(!config.lexical.collect_detailed_metrics);
    }

    #[test]
    fn test_load_missing_file() {
        let result = RuntimeConfig::load("/nonexistent/jls_prefs.toml");
        assert_matches!(result, Err(ConfigError::Io { .. }));
    }
}
