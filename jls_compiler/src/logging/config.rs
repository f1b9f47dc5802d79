//! Configuration module for logging
//!
//! Compile-time limits come from the generated constants; user-facing choices
//! come from runtime preferences installed once at startup.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

// ============================================================================
// RUNTIME PREFERENCES STORAGE
// ============================================================================

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    validate_preferences(&preferences)?;

    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized")?;

    Ok(())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

fn validate_preferences(preferences: &LoggingPreferences) -> Result<(), String> {
    if preferences.use_structured_logging && preferences.enable_cargo_style_output {
        // cargo-style text would interleave with JSON lines on stdout
        return Err(
            "Structured logging and cargo-style output cannot both be enabled".to_string(),
        );
    }

    Ok(())
}

// ============================================================================
// CONFIGURATION ACCESS FUNCTIONS
// ============================================================================

pub fn get_min_log_level() -> EventsLogLevel {
    get_runtime_preferences().min_log_level.to_events_log_level()
}

pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

pub fn use_cargo_style_output() -> bool {
    get_runtime_preferences().enable_cargo_style_output
}

pub fn include_file_context() -> bool {
    get_runtime_preferences().include_file_context
}

/// Get error buffer size (compile-time constant)
pub fn get_error_buffer_size() -> usize {
    LOG_BUFFER_SIZE
}

/// Clip a message to the configured maximum length on a char boundary
pub fn clip_message(message: &str) -> &str {
    let limit = MAX_LOG_MESSAGE_LENGTH;
    if message.len() <= limit {
        return message;
    }
    let mut end = limit;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    &message[..end]
}

// ============================================================================
// CONFIGURATION VALIDATION
// ============================================================================

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if LOG_BUFFER_SIZE > 100_000 {
        return Err(format!("Log buffer size too large: {}", LOG_BUFFER_SIZE));
    }

    if LOG_BUFFER_SIZE < 100 {
        return Err(format!("Log buffer size too small: {}", LOG_BUFFER_SIZE));
    }

    if MAX_LOG_EVENTS_PER_FILE > LOG_BUFFER_SIZE {
        return Err("Max log events per file exceeds total buffer size".to_string());
    }

    if let Some(preferences) = RUNTIME_PREFERENCES.get() {
        validate_preferences(preferences)?;
    }

    Ok(())
}
