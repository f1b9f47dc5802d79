//! Type-safe logging macros using Code types with Display support

// ============================================================================
// ERROR LOGGING
// ============================================================================

/// Log error with Code type; context values accept any Display type
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr) => {
        $crate::logging::log_error_with_context($code, $message, None, vec![])
    };

    ($code:expr, $message:expr, span = $span:expr) => {
        $crate::logging::log_error_with_context($code, $message, Some($span), vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, None, context_refs)
        }
    };

    ($code:expr, $message:expr, span = $span:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_error_with_context($code, $message, Some($span), context_refs)
        }
    };
}

// ============================================================================
// SUCCESS LOGGING
// ============================================================================

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr) => {
        $crate::logging::log_success_with_context($code, $message, vec![])
    };

    ($code:expr, $message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_success_with_context($code, $message, context_refs)
        }
    };
}

// ============================================================================
// INFO / WARNING / DEBUG
// ============================================================================

#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        $crate::logging::log_info_with_context($message, vec![])
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let context_strings: Vec<(&str, String)> = vec![$(($key, format!("{}", $value))),+];
            let context_refs: Vec<(&str, &str)> = context_strings.iter()
                .map(|(k, v)| (*k, v.as_str()))
                .collect();
            $crate::logging::log_info_with_context($message, context_refs)
        }
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        {
            let event = $crate::logging::LogEvent::warning($message);
            let event = if let Some(file_ctx) = $crate::logging::get_current_file_context() {
                event.with_context("file", &file_ctx.file_path.display().to_string())
            } else {
                event
            };
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                logger.log_event(event);
            }
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            let mut event = $crate::logging::LogEvent::warning($message);
            $(
                event = event.with_context($key, &format!("{}", $value));
            )+
            let event = if let Some(file_ctx) = $crate::logging::get_current_file_context() {
                event.with_context("file", &file_ctx.file_path.display().to_string())
            } else {
                event
            };
            if let Some(logger) = $crate::logging::try_get_global_logger() {
                logger.log_event(event);
            }
        }
    };
}

/// Debug events are built only when the configured level admits them
#[macro_export]
macro_rules! log_debug {
    ($message:expr) => {
        {
            if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
                let event = $crate::logging::LogEvent::debug($message);
                let event = if let Some(file_ctx) = $crate::logging::get_current_file_context() {
                    event.with_context("file", &file_ctx.file_path.display().to_string())
                } else {
                    event
                };
                if let Some(logger) = $crate::logging::try_get_global_logger() {
                    logger.log_event(event);
                }
            }
        }
    };

    ($message:expr, $($key:expr => $value:expr),+) => {
        {
            if $crate::logging::config::get_min_log_level() >= $crate::logging::LogLevel::Debug {
                let mut event = $crate::logging::LogEvent::debug($message);
                $(
                    event = event.with_context($key, &format!("{}", $value));
                )+
                let event = if let Some(file_ctx) = $crate::logging::get_current_file_context() {
                    event.with_context("file", &file_ctx.file_path.display().to_string())
                } else {
                    event
                };
                if let Some(logger) = $crate::logging::try_get_global_logger() {
                    logger.log_event(event);
                }
            }
        }
    };
}

// ============================================================================
// CONVENIENCE MACROS
// ============================================================================

/// Log a success code with elapsed milliseconds attached
#[macro_export]
macro_rules! log_performance {
    ($code:expr, $message:expr, duration = $duration:expr) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.3}", $duration.as_secs_f64() * 1000.0)
        )
    };

    ($code:expr, $message:expr, duration = $duration:expr, $($key:expr => $value:expr),+) => {
        $crate::log_success!($code, $message,
            "duration_ms" => format!("{:.3}", $duration.as_secs_f64() * 1000.0),
            $($key => $value),+
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;
    use crate::utils::{Position, Span};

    #[test]
    fn test_macros_accept_display_context() {
        // Without a global logger every macro is a no-op
        let line: u32 = 4;
        let span = Span::single(Position::new(12, line, 2));
        let duration = std::time::Duration::from_millis(3);

        log_error!(codes::lexical::INVALID_LEXEME, "invalid lexeme",
            span = span,
            "lexeme" => "#x",
            "line" => line
        );
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenization completed",
            "tokens" => 157
        );
        log_info!("Processing file", "is_large" => false);
        log_warning!("Trace truncated", "limit" => 10);
        log_debug!("Expanding", "non_terminal" => "S");
        log_performance!(codes::success::PARSE_ACCEPTED, "Accepted",
            duration = duration,
            "productions" => 12
        );
    }
}
