//! Error collector for batch file processing with cargo-style output

use super::events::LogEvent;
use crate::config::compile_time::logging::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

// ============================================================================
// FILE PROCESSING CONTEXT
// ============================================================================

/// Context information for file processing
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

// ============================================================================
// PROCESSING SUMMARY
// ============================================================================

/// Summary of batch processing results
#[derive(Debug, Clone, Default)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub successful_files: usize,
    pub failed_files: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_processing_time: Duration,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }
}

// ============================================================================
// ERROR COLLECTOR
// ============================================================================

/// Thread-safe error collector keyed by file path
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
    file_contexts: Mutex<BTreeMap<PathBuf, FileProcessingContext>>,
    processing_start: Instant,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self {
            file_events: Mutex::new(BTreeMap::new()),
            file_contexts: Mutex::new(BTreeMap::new()),
            processing_start: Instant::now(),
        }
    }

    /// Record an event for a specific file
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        let mut events = lock(&self.file_events);
        let file_events = events.entry(file_path.to_path_buf()).or_default();

        if file_events.len() < MAX_LOG_EVENTS_PER_FILE {
            file_events.push(event);
        } else if file_events.len() == MAX_LOG_EVENTS_PER_FILE {
            file_events.push(LogEvent::warning(&format!(
                "Too many events for file (limit: {})",
                MAX_LOG_EVENTS_PER_FILE
            )));
        }
    }

    pub fn record_file_context(&self, context: FileProcessingContext) {
        lock(&self.file_contexts).insert(context.file_path.clone(), context);
    }

    pub fn get_file_events(&self, file_path: &Path) -> Vec<LogEvent> {
        lock(&self.file_events)
            .get(file_path)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_file_errors(&self, file_path: &Path) -> Vec<LogEvent> {
        lock(&self.file_events)
            .get(file_path)
            .map(|events| events.iter().filter(|e| e.is_error()).cloned().collect())
            .unwrap_or_default()
    }

    pub fn get_all_file_events(&self) -> BTreeMap<PathBuf, Vec<LogEvent>> {
        lock(&self.file_events).clone()
    }

    pub fn get_summary(&self) -> ProcessingSummary {
        let events = lock(&self.file_events);

        let mut summary = ProcessingSummary {
            total_files: events.len(),
            total_processing_time: self.processing_start.elapsed(),
            ..Default::default()
        };

        for file_events in events.values() {
            let has_errors = file_events.iter().any(|e| e.is_error());
            let has_warnings = file_events.iter().any(|e| e.is_warning());

            if has_errors {
                summary.failed_files += 1;
            } else if has_warnings {
                summary.files_with_warnings += 1;
            } else {
                summary.successful_files += 1;
            }

            summary.total_errors += file_events.iter().filter(|e| e.is_error()).count();
            summary.total_warnings += file_events.iter().filter(|e| e.is_warning()).count();
        }

        summary
    }

    pub fn file_has_errors(&self, file_path: &Path) -> bool {
        lock(&self.file_events)
            .get(file_path)
            .map(|events| events.iter().any(|e| e.is_error()))
            .unwrap_or(false)
    }

    pub fn clear(&self) {
        lock(&self.file_events).clear();
        lock(&self.file_contexts).clear();
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

fn span_suffix(file_path: &Path, event: &LogEvent) -> String {
    event
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
        .unwrap_or_default()
}

/// Format errors in cargo-style output
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let mut output = String::new();

    for (file_path, events) in &collector.get_all_file_events() {
        let error_events: Vec<_> = events.iter().filter(|e| e.is_error()).collect();
        let warning_events: Vec<_> = events.iter().filter(|e| e.is_warning()).collect();

        if error_events.is_empty() && warning_events.is_empty() {
            continue;
        }

        output.push_str(&format!("Checking {}...\n", file_path.display()));

        for event in error_events {
            output.push_str(&format!(
                "error[{}]: {}{}\n",
                event.code.as_str(),
                event.message,
                span_suffix(file_path, event)
            ));
            output.push_str(&format!(
                "  = severity: {}, category: {}\n",
                event.severity(),
                event.category()
            ));

            let mut keys: Vec<_> = event
                .context
                .keys()
                .filter(|k| *k != "file" && *k != "file_id")
                .collect();
            keys.sort();
            if !keys.is_empty() {
                output.push_str("  |\n");
                for key in keys {
                    output.push_str(&format!("  = {}: {}\n", key, event.context[key]));
                }
            }

            let action = event.recommended_action();
            if action != "No specific action available" {
                output.push_str(&format!("  = help: {}\n", action));
            }
        }

        for event in warning_events {
            output.push_str(&format!(
                "warning[{}]: {}{}\n",
                event.code.as_str(),
                event.message,
                span_suffix(file_path, event)
            ));
        }

        output.push('\n');
    }

    let summary = collector.get_summary();
    if summary.total_errors > 0 {
        output.push_str(&format!("\nTotal errors: {}\n", summary.total_errors));
    }
    if summary.total_warnings > 0 {
        output.push_str(&format!("Total warnings: {}\n", summary.total_warnings));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;
    use crate::utils::{Position, Span};

    #[test]
    fn test_error_collector_basic() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("Main.java");

        collector.record_event(
            &file_path,
            LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "Test error"),
        );

        assert_eq!(collector.get_file_events(&file_path).len(), 1);
        assert_eq!(collector.get_file_errors(&file_path).len(), 1);
        assert!(collector.file_has_errors(&file_path));
    }

    #[test]
    fn test_processing_summary() {
        let collector = ErrorCollector::new();
        let file1 = PathBuf::from("a.java");
        let file2 = PathBuf::from("b.java");

        collector.record_event(
            &file1,
            LogEvent::error(codes::lexical::INVALID_LEXEME, "invalid lexeme"),
        );
        collector.record_event(&file2, LogEvent::warning("Warning"));

        let summary = collector.get_summary();
        assert_eq!(summary.total_files, 2);
        assert_eq!(summary.failed_files, 1);
        assert_eq!(summary.files_with_warnings, 1);
        assert_eq!(summary.total_errors, 1);
        assert_eq!(summary.total_warnings, 1);
    }

    #[test]
    fn test_per_file_limit() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("big.java");

        for _ in 0..MAX_LOG_EVENTS_PER_FILE + 5 {
            collector.record_event(&file_path, LogEvent::info("event"));
        }

        // One extra slot holds the overflow warning
        assert_eq!(
            collector.get_file_events(&file_path).len(),
            MAX_LOG_EVENTS_PER_FILE + 1
        );
    }

    #[test]
    fn test_cargo_style_output() {
        let collector = ErrorCollector::new();
        let file_path = PathBuf::from("Main.java");
        let event = LogEvent::error(codes::syntax::TERMINAL_MISMATCH, "expected ';', found '$'")
            .with_span(Span::single(Position::new(9, 2, 7)))
            .with_context("expected", ";");

        collector.record_event(&file_path, event);
        let output = format_cargo_style_errors(&collector);

        assert!(output.contains("Checking Main.java..."));
        assert!(output.contains("error[E040]: expected ';', found '$' --> Main.java:2:7"));
        assert!(output.contains("  = expected: ;"));
        assert!(output.contains("Total errors: 1"));
    }
}
