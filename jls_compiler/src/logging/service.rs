//! Logging service and logger implementations

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service with configuration awareness
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Create service with configuration-aware settings; with console
    /// logging disabled events still reach the error collector
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let logger = MultiLogger::new(min_level).with_console(min_level);

        Self::new(Arc::new(logger), min_level)
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    pub fn log_error(&self, error_code: Code, message: &str) {
        self.log_event(LogEvent::error(error_code, message));
    }

    pub fn log_error_with_context(
        &self,
        error_code: Code,
        message: &str,
        context: Vec<(&str, &str)>,
    ) {
        let mut event = LogEvent::error(error_code, message);
        for (key, value) in context {
            event = event.with_context(key, value);
        }
        self.log_event(event);
    }

    pub fn log_info(&self, message: &str) {
        self.log_event(LogEvent::info(message));
    }

    pub fn log_success(&self, success_code: Code, message: &str) {
        self.log_event(LogEvent::success(success_code, message));
    }

    pub fn log_warning(&self, message: &str) {
        self.log_event(LogEvent::warning(message));
    }

    pub fn log_debug(&self, message: &str) {
        self.log_event(LogEvent::debug(message));
    }
}

/// Simple console logger; errors go to stderr
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
                LogLevel::Error => eprintln!("{}", event.format()),
                _ => println!("{}", event.format()),
            }
        }
    }
}

/// Structured logger for JSON output
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
            let output = event.format_json().unwrap_or_else(|_| event.format());
            match event.level {
                LogLevel::Error => eprintln!("{}", output),
                _ => println!("{}", output),
            }
        }
    }
}

/// Memory logger for testing
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn event_count(&self) -> usize {
        self.lock().len()
    }

    pub fn get_errors(&self) -> Vec<LogEvent> {
        self.lock().iter().filter(|e| e.is_error()).cloned().collect()
    }

    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.lock().iter().filter(|e| e.code == code).cloned().collect()
    }

    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.is_error() && e.code == code)
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.lock().iter().any(|e| e.is_info() && e.code == code)
    }

    pub fn get_events_by_category(&self, category: &str) -> Vec<LogEvent> {
        self.lock()
            .iter()
            .filter(|e| e.category() == category)
            .cloned()
            .collect()
    }

    pub fn get_summary(&self) -> EventSummary {
        let events = self.lock();

        EventSummary {
            total_count: events.len(),
            error_count: events.iter().filter(|e| e.is_error()).count(),
            warning_count: events.iter().filter(|e| e.is_warning()).count(),
            info_count: events.iter().filter(|e| e.is_info()).count(),
            debug_count: events.iter().filter(|e| e.is_debug()).count(),
            critical_count: events
                .iter()
                .filter(|e| e.is_error() && e.requires_halt())
                .count(),
        }
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        let mut events = self.lock();

        let max_events = config::get_error_buffer_size();
        if events.len() >= max_events {
            let remove_count = events.len() - max_events + 1;
            events.drain(0..remove_count);
        }

        events.push(event.clone());
    }
}

/// Summary of events in memory logger
#[derive(Debug, Clone)]
pub struct EventSummary {
    pub total_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub debug_count: usize,
    pub critical_count: usize,
}

impl EventSummary {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn has_critical_errors(&self) -> bool {
        self.critical_count > 0
    }
}

/// Append-only file logger
pub struct FileLogger {
    file_path: PathBuf,
    min_level: LogLevel,
    structured: bool,
}

impl FileLogger {
    pub fn new<P: AsRef<Path>>(
        file_path: P,
        min_level: LogLevel,
        structured: bool,
    ) -> Result<Self, std::io::Error> {
        let path = file_path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // Test write access
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        Ok(Self {
            file_path: path,
            min_level,
            structured,
        })
    }
}

impl Logger for FileLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            let output = if self.structured {
                event.format_json().unwrap_or_else(|_| event.format())
            } else {
                event.format()
            };

            // Write errors are ignored to avoid logging recursion
            if let Ok(mut file) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)
            {
                use std::io::Write;
                let _ = writeln!(file, "{}", output);
            }
        }
    }
}

/// Fan-out logger
pub struct MultiLogger {
    loggers: Vec<Arc<dyn Logger>>,
    min_level: LogLevel,
}

impl MultiLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            loggers: Vec::new(),
            min_level,
        }
    }

    pub fn add_logger(&mut self, logger: Arc<dyn Logger>) {
        self.loggers.push(logger);
    }

    /// No-op unless console logging is enabled
    pub fn with_console(mut self, console_level: LogLevel) -> Self {
        if !config::use_console_logging() {
            return self;
        }
        if config::use_structured_logging() {
            self.add_logger(Arc::new(StructuredLogger::new(console_level)));
        } else {
            self.add_logger(Arc::new(ConsoleLogger::new(console_level)));
        }
        self
    }

    pub fn with_file<P: AsRef<Path>>(
        mut self,
        file_path: P,
        file_level: LogLevel,
        structured: bool,
    ) -> Result<Self, std::io::Error> {
        let file_logger = FileLogger::new(file_path, file_level, structured)?;
        self.add_logger(Arc::new(file_logger));
        Ok(self)
    }

    pub fn with_memory(mut self) -> (Self, Arc<MemoryLogger>) {
        let memory_logger = Arc::new(MemoryLogger::new());
        self.add_logger(memory_logger.clone());
        (self, memory_logger)
    }
}

impl Logger for MultiLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            for logger in &self.loggers {
                logger.log(event);
            }
        }
    }
}

// ============================================================================
// CONFIGURATION-AWARE FACTORY FUNCTIONS
// ============================================================================

/// Create logging service based on current configuration
pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

/// Console output per configuration plus a log file
pub fn create_file_backed_service<P: AsRef<Path>>(
    log_file: P,
) -> Result<LoggingService, std::io::Error> {
    let min_level = config::get_min_log_level();
    let multi = MultiLogger::new(min_level)
        .with_console(min_level)
        .with_file(log_file, min_level, config::use_structured_logging())?;

    Ok(LoggingService::new(Arc::new(multi), min_level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_memory_logger() {
        let logger = MemoryLogger::new();

        logger.log(&LogEvent::info("Message 1"));
        logger.log(&LogEvent::error(codes::lexical::INVALID_LEXEME, "invalid lexeme"));

        assert_eq!(logger.event_count(), 2);
        assert_eq!(logger.get_errors().len(), 1);
        assert!(logger.has_error_with_code(codes::lexical::INVALID_LEXEME));

        let summary = logger.get_summary();
        assert_eq!(summary.total_count, 2);
        assert_eq!(summary.error_count, 1);
        assert_eq!(summary.info_count, 1);
        assert!(!summary.has_critical_errors());

        logger.clear();
        assert_eq!(logger.event_count(), 0);
    }

    #[test]
    fn test_multi_logger_fans_out() {
        let (multi, memory) = MultiLogger::new(LogLevel::Debug).with_memory();
        let (multi, second) = multi.with_memory();

        multi.log(&LogEvent::info("Test message"));

        assert_eq!(memory.event_count(), 1);
        assert_eq!(second.event_count(), 1);
    }

    #[test]
    fn test_console_follows_preference() {
        let multi = MultiLogger::new(LogLevel::Info).with_console(LogLevel::Info);
        assert_eq!(multi.loggers.is_empty(), !config::use_console_logging());
    }

    #[test]
    fn test_file_logger_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("jls.log");
        let logger = FileLogger::new(&path, LogLevel::Info, false).unwrap();

        logger.log(&LogEvent::error(codes::syntax::NO_PRODUCTION, "no production"));
        logger.log(&LogEvent::debug("filtered out"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[ERROR] E041 - no production"));
        assert!(!content.contains("filtered out"));
    }

    #[test]
    fn test_log_level_filtering() {
        let logger = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(logger.clone(), LogLevel::Error);

        service.log_debug("Debug message");
        service.log_info("Info message");
        service.log_error(codes::system::INTERNAL_ERROR, "Error message");

        assert_eq!(logger.event_count(), 1);
        assert!(logger.has_error_with_code(codes::system::INTERNAL_ERROR));
    }

    #[test]
    fn test_event_categorization() {
        let logger = MemoryLogger::new();

        logger.log(&LogEvent::error(
            codes::file_processing::FILE_NOT_FOUND,
            "File error",
        ));
        logger.log(&LogEvent::error(
            codes::syntax::TERMINAL_MISMATCH,
            "Syntax error",
        ));

        assert_eq!(logger.get_events_by_category("FileProcessing").len(), 1);
        assert_eq!(logger.get_events_by_category("Syntax").len(), 1);
        assert_eq!(
            logger
                .get_events_with_code(codes::syntax::TERMINAL_MISMATCH)
                .len(),
            1
        );
    }

    #[test]
    fn test_context_convenience() {
        let logger = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(logger.clone(), LogLevel::Debug);

        service.log_error_with_context(
            codes::file_processing::FILE_TOO_LARGE,
            "File too large",
            vec![("size", "1024"), ("limit", "512")],
        );
        service.log_success(codes::success::TOKENIZATION_COMPLETE, "done");

        let events = logger.get_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].context.get("limit"), Some(&"512".to_string()));
        assert!(logger.has_success_with_code(codes::success::TOKENIZATION_COMPLETE));
    }
}
