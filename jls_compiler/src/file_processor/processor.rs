//! Source loading with compile-time limits and global logging

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success, log_warning};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Extensions treated as source files
pub const SOURCE_EXTENSIONS: &[&str] = &["java", "txt"];

/// Path recorded for input read from standard input
pub const STDIN_PATH: &str = "<stdin>";

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .java or .txt, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::InvalidPath { .. } => codes::file_processing::INVALID_PATH,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    fn from_io(error: std::io::Error, path: &Path) -> Self {
        match error.kind() {
            std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            std::io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("'{}': {}", path.display(), error),
            },
        }
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical path, or `<stdin>`
    pub path: PathBuf,
    pub size: u64,
    /// Lowercased extension, if any
    pub extension: Option<String>,
    pub line_count: usize,
    /// Whether the extension is one of `SOURCE_EXTENSIONS`
    pub is_source_file: bool,
    pub modified: Option<std::time::SystemTime>,
}

impl FileMetadata {
    fn for_path(path: &Path, size: u64, modified: Option<std::time::SystemTime>) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());

        Self {
            path: path.to_path_buf(),
            size,
            extension,
            line_count: 0,
            is_source_file: super::has_source_extension(path),
            modified,
        }
    }

    pub fn human_readable_size(&self) -> String {
        human_size(self.size)
    }

    /// Above the compile-time large file threshold
    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

fn human_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Loaded source text plus its metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Only whitespace
    pub fn is_effectively_empty(&self) -> bool {
        self.source.trim().is_empty()
    }

    /// Characters per millisecond
    pub fn processing_rate(&self) -> f64 {
        let duration_ms = self.processing_duration.as_secs_f64() * 1000.0;
        if duration_ms > 0.0 {
            self.char_count() as f64 / duration_ms
        } else {
            0.0
        }
    }
}

pub struct FileProcessor {
    /// Reject files whose extension is not in `SOURCE_EXTENSIONS`
    pub require_source_extension: bool,
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_source_extension: false,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_source_extension: prefs.require_source_extension,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_source_extension_required(mut self, required: bool) -> Self {
        self.require_source_extension = required;
        self
    }

    pub fn with_performance_logging(mut self, enabled: bool) -> Self {
        self.enable_performance_logging = enabled;
        self
    }

    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    pub fn large_file_threshold() -> u64 {
        LARGE_FILE_THRESHOLD
    }

    /// Load a source file: path, size, extension, encoding and line count
    /// are all checked before the text is handed on.
    pub fn process_file<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        let file_path = file_path.as_ref();
        let display_path = file_path.display().to_string();

        log_debug!("Starting file processing", "file" => display_path);

        let path = self.validate_path(file_path)?;

        let fs_metadata = fs::metadata(&path).map_err(|e| {
            let error = FileProcessorError::from_io(e, &path);
            log_error!(error.error_code(), "Failed to read file metadata",
                "file" => display_path,
                "error" => error
            );
            error
        })?;
        let metadata = FileMetadata::for_path(&path, fs_metadata.len(), fs_metadata.modified().ok());

        self.validate_file(&metadata, &display_path)?;

        let source = fs::read_to_string(&path).map_err(|e| {
            let error = FileProcessorError::from_io(e, &path);
            log_error!(error.error_code(), "Failed to read file",
                "file" => display_path,
                "error" => error
            );
            error
        })?;

        self.finish(source, metadata, start_time, &display_path)
    }

    /// Read all of standard input as one source
    pub fn read_stdin(&self) -> Result<FileProcessingResult, FileProcessorError> {
        self.read_from(std::io::stdin().lock())
    }

    /// Read a whole source from any reader, recorded under `<stdin>`
    pub fn read_from<R: Read>(
        &self,
        mut reader: R,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = Instant::now();
        let path = Path::new(STDIN_PATH);

        let mut bytes = Vec::new();
        reader
            .by_ref()
            .take(MAX_FILE_SIZE + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| {
                let error = FileProcessorError::from_io(e, path);
                log_error!(error.error_code(), "Failed to read standard input",
                    "error" => error
                );
                error
            })?;

        let metadata = FileMetadata::for_path(path, bytes.len() as u64, None);
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "Standard input exceeds maximum size",
                "limit_bytes" => MAX_FILE_SIZE
            );
            return Err(error);
        }
        if metadata.size == 0 {
            log_warning!("Standard input is empty");
        }

        let source = String::from_utf8(bytes).map_err(|_| {
            let error = FileProcessorError::InvalidEncoding {
                path: STDIN_PATH.to_string(),
            };
            log_error!(error.error_code(), "Invalid UTF-8 on standard input");
            error
        })?;

        self.finish(source, metadata, start_time, STDIN_PATH)
    }

    fn finish(
        &self,
        source: String,
        mut metadata: FileMetadata,
        start_time: Instant,
        display_path: &str,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT_FOR_ANALYSIS {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT_FOR_ANALYSIS,
            };
            log_error!(error.error_code(), "File exceeds maximum line count for analysis",
                "file" => display_path,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT_FOR_ANALYSIS
            );
            return Err(error);
        }
        metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };
        self.log_processing_success(&result, display_path);
        Ok(result)
    }

    fn log_processing_success(&self, result: &FileProcessingResult, display_path: &str) {
        let duration_ms = format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully with performance metrics",
                "file" => display_path,
                "size_bytes" => result.metadata.size,
                "size_human" => result.metadata.human_readable_size(),
                "lines" => result.metadata.line_count,
                "chars" => result.char_count(),
                "duration_ms" => duration_ms,
                "chars_per_ms" => format!("{:.2}", result.processing_rate()),
                "is_large_file" => result.metadata.is_large_file()
            );
        } else {
            log_success!(
                codes::success::FILE_PROCESSING_SUCCESS,
                "File processed successfully",
                "file" => display_path,
                "lines" => result.metadata.line_count,
                "duration_ms" => duration_ms
            );
        }
    }

    fn validate_path(&self, file_path: &Path) -> Result<PathBuf, FileProcessorError> {
        let display_path = file_path.display().to_string();

        if file_path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath { path: display_path };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !file_path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: display_path.clone(),
            };
            log_error!(error.error_code(), "File not found", "path" => display_path);
            return Err(error);
        }

        if !file_path.is_file() {
            let error = FileProcessorError::InvalidPath {
                path: display_path.clone(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => display_path);
            return Err(error);
        }

        file_path.canonicalize().map_err(|e| {
            let error = FileProcessorError::IoError {
                message: format!("Failed to resolve path '{}': {}", display_path, e),
            };
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => display_path,
                "io_error" => e
            );
            error
        })
    }

    fn validate_file(
        &self,
        metadata: &FileMetadata,
        display_path: &str,
    ) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => display_path,
                "size_human" => metadata.human_readable_size(),
                "limit_human" => human_size(MAX_FILE_SIZE)
            );
            return Err(error);
        }

        if metadata.size == 0 {
            log_warning!("File is empty", "file" => display_path);
        }

        if self.require_source_extension && !metadata.is_source_file {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have a source extension",
                "file" => display_path,
                "extension" => metadata.extension.as_deref().unwrap_or("none"),
                "accepted" => SOURCE_EXTENSIONS.join(", ")
            );
            return Err(error);
        }

        Ok(())
    }
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_process_valid_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Main.java");
        let content = "int x = 1;\nx++;\n";
        fs::write(&file_path, content).unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();

        assert_eq!(result.metadata.line_count, 2);
        assert!(result.metadata.is_source_file);
        assert_eq!(result.metadata.extension.as_deref(), Some("java"));
        assert_eq!(result.char_count(), content.chars().count());
        assert!(!result.is_effectively_empty());
    }

    #[test]
    fn test_file_not_found() {
        let result = FileProcessor::new().process_file("nonexistent.java");
        assert_matches!(result, Err(FileProcessorError::FileNotFound { .. }));
    }

    #[test]
    fn test_directory_is_invalid_path() {
        let dir = tempdir().unwrap();
        let result = FileProcessor::new().process_file(dir.path());
        assert_matches!(result, Err(FileProcessorError::InvalidPath { .. }));
    }

    #[test]
    fn test_extension_requirement() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("notes.md");
        fs::write(&file_path, "x = 1;").unwrap();

        let processor = FileProcessor::new().with_source_extension_required(true);
        assert_matches!(
            processor.process_file(&file_path),
            Err(FileProcessorError::InvalidExtension { .. })
        );

        let txt_path = dir.path().join("input.TXT");
        fs::write(&txt_path, "x = 1;").unwrap();
        let result = processor.process_file(&txt_path).unwrap();
        assert!(result.metadata.is_source_file);
    }

    #[test]
    fn test_empty_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("empty.java");
        fs::write(&file_path, "").unwrap();

        let result = FileProcessor::new().process_file(&file_path).unwrap();
        assert_eq!(result.source, "");
        assert_eq!(result.metadata.size, 0);
        assert_eq!(result.metadata.line_count, 0);
        assert!(result.is_effectively_empty());
    }

    #[test]
    fn test_invalid_encoding() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.java");
        fs::write(&file_path, [0x78, 0x20, 0xff, 0xfe]).unwrap();

        assert_matches!(
            FileProcessor::new().process_file(&file_path),
            Err(FileProcessorError::InvalidEncoding { .. })
        );
    }

    #[test]
    fn test_too_many_lines() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("many_lines.java");
        fs::write(&file_path, ";\n".repeat(MAX_LINE_COUNT_FOR_ANALYSIS + 1)).unwrap();

        match FileProcessor::new().process_file(&file_path) {
            Err(FileProcessorError::TooManyLines { lines, max_lines }) => {
                assert!(lines > MAX_LINE_COUNT_FOR_ANALYSIS);
                assert_eq!(max_lines, MAX_LINE_COUNT_FOR_ANALYSIS);
            }
            other => panic!("Expected TooManyLines error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_from_reader() {
        let input = "x = 1;\ny = 2;".as_bytes();
        let result = FileProcessor::new().read_from(input).unwrap();

        assert_eq!(result.metadata.path, PathBuf::from(STDIN_PATH));
        assert_eq!(result.metadata.line_count, 2);
        assert!(!result.metadata.is_source_file);
        assert_eq!(result.source, "x = 1;\ny = 2;");
    }

    #[test]
    fn test_read_from_empty_reader() {
        let result = FileProcessor::new().read_from(&b""[..]).unwrap();
        assert!(result.source.is_empty());
        assert_eq!(result.metadata.path, PathBuf::from(STDIN_PATH));
    }

    #[test]
    fn test_error_methods() {
        let error = FileProcessorError::FileNotFound {
            path: "Main.java".to_string(),
        };

        assert_eq!(error.error_code().as_str(), "E005");
        assert_eq!(error.category(), "FileProcessing");
        assert_eq!(error.severity(), "Medium");
        assert!(!error.is_recoverable());

        let lines = FileProcessorError::TooManyLines {
            lines: 10,
            max_lines: 5,
        };
        assert_eq!(lines.error_code().as_str(), "E013");
    }

    #[test]
    fn test_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_source_extension: true,
            enable_performance_logging: false,
        };

        let processor = FileProcessor::from_preferences(&prefs);
        assert!(processor.require_source_extension);
        assert!(!processor.enable_performance_logging);
    }

    #[test]
    fn test_human_readable_size() {
        assert_eq!(human_size(512), "512 B");
        assert_eq!(human_size(2048), "2.00 KB");
    }
}
