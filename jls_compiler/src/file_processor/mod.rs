//! Source loading
//!
//! Reads source text from a file or standard input under the compile-time
//! size and line limits. Everything downstream works on the loaded text.

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT_FOR_ANALYSIS,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::log_debug;
use std::path::Path;

pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, SOURCE_EXTENSIONS,
    STDIN_PATH,
};

/// Load a file with default settings
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

/// Read all of standard input with default settings
pub fn read_stdin() -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().read_stdin()
}

pub fn create_processor() -> FileProcessor {
    FileProcessor::new()
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Whether `path` carries one of the source extensions
pub fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Check that every file processing code has registry metadata (system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    let file_codes = [
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::INVALID_EXTENSION,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
        codes::file_processing::TOO_MANY_LINES,
    ];

    for code in &file_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT_FOR_ANALYSIS
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("Test.java");
        fs::write(&file_path, "class_name = 1;\n").unwrap();

        let result = process_file(&file_path).unwrap();
        assert_eq!(result.metadata.line_count, 1);
    }

    #[test]
    fn test_create_processor_from_preferences() {
        let prefs = FileProcessorPreferences {
            require_source_extension: true,
            enable_performance_logging: false,
        };

        let processor = create_processor_from_preferences(&prefs);
        assert!(processor.require_source_extension);
        assert!(!processor.enable_performance_logging);
        assert_eq!(FileProcessor::max_file_size(), MAX_FILE_SIZE);
        assert!(!create_processor().require_source_extension);
    }

    #[test]
    fn test_has_source_extension() {
        assert!(has_source_extension(Path::new("src/Main.java")));
        assert!(has_source_extension(Path::new("input.TXT")));
        assert!(!has_source_extension(Path::new("tokens.lst")));
        assert!(!has_source_extension(Path::new("README")));
    }

    #[test]
    fn test_init_validates_codes() {
        assert!(init_file_processor_logging().is_ok());
    }
}
