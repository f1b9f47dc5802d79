//! Directory batch processing
//!
//! Discovers source files under a directory and runs each through the
//! pipeline, sequentially or on worker threads. Every file is scanned and
//! parsed independently, so workers share nothing but the result sink.

use crate::config::compile_time::batch_processing::{MAX_FILES_PER_BATCH, MAX_WORKER_THREADS};
use crate::config::runtime::RuntimeConfig;
use crate::file_processor::SOURCE_EXTENSIONS;
use crate::logging::codes;
use crate::pipeline::{self, PipelineError, PipelineResult, PipelineStats};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Worker threads; clamped to `1..=MAX_WORKER_THREADS`
    pub max_threads: usize,
    pub recursive: bool,
    /// Stop discovery after this many files
    pub max_files: Option<usize>,
    pub progress_reporting: bool,
    /// Stop at the first file that is not accepted cleanly
    pub fail_fast: bool,
    /// Lowercase extensions to pick up
    pub extensions: Vec<String>,
    pub runtime: RuntimeConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: std::thread::available_parallelism()
                .map(|n| n.get().min(8))
                .unwrap_or(4),
            recursive: true,
            max_files: None,
            progress_reporting: false,
            fail_fast: false,
            extensions: SOURCE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            runtime: RuntimeConfig::default(),
        }
    }
}

impl BatchConfig {
    fn thread_count(&self) -> usize {
        self.max_threads.clamp(1, MAX_WORKER_THREADS)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(ext))
            })
    }
}

/// Per-file outcomes of a batch
#[derive(Debug, Default)]
pub struct BatchResults {
    /// Accepted with no lexical errors
    pub accepted_files: Vec<(PathBuf, PipelineResult)>,
    /// Loaded, but rejected by the parser or carrying lexical errors
    pub rejected_files: Vec<(PathBuf, PipelineResult)>,
    /// Could not be loaded
    pub failed_files: Vec<(PathBuf, PipelineError)>,
    pub processing_duration: Duration,
    pub files_processed: usize,
    pub files_discovered: usize,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepted_count(&self) -> usize {
        self.accepted_files.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    /// Every processed file was accepted cleanly
    pub fn all_accepted(&self) -> bool {
        self.rejected_files.is_empty() && self.failed_files.is_empty()
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.accepted_files.len() as f64 / self.files_processed as f64
        }
    }

    /// Returns whether the result was a clean acceptance
    pub fn add_result(&mut self, file_path: PathBuf, result: PipelineResult) -> bool {
        self.files_processed += 1;
        let clean = result.is_clean();
        if clean {
            self.accepted_files.push((file_path, result));
        } else {
            self.rejected_files.push((file_path, result));
        }
        clean
    }

    pub fn add_failure(&mut self, file_path: PathBuf, error: PipelineError) {
        self.failed_files.push((file_path, error));
        self.files_processed += 1;
    }

    pub fn merge(&mut self, other: BatchResults) {
        self.accepted_files.extend(other.accepted_files);
        self.rejected_files.extend(other.rejected_files);
        self.failed_files.extend(other.failed_files);
        self.files_processed += other.files_processed;
    }

    /// Worker threads finish in any order; present files by path
    fn sort(&mut self) {
        self.accepted_files.sort_by(|a, b| a.0.cmp(&b.0));
        self.rejected_files.sort_by(|a, b| a.0.cmp(&b.0));
        self.failed_files.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn stats(&self) -> PipelineStats {
        PipelineStats::from_results(
            self.accepted_files
                .iter()
                .chain(&self.rejected_files)
                .map(|(_, result)| result),
        )
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch processing completed: {} files processed, {} accepted ({:.1}%), {} rejected, {} failed, {:.2}s total",
            self.files_processed,
            self.accepted_count(),
            self.acceptance_rate() * 100.0,
            self.rejected_count(),
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No source files found in directory: {path}")]
    NoFilesFound { path: String },

    #[error("Too many files found: {count} (max: {max})")]
    TooManyFiles { count: usize, max: usize },

    #[error("IO error during directory traversal: {error}")]
    IoError { error: String },

    #[error("Worker thread error: {message}")]
    ThreadError { message: String },
}

impl BatchError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::DirectoryNotFound { .. } | Self::IoError { .. } => {
                codes::batch::DIRECTORY_READ_ERROR
            }
            Self::NoFilesFound { .. } => codes::batch::NO_FILES_FOUND,
            Self::TooManyFiles { .. } => codes::batch::TOO_MANY_FILES,
            Self::ThreadError { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// Source files under `dir_path`, sorted
pub fn discover_source_files(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<Vec<PathBuf>, BatchError> {
    crate::log_info!("Starting file discovery",
        "directory" => dir_path.display(),
        "recursive" => config.recursive
    );

    if !dir_path.is_dir() {
        let error = BatchError::DirectoryNotFound {
            path: dir_path.display().to_string(),
        };
        crate::log_error!(error.error_code(), "Batch input is not a directory",
            "path" => dir_path.display()
        );
        return Err(error);
    }

    let mut files = Vec::new();
    visit_directory(dir_path, &mut files, config)?;

    if files.is_empty() {
        let error = BatchError::NoFilesFound {
            path: dir_path.display().to_string(),
        };
        crate::log_error!(error.error_code(), "No source files found",
            "directory" => dir_path.display(),
            "extensions" => config.extensions.join(", ")
        );
        return Err(error);
    }

    if files.len() > MAX_FILES_PER_BATCH {
        let error = BatchError::TooManyFiles {
            count: files.len(),
            max: MAX_FILES_PER_BATCH,
        };
        crate::log_error!(error.error_code(), "Too many files for one batch",
            "count" => files.len(),
            "max" => MAX_FILES_PER_BATCH
        );
        return Err(error);
    }

    files.sort();

    crate::log_success!(
        codes::success::FILE_VALIDATION_PASSED,
        "File discovery completed",
        "files_found" => files.len(),
        "directory" => dir_path.display()
    );

    Ok(files)
}

/// Returns false once the `max_files` cap is reached
fn visit_directory(
    dir_path: &Path,
    files: &mut Vec<PathBuf>,
    config: &BatchConfig,
) -> Result<bool, BatchError> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir_path)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|e| e.path()))
                .collect::<std::io::Result<Vec<_>>>()
        })
        .map_err(|e| BatchError::IoError {
            error: format!("{}: {}", dir_path.display(), e),
        })?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if config.recursive && !visit_directory(&path, files, config)? {
                return Ok(false);
            }
            continue;
        }

        if path.is_file() && config.matches_extension(&path) {
            files.push(path);

            if let Some(max_files) = config.max_files {
                if files.len() >= max_files {
                    crate::log_warning!(
                        "Reached maximum file limit",
                        "files_found" => files.len(),
                        "limit" => max_files
                    );
                    return Ok(false);
                }
            }
        }
    }

    Ok(true)
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

pub fn process_directory_sequential(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();

    crate::log_info!("Starting sequential batch processing",
        "directory" => dir_path.display()
    );

    let files = discover_source_files(dir_path, config)?;
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    for (file_id, file_path) in files.iter().enumerate() {
        if config.progress_reporting {
            println!(
                "Processing file {} of {}: {}",
                file_id + 1,
                files.len(),
                file_path.display()
            );
        }

        let clean = match pipeline::process_file_in_context(file_path, file_id, &config.runtime) {
            Ok(result) => results.add_result(file_path.clone(), result),
            Err(error) => {
                results.add_failure(file_path.clone(), error);
                false
            }
        };

        if !clean && config.fail_fast {
            crate::log_warning!("Fail-fast mode enabled, stopping batch processing",
                "file" => file_path.display()
            );
            break;
        }
    }

    results.processing_duration = start_time.elapsed();
    log_batch_completion(&results, 1);
    Ok(results)
}

pub fn process_directory_parallel(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let start_time = Instant::now();
    let threads = config.thread_count();

    crate::log_info!("Starting parallel batch processing",
        "directory" => dir_path.display(),
        "max_threads" => threads
    );

    let files = discover_source_files(dir_path, config)?;
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    let chunk_size = calculate_chunk_size(files.len(), threads);
    let runtime = Arc::new(config.runtime.clone());
    let stop = Arc::new(AtomicBool::new(false));

    crate::log_debug!("Parallel processing configuration",
        "total_files" => files.len(),
        "chunk_size" => chunk_size,
        "threads" => threads
    );

    for (chunk_index, chunk) in files.chunks(chunk_size).enumerate() {
        let first_id = chunk_index * chunk_size;
        let chunk_results = process_chunk_parallel(chunk, first_id, threads, config, &runtime, &stop)?;
        results.merge(chunk_results);

        if stop.load(Ordering::SeqCst) {
            crate::log_warning!("Fail-fast mode enabled, stopping batch processing");
            break;
        }
    }

    results.sort();
    results.processing_duration = start_time.elapsed();
    log_batch_completion(&results, threads);
    Ok(results)
}

fn process_chunk_parallel(
    files: &[PathBuf],
    first_id: usize,
    threads: usize,
    config: &BatchConfig,
    runtime: &Arc<RuntimeConfig>,
    stop: &Arc<AtomicBool>,
) -> Result<BatchResults, BatchError> {
    let results = Arc::new(Mutex::new(BatchResults::new()));
    let files_per_thread = files.len().div_ceil(threads);
    let mut handles = Vec::new();

    for (thread_index, thread_files) in files.chunks(files_per_thread).enumerate() {
        let thread_files = thread_files.to_vec();
        let start_id = first_id + thread_index * files_per_thread;
        let results = Arc::clone(&results);
        let runtime = Arc::clone(runtime);
        let stop = Arc::clone(stop);
        let fail_fast = config.fail_fast;

        handles.push(thread::spawn(move || {
            for (offset, file_path) in thread_files.into_iter().enumerate() {
                if stop.load(Ordering::SeqCst) {
                    break;
                }
                let outcome =
                    pipeline::process_file_in_context(&file_path, start_id + offset, &runtime);
                let clean = match outcome {
                    Ok(result) => lock(&results).add_result(file_path, result),
                    Err(error) => {
                        lock(&results).add_failure(file_path, error);
                        false
                    }
                };
                if !clean && fail_fast {
                    stop.store(true, Ordering::SeqCst);
                }
            }
        }));
    }

    for handle in handles {
        handle.join().map_err(|_| BatchError::ThreadError {
            message: "Worker thread panicked during processing".to_string(),
        })?;
    }

    let results = Arc::try_unwrap(results).map_err(|_| BatchError::ThreadError {
        message: "Failed to collect results from worker threads".to_string(),
    })?;
    Ok(results.into_inner().unwrap_or_else(PoisonError::into_inner))
}

fn calculate_chunk_size(file_count: usize, threads: usize) -> usize {
    const MIN_CHUNK_SIZE: usize = 1;
    const MAX_CHUNK_SIZE: usize = 50;

    file_count
        .div_ceil(threads.max(1))
        .clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE)
}

fn log_batch_completion(results: &BatchResults, threads: usize) {
    crate::log_success!(
        codes::success::BATCH_COMPLETED,
        "Batch processing completed",
        "files_processed" => results.files_processed,
        "accepted" => results.accepted_count(),
        "rejected" => results.rejected_count(),
        "failed" => results.failure_count(),
        "threads_used" => threads,
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );
}

// ============================================================================
// PUBLIC API
// ============================================================================

pub fn process_directory(dir_path: &Path) -> Result<BatchResults, BatchError> {
    process_directory_with_config(dir_path, &BatchConfig::default())
}

pub fn process_directory_with_config(
    dir_path: &Path,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    if config.thread_count() == 1 {
        process_directory_sequential(dir_path, config)
    } else {
        process_directory_parallel(dir_path, config)
    }
}

/// Batch processing limits for `--help`
#[derive(Debug, Clone)]
pub struct BatchInfo {
    pub available_threads: usize,
    pub max_worker_threads: usize,
    pub max_files_per_batch: usize,
    pub supported_file_extensions: Vec<String>,
}

impl BatchInfo {
    pub fn summary(&self) -> String {
        format!(
            "Batch processor: {} of {} threads, up to {} files, extensions {}",
            self.available_threads.min(self.max_worker_threads),
            self.max_worker_threads,
            self.max_files_per_batch,
            self.supported_file_extensions.join(", ")
        )
    }
}

pub fn get_batch_info() -> BatchInfo {
    BatchInfo {
        available_threads: std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4),
        max_worker_threads: MAX_WORKER_THREADS,
        max_files_per_batch: MAX_FILES_PER_BATCH,
        supported_file_extensions: SOURCE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn write_sources(dir: &Path) {
        fs::write(dir.join("a.java"), "int x = 1;\n").unwrap();
        fs::write(dir.join("b.java"), "x = ;\n").unwrap();
        fs::write(dir.join("c.txt"), "y = 2; #\n").unwrap();
        fs::write(dir.join("notes.md"), "int x = 1;\n").unwrap();
        fs::create_dir(dir.join("nested")).unwrap();
        fs::write(dir.join("nested").join("d.java"), "while (x) x--;\n").unwrap();
    }

    fn config(max_threads: usize) -> BatchConfig {
        BatchConfig {
            max_threads,
            ..BatchConfig::default()
        }
    }

    #[test]
    fn test_file_discovery() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());

        let files = discover_source_files(dir.path(), &config(1)).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.java", "b.java", "c.txt", "d.java"]);

        let shallow = BatchConfig {
            recursive: false,
            ..config(1)
        };
        assert_eq!(discover_source_files(dir.path(), &shallow).unwrap().len(), 3);

        let capped = BatchConfig {
            max_files: Some(2),
            ..config(1)
        };
        assert_eq!(discover_source_files(dir.path(), &capped).unwrap().len(), 2);
    }

    #[test]
    fn test_discovery_errors() {
        let dir = tempdir().unwrap();
        assert_matches!(
            discover_source_files(dir.path(), &config(1)),
            Err(BatchError::NoFilesFound { .. })
        );

        let missing = dir.path().join("missing");
        let error = discover_source_files(&missing, &config(1)).unwrap_err();
        assert_matches!(error, BatchError::DirectoryNotFound { .. });
        assert_eq!(error.error_code().as_str(), "E080");
    }

    #[test]
    fn test_sequential_split() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());

        let results = process_directory_with_config(dir.path(), &config(1)).unwrap();
        assert_eq!(results.files_processed, 4);
        assert_eq!(results.accepted_count(), 2);
        assert_eq!(results.rejected_count(), 2);
        assert_eq!(results.failure_count(), 0);
        assert!(!results.all_accepted());

        let stats = results.stats();
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.files_with_lexical_errors, 1);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());

        let sequential = process_directory_sequential(dir.path(), &config(1)).unwrap();
        let parallel = process_directory_parallel(dir.path(), &config(3)).unwrap();

        let paths = |files: &[(PathBuf, PipelineResult)]| {
            files.iter().map(|(p, _)| p.clone()).collect::<Vec<_>>()
        };
        assert_eq!(paths(&sequential.accepted_files), paths(&parallel.accepted_files));
        assert_eq!(paths(&sequential.rejected_files), paths(&parallel.rejected_files));
    }

    #[test]
    fn test_fail_fast_sequential() {
        let dir = tempdir().unwrap();
        write_sources(dir.path());

        let config = BatchConfig {
            fail_fast: true,
            ..config(1)
        };
        let results = process_directory_sequential(dir.path(), &config).unwrap();
        assert_eq!(results.files_processed, 2);
        assert_eq!(results.rejected_count(), 1);
    }

    #[test]
    fn test_empty_file_is_accepted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("empty.java"), "").unwrap();

        let results = process_directory_sequential(dir.path(), &config(1)).unwrap();
        assert_eq!(results.failure_count(), 0);
        assert_eq!(results.accepted_count(), 1);
        assert!(results.all_accepted());
    }

    #[test]
    fn test_unreadable_file_is_failure() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.java"), [0x78, 0x20, 0xff, 0xfe]).unwrap();

        let results = process_directory_sequential(dir.path(), &config(1)).unwrap();
        assert_eq!(results.failure_count(), 1);
        assert_matches!(results.failed_files[0].1, PipelineError::FileProcessing(_));
    }

    #[test]
    fn test_chunk_size_calculation() {
        assert_eq!(calculate_chunk_size(100, 4), 25);
        assert_eq!(calculate_chunk_size(10, 4), 3);
        assert_eq!(calculate_chunk_size(1, 4), 1);
        assert_eq!(calculate_chunk_size(200, 4), 50);
    }

    #[test]
    fn test_batch_config_default() {
        let config = BatchConfig::default();
        assert!(config.thread_count() >= 1);
        assert!(config.recursive);
        assert!(!config.fail_fast);
        assert!(config.max_files.is_none());
        assert!(config.matches_extension(Path::new("Main.JAVA")));
        assert!(!config.matches_extension(Path::new("tokens.lst")));
    }

    #[test]
    fn test_batch_info() {
        let info = get_batch_info();
        assert_eq!(info.max_worker_threads, MAX_WORKER_THREADS);
        assert!(info.summary().contains("java, txt"));
    }
}
