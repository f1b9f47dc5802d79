//! End-to-end processing: load, scan, parse
//!
//! A file that loads always yields a `PipelineResult`, whatever the scanner
//! and parser make of it. Only load failures and unusable token listings are
//! `PipelineError`s.

mod error;
mod info;
pub mod output;
mod result;
mod stats;
mod validation;

pub use error::PipelineError;
pub use info::{get_pipeline_info, PipelineInfo};
pub use output::{PipelineOutput, SyntaxErrorReport};
pub use result::PipelineResult;
pub use stats::PipelineStats;
pub use validation::validate_pipeline;

use crate::config::runtime::RuntimeConfig;
use crate::file_processor::{FileMetadata, FileProcessingResult, FileProcessor};
use crate::lexical::{LexicalAnalyzer, ScanOutput};
use crate::logging;
use crate::syntax::{self, PredictiveParser};
use crate::tokens::parse_listing;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Process one source file with default preferences
pub fn process_file<P: AsRef<Path>>(file_path: P) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(file_path, &RuntimeConfig::default())
}

pub fn process_file_with_config<P: AsRef<Path>>(
    file_path: P,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    process_file_in_context(file_path.as_ref(), 0, config)
}

/// Process one source file with `file_id` attached to every log event
pub fn process_file_in_context(
    file_path: &Path,
    file_id: usize,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    logging::with_file_context(file_path.to_path_buf(), file_id, || {
        crate::log_info!("Starting file processing pipeline", "file" => file_path.display());

        let processor = FileProcessor::from_preferences(&config.file_processor);
        let file_result = processor.process_file(file_path)?;
        Ok(run_stages(file_result, config))
    })
}

/// Process everything on standard input as one source
pub fn process_stdin(config: &RuntimeConfig) -> Result<PipelineResult, PipelineError> {
    let processor = FileProcessor::from_preferences(&config.file_processor);
    let file_result = processor.read_stdin()?;
    Ok(run_stages(file_result, config))
}

/// Scan and parse in-memory text; `origin` names it in logs and reports
pub fn process_source(source: &str, origin: &str) -> PipelineResult {
    let file_result = FileProcessingResult {
        source: source.to_string(),
        metadata: FileMetadata {
            path: PathBuf::from(origin),
            size: source.len() as u64,
            extension: None,
            line_count: source.lines().count(),
            is_source_file: false,
            modified: None,
        },
        processing_duration: Duration::ZERO,
    };
    run_stages(file_result, &RuntimeConfig::default())
}

/// Parse a token listing written by `--tokens-out`; no scanning happens
pub fn process_listing_file<P: AsRef<Path>>(
    listing_path: P,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let listing_path = listing_path.as_ref();

    logging::with_file_context(listing_path.to_path_buf(), 0, || {
        let start_time = Instant::now();
        crate::log_info!("Parsing token listing", "file" => listing_path.display());

        let file_result = FileProcessor::new().process_file(listing_path)?;
        let input = parse_listing(&file_result.source).map_err(|error| {
            crate::log_error!(error.error_code(), "Token listing rejected",
                "file" => listing_path.display(),
                "error" => error
            );
            error
        })?;

        let parse = PredictiveParser::new(
            crate::grammar::ParseTable::standard()
                .map_err(|e| PipelineError::pipeline_error(&e.to_string()))?,
        )
        .with_trace(config.syntax.record_trace)
        .run(&input);

        let result = PipelineResult {
            file_metadata: file_result.metadata,
            scan: ScanOutput::default(),
            parse,
            from_listing: true,
            processing_duration: start_time.elapsed(),
        };
        result.log_completion();
        Ok(result)
    })
}

fn run_stages(file_result: FileProcessingResult, config: &RuntimeConfig) -> PipelineResult {
    let start_time = Instant::now();

    let scan = LexicalAnalyzer::with_preferences(config.lexical.clone())
        .scan_file_result(&file_result);
    let parse = syntax::parse_tokens_with_preferences(&scan.tokens, &config.syntax);

    let result = PipelineResult {
        file_metadata: file_result.metadata,
        scan,
        parse,
        from_listing: false,
        processing_duration: file_result.processing_duration + start_time.elapsed(),
    };
    result.log_completion();
    result
}
