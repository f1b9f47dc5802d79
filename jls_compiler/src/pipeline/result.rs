use crate::file_processor::FileMetadata;
use crate::lexical::ScanOutput;
use crate::logging::codes;
use crate::syntax::ParseRun;
use std::time::Duration;

/// Scan and parse outcome for one input. The lexical error list is always
/// complete; the parse carries at most one syntax error.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub file_metadata: FileMetadata,
    /// Empty when the input was a token listing rather than source text
    pub scan: ScanOutput,
    pub parse: ParseRun,
    /// Parsed from a persisted token listing
    pub from_listing: bool,
    pub processing_duration: Duration,
}

impl PipelineResult {
    /// The parser accepted the token categories
    pub fn accepted(&self) -> bool {
        self.parse.is_accepted()
    }

    pub fn has_lexical_errors(&self) -> bool {
        self.scan.has_errors()
    }

    /// Accepted with no lexical errors
    pub fn is_clean(&self) -> bool {
        self.accepted() && !self.has_lexical_errors()
    }

    pub fn token_count(&self) -> usize {
        if self.from_listing {
            self.parse.trace.input.len().saturating_sub(1)
        } else {
            self.scan.tokens.len()
        }
    }

    pub fn log_completion(&self) {
        let duration_ms = format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0);
        let file = self.file_metadata.path.display();

        if self.is_clean() {
            crate::log_success!(
                codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
                "Input accepted",
                "file" => file,
                "tokens" => self.token_count(),
                "identifiers" => self.scan.identifiers.len(),
                "duration_ms" => duration_ms
            );
        } else {
            crate::log_info!("Input not accepted",
                "file" => file,
                "accepted" => self.accepted(),
                "lexical_errors" => self.scan.error_count(),
                "duration_ms" => duration_ms
            );
        }
    }
}
