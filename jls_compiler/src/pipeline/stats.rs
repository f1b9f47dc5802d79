use crate::pipeline::PipelineResult;
use std::time::Duration;

/// Totals over a set of pipeline results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    pub total_files_processed: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub files_with_lexical_errors: usize,
    pub total_lexical_errors: usize,
    pub total_tokens_processed: usize,
    pub total_bytes_processed: u64,
    pub total_processing_time: Duration,
}

impl PipelineStats {
    pub fn from_results<'a>(results: impl IntoIterator<Item = &'a PipelineResult>) -> Self {
        let mut stats = Self::default();
        for result in results {
            stats.total_files_processed += 1;
            if result.accepted() {
                stats.accepted += 1;
            } else {
                stats.rejected += 1;
            }
            if result.has_lexical_errors() {
                stats.files_with_lexical_errors += 1;
            }
            stats.total_lexical_errors += result.scan.error_count();
            stats.total_tokens_processed += result.token_count();
            stats.total_bytes_processed += result.file_metadata.size;
            stats.total_processing_time += result.processing_duration;
        }
        stats
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.total_files_processed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.total_files_processed as f64
        }
    }

    pub fn average_processing_time(&self) -> Duration {
        match u32::try_from(self.total_files_processed) {
            Ok(count) if count > 0 => self.total_processing_time / count,
            _ => Duration::ZERO,
        }
    }

    /// Tokens per second over the summed processing time
    pub fn token_rate(&self) -> f64 {
        let seconds = self.total_processing_time.as_secs_f64();
        if seconds > 0.0 {
            self.total_tokens_processed as f64 / seconds
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::process_source;

    #[test]
    fn test_stats_from_results() {
        let results = [
            process_source("x = 1;", "a"),
            process_source("x = ;", "b"),
            process_source("y = 2; #", "c"),
        ];
        let stats = PipelineStats::from_results(&results);

        assert_eq!(stats.total_files_processed, 3);
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.files_with_lexical_errors, 1);
        assert_eq!(stats.total_lexical_errors, 1);
        assert_eq!(stats.total_tokens_processed, 4 + 3 + 4);
        assert!((stats.acceptance_rate() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats() {
        let stats = PipelineStats::from_results(&Vec::<PipelineResult>::new());
        assert_eq!(stats.acceptance_rate(), 0.0);
        assert_eq!(stats.average_processing_time(), Duration::ZERO);
    }
}
