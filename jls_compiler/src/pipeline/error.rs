use crate::file_processor::FileProcessorError;
use crate::logging::codes;
use crate::tokens::ListingError;

/// Failures that stop a file before a verdict exists. Lexical errors and
/// syntactic rejections are not here: they are part of `PipelineResult`.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Token listing could not be used: {0}")]
    Listing(#[from] ListingError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::FileProcessing(error) => error.error_code(),
            Self::Listing(error) => error.error_code(),
            Self::Pipeline { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_delegate() {
        let error: PipelineError = FileProcessorError::InvalidPath {
            path: String::new(),
        }
        .into();
        assert_eq!(error.error_code().as_str(), "E012");

        let error = PipelineError::pipeline_error("worker lost");
        assert_eq!(error.error_code().as_str(), "ERR001");
        assert_eq!(error.to_string(), "Pipeline error: worker lost");
    }
}
