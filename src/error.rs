//! Error handling for the ATS analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Text extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("Hiring model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Model format error: {0}")]
    ModelFormat(String),

    #[error("Training failed: {0}")]
    Training(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
}

impl AnalyzerError {
    /// True for failures that only withhold the hiring verdict
    pub fn is_model_unavailable(&self) -> bool {
        matches!(self, AnalyzerError::ModelUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for AnalyzerError {
    fn from(err: anyhow::Error) -> Self {
        AnalyzerError::AnalysisFailed(err.to_string())
    }
}

/// Convert bincode errors raised while writing or reading the model artifact
impl From<bincode::Error> for AnalyzerError {
    fn from(err: bincode::Error) -> Self {
        AnalyzerError::ModelFormat(err.to_string())
    }
}
