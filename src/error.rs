//! Error handling for the resume screener

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeScreenerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No resume text to analyze")]
    NoInput,

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Vectorization failed: {0}")]
    VectorizationFailed(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, ResumeScreenerError>;

impl From<zip::result::ZipError> for ResumeScreenerError {
    fn from(err: zip::result::ZipError) -> Self {
        ResumeScreenerError::DocxExtraction(err.to_string())
    }
}

impl From<regex::Error> for ResumeScreenerError {
    fn from(err: regex::Error) -> Self {
        ResumeScreenerError::AnalysisFailed(format!("invalid pattern: {}", err))
    }
}
