use std::path::PathBuf;

use thiserror::Error;

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Failures of a single extraction call. None of them are retried here.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("text extraction tool not found: {}", program.display())]
    ToolNotFound { program: PathBuf },

    #[error("extraction produced no text")]
    EmptyExtraction,

    #[error("text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("uploaded file is empty")]
    EmptyUpload,

    #[error("failed to prepare scratch file: {0}")]
    Scratch(#[source] std::io::Error),
}

impl ExtractError {
    /// Message suitable for showing to the person who uploaded the file.
    pub fn user_hint(&self) -> &'static str {
        match self {
            ExtractError::ToolNotFound { .. } => {
                "PDF import is unavailable: install poppler-utils (pdftotext) on the server."
            }
            ExtractError::EmptyExtraction => {
                "No text was found in this PDF. It may be a scanned or image-only document."
            }
            ExtractError::ExtractionFailed(_) => {
                "The PDF could not be read. Check that the file is a valid PDF and try again."
            }
            ExtractError::EmptyUpload => "The uploaded file is empty.",
            ExtractError::Scratch(_) => "The upload could not be processed. Please try again.",
        }
    }
}
