use thiserror::Error;

use crate::models::DocumentSide;

/// Failures talking to the extraction provider
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("extraction provider API key is not configured")]
    MissingApiKey,

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("provider returned status {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("provider returned no content")]
    EmptyResponse,

    #[error("provider response is not a valid pedimento record: {0}")]
    MalformedRecord(String),
}

#[derive(Debug, Error)]
pub enum AuditError {
    /// Opaque to callers beyond which document failed
    #[error("extraction failed for document {side}: {source}")]
    Extraction {
        side: DocumentSide,
        #[source]
        source: ExtractionError,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("report export failed: {0}")]
    Export(String),
}

impl From<csv::Error> for AuditError {
    fn from(e: csv::Error) -> Self {
        Self::Export(e.to_string())
    }
}
