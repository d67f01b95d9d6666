pub mod gemini;
pub mod schema;

use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::models::DocumentRecord;

pub use gemini::GeminiExtractor;

/// Uploaded pedimento (proforma PDF, image or .VAL file)
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: Option<String>,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Document {
    /// Declared content type wins; otherwise guessed from the file name.
    pub fn new(bytes: Vec<u8>, file_name: Option<String>, content_type: Option<&str>) -> Self {
        let mime_type = resolve_mime_type(file_name.as_deref(), content_type);
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }
}

fn resolve_mime_type(file_name: Option<&str>, content_type: Option<&str>) -> String {
    if let Some(declared) = content_type
        .map(str::trim)
        .filter(|ct| !ct.is_empty() && *ct != "application/octet-stream")
    {
        return declared.to_string();
    }

    let Some(name) = file_name else {
        return "application/octet-stream".to_string();
    };

    // .VAL validation files are plain-text records
    if name.to_ascii_lowercase().ends_with(".val") {
        return "text/plain".to_string();
    }

    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

/// External extraction provider: document bytes in, pedimento record out
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, document: &Document) -> Result<DocumentRecord, ExtractionError>;
}
