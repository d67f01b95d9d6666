pub mod api;
pub mod config;
pub mod error;
pub mod extraction;
pub mod models;
pub mod report;
pub mod service;

pub use config::AppConfig;
pub use error::{AuditError, ExtractionError};
pub use extraction::{Document, Extractor, GeminiExtractor};
pub use service::{reconcile, AuditOptions, AuditService};
