pub mod handlers;

pub use handlers::{audit_records, audit_records_csv, audit_upload, health_check};

use crate::service::AuditService;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;

/// Routes of the cotejo service
pub fn router(service: Arc<AuditService>, max_upload_bytes: usize) -> Router {
    let audit_routes = Router::new()
        .route("/api/audit", post(audit_upload))
        .route("/api/audit/records", post(audit_records))
        .route("/api/audit/records/csv", post(audit_records_csv))
        .with_state(service);

    Router::new()
        .route("/health", get(health_check))
        .merge(audit_routes)
        // Two documents plus multipart overhead
        .layer(
            ServiceBuilder::new().layer(DefaultBodyLimit::max(max_upload_bytes * 2 + 64 * 1024)),
        )
}
