use pedimento_audit::{api, AppConfig, AuditService, GeminiExtractor};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);
    if config.extraction.api_key.is_none() {
        warn!("No extraction API key configured; only /api/audit/records will work");
    }

    let extractor = Arc::new(GeminiExtractor::new(&config.extraction)?);
    let service = Arc::new(AuditService::new(extractor, config.audit.options()));

    let app = api::router(service, config.audit.max_upload_bytes);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/audit              - upload two pedimentos (multipart)");
    info!("  POST /api/audit/records      - compare two extracted records (JSON)");
    info!("  POST /api/audit/records/csv  - partidas comparison as CSV");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
