use std::env;

use anyhow::Result;
use voyage_mock_api::build_app;
use voyage_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("voyage_mock_api");

    let bind = env::var("VOYAGE_BIND").unwrap_or_else(|_| "0.0.0.0:8000".to_string());
    let app = build_app();

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(bind = %bind, "voyage mock backend started");

    axum::serve(listener, app).await?;
    Ok(())
}
