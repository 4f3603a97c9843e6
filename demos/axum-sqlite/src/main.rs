use std::sync::Arc;

use axum::{Router, response::Json, routing::get};
use portier::{PortierBuilder, PortierConfig};
use serde_json::{Value, json};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine, the variables may come from the environment
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,portier=debug,portier_core=debug".into()),
        )
        .init();

    info!("Starting Portier Axum SQLite demo");

    let config = PortierConfig::from_env()?;

    let portier = PortierBuilder::new()
        .with_sqlite(&config.database_url)
        .await?
        .with_jwt(config.jwt)
        .with_phone_region(config.phone_region)
        .apply_migrations(true)
        .build()
        .await?;
    info!(database_url = %config.database_url, "Database ready");

    let app = Router::new()
        .route("/", get(index_handler))
        .nest("/api", portier_axum::routes(Arc::new(portier)));

    info!("Server starting on http://{}", config.bind_address);
    info!("Available endpoints:");
    info!("  GET  /                 - Index page");
    info!("  POST /api/register     - Register a new account");
    info!("  POST /api/verify-email - Confirm an email address");
    info!("  POST /api/login        - Log in and receive an access token");
    info!("  PUT  /api/update       - Update a profile");
    info!("  GET  /api/health       - Health check");

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn index_handler() -> Json<Value> {
    Json(json!({
        "name": "portier",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
