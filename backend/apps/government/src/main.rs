//! Government Record Service Entry Point
//!
//! Serves customer loan records under `/api`. Shares the portal's request
//! tracing so a lookup logs under the caller's trace id.

mod config;

use std::net::SocketAddr;

use axum::middleware;
use axum::routing::get;
use axum::{Json, Router};
use platform::telemetry::{init_logging, init_tracing, trace_requests};
use records::{PgCustomerRepository, records_router};
use serde_json::json;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::{GovernmentConfig, SERVICE_NAME};

const DEFAULT_LOG_FILTER: &str = "government=info,records=info,platform=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging(DEFAULT_LOG_FILTER);

    let config = GovernmentConfig::from_env()?;
    let (telemetry, telemetry_guard) = init_tracing(&config.telemetry);

    let db = &config.database;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(
            PgConnectOptions::new()
                .host(&db.host)
                .port(db.port)
                .username(&db.user)
                .password(&db.password)
                .database(&db.name),
        )
        .await?;

    tracing::info!(database = %db.name, "Connected to database");

    sqlx::migrate!("../../../database/records/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let app = Router::new()
        .nest("/api", records_router(PgCustomerRepository::new(pool)))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(telemetry, trace_requests));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Government Loan Bank API listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
            tracing::info!("Shutting down");
        })
        .await?;

    telemetry_guard.shutdown();
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}
