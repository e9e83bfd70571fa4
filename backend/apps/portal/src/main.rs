//! Loan Validator Portal Entry Point
//!
//! Wires the session authority (`/auth`) and the loan validation gateway
//! (`/api`) into one server. Uses `anyhow` for startup errors only;
//! request errors are rendered by the feature crates.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::domain::SessionRepository;
use auth::{AuthMiddlewareState, PgAuthRepository, auth_router, require_session};
use axum::body::Body;
use axum::http::{HeaderValue, Method, Request, header};
use axum::middleware::{self, Next};
use axum::routing::get;
use axum::{Json, Router};
use loan::{HttpRecordClient, loan_router};
use platform::config::DatabaseConfig;
use platform::telemetry::{init_logging, init_tracing, trace_requests};
use serde_json::json;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{PortalConfig, SERVICE_NAME};

const DEFAULT_LOG_FILTER: &str = "portal=info,auth=info,loan=info,platform=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging(DEFAULT_LOG_FILTER);

    let config = PortalConfig::from_env()?;
    let (telemetry, telemetry_guard) = init_tracing(&config.telemetry);

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(connect_options(&config.database))
        .await?;

    tracing::info!(database = %config.database.name, "Connected to database");

    sqlx::migrate!("../../../database/portal/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup; a failure here must not block startup
    let auth_repo = PgAuthRepository::new(pool.clone());
    match auth_repo
        .cleanup_expired(chrono::Utc::now().timestamp_millis())
        .await
    {
        Ok(sessions) => {
            tracing::info!(sessions_deleted = sessions, "Auth session cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Auth session cleanup failed, continuing anyway");
        }
    }

    let allowed_origins: Vec<HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::HeaderName::from_static("traceparent"),
        ]))
        .allow_credentials(true);

    let gate = AuthMiddlewareState {
        repo: Arc::new(auth_repo.clone()),
        config: Arc::new(config.auth.clone()),
    };

    let record_client = HttpRecordClient::new(&config.gateway)?;
    tracing::info!(
        record_service = %config.gateway.record_service_url,
        timeout_secs = config.gateway.timeout.as_secs(),
        "Record service client ready"
    );

    let app = Router::new()
        .nest(
            "/auth",
            auth_router(auth_repo, config.auth.clone(), telemetry.clone()),
        )
        .nest(
            "/api",
            loan_router(record_client, config.gateway.clone(), telemetry.clone()).route_layer(
                middleware::from_fn(move |req: Request<Body>, next: Next| {
                    require_session(gate.clone(), req, next)
                }),
            ),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn_with_state(telemetry, trace_requests))
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    telemetry_guard.shutdown();
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": SERVICE_NAME }))
}

fn connect_options(db: &DatabaseConfig) -> PgConnectOptions {
    PgConnectOptions::new()
        .host(&db.host)
        .port(db.port)
        .username(&db.user)
        .password(&db.password)
        .database(&db.name)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
