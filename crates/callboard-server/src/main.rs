use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod auth;
mod config;
mod models;
mod routes;

use adapters::PgCallRecordRepository;
use application::{AnalyticsService, IngestService};
use config::ServerConfig;

/// Type aliases for application services with concrete repository implementations
pub type AppIngestService = IngestService<PgCallRecordRepository>;
pub type AppAnalyticsService = AnalyticsService<PgCallRecordRepository>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub ingest: Arc<AppIngestService>,
    pub analytics: Arc<AppAnalyticsService>,
    pub api_key: Option<String>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Callboard API initializing...");

    let config = ServerConfig::from_env()?;

    if config.api_key.is_some() {
        tracing::info!("API key authentication enabled");
    } else {
        tracing::warn!("No API_KEY set - authentication disabled");
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!().run(&pool).await?;

    tracing::info!("Database migrations completed");

    let repo = Arc::new(PgCallRecordRepository::new(pool));
    let state = AppState {
        ingest: Arc::new(IngestService::new(repo.clone())),
        analytics: Arc::new(AnalyticsService::new(repo)),
        api_key: config.api_key.clone(),
    };

    // Protected routes (require authentication when a key is configured)
    let protected_routes = Router::new()
        .merge(routes::calls::router())
        .merge(routes::analytics::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Callboard API listening on {}", config.bind_addr);
    tracing::info!("Swagger UI: /swagger-ui");

    axum::serve(listener, router).await?;

    Ok(())
}
