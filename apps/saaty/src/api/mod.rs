//! # HTTP API
//!
//! | Route | Does |
//! |---|---|
//! | `GET /health` | liveness |
//! | `GET /scale` | judgment scale, `?locale=en\|es` |
//! | `POST /weights` | criteria and judgments to weights |
//! | `POST /weights/matrix` | complete comparison matrix to weights |
//! | `POST /submissions` | compute weights and append a row |
//! | `GET /submissions` | rows of the configured sheet |
//!
//! `SAATY_API_KEY`, `SAATY_RATE_LIMIT` and `SAATY_CORS_ORIGINS` are read once,
//! when the router is built.

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::ApiKey;
pub use middleware::{Limiter, limiter_from_env};
pub use handlers::{
    health_handler, matrix_handler, records_handler, scale_handler, submit_handler,
    weights_handler,
};
pub use types::{
    HealthResponse, IntensityInput, JudgmentJson, MatrixRequest, MatrixResponse, PersistenceJson,
    PriorityJson, RecordsResponse, RowJson, ScaleLevelJson, ScaleQuery, ScaleResponse,
    SubmissionRequest, SubmissionResponse, WeightsRequest, WeightsResponse,
};

use crate::config::Config;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use saaty_core::{CriteriaBounds, Locale, SaatyError, SheetId, SheetStore};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (2 MB).
const MAX_BODY_SIZE: usize = 2 * 1024 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Any sheet store, shared between request handlers.
pub type SharedStore = Arc<RwLock<dyn SheetStore + Send + Sync>>;

/// Shared server state: the sheet store and the settings handlers need.
#[derive(Clone)]
pub struct AppState {
    /// Where submissions are appended.
    pub store: SharedStore,
    /// The sheet submissions go to.
    pub sheet: SheetId,
    /// Allowed number of criteria.
    pub bounds: CriteriaBounds,
    /// Default scale language.
    pub locale: Locale,
}

impl AppState {
    /// State with default settings around a store.
    #[must_use]
    pub fn new(store: impl SheetStore + Send + Sync + 'static) -> Self {
        Self {
            store: share(store),
            sheet: SheetId::default(),
            bounds: CriteriaBounds::default(),
            locale: Locale::default(),
        }
    }

    /// State built from a loaded configuration.
    pub fn from_config(
        config: &Config,
        store: impl SheetStore + Send + Sync + 'static,
    ) -> Result<Self, SaatyError> {
        Ok(Self {
            store: share(store),
            sheet: config.sheet(),
            bounds: config.bounds()?,
            locale: config.report.locale,
        })
    }

    #[must_use]
    pub fn with_sheet(mut self, sheet: SheetId) -> Self {
        self.sheet = sheet;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: CriteriaBounds) -> Self {
        self.bounds = bounds;
        self
    }
}

fn share(store: impl SheetStore + Send + Sync + 'static) -> SharedStore {
    Arc::new(RwLock::new(store))
}

// =============================================================================
// CORS
// =============================================================================

/// Origins allowed when `SAATY_CORS_ORIGINS` is unset.
const LOCAL_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

/// Which browser origins may call the API, from `SAATY_CORS_ORIGINS`.
#[derive(Debug, Clone, PartialEq)]
enum CorsPolicy {
    /// `*`
    AnyOrigin,
    /// Comma-separated list; unparsable entries are skipped.
    Origins(Vec<HeaderValue>),
    /// Unset, or nothing in the list parsed.
    Localhost,
}

impl CorsPolicy {
    fn from_env() -> Self {
        Self::parse(std::env::var("SAATY_CORS_ORIGINS").ok().as_deref())
    }

    fn parse(setting: Option<&str>) -> Self {
        let list = match setting.map(str::trim) {
            None => return Self::Localhost,
            Some("*") => return Self::AnyOrigin,
            Some(list) => list,
        };

        let origins: Vec<HeaderValue> = list
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin, "Ignoring unparsable CORS origin");
                    None
                }
            })
            .collect();

        if origins.is_empty() {
            Self::Localhost
        } else {
            Self::Origins(origins)
        }
    }

    fn into_layer(self) -> CorsLayer {
        let origins = match self {
            Self::AnyOrigin => {
                tracing::warn!("CORS open to every origin (SAATY_CORS_ORIGINS=*)");
                return CorsLayer::permissive();
            }
            Self::Origins(origins) => origins,
            Self::Localhost => LOCAL_ORIGINS.into_iter().map(HeaderValue::from_static).collect(),
        };
        tracing::info!(count = origins.len(), "CORS origins allowed");

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    }
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Routes plus, from the inside out: API key check, throttling, then
/// tracing, CORS and the body size limit around everything.
pub fn create_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/scale", get(handlers::scale_handler))
        .route("/weights", post(handlers::weights_handler))
        .route("/weights/matrix", post(handlers::matrix_handler))
        .route(
            "/submissions",
            get(handlers::records_handler).post(handlers::submit_handler),
        );

    match ApiKey::from_env() {
        Some(key) => {
            tracing::info!("API key required on every route but /health");
            router = router.layer(axum_middleware::from_fn_with_state(
                key,
                auth::require_api_key,
            ));
        }
        None => tracing::warn!("SAATY_API_KEY unset: anyone who can reach the server can use it"),
    }

    match limiter_from_env() {
        Some(limiter) => {
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::throttle,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsPolicy::from_env().into_layer())
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, state: AppState) -> Result<(), SaatyError> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| SaatyError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("Saaty HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SaatyError::Io(format!("Server error: {}", e)))
}

/// Resolve on Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
