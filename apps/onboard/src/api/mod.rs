//! # Onboarding HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! Public:
//! - `GET /health` - Health check
//! - `POST /api/auth/register` - Self-registration
//! - `POST /api/auth/login` - Obtain an access token
//!
//! Authenticated:
//! - `POST /api/employee/{id}/complete-step` - Mark a step as completed
//! - `GET /api/employee/{id}/progress` - Current progress
//! - `GET /api/employee/{id}/completion-data` - Completion summary
//!
//! Admin only:
//! - `GET /api/admin/stats` - Population statistics
//! - `GET /api/admin/employees` - List records
//! - `POST /api/admin/employees` - Add an employee
//! - `DELETE /api/admin/employees/{id}` - Delete a record

pub mod auth;
mod error;
mod extract;
mod handlers;
mod middleware;
mod types;

pub use auth::{Claims, CurrentUser, TokenService};
pub use error::ApiError;
pub use extract::ApiJson;
pub use middleware::create_rate_limiter;
pub use types::{
    CompleteStepRequest, CompletionDataResponse, DistributionJson, EmployeeResponse,
    HealthResponse, LoginRequest, LoginResponse, MessageResponse, ProgressResponse,
    RegisterRequest, StatsResponse, UserSummary,
};

use crate::config::{AppConfig, ServerConfig};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use onboard_core::{OnboardError, Roster};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body (64 KiB).
const MAX_BODY_SIZE: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<RwLock<Roster>>,
    pub tokens: Arc<TokenService>,
    pub server: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(roster: Roster, tokens: TokenService, server: ServerConfig) -> Self {
        Self {
            roster: Arc::new(RwLock::new(roster)),
            tokens: Arc::new(tokens),
            server: Arc::new(server),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from `[server] cors_origins`.
///
/// - `["*"]`: any origin
/// - empty: localhost only
/// - otherwise: the listed origins; invalid entries are skipped
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => {
                tracing::info!("CORS: Allowing origin: {}", origin);
                Some(hv)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        tracing::info!("CORS: No origins configured, defaulting to localhost only");
        return restricted_cors(localhost_origins());
    }
    restricted_cors(allowed)
}

fn localhost_origins() -> Vec<HeaderValue> {
    [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5173",
    ]
    .into_iter()
    .map(HeaderValue::from_static)
    .collect()
}

fn restricted_cors(origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Body limit
/// 4. Rate Limiting (if enabled)
/// 5. Authentication / admin check (per route group)
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/register", post(handlers::register_handler))
        .route("/auth/login", post(handlers::login_handler));

    let employee = Router::new()
        .route(
            "/employee/{id}/complete-step",
            post(handlers::complete_step_handler),
        )
        .route("/employee/{id}/progress", get(handlers::progress_handler))
        .route(
            "/employee/{id}/completion-data",
            get(handlers::completion_data_handler),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let admin = Router::new()
        .route("/admin/stats", get(handlers::stats_handler))
        .route(
            "/admin/employees",
            get(handlers::list_employees_handler).post(handlers::add_employee_handler),
        )
        .route(
            "/admin/employees/{id}",
            delete(handlers::delete_employee_handler),
        )
        .route_layer(axum_middleware::from_fn(auth::require_admin))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .nest("/api", public.merge(employee).merge(admin));

    match create_rate_limiter(state.server.rate_limit) {
        Some(limiter) => {
            tracing::info!(
                "Rate limiting enabled: {} requests/second",
                state.server.rate_limit
            );
            router = router.layer(axum_middleware::from_fn_with_state(
                limiter,
                middleware::rate_limit_middleware,
            ));
        }
        None => tracing::info!("Rate limiting disabled"),
    }

    let cors = build_cors_layer(&state.server.cors_origins);

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server and run until Ctrl+C.
pub async fn run_server(config: &AppConfig, roster: Roster) -> Result<(), OnboardError> {
    let tokens = TokenService::from_config(&config.auth);
    let state = AppState::new(roster, tokens, config.server.clone());
    let router = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| OnboardError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Onboarding HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| OnboardError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

