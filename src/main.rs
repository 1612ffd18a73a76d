//! Classroom Attendance Backend
//!
//! A REST backend that keeps the current roster in a CSV file and the session
//! history in a JSON file.

mod api;
mod attendance;
mod config;
mod errors;
mod models;
mod store;

use std::sync::{Arc, Mutex};

use axum::{routing::get, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::{success, ApiResult};
use config::Config;
use store::RecordStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<RecordStore>>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Classroom Attendance Backend");

    // Initialize data files
    let mut store = RecordStore::new(config.roster_path.clone(), config.history_path.clone());
    tracing::info!("Roster path: {:?}", store.roster_path());
    tracing::info!("History path: {:?}", store.history_path());
    let report = store.ensure_schema()?;
    tracing::info!(
        "Roster {:?}, history created: {}",
        report.roster,
        report.history_created
    );

    let students = store.load_students()?;
    let classes = models::group_classes(&students);
    tracing::info!(
        "Loaded {} students in {} classes",
        students.len(),
        classes.len()
    );

    // Create application state
    let state = AppState {
        store: Arc::new(Mutex::new(store)),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/health", get(health_check))
        // Classes
        .route("/classes", get(api::list_classes))
        .route("/classes/{id}/students", get(api::list_class_students))
        .route("/classes/{id}/stats", get(api::class_stats))
        // Attendance
        .route(
            "/attendance",
            get(api::list_attendance).post(api::submit_attendance),
        )
        // Students
        .route("/students/search", get(api::search_students))
        .method_not_allowed_fallback(api::method_not_allowed);

    Router::new()
        .nest("/api", api_routes)
        .fallback(api::route_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check payload.
#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    timestamp: String,
}

/// Health check endpoint.
async fn health_check() -> ApiResult<HealthStatus> {
    success(
        HealthStatus {
            status: "online",
            timestamp: chrono::Utc::now().to_rfc3339(),
        },
        "API is running",
    )
}
