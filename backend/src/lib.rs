//! # Prode Backend
//!
//! HTTP server for the birth-prediction form. Layered as
//!
//! ```text
//! IO Layer (REST handlers, DTO mapping)
//!     ↓
//! Domain Layer (validation, prediction service)
//!     ↓
//! Storage Layer (JSON file or hosted table)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::domain::PredictionService;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub prediction_service: PredictionService,
}

/// Initialize the backend with the storage named by the configuration
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up storage");
    let storage = storage::connect_storage(&config.storage).await?;

    info!("Setting up domain model");
    let prediction_service = PredictionService::new(storage);

    Ok(AppState { prediction_service })
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let api_routes = Router::new()
        .nest("/prode", io::prediction_apis::router())
        .nest("/logs", io::logging_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .with_state(app_state)
}
