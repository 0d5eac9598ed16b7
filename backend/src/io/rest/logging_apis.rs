use axum::{extract::State, response::Json, routing::post, Router};
use shared::{LogRequest, LogResponse};
use tracing::{debug, error, info, warn};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(log_message))
}

/// Re-emit a browser log line through the server's tracing subscriber
pub async fn log_message(
    State(_state): State<AppState>,
    Json(request): Json<LogRequest>,
) -> Json<LogResponse> {
    let component = request.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, request.message);

    match request.level.to_lowercase().as_str() {
        "debug" => debug!(target: "prode_backend::client", "{}", message),
        "warn" => warn!(target: "prode_backend::client", "{}", message),
        "error" => error!(target: "prode_backend::client", "{}", message),
        _ => info!(target: "prode_backend::client", "{}", message),
    }

    Json(LogResponse { success: true })
}
