//! # REST API for Predictions
//!
//! `GET`, `POST` and `DELETE` on `/api/prode`. Failure bodies are always
//! `{"error": ...}`, with `missing` or `invalid` listing field keys when a
//! submission is rejected.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{
    CreatePredictionRequest, DeletePredictionQuery, DeletePredictionResponse, ErrorResponse,
};
use tracing::{error, info, warn};

use crate::domain::commands::predictions::DeletePredictionCommand;
use crate::domain::models::prediction::PredictionError;
use crate::io::rest::mappers::prediction_mapper::{PredictionMapper, INVALID_FIELDS_MESSAGE};
use crate::AppState;

const SAVE_FAILED_MESSAGE: &str = "Error al guardar los datos";
const DELETE_FAILED_MESSAGE: &str = "Error al eliminar los datos";
const ID_REQUIRED_MESSAGE: &str = "ID es requerido";

/// Create a router for prediction related APIs
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(list_predictions).post(create_prediction).delete(delete_prediction),
    )
}

/// List every prediction, newest first
pub async fn list_predictions(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/prode");

    let predictions = state.prediction_service.list_predictions().await;
    (StatusCode::OK, Json(PredictionMapper::to_dto_list(predictions))).into_response()
}

/// Validate and store a new prediction
pub async fn create_prediction(
    State(state): State<AppState>,
    request: Result<Json<CreatePredictionRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Bodies that are not a JSON object of scalars still get a JSON error body
    let request = match request {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Rejected unreadable prediction body: {}", rejection.body_text());
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(INVALID_FIELDS_MESSAGE)),
            )
                .into_response();
        }
    };
    info!("POST /api/prode - request: {:?}", request);

    let command = PredictionMapper::to_create_command(request);
    match state.prediction_service.create_prediction(command).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(PredictionMapper::to_dto(result.prediction)),
        )
            .into_response(),
        Err(e) => {
            let status = match &e {
                PredictionError::MissingFields(_) | PredictionError::InvalidFields(_) => {
                    warn!("Rejected prediction: {}", e);
                    StatusCode::BAD_REQUEST
                }
                PredictionError::Storage(_) => {
                    error!("Failed to create prediction: {}", e);
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            let body = PredictionMapper::to_error_response(&e, SAVE_FAILED_MESSAGE);
            (status, Json(body)).into_response()
        }
    }
}

/// Delete the prediction named by `?id=`; unknown ids still succeed. The id is
/// matched exactly, so only an absent or empty value is refused.
pub async fn delete_prediction(
    State(state): State<AppState>,
    Query(query): Query<DeletePredictionQuery>,
) -> impl IntoResponse {
    info!("DELETE /api/prode - id: {:?}", query.id);

    let id = match query.id.filter(|id| !id.is_empty()) {
        Some(id) => id,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(ID_REQUIRED_MESSAGE)),
            )
                .into_response();
        }
    };

    match state
        .prediction_service
        .delete_prediction(DeletePredictionCommand { id })
        .await
    {
        Ok(_) => (StatusCode::OK, Json(DeletePredictionResponse { success: true })).into_response(),
        Err(e) => {
            error!("Failed to delete prediction: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(DELETE_FAILED_MESSAGE)),
            )
                .into_response()
        }
    }
}
