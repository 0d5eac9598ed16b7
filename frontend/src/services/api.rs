use gloo::net::http::{Request, Response};
use shared::{CreatePredictionRequest, DeletePredictionResponse, ErrorResponse, PredictionRecord};

pub const SAVE_FAILED_MESSAGE: &str = "Error al guardar los datos";
pub const DELETE_FAILED_MESSAGE: &str = "Error al eliminar los datos";

/// API client for communicating with the backend server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client that talks to the page's own origin
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch every prediction, newest first
    pub async fn list_predictions(&self) -> Result<Vec<PredictionRecord>, String> {
        match Request::get(&self.url("/api/prode")).send().await {
            Ok(response) if response.ok() => response
                .json::<Vec<PredictionRecord>>()
                .await
                .map_err(|e| format!("Failed to parse predictions: {}", e)),
            Ok(response) => Err(format!("Failed to fetch predictions: {}", response.status_text())),
            Err(e) => Err(format!("Failed to fetch predictions: {}", e)),
        }
    }

    /// Submit a prediction. The error is the message to show the user.
    pub async fn create_prediction(
        &self,
        request: &CreatePredictionRequest,
    ) -> Result<PredictionRecord, String> {
        let response = Request::post(&self.url("/api/prode"))
            .json(request)
            .map_err(|_| SAVE_FAILED_MESSAGE.to_string())?
            .send()
            .await
            .map_err(|_| SAVE_FAILED_MESSAGE.to_string())?;

        if response.ok() {
            response
                .json::<PredictionRecord>()
                .await
                .map_err(|_| SAVE_FAILED_MESSAGE.to_string())
        } else {
            Err(error_message(response, SAVE_FAILED_MESSAGE).await)
        }
    }

    pub async fn delete_prediction(&self, id: &str) -> Result<DeletePredictionResponse, String> {
        let response = Request::delete(&self.url("/api/prode"))
            .query([("id", id)])
            .send()
            .await
            .map_err(|_| DELETE_FAILED_MESSAGE.to_string())?;

        if response.ok() {
            response
                .json::<DeletePredictionResponse>()
                .await
                .map_err(|_| DELETE_FAILED_MESSAGE.to_string())
        } else {
            Err(DELETE_FAILED_MESSAGE.to_string())
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a failure body into `error: field, field`, or `fallback` if it is not one
async fn error_message(response: Response, fallback: &str) -> String {
    match response.json::<ErrorResponse>().await {
        Ok(body) => body.user_message(),
        Err(_) => fallback.to_string(),
    }
}
