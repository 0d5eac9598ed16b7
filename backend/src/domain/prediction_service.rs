//! Prediction service domain logic.
//!
//! Orchestrates validation and persistence. Listing is forgiving: a storage
//! fault is logged and reported as an empty collection so the page still
//! renders. Create and delete surface storage faults to the caller.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::commands::predictions::{
    CreatePredictionCommand, CreatePredictionResult, DeletePredictionCommand,
    DeletePredictionResult,
};
use crate::domain::models::prediction::{DomainPrediction, PredictionError};
use crate::domain::validation::validate_submission;
use crate::storage::PredictionStorage;

#[derive(Clone)]
pub struct PredictionService {
    storage: Arc<dyn PredictionStorage>,
}

impl PredictionService {
    pub fn new(storage: Arc<dyn PredictionStorage>) -> Self {
        Self { storage }
    }

    /// All predictions, newest first. Empty when storage cannot be read.
    pub async fn list_predictions(&self) -> Vec<DomainPrediction> {
        match self.storage.list_predictions().await {
            Ok(predictions) => {
                info!("Listed {} predictions", predictions.len());
                predictions
            }
            Err(e) => {
                error!("Failed to read predictions, returning empty list: {:#}", e);
                Vec::new()
            }
        }
    }

    /// Validate and persist a submission
    pub async fn create_prediction(
        &self,
        command: CreatePredictionCommand,
    ) -> Result<CreatePredictionResult, PredictionError> {
        let new_prediction = match validate_submission(command) {
            Ok(prediction) => prediction,
            Err(e) => {
                warn!("Rejected prediction submission: {}", e);
                return Err(e);
            }
        };

        let prediction = self
            .storage
            .store_prediction(new_prediction)
            .await
            .map_err(PredictionError::Storage)?;

        info!("Created prediction {} for {}", prediction.id, prediction.nombre);
        Ok(CreatePredictionResult { prediction })
    }

    /// Remove a prediction. Unknown ids are not an error.
    pub async fn delete_prediction(
        &self,
        command: DeletePredictionCommand,
    ) -> Result<DeletePredictionResult, PredictionError> {
        let removed = self
            .storage
            .delete_prediction(&command.id)
            .await
            .map_err(PredictionError::Storage)?;

        if removed {
            info!("Deleted prediction {}", command.id);
        } else {
            info!("No prediction with id {} to delete", command.id);
        }
        Ok(DeletePredictionResult { removed })
    }

    pub async fn get_prediction(
        &self,
        prediction_id: &str,
    ) -> Result<Option<DomainPrediction>, PredictionError> {
        self.storage
            .get_prediction(prediction_id)
            .await
            .map_err(PredictionError::Storage)
    }
}
