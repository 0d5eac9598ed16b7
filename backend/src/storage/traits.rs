use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::prediction::{DomainPrediction, NewPrediction};

/// Trait defining the interface for prediction storage operations
///
/// Implementations own the persisted collection and decide how ids and
/// creation timestamps are assigned.
#[async_trait]
pub trait PredictionStorage: Send + Sync {
    /// List all predictions, most recent first
    async fn list_predictions(&self) -> Result<Vec<DomainPrediction>>;

    /// Persist a new prediction and return it with its id and creation time
    async fn store_prediction(&self, prediction: NewPrediction) -> Result<DomainPrediction>;

    /// Delete a prediction by id
    /// Returns true if the prediction was found and deleted, false otherwise
    async fn delete_prediction(&self, prediction_id: &str) -> Result<bool>;

    /// Retrieve a specific prediction by id
    async fn get_prediction(&self, prediction_id: &str) -> Result<Option<DomainPrediction>>;
}

/// Storage whose every operation fails, for exercising fault paths
#[cfg(test)]
pub(crate) struct BrokenStorage;

#[cfg(test)]
#[async_trait]
impl PredictionStorage for BrokenStorage {
    async fn list_predictions(&self) -> Result<Vec<DomainPrediction>> {
        Err(anyhow::anyhow!("disk unplugged"))
    }

    async fn store_prediction(&self, _prediction: NewPrediction) -> Result<DomainPrediction> {
        Err(anyhow::anyhow!("disk unplugged"))
    }

    async fn delete_prediction(&self, _prediction_id: &str) -> Result<bool> {
        Err(anyhow::anyhow!("disk unplugged"))
    }

    async fn get_prediction(&self, _prediction_id: &str) -> Result<Option<DomainPrediction>> {
        Err(anyhow::anyhow!("disk unplugged"))
    }
}
