//! # Storage Module
//!
//! Persistence for predictions. Two backends implement [`PredictionStorage`]:
//!
//! - **json**: a single pretty-printed JSON array in the data directory
//! - **table**: a hosted relational table (Postgres, or SQLite for local runs)
//!
//! The backend is picked once at startup from [`StorageConfig`].

pub mod json;
pub mod table;
pub mod traits;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::StorageConfig;

pub use traits::*;

/// Build the storage backend named by the configuration
pub async fn connect_storage(config: &StorageConfig) -> Result<Arc<dyn PredictionStorage>> {
    info!("Using prediction storage: {}", config.describe());
    match config {
        StorageConfig::File { data_dir } => {
            let connection = json::JsonConnection::new(data_dir)?;
            Ok(Arc::new(json::PredictionRepository::new(connection)))
        }
        StorageConfig::Table {
            database_url,
            table_name,
            bootstrap,
        } => {
            let connection =
                table::TableConnection::connect(database_url, table_name, *bootstrap).await?;
            Ok(Arc::new(table::PredictionRepository::new(connection)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_connect_file_storage_creates_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("prode-data");
        let storage = connect_storage(&StorageConfig::File { data_dir: data_dir.clone() })
            .await
            .unwrap();

        assert!(data_dir.is_dir());
        assert!(storage.list_predictions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_table_storage_with_bootstrap() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::Table {
            database_url: format!(
                "sqlite://{}?mode=rwc",
                temp_dir.path().join("prode.db").display()
            ),
            table_name: "prodes".to_string(),
            bootstrap: true,
        };

        let storage = connect_storage(&config).await.unwrap();
        assert!(storage.list_predictions().await.unwrap().is_empty());
    }
}
