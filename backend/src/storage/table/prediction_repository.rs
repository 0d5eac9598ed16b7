//! # Table Prediction Repository
//!
//! Prediction storage backed by a hosted relational table. Each operation is a
//! single statement, so there is nothing to coordinate between writers.
//!
//! Columns use snake_case names:
//!
//! ```text
//! id | nombre | fecha_nacimiento | hora_nacimiento | peso | longitud
//!    | tipo_parto | numero_habitacion | created_at
//! ```
//!
//! `id` and `created_at` are assigned by the database. `peso` and `longitud`
//! are numeric columns; they are parsed before insertion and rendered back to
//! text on the way out so callers see the same shape as the JSON file store.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use shared::DeliveryType;
use tracing::{debug, info};

use super::connection::TableConnection;
use crate::domain::models::prediction::{DomainPrediction, NewPrediction};
use crate::storage::PredictionStorage;

/// Row shape of the predictions table
#[derive(Debug, Clone, sqlx::FromRow)]
struct PredictionRow {
    id: i64,
    nombre: String,
    fecha_nacimiento: String,
    hora_nacimiento: String,
    peso: f64,
    longitud: f64,
    tipo_parto: String,
    numero_habitacion: String,
    created_at: String,
}

impl TryFrom<PredictionRow> for DomainPrediction {
    type Error = anyhow::Error;

    fn try_from(row: PredictionRow) -> Result<Self> {
        let tipo_parto = row.tipo_parto.parse::<DeliveryType>().map_err(|e| {
            anyhow::anyhow!("Failed to parse delivery type of row {}: {}", row.id, e)
        })?;

        Ok(DomainPrediction {
            id: row.id.to_string(),
            nombre: row.nombre,
            fecha_nacimiento: row.fecha_nacimiento,
            hora_nacimiento: row.hora_nacimiento,
            peso: row.peso.to_string(),
            longitud: row.longitud.to_string(),
            tipo_parto,
            numero_habitacion: row.numero_habitacion,
            created_at: normalize_timestamp(&row.created_at),
        })
    }
}

/// Render a database timestamp as RFC 3339 UTC with millisecond precision.
/// Postgres renders `timestamptz` as text like `2024-05-01 14:30:00.123456+00`.
fn normalize_timestamp(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true);
    }
    if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return parsed.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return parsed.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true);
    }
    raw.to_string()
}

/// Hosted-table prediction repository
#[derive(Clone)]
pub struct PredictionRepository {
    connection: TableConnection,
    select_columns: String,
}

impl PredictionRepository {
    pub fn new(connection: TableConnection) -> Self {
        // Casts keep decoding uniform whatever the column types are on the server
        let select_columns = "id, nombre, fecha_nacimiento, hora_nacimiento, \
             CAST(peso AS DOUBLE PRECISION) AS peso, \
             CAST(longitud AS DOUBLE PRECISION) AS longitud, \
             tipo_parto, numero_habitacion, \
             CAST(created_at AS TEXT) AS created_at"
            .to_string();
        Self {
            connection,
            select_columns,
        }
    }

    fn table(&self) -> &str {
        self.connection.table_name()
    }

    fn parse_measurement(field: &str, value: &str) -> Result<f64> {
        value
            .trim()
            .parse::<f64>()
            .with_context(|| format!("{} is not numeric: {}", field, value))
    }
}

#[async_trait]
impl PredictionStorage for PredictionRepository {
    async fn list_predictions(&self) -> Result<Vec<DomainPrediction>> {
        // Qualified so ordering uses the stored timestamp, not the text alias
        let sql = format!(
            "SELECT {columns} FROM {table} ORDER BY {table}.created_at DESC, {table}.id DESC",
            columns = self.select_columns,
            table = self.table()
        );
        let rows = sqlx::query_as::<_, PredictionRow>(&sql)
            .fetch_all(self.connection.pool())
            .await
            .context("Failed to select predictions")?;

        debug!("Selected {} predictions from table", rows.len());
        rows.into_iter().map(DomainPrediction::try_from).collect()
    }

    async fn store_prediction(&self, prediction: NewPrediction) -> Result<DomainPrediction> {
        let peso = Self::parse_measurement("peso", &prediction.peso)?;
        let longitud = Self::parse_measurement("longitud", &prediction.longitud)?;

        let sql = format!(
            "INSERT INTO {} (nombre, fecha_nacimiento, hora_nacimiento, peso, longitud, \
             tipo_parto, numero_habitacion) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            self.table(),
            self.select_columns
        );
        let row = sqlx::query_as::<_, PredictionRow>(&sql)
            .bind(prediction.nombre)
            .bind(prediction.fecha_nacimiento)
            .bind(prediction.hora_nacimiento)
            .bind(peso)
            .bind(longitud)
            .bind(prediction.tipo_parto.to_string())
            .bind(prediction.numero_habitacion)
            .fetch_one(self.connection.pool())
            .await
            .context("Failed to insert prediction")?;

        let stored = DomainPrediction::try_from(row)?;
        info!("Stored prediction {} in table", stored.id);
        Ok(stored)
    }

    async fn delete_prediction(&self, prediction_id: &str) -> Result<bool> {
        // Ids are database integers; anything else cannot match a row
        let Ok(id) = prediction_id.parse::<i64>() else {
            debug!("Ignoring delete of non-numeric id {}", prediction_id);
            return Ok(false);
        };

        let sql = format!("DELETE FROM {} WHERE id = $1", self.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.connection.pool())
            .await
            .context("Failed to delete prediction")?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_prediction(&self, prediction_id: &str) -> Result<Option<DomainPrediction>> {
        let Ok(id) = prediction_id.parse::<i64>() else {
            return Ok(None);
        };

        let sql = format!("SELECT {} FROM {} WHERE id = $1", self.select_columns, self.table());
        let row = sqlx::query_as::<_, PredictionRow>(&sql)
            .bind(id)
            .fetch_optional(self.connection.pool())
            .await
            .context("Failed to select prediction")?;

        row.map(DomainPrediction::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup_test_repo() -> (PredictionRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let url = format!("sqlite://{}?mode=rwc", temp_dir.path().join("prode.db").display());
        let connection = TableConnection::connect(&url, "prodes", true)
            .await
            .expect("Failed to connect test database");
        (PredictionRepository::new(connection), temp_dir)
    }

    fn new_prediction(nombre: &str, peso: &str, longitud: &str) -> NewPrediction {
        NewPrediction {
            nombre: nombre.to_string(),
            fecha_nacimiento: "2024-05-01".to_string(),
            hora_nacimiento: "14:30".to_string(),
            peso: peso.to_string(),
            longitud: longitud.to_string(),
            tipo_parto: DeliveryType::Cesarea,
            numero_habitacion: "204".to_string(),
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_snake_case_columns() {
        let (repo, _temp_dir) = setup_test_repo().await;

        let stored = repo.store_prediction(new_prediction("Ana", "3.20", "49")).await.unwrap();
        assert!(stored.id.parse::<i64>().is_ok());
        assert!(DateTime::parse_from_rfc3339(&stored.created_at).is_ok());

        let listed = repo.list_predictions().await.unwrap();
        assert_eq!(listed.len(), 1);
        let ana = &listed[0];
        assert_eq!(ana, &stored);
        assert_eq!(ana.nombre, "Ana");
        assert_eq!(ana.fecha_nacimiento, "2024-05-01");
        assert_eq!(ana.hora_nacimiento, "14:30");
        assert_eq!(ana.peso, "3.2");
        assert_eq!(ana.longitud, "49");
        assert_eq!(ana.tipo_parto, DeliveryType::Cesarea);
        assert_eq!(ana.numero_habitacion, "204");
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let (repo, _temp_dir) = setup_test_repo().await;
        for nombre in ["Ana", "Bruno", "Carla"] {
            repo.store_prediction(new_prediction(nombre, "3", "50")).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_predictions()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.nombre)
            .collect();
        assert_eq!(names, vec!["Carla", "Bruno", "Ana"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let (repo, _temp_dir) = setup_test_repo().await;
        let ana = repo.store_prediction(new_prediction("Ana", "3", "50")).await.unwrap();
        let bruno = repo.store_prediction(new_prediction("Bruno", "3", "50")).await.unwrap();
        let carla = repo.store_prediction(new_prediction("Carla", "3", "50")).await.unwrap();

        assert!(!repo.delete_prediction("not-a-number").await.unwrap());
        assert!(!repo.delete_prediction("987654").await.unwrap());
        assert_eq!(repo.list_predictions().await.unwrap().len(), 3);

        assert!(repo.delete_prediction(&bruno.id).await.unwrap());
        let ids: Vec<String> = repo
            .list_predictions()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![carla.id, ana.id]);
    }

    #[tokio::test]
    async fn test_get_prediction() {
        let (repo, _temp_dir) = setup_test_repo().await;
        let ana = repo.store_prediction(new_prediction("Ana", "0", "0")).await.unwrap();

        let found = repo.get_prediction(&ana.id).await.unwrap().expect("Prediction should exist");
        assert_eq!(found.peso, "0");
        assert_eq!(repo.get_prediction("abc").await.unwrap(), None);
        assert_eq!(repo.get_prediction("123456").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_non_numeric_measurement_is_rejected_before_insert() {
        let (repo, _temp_dir) = setup_test_repo().await;
        assert!(repo.store_prediction(new_prediction("Ana", "pesado", "49")).await.is_err());
        assert!(repo.list_predictions().await.unwrap().is_empty());
    }

    #[test]
    fn test_normalize_timestamp() {
        assert_eq!(normalize_timestamp("2024-05-01T14:30:00.123Z"), "2024-05-01T14:30:00.123Z");
        assert_eq!(
            normalize_timestamp("2024-05-01 14:30:00.123456+00"),
            "2024-05-01T14:30:00.123Z"
        );
        assert_eq!(normalize_timestamp("2024-05-01 11:30:00-03"), "2024-05-01T14:30:00.000Z");
        assert_eq!(normalize_timestamp("2024-05-01 14:30:00"), "2024-05-01T14:30:00.000Z");
        assert_eq!(normalize_timestamp("ayer"), "ayer");
    }
}
