//! # JSON Prediction Repository
//!
//! File-based prediction storage. The whole collection is one pretty-printed
//! JSON array in `{data_directory}/prode.json`, most recent first:
//!
//! ```json
//! [
//!   {
//!     "nombre": "Ana",
//!     "fechaNacimiento": "2024-05-01",
//!     "horaNacimiento": "14:30",
//!     "peso": "3.2",
//!     "longitud": "49",
//!     "tipoParto": "Natural",
//!     "numeroHabitacion": "204",
//!     "id": "1714572000000",
//!     "fechaCreacion": "2024-05-01T14:00:00.000Z"
//!   }
//! ]
//! ```
//!
//! Every operation reads the full array, changes it in memory and rewrites the
//! file. There is no locking between writers: two concurrent read-modify-write
//! cycles can interleave and the last one to rename its file wins.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use shared::{DeliveryType, FieldValue};
use std::fs;
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::connection::JsonConnection;
use crate::domain::models::prediction::{DomainPrediction, NewPrediction};
use crate::storage::PredictionStorage;

/// On-disk shape of one prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictionDocument {
    nombre: String,
    fecha_nacimiento: String,
    hora_nacimiento: String,
    #[serde(deserialize_with = "text_or_number")]
    peso: String,
    #[serde(deserialize_with = "text_or_number")]
    longitud: String,
    tipo_parto: String,
    numero_habitacion: String,
    #[serde(deserialize_with = "text_or_number")]
    id: String,
    fecha_creacion: String,
}

/// Older documents may carry plain JSON numbers where strings are expected
fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(|value| value.to_text())
}

impl From<DomainPrediction> for PredictionDocument {
    fn from(prediction: DomainPrediction) -> Self {
        PredictionDocument {
            nombre: prediction.nombre,
            fecha_nacimiento: prediction.fecha_nacimiento,
            hora_nacimiento: prediction.hora_nacimiento,
            peso: prediction.peso,
            longitud: prediction.longitud,
            tipo_parto: prediction.tipo_parto.to_string(),
            numero_habitacion: prediction.numero_habitacion,
            id: prediction.id,
            fecha_creacion: prediction.created_at,
        }
    }
}

impl TryFrom<PredictionDocument> for DomainPrediction {
    type Error = anyhow::Error;

    fn try_from(document: PredictionDocument) -> Result<Self> {
        let tipo_parto = document
            .tipo_parto
            .parse::<DeliveryType>()
            .map_err(|e| anyhow::anyhow!("Failed to parse delivery type: {}", e))?;

        Ok(DomainPrediction {
            id: document.id,
            nombre: document.nombre,
            fecha_nacimiento: document.fecha_nacimiento,
            hora_nacimiento: document.hora_nacimiento,
            peso: document.peso,
            longitud: document.longitud,
            tipo_parto,
            numero_habitacion: document.numero_habitacion,
            created_at: document.fecha_creacion,
        })
    }
}

/// JSON-file prediction repository
#[derive(Clone)]
pub struct PredictionRepository {
    connection: JsonConnection,
}

impl PredictionRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    /// Read the raw array. Entries are kept as JSON values so that ones this
    /// version cannot decode survive a rewrite untouched.
    fn read_entries(&self) -> Result<Vec<Value>> {
        self.connection.ensure_data_directory()?;

        let file_path = self.connection.data_file_path();
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", file_path.display()))
    }

    /// Rewrite the whole array through a uniquely named temporary file, so
    /// concurrent writers never share a scratch path
    fn write_entries(&self, entries: &[Value]) -> Result<()> {
        self.connection.ensure_data_directory()?;

        let file_path = self.connection.data_file_path();
        let content = serde_json::to_string_pretty(entries)?;

        let mut temp_file = NamedTempFile::new_in(self.connection.data_directory())
            .context("Failed to create temporary data file")?;
        temp_file
            .write_all(content.as_bytes())
            .with_context(|| format!("Failed to write {}", temp_file.path().display()))?;
        temp_file
            .persist(&file_path)
            .map_err(|e| e.error)
            .with_context(|| format!("Failed to replace {}", file_path.display()))?;

        debug!("Wrote {} predictions to {:?}", entries.len(), file_path);
        Ok(())
    }

    fn decode(entry: &Value) -> Option<DomainPrediction> {
        let decoded = serde_json::from_value::<PredictionDocument>(entry.clone())
            .map_err(anyhow::Error::from)
            .and_then(DomainPrediction::try_from);
        match decoded {
            Ok(prediction) => Some(prediction),
            Err(e) => {
                warn!("Failed to parse prediction entry: {}. Skipping.", e);
                None
            }
        }
    }

    fn entry_id(entry: &Value) -> Option<String> {
        match entry.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    /// Epoch millis, bumped until it does not clash with an existing id
    fn next_id(entries: &[Value], now_millis: u64) -> String {
        let mut candidate = now_millis;
        loop {
            let id = DomainPrediction::generate_id(candidate);
            if !entries.iter().any(|entry| Self::entry_id(entry).as_deref() == Some(id.as_str())) {
                return id;
            }
            candidate += 1;
        }
    }
}

#[async_trait]
impl PredictionStorage for PredictionRepository {
    async fn list_predictions(&self) -> Result<Vec<DomainPrediction>> {
        let entries = self.read_entries()?;
        Ok(entries.iter().filter_map(Self::decode).collect())
    }

    async fn store_prediction(&self, prediction: NewPrediction) -> Result<DomainPrediction> {
        let mut entries = self.read_entries()?;

        let now_millis = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
        let id = Self::next_id(&entries, now_millis);
        let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let prediction = prediction.into_prediction(id, created_at);

        let document = PredictionDocument::from(prediction.clone());
        entries.insert(0, serde_json::to_value(document)?);
        self.write_entries(&entries)?;

        info!("Stored prediction {} in JSON file", prediction.id);
        Ok(prediction)
    }

    async fn delete_prediction(&self, prediction_id: &str) -> Result<bool> {
        let mut entries = self.read_entries()?;
        let before = entries.len();
        entries.retain(|entry| Self::entry_id(entry).as_deref() != Some(prediction_id));

        if entries.len() == before {
            debug!("No prediction with id {} to delete", prediction_id);
            return Ok(false);
        }

        self.write_entries(&entries)?;
        info!("Deleted prediction {} from JSON file", prediction_id);
        Ok(true)
    }

    async fn get_prediction(&self, prediction_id: &str) -> Result<Option<DomainPrediction>> {
        let predictions = self.list_predictions().await?;
        Ok(predictions.into_iter().find(|p| p.id == prediction_id))
    }
}
