use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod format;
pub mod pagination;

pub use pagination::{paginate, total_pages, PageSlice, PAGE_SIZE};

/// A stored birth prediction ("prode") as it travels over the wire.
///
/// Field names are camelCase on the wire regardless of the storage backend.
/// `peso` and `longitud` are always numeric-formatted strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub id: String,
    /// Name of the person making the prediction
    pub nombre: String,
    /// Predicted birth date (YYYY-MM-DD)
    pub fecha_nacimiento: String,
    /// Predicted birth time (HH:MM)
    pub hora_nacimiento: String,
    /// Predicted weight in kilograms
    pub peso: String,
    /// Predicted length in centimeters
    pub longitud: String,
    pub tipo_parto: DeliveryType,
    /// Free-form room identifier
    pub numero_habitacion: String,
    /// Server-assigned creation time (RFC 3339)
    pub fecha_creacion: String,
}

/// Type of delivery predicted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeliveryType {
    #[default]
    Natural,
    #[serde(rename = "Cesárea")]
    Cesarea,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::Natural => "Natural",
            DeliveryType::Cesarea => "Cesárea",
        }
    }

    /// The other delivery type, used by the form toggle
    pub fn toggle(self) -> Self {
        match self {
            DeliveryType::Natural => DeliveryType::Cesarea,
            DeliveryType::Cesarea => DeliveryType::Natural,
        }
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryType {
    type Err = DeliveryTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Natural" => Ok(DeliveryType::Natural),
            "Cesárea" => Ok(DeliveryType::Cesarea),
            _ => Err(DeliveryTypeError::Unknown(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryTypeError {
    Unknown(String),
}

impl fmt::Display for DeliveryTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryTypeError::Unknown(value) => write!(f, "Unknown delivery type: {}", value),
        }
    }
}

impl std::error::Error for DeliveryTypeError {}

/// A submitted form value. Browsers send strings, but API clients may send
/// plain JSON numbers for `peso` and `longitud`, or booleans anywhere; any
/// present scalar counts as filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
}

impl FieldValue {
    /// Textual form of the value; numbers use their shortest decimal representation
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(number) => number.to_string(),
            FieldValue::Flag(flag) => flag.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

/// Body of `POST /api/prode`. Every field is optional at this level so the
/// server can report exactly which ones are missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePredictionRequest {
    pub nombre: Option<FieldValue>,
    pub fecha_nacimiento: Option<FieldValue>,
    pub hora_nacimiento: Option<FieldValue>,
    pub peso: Option<FieldValue>,
    pub longitud: Option<FieldValue>,
    pub tipo_parto: Option<FieldValue>,
    pub numero_habitacion: Option<FieldValue>,
}

/// Query string of `DELETE /api/prode?id=...`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeletePredictionQuery {
    pub id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePredictionResponse {
    pub success: bool,
}

/// Error body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            missing: None,
            invalid: None,
        }
    }

    /// Message suitable for showing to the user, listing offending fields if any
    pub fn user_message(&self) -> String {
        let fields = self
            .missing
            .as_ref()
            .or(self.invalid.as_ref())
            .filter(|fields| !fields.is_empty());
        match fields {
            Some(fields) => format!("{}: {}", self.error, fields.join(", ")),
            None => self.error.clone(),
        }
    }
}

/// A log line forwarded from the browser to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRequest {
    pub level: String,
    pub message: String,
    pub component: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prediction_record_uses_camel_case() {
        let record = PredictionRecord {
            id: "1714572000000".to_string(),
            nombre: "Ana".to_string(),
            fecha_nacimiento: "2024-05-01".to_string(),
            hora_nacimiento: "14:30".to_string(),
            peso: "3.2".to_string(),
            longitud: "49".to_string(),
            tipo_parto: DeliveryType::Cesarea,
            numero_habitacion: "204".to_string(),
            fecha_creacion: "2024-04-01T10:00:00.000Z".to_string(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["fechaNacimiento"], "2024-05-01");
        assert_eq!(value["horaNacimiento"], "14:30");
        assert_eq!(value["tipoParto"], "Cesárea");
        assert_eq!(value["numeroHabitacion"], "204");
        assert_eq!(value["fechaCreacion"], "2024-04-01T10:00:00.000Z");
    }

    #[test]
    fn test_delivery_type_parsing() {
        assert_eq!("Natural".parse::<DeliveryType>().unwrap(), DeliveryType::Natural);
        assert_eq!("Cesárea".parse::<DeliveryType>().unwrap(), DeliveryType::Cesarea);
        assert!("cesarea".parse::<DeliveryType>().is_err());
        assert!("".parse::<DeliveryType>().is_err());
    }

    #[test]
    fn test_delivery_type_toggle() {
        assert_eq!(DeliveryType::Natural.toggle(), DeliveryType::Cesarea);
        assert_eq!(DeliveryType::Cesarea.toggle(), DeliveryType::Natural);
    }

    #[test]
    fn test_create_request_accepts_strings_numbers_and_nulls() {
        let request: CreatePredictionRequest = serde_json::from_value(json!({
            "nombre": "Ana",
            "peso": 0,
            "longitud": "49",
            "tipoParto": null
        }))
        .unwrap();

        assert_eq!(request.nombre, Some(FieldValue::Text("Ana".to_string())));
        assert_eq!(request.peso, Some(FieldValue::Number(0.0)));
        assert_eq!(request.longitud, Some(FieldValue::Text("49".to_string())));
        assert_eq!(request.tipo_parto, None);
        assert_eq!(request.fecha_nacimiento, None);
    }

    #[test]
    fn test_create_request_accepts_boolean_values() {
        let request: CreatePredictionRequest = serde_json::from_value(json!({
            "nombre": true,
            "numeroHabitacion": false
        }))
        .unwrap();

        assert_eq!(request.nombre, Some(FieldValue::Flag(true)));
        assert_eq!(request.numero_habitacion, Some(FieldValue::Flag(false)));
        assert_eq!(request.peso, None);
    }

    #[test]
    fn test_field_value_to_text() {
        assert_eq!(FieldValue::Number(0.0).to_text(), "0");
        assert_eq!(FieldValue::Number(49.0).to_text(), "49");
        assert_eq!(FieldValue::Number(3.2).to_text(), "3.2");
        assert_eq!(FieldValue::from(" 204 ").to_text(), " 204 ");
        assert_eq!(FieldValue::Flag(true).to_text(), "true");
    }

    #[test]
    fn test_error_response_user_message() {
        let plain = ErrorResponse::new("Error al guardar los datos");
        assert_eq!(plain.user_message(), "Error al guardar los datos");

        let missing = ErrorResponse {
            error: "Faltan campos requeridos".to_string(),
            missing: Some(vec!["peso".to_string(), "longitud".to_string()]),
            invalid: None,
        };
        assert_eq!(missing.user_message(), "Faltan campos requeridos: peso, longitud");

        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("missing").is_none());
        assert!(json.get("invalid").is_none());
    }
}
