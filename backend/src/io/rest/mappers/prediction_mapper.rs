use shared::{CreatePredictionRequest, ErrorResponse, FieldValue, PredictionRecord};

use crate::domain::commands::predictions::CreatePredictionCommand;
use crate::domain::models::prediction::{DomainPrediction, PredictionError, RequiredField};

pub const MISSING_FIELDS_MESSAGE: &str = "Faltan campos requeridos";
pub const INVALID_FIELDS_MESSAGE: &str = "Campos inválidos";

pub struct PredictionMapper;

impl PredictionMapper {
    /// Convert domain DomainPrediction to shared PredictionRecord DTO
    pub fn to_dto(domain: DomainPrediction) -> PredictionRecord {
        PredictionRecord {
            id: domain.id,
            nombre: domain.nombre,
            fecha_nacimiento: domain.fecha_nacimiento,
            hora_nacimiento: domain.hora_nacimiento,
            peso: domain.peso,
            longitud: domain.longitud,
            tipo_parto: domain.tipo_parto,
            numero_habitacion: domain.numero_habitacion,
            fecha_creacion: domain.created_at,
        }
    }

    pub fn to_dto_list(domain_predictions: Vec<DomainPrediction>) -> Vec<PredictionRecord> {
        domain_predictions.into_iter().map(Self::to_dto).collect()
    }

    /// Flatten the wire request into text fields; numbers become their decimal text
    pub fn to_create_command(request: CreatePredictionRequest) -> CreatePredictionCommand {
        let text = |value: Option<FieldValue>| value.map(|v| v.to_text());
        CreatePredictionCommand {
            nombre: text(request.nombre),
            fecha_nacimiento: text(request.fecha_nacimiento),
            hora_nacimiento: text(request.hora_nacimiento),
            peso: text(request.peso),
            longitud: text(request.longitud),
            tipo_parto: text(request.tipo_parto),
            numero_habitacion: text(request.numero_habitacion),
        }
    }

    /// Error body for a failed create. Storage detail never reaches the client;
    /// `storage_message` is shown instead.
    pub fn to_error_response(error: &PredictionError, storage_message: &str) -> ErrorResponse {
        let keys = |fields: &[RequiredField]| {
            fields.iter().map(|f| f.key().to_string()).collect::<Vec<_>>()
        };
        match error {
            PredictionError::MissingFields(fields) => ErrorResponse {
                missing: Some(keys(fields)),
                ..ErrorResponse::new(MISSING_FIELDS_MESSAGE)
            },
            PredictionError::InvalidFields(fields) => ErrorResponse {
                invalid: Some(keys(fields)),
                ..ErrorResponse::new(INVALID_FIELDS_MESSAGE)
            },
            PredictionError::Storage(_) => ErrorResponse::new(storage_message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::DeliveryType;

    #[test]
    fn test_to_dto_renames_creation_time() {
        let domain = DomainPrediction {
            id: "1714573800123".to_string(),
            nombre: "Ana".to_string(),
            fecha_nacimiento: "2024-05-01".to_string(),
            hora_nacimiento: "14:30".to_string(),
            peso: "3.2".to_string(),
            longitud: "49".to_string(),
            tipo_parto: DeliveryType::Natural,
            numero_habitacion: "204".to_string(),
            created_at: "2024-04-01T10:00:00.000Z".to_string(),
        };

        let dto = PredictionMapper::to_dto(domain);
        assert_eq!(dto.fecha_creacion, "2024-04-01T10:00:00.000Z");
        assert_eq!(dto.id, "1714573800123");
    }

    #[test]
    fn test_to_create_command_converts_numbers_to_text() {
        let request = CreatePredictionRequest {
            nombre: Some("Ana".into()),
            peso: Some(FieldValue::Number(0.0)),
            longitud: Some(FieldValue::Number(49.0)),
            hora_nacimiento: Some(FieldValue::Number(3.25)),
            ..Default::default()
        };

        let command = PredictionMapper::to_create_command(request);
        assert_eq!(command.nombre.as_deref(), Some("Ana"));
        assert_eq!(command.peso.as_deref(), Some("0"));
        assert_eq!(command.longitud.as_deref(), Some("49"));
        assert_eq!(command.hora_nacimiento.as_deref(), Some("3.25"));
        assert_eq!(command.tipo_parto, None);
    }

    #[test]
    fn test_error_responses() {
        let missing = PredictionMapper::to_error_response(
            &PredictionError::MissingFields(vec![RequiredField::Peso, RequiredField::TipoParto]),
            "Error al guardar los datos",
        );
        assert_eq!(missing.error, MISSING_FIELDS_MESSAGE);
        assert_eq!(missing.missing, Some(vec!["peso".to_string(), "tipoParto".to_string()]));
        assert_eq!(missing.invalid, None);

        let invalid = PredictionMapper::to_error_response(
            &PredictionError::InvalidFields(vec![RequiredField::FechaNacimiento]),
            "Error al guardar los datos",
        );
        assert_eq!(invalid.error, INVALID_FIELDS_MESSAGE);
        assert_eq!(invalid.invalid, Some(vec!["fechaNacimiento".to_string()]));

        let storage = PredictionMapper::to_error_response(
            &PredictionError::Storage(anyhow::anyhow!("permission denied: /data/prode.json")),
            "Error al guardar los datos",
        );
        assert_eq!(storage, ErrorResponse::new("Error al guardar los datos"));
    }
}
