//! Validation of submitted predictions.
//!
//! Presence is checked first and reported on its own; shape checks only run
//! once every required field has a value.

use chrono::{NaiveDate, NaiveTime};
use shared::DeliveryType;

use crate::domain::commands::predictions::CreatePredictionCommand;
use crate::domain::models::prediction::{NewPrediction, PredictionError, RequiredField};

/// Absent, or text that trims to nothing. `"0"` is not blank.
pub fn is_blank(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(text) => text.trim().is_empty(),
    }
}

fn field_value(command: &CreatePredictionCommand, field: RequiredField) -> Option<&str> {
    let value = match field {
        RequiredField::Nombre => &command.nombre,
        RequiredField::FechaNacimiento => &command.fecha_nacimiento,
        RequiredField::HoraNacimiento => &command.hora_nacimiento,
        RequiredField::Peso => &command.peso,
        RequiredField::Longitud => &command.longitud,
        RequiredField::TipoParto => &command.tipo_parto,
        RequiredField::NumeroHabitacion => &command.numero_habitacion,
    };
    value.as_deref()
}

/// Required fields whose value is blank, in reporting order
pub fn missing_fields(command: &CreatePredictionCommand) -> Vec<RequiredField> {
    RequiredField::ALL
        .iter()
        .copied()
        .filter(|field| is_blank(field_value(command, *field)))
        .collect()
}

fn is_valid_value(field: RequiredField, value: &str) -> bool {
    match field {
        RequiredField::FechaNacimiento => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
        RequiredField::HoraNacimiento => {
            NaiveTime::parse_from_str(value, "%H:%M").is_ok()
                || NaiveTime::parse_from_str(value, "%H:%M:%S").is_ok()
        }
        RequiredField::Peso | RequiredField::Longitud => parse_measurement(value).is_some(),
        RequiredField::TipoParto => value.parse::<DeliveryType>().is_ok(),
        RequiredField::Nombre | RequiredField::NumeroHabitacion => true,
    }
}

/// A finite, non-negative decimal
pub fn parse_measurement(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite() && *number >= 0.0)
}

/// Present fields whose value has the wrong shape
pub fn invalid_fields(command: &CreatePredictionCommand) -> Vec<RequiredField> {
    RequiredField::ALL
        .iter()
        .copied()
        .filter(|field| match field_value(command, *field) {
            Some(value) if !is_blank(Some(value)) => !is_valid_value(*field, value.trim()),
            _ => false,
        })
        .collect()
}

/// Check a submission and turn it into the fields to persist
pub fn validate_submission(
    command: CreatePredictionCommand,
) -> Result<NewPrediction, PredictionError> {
    let missing = missing_fields(&command);
    if !missing.is_empty() {
        return Err(PredictionError::MissingFields(missing));
    }

    let invalid = invalid_fields(&command);
    if !invalid.is_empty() {
        return Err(PredictionError::InvalidFields(invalid));
    }

    let text = |value: Option<String>| value.unwrap_or_default().trim().to_string();
    let tipo_parto = text(command.tipo_parto)
        .parse::<DeliveryType>()
        .map_err(|_| PredictionError::InvalidFields(vec![RequiredField::TipoParto]))?;

    Ok(NewPrediction {
        nombre: text(command.nombre),
        fecha_nacimiento: text(command.fecha_nacimiento),
        hora_nacimiento: text(command.hora_nacimiento),
        peso: text(command.peso),
        longitud: text(command.longitud),
        tipo_parto,
        numero_habitacion: text(command.numero_habitacion),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_command() -> CreatePredictionCommand {
        CreatePredictionCommand {
            nombre: Some("Ana".to_string()),
            fecha_nacimiento: Some("2024-05-01".to_string()),
            hora_nacimiento: Some("14:30".to_string()),
            peso: Some("3.2".to_string()),
            longitud: Some("49".to_string()),
            tipo_parto: Some("Natural".to_string()),
            numero_habitacion: Some("204".to_string()),
        }
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   \t")));
        assert!(!is_blank(Some("0")));
        assert!(!is_blank(Some(" a ")));
    }

    #[test]
    fn test_complete_command_has_no_missing_fields() {
        assert!(missing_fields(&complete_command()).is_empty());
        assert!(invalid_fields(&complete_command()).is_empty());
    }

    #[test]
    fn test_each_single_missing_field_is_reported_alone() {
        for field in RequiredField::ALL {
            let mut command = complete_command();
            match field {
                RequiredField::Nombre => command.nombre = None,
                RequiredField::FechaNacimiento => command.fecha_nacimiento = Some(String::new()),
                RequiredField::HoraNacimiento => command.hora_nacimiento = None,
                RequiredField::Peso => command.peso = Some("  ".to_string()),
                RequiredField::Longitud => command.longitud = None,
                RequiredField::TipoParto => command.tipo_parto = None,
                RequiredField::NumeroHabitacion => command.numero_habitacion = Some(String::new()),
            }
            assert_eq!(missing_fields(&command), vec![field]);
        }
    }

    #[test]
    fn test_missing_fields_keep_reporting_order() {
        let command = CreatePredictionCommand {
            nombre: Some("Ana".to_string()),
            ..Default::default()
        };
        let keys: Vec<&str> = missing_fields(&command).iter().map(|f| f.key()).collect();
        assert_eq!(
            keys,
            vec![
                "fechaNacimiento",
                "horaNacimiento",
                "peso",
                "longitud",
                "tipoParto",
                "numeroHabitacion",
            ]
        );
    }

    #[test]
    fn test_zero_measurements_are_present_and_valid() {
        let mut command = complete_command();
        command.peso = Some("0".to_string());
        command.longitud = Some("0".to_string());
        let new_prediction = validate_submission(command).unwrap();
        assert_eq!(new_prediction.peso, "0");
        assert_eq!(new_prediction.longitud, "0");
    }

    #[test]
    fn test_invalid_shapes() {
        let mut command = complete_command();
        command.fecha_nacimiento = Some("01/05/2024".to_string());
        command.hora_nacimiento = Some("25:00".to_string());
        command.peso = Some("-1".to_string());
        command.longitud = Some("NaN".to_string());
        command.tipo_parto = Some("Cesarea".to_string());

        match validate_submission(command) {
            Err(PredictionError::InvalidFields(fields)) => assert_eq!(
                fields,
                vec![
                    RequiredField::FechaNacimiento,
                    RequiredField::HoraNacimiento,
                    RequiredField::Peso,
                    RequiredField::Longitud,
                    RequiredField::TipoParto,
                ]
            ),
            other => panic!("expected invalid fields, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_takes_precedence_over_invalid() {
        let mut command = complete_command();
        command.peso = None;
        command.longitud = Some("abc".to_string());
        match validate_submission(command) {
            Err(PredictionError::MissingFields(fields)) => {
                assert_eq!(fields, vec![RequiredField::Peso])
            }
            other => panic!("expected missing fields, got {:?}", other),
        }
    }

    #[test]
    fn test_values_are_trimmed_and_seconds_accepted() {
        let mut command = complete_command();
        command.nombre = Some("  Ana  ".to_string());
        command.hora_nacimiento = Some("14:30:00".to_string());
        command.tipo_parto = Some("Cesárea".to_string());

        let new_prediction = validate_submission(command).unwrap();
        assert_eq!(new_prediction.nombre, "Ana");
        assert_eq!(new_prediction.hora_nacimiento, "14:30:00");
        assert_eq!(new_prediction.tipo_parto, DeliveryType::Cesarea);
    }
}
