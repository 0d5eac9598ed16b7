use serde::{Deserialize, Serialize};
use shared::DeliveryType;

/// A persisted birth prediction. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainPrediction {
    pub id: String,
    pub nombre: String,
    pub fecha_nacimiento: String,
    pub hora_nacimiento: String,
    /// Weight in kilograms, numeric-formatted text
    pub peso: String,
    /// Length in centimeters, numeric-formatted text
    pub longitud: String,
    pub tipo_parto: DeliveryType,
    pub numero_habitacion: String,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

impl DomainPrediction {
    /// File-backed ids are the creation time in epoch milliseconds
    pub fn generate_id(now_millis: u64) -> String {
        now_millis.to_string()
    }
}

/// The seven user-supplied fields of a prediction, already validated
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrediction {
    pub nombre: String,
    pub fecha_nacimiento: String,
    pub hora_nacimiento: String,
    pub peso: String,
    pub longitud: String,
    pub tipo_parto: DeliveryType,
    pub numero_habitacion: String,
}

impl NewPrediction {
    pub fn into_prediction(self, id: String, created_at: String) -> DomainPrediction {
        DomainPrediction {
            id,
            nombre: self.nombre,
            fecha_nacimiento: self.fecha_nacimiento,
            hora_nacimiento: self.hora_nacimiento,
            peso: self.peso,
            longitud: self.longitud,
            tipo_parto: self.tipo_parto,
            numero_habitacion: self.numero_habitacion,
            created_at,
        }
    }
}

/// A required field of the create form, named by its wire key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredField {
    Nombre,
    FechaNacimiento,
    HoraNacimiento,
    Peso,
    Longitud,
    TipoParto,
    NumeroHabitacion,
}

impl RequiredField {
    /// Every required field, in the order they are reported
    pub const ALL: [RequiredField; 7] = [
        RequiredField::Nombre,
        RequiredField::FechaNacimiento,
        RequiredField::HoraNacimiento,
        RequiredField::Peso,
        RequiredField::Longitud,
        RequiredField::TipoParto,
        RequiredField::NumeroHabitacion,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            RequiredField::Nombre => "nombre",
            RequiredField::FechaNacimiento => "fechaNacimiento",
            RequiredField::HoraNacimiento => "horaNacimiento",
            RequiredField::Peso => "peso",
            RequiredField::Longitud => "longitud",
            RequiredField::TipoParto => "tipoParto",
            RequiredField::NumeroHabitacion => "numeroHabitacion",
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("Missing required fields: {}", join_keys(.0))]
    MissingFields(Vec<RequiredField>),
    #[error("Invalid fields: {}", join_keys(.0))]
    InvalidFields(Vec<RequiredField>),
    #[error("Storage fault: {0:#}")]
    Storage(#[source] anyhow::Error),
}

fn join_keys(fields: &[RequiredField]) -> String {
    fields.iter().map(RequiredField::key).collect::<Vec<_>>().join(", ")
}
