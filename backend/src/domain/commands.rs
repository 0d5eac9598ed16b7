//! Domain-level command and result types.
//! The REST layer maps the public DTOs from the `shared` crate onto these.

pub mod predictions {
    use crate::domain::models::prediction::DomainPrediction;

    /// Input for creating a prediction: the submitted fields as text, any of
    /// which may be absent until validation says otherwise.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct CreatePredictionCommand {
        pub nombre: Option<String>,
        pub fecha_nacimiento: Option<String>,
        pub hora_nacimiento: Option<String>,
        pub peso: Option<String>,
        pub longitud: Option<String>,
        pub tipo_parto: Option<String>,
        pub numero_habitacion: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct CreatePredictionResult {
        pub prediction: DomainPrediction,
    }

    #[derive(Debug, Clone)]
    pub struct DeletePredictionCommand {
        pub id: String,
    }

    /// Result of deleting a prediction. Deleting an unknown id still succeeds,
    /// with `removed` set to false.
    #[derive(Debug, Clone)]
    pub struct DeletePredictionResult {
        pub removed: bool,
    }
}
