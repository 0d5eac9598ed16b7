pub mod connection;
pub mod prediction_repository;

pub use connection::JsonConnection;
pub use prediction_repository::PredictionRepository;
