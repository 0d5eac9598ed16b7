pub mod connection;
pub mod prediction_repository;

pub use connection::{Dialect, TableConnection};
pub use prediction_repository::PredictionRepository;
