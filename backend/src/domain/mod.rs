//! # Domain Module
//!
//! Business rules for birth predictions: what a valid submission looks like
//! and how the service turns requests into storage calls. Nothing here knows
//! about HTTP or about which storage backend is in use.

pub mod commands;
pub mod models;
pub mod prediction_service;
pub mod validation;

pub use commands::*;
pub use prediction_service::PredictionService;
