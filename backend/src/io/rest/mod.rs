//! # REST API Interface Layer
//!
//! HTTP endpoints for the prediction form. Handlers translate between the
//! wire DTOs in `shared` and domain commands, and turn domain errors into
//! status codes with Spanish user-facing messages.

pub mod logging_apis;
pub mod mappers;
pub mod prediction_apis;
