pub mod use_predictions;
