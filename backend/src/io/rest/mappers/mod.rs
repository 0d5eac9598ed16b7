pub mod prediction_mapper;
