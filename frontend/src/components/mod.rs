pub mod header;
pub mod pagination_controls;
pub mod prediction_form;
pub mod prediction_table;
