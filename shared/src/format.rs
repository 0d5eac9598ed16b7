//! Display helpers for the predictions table.

use chrono::{Datelike, NaiveDate};

/// Render a `YYYY-MM-DD` birth date the way it is read in Argentina (`1/5/2024`).
/// Values that are not calendar dates are returned untouched.
pub fn format_birth_date(iso_date: &str) -> String {
    match NaiveDate::parse_from_str(iso_date.trim(), "%Y-%m-%d") {
        Ok(date) => format!("{}/{}/{}", date.day(), date.month(), date.year()),
        Err(_) => iso_date.to_string(),
    }
}

pub fn format_weight(peso: &str) -> String {
    format!("{} kg", peso)
}

pub fn format_length(longitud: &str) -> String {
    format!("{} cm", longitud)
}

/// "1 prode" / "N prodes"
pub fn prediction_count_label(count: usize) -> String {
    if count == 1 {
        "1 prode".to_string()
    } else {
        format!("{} prodes", count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_birth_date() {
        assert_eq!(format_birth_date("2024-05-01"), "1/5/2024");
        assert_eq!(format_birth_date("2025-12-31"), "31/12/2025");
        assert_eq!(format_birth_date("mañana"), "mañana");
    }

    #[test]
    fn test_units_and_labels() {
        assert_eq!(format_weight("3.2"), "3.2 kg");
        assert_eq!(format_length("49"), "49 cm");
        assert_eq!(prediction_count_label(1), "1 prode");
        assert_eq!(prediction_count_label(0), "0 prodes");
        assert_eq!(prediction_count_label(7), "7 prodes");
    }
}
