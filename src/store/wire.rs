//! Flat text wire format for query results.
//!
//! List and search results travel as pipe-delimited fields, one `\n`-
//! terminated row per record, in table order. Free-text fields are written
//! verbatim — an embedded `|` is not escaped. Stats travel as a single flat
//! JSON object with integer fields.

use std::fmt::Display;

use crate::error::Result;
use crate::store::Stats;

/// Renders a result set as flat multi-row text. An empty slice renders as
/// the empty string.
pub fn rows<T: Display>(items: &[T]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(&item.to_string());
        out.push('\n');
    }
    out
}

pub fn stats_json(stats: &Stats) -> Result<String> {
    Ok(serde_json::to_string(stats)?)
}

/// Splits one wire row into its fields, requiring at least `min_fields`.
/// Blank lines and short rows yield `None`.
pub fn split_row(line: &str, min_fields: usize) -> Option<Vec<&str>> {
    if line.trim().is_empty() {
        return None;
    }
    let fields: Vec<&str> = line.split('|').collect();
    if fields.len() < min_fields {
        return None;
    }
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, AppointmentStatus, Doctor, Patient};

    #[test]
    fn patient_rows_render_in_field_order() {
        let patients = vec![
            Patient {
                id: 1,
                name: "Alice".to_string(),
                age: 30,
                gender: "F".to_string(),
                address: "1 Rd".to_string(),
                phone: "555".to_string(),
            },
            Patient {
                id: 2,
                name: "Beth".to_string(),
                age: 44,
                gender: "F".to_string(),
                address: "2 Ave".to_string(),
                phone: "556".to_string(),
            },
        ];
        assert_eq!(rows(&patients), "1|Alice|30|F|1 Rd|555\n2|Beth|44|F|2 Ave|556\n");
    }

    #[test]
    fn doctor_row_has_five_fields() {
        let doctors = vec![Doctor {
            id: 1,
            name: "Bob".to_string(),
            age: 40,
            gender: "M".to_string(),
            specialization: "Cardiology".to_string(),
        }];
        assert_eq!(rows(&doctors), "1|Bob|40|M|Cardiology\n");
    }

    #[test]
    fn appointment_row_ends_with_status_text() {
        let appointments = vec![Appointment {
            id: 3,
            patient_id: 1,
            doctor_id: 2,
            datetime: "2024-01-01T10:00".to_string(),
            reason: "checkup".to_string(),
            status: AppointmentStatus::Cancelled,
        }];
        assert_eq!(rows(&appointments), "3|1|2|2024-01-01T10:00|checkup|cancelled\n");
    }

    #[test]
    fn empty_result_renders_as_empty_string() {
        let none: Vec<Patient> = Vec::new();
        assert_eq!(rows(&none), "");
    }

    #[test]
    fn embedded_delimiters_are_not_escaped() {
        let patients = vec![Patient {
            id: 1,
            name: "A|B".to_string(),
            age: 30,
            gender: "F".to_string(),
            address: "1 Rd".to_string(),
            phone: "555".to_string(),
        }];
        assert_eq!(rows(&patients), "1|A|B|30|F|1 Rd|555\n");
    }

    #[test]
    fn stats_json_keeps_the_wire_key_order() {
        let stats = Stats {
            patients: 1,
            doctors: 1,
            appointments: 1,
            scheduled: 0,
            done: 1,
            cancelled: 0,
        };
        assert_eq!(
            stats_json(&stats).unwrap(),
            r#"{"patients":1,"doctors":1,"appointments":1,"scheduled":0,"done":1,"cancelled":0}"#
        );
    }

    #[test]
    fn split_row_enforces_a_minimum_field_count() {
        assert_eq!(
            split_row("1|Alice|30|F|1 Rd|555", 6),
            Some(vec!["1", "Alice", "30", "F", "1 Rd", "555"])
        );
        assert_eq!(split_row("1|Alice", 6), None);
        assert_eq!(split_row("   ", 6), None);
    }
}
