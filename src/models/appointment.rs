use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    /// Opaque text; the store never parses or validates it.
    pub datetime: String,
    pub reason: String,
    pub status: AppointmentStatus,
}

/// Insert payload for an appointment; the store assigns the id and the
/// initial `Scheduled` status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub datetime: String,
    pub reason: String,
}

/// Status is settable from any variant to any other; there is no
/// transition guard (a done appointment can still be cancelled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Done,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Done => "done",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}|{}",
            self.id, self.patient_id, self.doctor_id, self.datetime, self.reason, self.status
        )
    }
}
