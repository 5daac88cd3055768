use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{
    Appointment, AppointmentStatus, Doctor, NewAppointment, NewDoctor, NewPatient, Patient,
};

/// The three record tables and their id counters.
///
/// Ids are handed out per table, strictly increasing, and never reused:
/// deleting a row does not free its id and the counters never reset.
#[derive(Debug)]
struct Tables {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    next_patient: i64,
    next_doctor: i64,
    next_appointment: i64,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            patients: Vec::new(),
            doctors: Vec::new(),
            appointments: Vec::new(),
            next_patient: 1,
            next_doctor: 1,
            next_appointment: 1,
        }
    }
}

/// In-memory record store for patients, doctors, and the appointments
/// linking them.
///
/// Every operation takes the single store-wide lock for its full duration,
/// so callers only ever observe complete, post-operation states. Lookup
/// failures (an id that does not exist) are reported as plain values
/// (`false` / `None`); `Err` is reserved for a poisoned lock.
#[derive(Debug, Default)]
pub struct Hospital {
    inner: Mutex<Tables>,
}

impl Hospital {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>> {
        self.inner
            .lock()
            .map_err(|_| AppError::Store("record tables lock poisoned".to_string()))
    }

    // Patient operations

    pub fn add_patient(&self, patient: NewPatient) -> Result<i64> {
        let mut tables = self.tables()?;
        let id = tables.next_patient;
        tables.next_patient += 1;
        tables.patients.push(Patient {
            id,
            name: patient.name,
            age: patient.age,
            gender: patient.gender,
            address: patient.address,
            phone: patient.phone,
        });
        Ok(id)
    }

    pub fn update_patient(&self, id: i64, patient: NewPatient) -> Result<bool> {
        let mut tables = self.tables()?;
        let Some(row) = tables.patients.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        row.name = patient.name;
        row.age = patient.age;
        row.gender = patient.gender;
        row.address = patient.address;
        row.phone = patient.phone;
        Ok(true)
    }

    /// Removes the patient and hard-deletes every appointment referencing
    /// it, regardless of status. Doctor deletion cascades differently; see
    /// [`Hospital::delete_doctor`].
    pub fn delete_patient(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables()?;
        let before = tables.patients.len();
        tables.patients.retain(|p| p.id != id);
        if tables.patients.len() == before {
            return Ok(false);
        }
        tables.appointments.retain(|a| a.patient_id != id);
        Ok(true)
    }

    pub fn list_patients(&self) -> Result<Vec<Patient>> {
        Ok(self.tables()?.patients.clone())
    }

    /// Matches on a case-insensitive substring of the name, or on the exact
    /// decimal form of the id (`"1"` matches id 1, never id 10). The empty
    /// term matches every row. Table order is preserved.
    pub fn search_patients(&self, term: &str) -> Result<Vec<Patient>> {
        let needle = term.to_ascii_lowercase();
        let tables = self.tables()?;
        Ok(tables
            .patients
            .iter()
            .filter(|p| p.name.to_ascii_lowercase().contains(&needle) || p.id.to_string() == term)
            .cloned()
            .collect())
    }

    // Doctor operations

    pub fn add_doctor(&self, doctor: NewDoctor) -> Result<i64> {
        let mut tables = self.tables()?;
        let id = tables.next_doctor;
        tables.next_doctor += 1;
        tables.doctors.push(Doctor {
            id,
            name: doctor.name,
            age: doctor.age,
            gender: doctor.gender,
            specialization: doctor.specialization,
        });
        Ok(id)
    }

    /// Removes the doctor; appointments referencing it stay in the table
    /// but are forced to `Cancelled`, preserving the visit history.
    pub fn delete_doctor(&self, id: i64) -> Result<bool> {
        let mut tables = self.tables()?;
        let before = tables.doctors.len();
        tables.doctors.retain(|d| d.id != id);
        if tables.doctors.len() == before {
            return Ok(false);
        }
        for appointment in tables.appointments.iter_mut() {
            if appointment.doctor_id == id {
                appointment.status = AppointmentStatus::Cancelled;
            }
        }
        Ok(true)
    }

    pub fn list_doctors(&self) -> Result<Vec<Doctor>> {
        Ok(self.tables()?.doctors.clone())
    }

    /// Like [`Hospital::search_patients`], with the specialization text
    /// searched alongside the name.
    pub fn search_doctors(&self, term: &str) -> Result<Vec<Doctor>> {
        let needle = term.to_ascii_lowercase();
        let tables = self.tables()?;
        Ok(tables
            .doctors
            .iter()
            .filter(|d| {
                d.name.to_ascii_lowercase().contains(&needle)
                    || d.specialization.to_ascii_lowercase().contains(&needle)
                    || d.id.to_string() == term
            })
            .cloned()
            .collect())
    }

    // Appointment operations

    /// Returns `Ok(None)` when either referenced id does not currently
    /// exist; no row is created. The reference is only checked here — a
    /// later doctor deletion cancels the appointment instead of removing it.
    pub fn create_appointment(&self, appointment: NewAppointment) -> Result<Option<i64>> {
        let mut tables = self.tables()?;
        if !tables.patients.iter().any(|p| p.id == appointment.patient_id)
            || !tables.doctors.iter().any(|d| d.id == appointment.doctor_id)
        {
            return Ok(None);
        }
        let id = tables.next_appointment;
        tables.next_appointment += 1;
        tables.appointments.push(Appointment {
            id,
            patient_id: appointment.patient_id,
            doctor_id: appointment.doctor_id,
            datetime: appointment.datetime,
            reason: appointment.reason,
            status: AppointmentStatus::Scheduled,
        });
        Ok(Some(id))
    }

    /// Unconditional status set; already-cancelled and done appointments
    /// are re-marked without complaint.
    pub fn cancel_appointment(&self, id: i64) -> Result<bool> {
        self.set_status(id, AppointmentStatus::Cancelled)
    }

    /// Unconditional as well — even a cancelled appointment can be marked
    /// done.
    pub fn mark_appointment_done(&self, id: i64) -> Result<bool> {
        self.set_status(id, AppointmentStatus::Done)
    }

    fn set_status(&self, id: i64, status: AppointmentStatus) -> Result<bool> {
        let mut tables = self.tables()?;
        let Some(row) = tables.appointments.iter_mut().find(|a| a.id == id) else {
            return Ok(false);
        };
        row.status = status;
        Ok(true)
    }

    pub fn list_appointments(&self) -> Result<Vec<Appointment>> {
        Ok(self.tables()?.appointments.clone())
    }

    // Stats

    /// Counts are computed by a full scan at call time, not maintained
    /// incrementally.
    pub fn stats(&self) -> Result<Stats> {
        let tables = self.tables()?;
        let mut stats = Stats {
            patients: tables.patients.len(),
            doctors: tables.doctors.len(),
            appointments: tables.appointments.len(),
            scheduled: 0,
            done: 0,
            cancelled: 0,
        };
        for appointment in &tables.appointments {
            match appointment.status {
                AppointmentStatus::Scheduled => stats.scheduled += 1,
                AppointmentStatus::Done => stats.done += 1,
                AppointmentStatus::Cancelled => stats.cancelled += 1,
            }
        }
        Ok(stats)
    }
}

/// Aggregate counts over the whole store. Field order is the wire order of
/// the stats JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub patients: usize,
    pub doctors: usize,
    pub appointments: usize,
    pub scheduled: usize,
    pub done: usize,
    pub cancelled: usize,
}
