mod appointment;
mod doctor;
mod patient;

pub use appointment::{Appointment, AppointmentStatus, NewAppointment};
pub use doctor::{Doctor, NewDoctor};
pub use patient::{NewPatient, Patient};
