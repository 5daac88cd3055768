use std::path::Path;

use crate::command::{Command, HELP};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{NewAppointment, NewDoctor, NewPatient};
use crate::store::{wire, Hospital};

/// Interactive host around the record store: dispatches parsed commands,
/// prints wire-format results, and keeps the snapshot file up to date.
pub struct App {
    pub store: Hospital,
    config: Config,
}

impl App {
    /// Builds the store and restores the configured snapshot if one exists.
    pub fn new(config: Config) -> Result<Self> {
        let app = Self {
            store: Hospital::new(),
            config,
        };
        let snapshot = Path::new(&app.config.snapshot_path).to_path_buf();
        if snapshot.exists() {
            let (patients, doctors, appointments) = app.import_snapshot(&snapshot)?;
            tracing::info!(
                "restored {} patients, {} doctors, {} appointments",
                patients,
                doctors,
                appointments
            );
        }
        Ok(app)
    }

    /// Handles one command. Returns `true` when the host should quit.
    pub fn handle_command(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Quit => return Ok(true),
            Command::Help => println!("{}", HELP),

            Command::AddPatient(patient) => {
                let id = self.store.add_patient(patient)?;
                println!("added patient {}", id);
                self.autosave();
            }
            Command::UpdatePatient { id, patient } => {
                if self.store.update_patient(id, patient)? {
                    println!("updated patient {}", id);
                    self.autosave();
                } else {
                    println!("no patient with id {}", id);
                }
            }
            Command::DeletePatient(id) => {
                if self.store.delete_patient(id)? {
                    println!("deleted patient {}", id);
                    self.autosave();
                } else {
                    println!("no patient with id {}", id);
                }
            }
            Command::ListPatients => print!("{}", wire::rows(&self.store.list_patients()?)),
            Command::SearchPatients(term) => {
                print!("{}", wire::rows(&self.store.search_patients(&term)?))
            }

            Command::AddDoctor(doctor) => {
                let id = self.store.add_doctor(doctor)?;
                println!("added doctor {}", id);
                self.autosave();
            }
            Command::DeleteDoctor(id) => {
                if self.store.delete_doctor(id)? {
                    println!("deleted doctor {}", id);
                    self.autosave();
                } else {
                    println!("no doctor with id {}", id);
                }
            }
            Command::ListDoctors => print!("{}", wire::rows(&self.store.list_doctors()?)),
            Command::SearchDoctors(term) => {
                print!("{}", wire::rows(&self.store.search_doctors(&term)?))
            }

            Command::CreateAppointment(appointment) => {
                match self.store.create_appointment(appointment)? {
                    Some(id) => {
                        println!("created appointment {}", id);
                        self.autosave();
                    }
                    None => println!("no such patient or doctor"),
                }
            }
            Command::CancelAppointment(id) => {
                if self.store.cancel_appointment(id)? {
                    println!("cancelled appointment {}", id);
                    self.autosave();
                } else {
                    println!("no appointment with id {}", id);
                }
            }
            Command::DoneAppointment(id) => {
                if self.store.mark_appointment_done(id)? {
                    println!("appointment {} done", id);
                    self.autosave();
                } else {
                    println!("no appointment with id {}", id);
                }
            }
            Command::ListAppointments => {
                print!("{}", wire::rows(&self.store.list_appointments()?))
            }

            Command::Stats => println!("{}", wire::stats_json(&self.store.stats()?)?),

            Command::Save => {
                self.save_snapshot()?;
                println!("saved {}", self.config.snapshot_path);
            }
            Command::Load => {
                let path = Path::new(&self.config.snapshot_path).to_path_buf();
                if path.exists() {
                    let (patients, doctors, appointments) = self.import_snapshot(&path)?;
                    println!(
                        "loaded {} patients, {} doctors, {} appointments",
                        patients, doctors, appointments
                    );
                } else {
                    println!("no snapshot at {}", self.config.snapshot_path);
                }
            }
        }
        Ok(false)
    }

    fn autosave(&self) {
        if !self.config.autosave {
            return;
        }
        if let Err(e) = self.save_snapshot() {
            tracing::warn!("autosave failed: {}", e);
        }
    }

    /// Writes the whole store as one snapshot file: a `[section]` header
    /// per table, then that table's wire rows.
    pub fn save_snapshot(&self) -> Result<()> {
        let mut out = String::from("[patients]\n");
        out.push_str(&wire::rows(&self.store.list_patients()?));
        out.push_str("[doctors]\n");
        out.push_str(&wire::rows(&self.store.list_doctors()?));
        out.push_str("[appointments]\n");
        out.push_str(&wire::rows(&self.store.list_appointments()?));
        std::fs::write(&self.config.snapshot_path, out)?;
        Ok(())
    }

    /// Replays a snapshot file through the normal add/create calls, exactly
    /// like an operator re-keying the rows: ids are reassigned in row
    /// order, appointments restart as scheduled, and rows whose referenced
    /// patient or doctor is gone are dropped. Returns how many rows of each
    /// kind were added.
    pub fn import_snapshot(&self, path: &Path) -> Result<(usize, usize, usize)> {
        let content = std::fs::read_to_string(path)?;
        let mut section = Section::None;
        let mut counts = (0usize, 0usize, 0usize);

        for line in content.lines() {
            match line.trim() {
                "[patients]" => {
                    section = Section::Patients;
                    continue;
                }
                "[doctors]" => {
                    section = Section::Doctors;
                    continue;
                }
                "[appointments]" => {
                    section = Section::Appointments;
                    continue;
                }
                trimmed if trimmed.starts_with('[') => {
                    return Err(AppError::Snapshot(format!(
                        "unknown section header {}",
                        trimmed
                    )));
                }
                _ => {}
            }

            match section {
                Section::None => {
                    if !line.trim().is_empty() {
                        tracing::warn!("row before any section header, skipped: {}", line);
                    }
                }
                Section::Patients => {
                    let Some(fields) = wire::split_row(line, 6) else {
                        warn_skipped(line);
                        continue;
                    };
                    self.store.add_patient(NewPatient {
                        name: fields[1].to_string(),
                        age: fields[2].trim().parse().unwrap_or(0),
                        gender: fields[3].to_string(),
                        address: fields[4].to_string(),
                        phone: fields[5].to_string(),
                    })?;
                    counts.0 += 1;
                }
                Section::Doctors => {
                    let Some(fields) = wire::split_row(line, 5) else {
                        warn_skipped(line);
                        continue;
                    };
                    self.store.add_doctor(NewDoctor {
                        name: fields[1].to_string(),
                        age: fields[2].trim().parse().unwrap_or(0),
                        gender: fields[3].to_string(),
                        specialization: fields[4].to_string(),
                    })?;
                    counts.1 += 1;
                }
                Section::Appointments => {
                    let Some(fields) = wire::split_row(line, 6) else {
                        warn_skipped(line);
                        continue;
                    };
                    let (Ok(patient_id), Ok(doctor_id)) = (
                        fields[1].trim().parse::<i64>(),
                        fields[2].trim().parse::<i64>(),
                    ) else {
                        warn_skipped(line);
                        continue;
                    };
                    let created = self.store.create_appointment(NewAppointment {
                        patient_id,
                        doctor_id,
                        datetime: fields[3].to_string(),
                        reason: fields[4].to_string(),
                    })?;
                    if created.is_some() {
                        counts.2 += 1;
                    } else {
                        tracing::warn!(
                            "appointment references a missing record, skipped: {}",
                            line
                        );
                    }
                }
            }
        }
        Ok(counts)
    }

    pub fn snapshot_path(&self) -> &str {
        &self.config.snapshot_path
    }
}

enum Section {
    None,
    Patients,
    Doctors,
    Appointments,
}

fn warn_skipped(line: &str) {
    tracing::warn!("unparseable row skipped: {}", line);
}
