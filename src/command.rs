use crate::error::{AppError, Result};
use crate::models::{NewAppointment, NewDoctor, NewPatient};

/// One line of host input, mapped 1:1 onto a store operation.
///
/// Record payloads reuse the wire format: fields separated by `|`, so free
/// text with spaces needs no quoting. Missing trailing fields are treated
/// as empty strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddPatient(NewPatient),
    UpdatePatient { id: i64, patient: NewPatient },
    DeletePatient(i64),
    ListPatients,
    SearchPatients(String),
    AddDoctor(NewDoctor),
    DeleteDoctor(i64),
    ListDoctors,
    SearchDoctors(String),
    CreateAppointment(NewAppointment),
    CancelAppointment(i64),
    DoneAppointment(i64),
    ListAppointments,
    Stats,
    Save,
    Load,
    Help,
    Quit,
}

/// Parses one input line. Blank lines are a no-op (`Ok(None)`); unknown
/// verbs and unparseable ids are reported as [`AppError::Command`].
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(' ') {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb {
        "add-patient" => Command::AddPatient(parse_patient(rest)),
        "update-patient" => {
            let (id, payload) = split_id(rest)?;
            Command::UpdatePatient {
                id,
                patient: parse_patient(payload),
            }
        }
        "delete-patient" => Command::DeletePatient(parse_id(rest)?),
        "list-patients" => Command::ListPatients,
        "search-patients" => Command::SearchPatients(rest.to_string()),
        "add-doctor" => Command::AddDoctor(parse_doctor(rest)),
        "delete-doctor" => Command::DeleteDoctor(parse_id(rest)?),
        "list-doctors" => Command::ListDoctors,
        "search-doctors" => Command::SearchDoctors(rest.to_string()),
        "create-appointment" => {
            let fields: Vec<&str> = rest.split('|').collect();
            Command::CreateAppointment(NewAppointment {
                patient_id: parse_id(field(&fields, 0))?,
                doctor_id: parse_id(field(&fields, 1))?,
                datetime: field(&fields, 2).to_string(),
                reason: field(&fields, 3).to_string(),
            })
        }
        "cancel-appointment" => Command::CancelAppointment(parse_id(rest)?),
        "done-appointment" => Command::DoneAppointment(parse_id(rest)?),
        "list-appointments" => Command::ListAppointments,
        "stats" => Command::Stats,
        "save" => Command::Save,
        "load" => Command::Load,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(AppError::Command(format!(
                "unknown command '{}' (try 'help')",
                other
            )))
        }
    };
    Ok(Some(command))
}

fn parse_patient(payload: &str) -> NewPatient {
    let fields: Vec<&str> = payload.split('|').collect();
    NewPatient {
        name: field(&fields, 0).to_string(),
        age: parse_age(field(&fields, 1)),
        gender: field(&fields, 2).to_string(),
        address: field(&fields, 3).to_string(),
        phone: field(&fields, 4).to_string(),
    }
}

fn parse_doctor(payload: &str) -> NewDoctor {
    let fields: Vec<&str> = payload.split('|').collect();
    NewDoctor {
        name: field(&fields, 0).to_string(),
        age: parse_age(field(&fields, 1)),
        gender: field(&fields, 2).to_string(),
        specialization: field(&fields, 3).to_string(),
    }
}

/// `update-patient 3|name|...` — first field is the id, the rest is the
/// normal patient payload.
fn split_id(rest: &str) -> Result<(i64, &str)> {
    match rest.split_once('|') {
        Some((id, payload)) => Ok((parse_id(id)?, payload)),
        None => Ok((parse_id(rest)?, "")),
    }
}

fn field<'a>(fields: &[&'a str], index: usize) -> &'a str {
    fields.get(index).map(|f| f.trim()).unwrap_or("")
}

fn parse_id(text: &str) -> Result<i64> {
    text.trim()
        .parse()
        .map_err(|_| AppError::Command(format!("expected a numeric id, got '{}'", text.trim())))
}

// Ages are lenient: anything unparseable becomes 0, matching how the
// record forms treat a blank age field.
fn parse_age(text: &str) -> u32 {
    text.trim().parse().unwrap_or(0)
}

pub const HELP: &str = "\
Commands (record fields are |-separated):
  add-patient name|age|gender|address|phone
  update-patient id|name|age|gender|address|phone
  delete-patient id
  list-patients
  search-patients term
  add-doctor name|age|gender|specialization
  delete-doctor id
  list-doctors
  search-doctors term
  create-appointment patient_id|doctor_id|datetime|reason
  cancel-appointment id
  done-appointment id
  list-appointments
  stats
  save / load
  help
  quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_a_no_op() {
        assert_eq!(parse("").unwrap(), None);
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn unknown_verbs_are_rejected() {
        assert!(parse("frobnicate 1").is_err());
    }

    #[test]
    fn add_patient_splits_the_pipe_payload() {
        let command = parse("add-patient Alice Smith|30|F|1 Rd|555").unwrap().unwrap();
        assert_eq!(
            command,
            Command::AddPatient(NewPatient {
                name: "Alice Smith".to_string(),
                age: 30,
                gender: "F".to_string(),
                address: "1 Rd".to_string(),
                phone: "555".to_string(),
            })
        );
    }

    #[test]
    fn missing_trailing_fields_become_empty_strings() {
        let command = parse("add-patient Alice").unwrap().unwrap();
        assert_eq!(
            command,
            Command::AddPatient(NewPatient {
                name: "Alice".to_string(),
                age: 0,
                gender: String::new(),
                address: String::new(),
                phone: String::new(),
            })
        );
    }

    #[test]
    fn update_patient_peels_the_leading_id() {
        let command = parse("update-patient 3|Alicia|31|F|2 Ave|556").unwrap().unwrap();
        match command {
            Command::UpdatePatient { id, patient } => {
                assert_eq!(id, 3);
                assert_eq!(patient.name, "Alicia");
                assert_eq!(patient.age, 31);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn ids_must_be_numeric() {
        assert!(parse("delete-patient bob").is_err());
        assert!(parse("create-appointment one|2|dt|r").is_err());
    }

    #[test]
    fn create_appointment_carries_both_references() {
        let command = parse("create-appointment 1|2|2024-01-01T10:00|checkup")
            .unwrap()
            .unwrap();
        assert_eq!(
            command,
            Command::CreateAppointment(NewAppointment {
                patient_id: 1,
                doctor_id: 2,
                datetime: "2024-01-01T10:00".to_string(),
                reason: "checkup".to_string(),
            })
        );
    }

    #[test]
    fn search_term_is_the_rest_of_the_line() {
        let command = parse("search-doctors heart surgery").unwrap().unwrap();
        assert_eq!(command, Command::SearchDoctors("heart surgery".to_string()));
        // No term searches with the empty string, which matches everything.
        let command = parse("search-patients").unwrap().unwrap();
        assert_eq!(command, Command::SearchPatients(String::new()));
    }
}
