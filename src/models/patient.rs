use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub address: String,
    pub phone: String,
}

/// Insert payload for a patient; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPatient {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub address: String,
    pub phone: String,
}

impl fmt::Display for Patient {
    /// Pipe-delimited wire row. Embedded `|` in free-text fields is not
    /// escaped; consumers split on the first five delimiters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}|{}",
            self.id, self.name, self.age, self.gender, self.address, self.phone
        )
    }
}
