use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub specialization: String,
}

/// Insert payload for a doctor; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDoctor {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub specialization: String,
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}|{}|{}|{}|{}",
            self.id, self.name, self.age, self.gender, self.specialization
        )
    }
}
