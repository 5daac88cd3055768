mod hospital;
pub mod wire;

pub use hospital::{Hospital, Stats};
