//! Error types for the Stance system.

use thiserror::Error;

use crate::types::JointType;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Joint {0:?} is not tracked")]
    MissingJoint(JointType),

    #[error("Joint {0:?} appears more than once in skeleton")]
    DuplicateJoint(JointType),

    #[error("Incomplete skeleton: expected {expected} joints, got {actual}")]
    IncompleteSkeleton { expected: usize, actual: usize },

    #[error("No skeleton sensor available: {0}")]
    SensorUnavailable(String),

    #[error("Sensor error: {0}")]
    Sensor(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
