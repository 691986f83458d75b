use strum::Display;
use thiserror::Error;

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Coarse classification of registry failures, mapped onto HTTP statuses
/// by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Conflict,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Activity not found: {0}")]
    ActivityNotFound(String),

    #[error("{email} is already signed up for {activity}")]
    AlreadySignedUp { activity: String, email: String },

    #[error("{email} is not signed up for {activity}")]
    NotSignedUp { activity: String, email: String },
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::ActivityNotFound(_) | RegistryError::NotSignedUp { .. } => {
                ErrorKind::NotFound
            }
            RegistryError::AlreadySignedUp { .. } => ErrorKind::Conflict,
        }
    }
}
