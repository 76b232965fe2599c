//! Infrastructure error types and conversions into the domain error

use thiserror::Error;
use timegrid_domain::ScheduleError;

/// Errors raised inside infrastructure adapters
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response from timesheet service: {0}")]
    Protocol(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfraError> for ScheduleError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::Http(inner) => Self::Persistence(format!("http: {inner}")),
            InfraError::Protocol(message) => Self::Persistence(message),
            InfraError::Config(message) => Self::Config(message),
        }
    }
}
