//! Error types for the custody calendar engine.

use thiserror::Error;

/// Errors that can occur in calendar engine operations.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),
}

/// Result type alias for calendar engine operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
