//! Error types for the staycal ecosystem.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in staycal operations.
#[derive(Error, Debug)]
pub enum StaycalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not signed in. Run `staycal login` first")]
    NotSignedIn,

    #[error("Session expired. Run `staycal login` again")]
    SessionExpired,

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Visit not found: {0}")]
    VisitNotFound(String),

    #[error("Invalid date range: departure {end} is before arrival {start}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    DateParse(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    TimeParse(String),

    #[error("Invalid month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("Visit was already reviewed as {0}; decisions are final")]
    AlreadyReviewed(String),
}

/// Result type alias for staycal operations.
pub type StaycalResult<T> = Result<T, StaycalError>;
