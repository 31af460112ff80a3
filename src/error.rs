//! Error types for the meeting calendar.
//!
//! None of these are fatal: persistence problems are logged and the store keeps
//! serving its in-memory state, and generation failures become inline text.

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::models::meeting::MeetingId;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Persistence failure: {0:#}")]
    Persistence(#[source] anyhow::Error),

    #[error("Failed to decode stored meetings: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid interval: end {end} is not after start {start}")]
    InvalidInterval {
        start: DateTime<Local>,
        end: DateTime<Local>,
    },

    #[error("Meeting {0} not found")]
    NotFound(MeetingId),

    #[error("Text generation failed: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalendarError {
    pub fn persistence(err: anyhow::Error) -> Self {
        Self::Persistence(err)
    }
}

pub type CalendarResult<T> = std::result::Result<T, CalendarError>;
