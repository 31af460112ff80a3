use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Where a meeting sits relative to the current instant.
///
/// Recomputed on every render against the live clock; never stored on the
/// meeting itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemporalStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl TemporalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TemporalStatus::Upcoming => "upcoming",
            TemporalStatus::Ongoing => "ongoing",
            TemporalStatus::Completed => "completed",
        }
    }
}

/// Classify `[start, end]` against `now`.
///
/// Both boundaries count as ongoing. A meeting with `end < start` that has not
/// ended yet reports `Upcoming`.
pub fn classify(now: DateTime<Local>, start: DateTime<Local>, end: DateTime<Local>) -> TemporalStatus {
    if end < now {
        TemporalStatus::Completed
    } else if start <= now && now <= end {
        TemporalStatus::Ongoing
    } else {
        TemporalStatus::Upcoming
    }
}
