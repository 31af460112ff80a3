use chrono::{DateTime, Duration, Local};

use crate::models::meeting::Meeting;

pub(crate) fn encode_meetings(meetings: &[Meeting]) -> serde_json::Result<String> {
    serde_json::to_string(meetings)
}

/// Decode the stored collection; `start`/`end` come back as timestamps.
pub(crate) fn decode_meetings(text: &str) -> serde_json::Result<Vec<Meeting>> {
    serde_json::from_str(text)
}

/// Returns `end`, or `start + minimum` when `end` is not after `start`.
pub(crate) fn clamp_end(
    start: DateTime<Local>,
    end: DateTime<Local>,
    minimum: Duration,
) -> DateTime<Local> {
    if end > start {
        end
    } else {
        start + minimum
    }
}
