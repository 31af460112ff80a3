//! Form model behind the create/edit meeting flow.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Timelike};

use super::{Meeting, MeetingId, NewMeeting};
use crate::utils::date::local_datetime;

/// Editable copy of a meeting as the create/edit form sees it.
///
/// Attendees are kept as the comma-separated text the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingDraft {
    /// Set when the form edits an existing meeting
    pub editing: Option<MeetingId>,
    pub title: String,
    pub attendees: String,
    pub link: String,
    pub date: NaiveDate,
    /// Differs from `date` when the meeting runs past midnight
    pub end_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub notes: String,
}

impl MeetingDraft {
    /// Empty form seeded with a start time; the end defaults to one hour later.
    pub fn for_new(start: DateTime<Local>) -> Self {
        let end = start + Duration::hours(1);
        Self {
            editing: None,
            title: String::new(),
            attendees: String::new(),
            link: String::new(),
            date: start.date_naive(),
            end_date: end.date_naive(),
            start_time: truncate_to_minute(start.time()),
            end_time: truncate_to_minute(end.time()),
            notes: String::new(),
        }
    }

    pub fn from_meeting(meeting: &Meeting) -> Self {
        Self {
            editing: Some(meeting.id.clone()),
            title: meeting.title.clone(),
            attendees: meeting.attendees.join(", "),
            link: meeting.link.clone().unwrap_or_default(),
            date: meeting.start.date_naive(),
            end_date: meeting.end.date_naive(),
            start_time: truncate_to_minute(meeting.start.time()),
            end_time: truncate_to_minute(meeting.end.time()),
            notes: meeting.notes.clone().unwrap_or_default(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }

    pub fn start(&self) -> DateTime<Local> {
        local_datetime(self.date, self.start_time)
    }

    pub fn end(&self) -> DateTime<Local> {
        local_datetime(self.end_date, self.end_time)
    }

    /// Move the meeting to `date`, carrying the end date along.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.end_date = self.end_date + (date - self.date);
        self.date = date;
    }

    /// Split the attendee text on commas, trimming and dropping blanks.
    pub fn parse_attendees(&self) -> Vec<String> {
        self.attendees
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Convert the form into a meeting.
    pub fn into_new_meeting(self) -> NewMeeting {
        let attendees = self.parse_attendees();
        let start = self.start();
        let end = self.end();

        NewMeeting {
            title: self.title.trim().to_string(),
            start,
            end,
            attendees,
            link: non_blank(self.link),
            notes: non_blank(self.notes),
            notified: false,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}
