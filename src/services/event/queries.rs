use chrono::{DateTime, Local, NaiveDate};

use super::EventStore;
use crate::error::{CalendarError, CalendarResult};
use crate::models::meeting::{Meeting, MeetingId};

impl EventStore {
    /// Every meeting, decoded from the medium (or the last known state if the
    /// medium cannot be read).
    pub fn get_all(&self) -> Vec<Meeting> {
        let mut state = self.lock_state();
        self.load_locked(&mut state)
    }

    pub fn get(&self, id: &MeetingId) -> CalendarResult<Meeting> {
        self.get_all()
            .into_iter()
            .find(|m| &m.id == id)
            .ok_or_else(|| CalendarError::NotFound(id.clone()))
    }

    /// Meetings overlapping `[start, end)`, ordered by start.
    pub fn find_by_date_range(&self, start: DateTime<Local>, end: DateTime<Local>) -> Vec<Meeting> {
        let mut meetings: Vec<Meeting> = self
            .get_all()
            .into_iter()
            .filter(|m| m.start < end && (m.end > start || m.start >= start))
            .collect();
        meetings.sort_by(|a, b| a.start.cmp(&b.start));
        meetings
    }

    /// Meetings whose start falls on `date`, ordered by start.
    pub fn meetings_on(&self, date: NaiveDate) -> Vec<Meeting> {
        let mut meetings: Vec<Meeting> = self
            .get_all()
            .into_iter()
            .filter(|m| m.start.date_naive() == date)
            .collect();
        meetings.sort_by(|a, b| a.start.cmp(&b.start));
        meetings
    }
}
