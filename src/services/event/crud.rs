use chrono::Local;

use super::shared::clamp_end;
use super::{EventStore, StoreChange, StoreState};
use crate::models::meeting::{Meeting, MeetingId, NewMeeting};

impl EventStore {
    /// Store a new meeting and return it with its assigned id.
    pub fn add(&self, mut new: NewMeeting) -> Meeting {
        let mut state = self.lock_state();
        let mut meetings = self.load_locked(&mut state);

        new.end = self.clamped_end(new.start, new.end, &new.title);
        let id = next_id(&mut state, &meetings);
        let meeting = Meeting::from_new(id.clone(), new);
        meetings.push(meeting.clone());

        log::info!("Added meeting {} ({})", meeting.id, meeting.title);
        self.commit_locked(&mut state, meetings, StoreChange::added(id));
        meeting
    }

    /// Replace the record with `meeting.id`. Returns false when no such record exists.
    pub fn update(&self, meeting: &Meeting) -> bool {
        let mut state = self.lock_state();
        let mut meetings = self.load_locked(&mut state);

        let Some(index) = meetings.iter().position(|m| m.id == meeting.id) else {
            log::debug!("Update skipped, meeting {} not found", meeting.id);
            return false;
        };

        let mut updated = meeting.clone();
        updated.end = self.clamped_end(updated.start, updated.end, &updated.title);
        meetings[index] = updated;

        self.commit_locked(&mut state, meetings, StoreChange::updated(meeting.id.clone()));
        true
    }

    /// Remove the record with `id`. Returns false when no such record exists.
    pub fn delete(&self, id: &MeetingId) -> bool {
        let mut state = self.lock_state();
        let mut meetings = self.load_locked(&mut state);

        let before = meetings.len();
        meetings.retain(|m| &m.id != id);
        if meetings.len() == before {
            log::debug!("Delete skipped, meeting {} not found", id);
            return false;
        }

        log::info!("Deleted meeting {}", id);
        self.commit_locked(&mut state, meetings, StoreChange::deleted(id.clone()));
        true
    }

    /// Set the sticky `notified` flag on a fresh copy of the record.
    ///
    /// Returns true only when the flag actually changed.
    pub fn mark_notified(&self, id: &MeetingId) -> bool {
        let mut state = self.lock_state();
        let mut meetings = self.load_locked(&mut state);

        let Some(meeting) = meetings.iter_mut().find(|m| &m.id == id) else {
            log::debug!("Cannot mark meeting {} notified, not found", id);
            return false;
        };
        if meeting.notified {
            return false;
        }
        meeting.notified = true;

        self.commit_locked(&mut state, meetings, StoreChange::updated(id.clone()));
        true
    }

    /// Write first-run meetings when the medium has never held a collection.
    ///
    /// Returns how many meetings were seeded.
    pub fn seed_if_empty(&self, seeds: Vec<NewMeeting>) -> usize {
        let mut state = self.lock_state();

        match self.read_collection() {
            Ok(None) => {}
            Ok(Some(_)) => return 0,
            Err(err) => {
                log::warn!("Skipping meeting seed, storage unreadable: {}", err);
                return 0;
            }
        }

        let mut meetings = Vec::with_capacity(seeds.len());
        for mut new in seeds {
            new.end = self.clamped_end(new.start, new.end, &new.title);
            let id = next_id(&mut state, &meetings);
            meetings.push(Meeting::from_new(id, new));
        }

        let count = meetings.len();
        let Some(first) = meetings.first().map(|m| m.id.clone()) else {
            return 0;
        };
        log::info!("Seeded {} meetings into empty storage", count);
        self.commit_locked(&mut state, meetings, StoreChange::added(first));
        count
    }

    fn clamped_end(
        &self,
        start: chrono::DateTime<Local>,
        end: chrono::DateTime<Local>,
        title: &str,
    ) -> chrono::DateTime<Local> {
        let clamped = clamp_end(start, end, self.minimum_duration);
        if clamped != end {
            log::warn!(
                "Meeting '{}' ends at or before its start ({} <= {}), clamping end to {}",
                title,
                end,
                start,
                clamped
            );
        }
        clamped
    }
}

/// Next `meeting-<millis>` id, strictly after the last one this store issued
/// and distinct from every id already in the collection.
fn next_id(state: &mut StoreState, existing: &[Meeting]) -> MeetingId {
    let mut millis = Local::now().timestamp_millis().max(state.last_id_millis + 1);
    loop {
        let candidate = MeetingId::from_millis(millis);
        if !existing.iter().any(|m| m.id == candidate) {
            state.last_id_millis = millis;
            return candidate;
        }
        millis += 1;
    }
}
