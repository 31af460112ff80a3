use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Local};

use super::alerts::MeetingAlert;
use crate::models::meeting::{Meeting, MeetingId};
use crate::models::settings::NotificationSettings;
use crate::services::event::EventStore;

/// `now < start <= now + lead_window`
pub fn is_due(now: DateTime<Local>, start: DateTime<Local>, lead_window: Duration) -> bool {
    now < start && start <= now + lead_window
}

/// Periodic lead-time scan over the event store.
///
/// Each meeting alerts at most once: the in-memory queued set covers overlapping
/// scans in this process, and the stored `notified` flag covers restarts.
pub struct NotificationScheduler {
    store: Arc<EventStore>,
    lead_window: Duration,
    enabled: bool,
    queued: HashSet<MeetingId>,
}

impl NotificationScheduler {
    pub fn new(store: Arc<EventStore>, settings: &NotificationSettings) -> Self {
        Self {
            store,
            lead_window: settings.lead_window(),
            enabled: settings.enabled,
            queued: HashSet::new(),
        }
    }

    pub fn lead_window(&self) -> Duration {
        self.lead_window
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn scan(&mut self) -> Vec<MeetingAlert> {
        self.scan_at(Local::now())
    }

    /// Raise an alert for every meeting entering the lead window at `now`.
    pub fn scan_at(&mut self, now: DateTime<Local>) -> Vec<MeetingAlert> {
        if !self.enabled {
            return Vec::new();
        }

        let meetings = self.store.get_all();
        self.queued
            .retain(|id| meetings.iter().any(|meeting| &meeting.id == id));

        let due: Vec<&Meeting> = meetings
            .iter()
            .filter(|m| self.should_alert(m, now))
            .collect();

        let mut alerts = Vec::new();
        for meeting in due {
            if !self.queued.insert(meeting.id.clone()) {
                continue;
            }
            // Another scheduler on the same medium may have claimed it since our read.
            if !self.store.mark_notified(&meeting.id) {
                log::debug!("Meeting {} already notified, skipping alert", meeting.id);
                continue;
            }
            log::info!(
                "Meeting '{}' starts at {}, raising alert",
                meeting.title,
                meeting.start
            );
            alerts.push(MeetingAlert::from_meeting(meeting, now));
        }
        alerts
    }

    fn should_alert(&self, meeting: &Meeting, now: DateTime<Local>) -> bool {
        !meeting.notified && is_due(now, meeting.start, self.lead_window)
    }
}
