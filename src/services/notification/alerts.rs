//! Active lead-time alerts.
//!
//! Alerts are shown until dismissed or until they time out. Neither affects
//! the meeting's `notified` flag, which was already set when the alert fired.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Local};

use crate::models::meeting::{Meeting, MeetingId};

pub const ALERT_SUMMARY: &str = "Meeting Starting Soon!";

/// One "meeting starts soon" alert.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingAlert {
    pub meeting_id: MeetingId,
    pub title: String,
    pub start: DateTime<Local>,
    pub link: Option<String>,
    /// When the alert was raised
    pub raised_at: DateTime<Local>,
}

impl MeetingAlert {
    pub fn from_meeting(meeting: &Meeting, raised_at: DateTime<Local>) -> Self {
        Self {
            meeting_id: meeting.id.clone(),
            title: meeting.title.clone(),
            start: meeting.start,
            link: meeting.link.clone(),
            raised_at,
        }
    }

    /// Title on the first line, start time on the second.
    pub fn body(&self) -> String {
        format!("{}\nat {}", self.title, self.start.format("%H:%M"))
    }

    pub fn is_expired(&self, now: DateTime<Local>, timeout: Duration) -> bool {
        now - self.raised_at >= timeout
    }

    pub fn can_join(&self) -> bool {
        self.link.as_deref().is_some_and(|link| !link.trim().is_empty())
    }

    /// Open the meeting link in the default browser. Returns `false` when
    /// the meeting has no link.
    pub fn join(&self) -> Result<bool> {
        let Some(link) = self.link.as_deref().filter(|link| !link.trim().is_empty()) else {
            return Ok(false);
        };
        webbrowser::open(link).with_context(|| format!("Failed to open meeting link {}", link))?;
        Ok(true)
    }
}

/// Alerts currently on screen, oldest first.
#[derive(Debug)]
pub struct ActiveAlerts {
    alerts: Vec<MeetingAlert>,
    timeout: Duration,
}

impl ActiveAlerts {
    pub fn new(timeout: Duration) -> Self {
        Self {
            alerts: Vec::new(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Show an alert. A second alert for the same meeting replaces the first.
    pub fn push(&mut self, alert: MeetingAlert) {
        self.alerts.retain(|a| a.meeting_id != alert.meeting_id);
        self.alerts.push(alert);
    }

    pub fn dismiss(&mut self, meeting_id: &MeetingId) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| &a.meeting_id != meeting_id);
        self.alerts.len() != before
    }

    /// Drop alerts older than the timeout; returns how many were removed.
    pub fn expire(&mut self, now: DateTime<Local>) -> usize {
        let before = self.alerts.len();
        let timeout = self.timeout;
        self.alerts.retain(|a| !a.is_expired(now, timeout));
        before - self.alerts.len()
    }

    pub fn active(&self) -> &[MeetingAlert] {
        &self.alerts
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }
}

impl Default for ActiveAlerts {
    fn default() -> Self {
        Self::new(Duration::seconds(15))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meeting::NewMeeting;
    use chrono::TimeZone;

    fn alert(id: &str, raised_at: DateTime<Local>) -> MeetingAlert {
        let start = Local.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap();
        let meeting = Meeting::from_new(
            MeetingId::new(id),
            NewMeeting::new("Team Sync", start, start + Duration::minutes(30)),
        );
        MeetingAlert::from_meeting(&meeting, raised_at)
    }

    #[test]
    fn test_alert_body() {
        let now = Local.with_ymd_and_hms(2024, 7, 15, 9, 57, 0).unwrap();
        assert_eq!(alert("a", now).body(), "Team Sync\nat 10:00");
    }

    #[test]
    fn test_join_without_link_is_noop() {
        let now = Local.with_ymd_and_hms(2024, 7, 15, 9, 57, 0).unwrap();
        let alert = alert("a", now);
        assert!(!alert.can_join());
        assert!(!alert.join().unwrap());
    }

    #[test]
    fn test_dismiss_removes_only_that_alert() {
        let now = Local.with_ymd_and_hms(2024, 7, 15, 9, 57, 0).unwrap();
        let mut alerts = ActiveAlerts::default();
        alerts.push(alert("a", now));
        alerts.push(alert("b", now));

        assert!(alerts.dismiss(&MeetingId::new("a")));
        assert!(!alerts.dismiss(&MeetingId::new("a")));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts.active()[0].meeting_id.as_str(), "b");
    }

    #[test]
    fn test_alerts_expire_after_timeout() {
        let raised = Local.with_ymd_and_hms(2024, 7, 15, 9, 57, 0).unwrap();
        let mut alerts = ActiveAlerts::new(Duration::seconds(15));
        alerts.push(alert("a", raised));
        alerts.push(alert("b", raised + Duration::seconds(10)));

        assert_eq!(alerts.expire(raised + Duration::seconds(14)), 0);
        assert_eq!(alerts.expire(raised + Duration::seconds(15)), 1);
        assert_eq!(alerts.active()[0].meeting_id.as_str(), "b");
        assert_eq!(alerts.expire(raised + Duration::seconds(30)), 1);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_push_replaces_same_meeting() {
        let now = Local.with_ymd_and_hms(2024, 7, 15, 9, 57, 0).unwrap();
        let mut alerts = ActiveAlerts::default();
        alerts.push(alert("a", now));
        alerts.push(alert("a", now + Duration::seconds(5)));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts.active()[0].raised_at, now + Duration::seconds(5));
    }
}
