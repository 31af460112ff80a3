use anyhow::Result;
use notify_rust::{Notification, Timeout};
use tokio::sync::mpsc;

mod alerts;
mod runner;
mod scheduler;

pub use alerts::{ActiveAlerts, MeetingAlert, ALERT_SUMMARY};
pub use runner::{spawn_scheduler, SchedulerHandle};
pub use scheduler::{is_due, NotificationScheduler};

/// Where raised alerts go. Implemented by whatever renders them.
pub trait AlertSink: Send {
    fn deliver(&self, alert: &MeetingAlert) -> Result<()>;
}

/// Service for displaying system notifications
pub struct NotificationService {
    enabled: bool,
    timeout_ms: u32,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            enabled: true,
            timeout_ms: 15_000,
        }
    }

    pub fn with_timeout(mut self, timeout: chrono::Duration) -> Self {
        self.timeout_ms = timeout.num_milliseconds().clamp(0, u32::MAX as i64) as u32;
        self
    }

    /// Check if notifications are enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable notifications
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Show a "meeting starting soon" notification
    pub fn show_meeting_alert(&self, alert: &MeetingAlert) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        Notification::new()
            .summary(ALERT_SUMMARY)
            .body(&alert.body())
            .timeout(Timeout::Milliseconds(self.timeout_ms))
            .show()
            .map_err(|e| anyhow::anyhow!("Failed to show notification: {}", e))?;

        Ok(())
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Shows alerts as desktop notifications.
#[derive(Default)]
pub struct DesktopAlertSink {
    service: NotificationService,
}

impl DesktopAlertSink {
    pub fn new(service: NotificationService) -> Self {
        Self { service }
    }
}

impl AlertSink for DesktopAlertSink {
    fn deliver(&self, alert: &MeetingAlert) -> Result<()> {
        self.service.show_meeting_alert(alert)
    }
}

/// Forwards alerts to an embedding UI over a channel.
pub struct ChannelAlertSink {
    sender: mpsc::UnboundedSender<MeetingAlert>,
}

impl ChannelAlertSink {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<MeetingAlert>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl AlertSink for ChannelAlertSink {
    fn deliver(&self, alert: &MeetingAlert) -> Result<()> {
        self.sender
            .send(alert.clone())
            .map_err(|_| anyhow::anyhow!("Alert receiver was dropped"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meeting::{Meeting, MeetingId, NewMeeting};
    use chrono::{Duration, Local, TimeZone};

    fn sample_alert() -> MeetingAlert {
        let start = Local.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap();
        let meeting = Meeting::from_new(
            MeetingId::new("meeting-1"),
            NewMeeting::new("Sync", start, start + Duration::minutes(30)),
        );
        MeetingAlert::from_meeting(&meeting, start - Duration::minutes(3))
    }

    #[test]
    fn test_disabled_service_skips_notification() {
        let mut service = NotificationService::new();
        service.set_enabled(false);
        assert!(!service.is_enabled());
        assert!(service.show_meeting_alert(&sample_alert()).is_ok());
    }

    #[test]
    fn test_channel_sink_forwards_alerts() {
        let (sink, mut receiver) = ChannelAlertSink::channel();
        sink.deliver(&sample_alert()).unwrap();
        assert_eq!(receiver.try_recv().unwrap(), sample_alert());
    }

    #[test]
    fn test_channel_sink_reports_closed_receiver() {
        let (sink, receiver) = ChannelAlertSink::channel();
        drop(receiver);
        assert!(sink.deliver(&sample_alert()).is_err());
    }
}
