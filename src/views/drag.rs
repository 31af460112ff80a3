use chrono::{DateTime, Duration, Local};

use crate::models::meeting::{Meeting, MeetingId};

/// State captured when a meeting block starts being dragged.
#[derive(Clone, Debug, PartialEq)]
pub struct DragContext {
    pub meeting_id: MeetingId,
    pub original_start: DateTime<Local>,
    pub original_end: DateTime<Local>,
    pub duration: Duration,
}

impl DragContext {
    pub fn from_meeting(meeting: &Meeting) -> Self {
        Self {
            meeting_id: meeting.id.clone(),
            original_start: meeting.start,
            original_end: meeting.end,
            duration: meeting.end - meeting.start,
        }
    }
}

/// At most one drag in flight per view.
#[derive(Debug, Default)]
pub struct DragState {
    active: Option<DragContext>,
}

impl DragState {
    /// Start a drag, replacing any drag that never finished.
    pub fn begin(&mut self, context: DragContext) {
        if let Some(stale) = self.active.replace(context) {
            log::debug!("Dropping unfinished drag of {}", stale.meeting_id);
        }
    }

    pub fn active(&self) -> Option<&DragContext> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn finish(&mut self) -> Option<DragContext> {
        self.active.take()
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}
