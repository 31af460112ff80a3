// Meeting module
// The single entity owned by the event store

use std::fmt;

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

mod draft;
mod status;

pub use draft::MeetingDraft;
pub use status::{classify, TemporalStatus};

/// Opaque, store-assigned meeting identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetingId(pub String);

impl MeetingId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Id derived from a creation timestamp in epoch milliseconds.
    pub fn from_millis(millis: i64) -> Self {
        Self(format!("meeting-{}", millis))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeetingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MeetingId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A scheduled meeting as stored in the durable medium.
///
/// `start` and `end` are serialized as RFC 3339 text and decoded back into
/// timestamps when the collection is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: MeetingId,
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    #[serde(default)]
    pub attendees: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, alias = "agenda", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Set once by the notification scheduler, never reset.
    #[serde(default)]
    pub notified: bool,
}

impl Meeting {
    /// Attach a store-assigned id to a new meeting.
    pub fn from_new(id: MeetingId, new: NewMeeting) -> Self {
        Self {
            id,
            title: new.title,
            start: new.start,
            end: new.end,
            attendees: new.attendees,
            link: new.link,
            notes: new.notes,
            notified: new.notified,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// `end > start`
    pub fn is_valid_interval(&self) -> bool {
        self.end > self.start
    }

    /// Copy of this meeting moved to a new interval, every other field unchanged.
    pub fn with_interval(&self, start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self {
            start,
            end,
            ..self.clone()
        }
    }

    /// Drop the id, e.g. to compare a stored record against its input.
    pub fn without_id(&self) -> NewMeeting {
        NewMeeting {
            title: self.title.clone(),
            start: self.start,
            end: self.end,
            attendees: self.attendees.clone(),
            link: self.link.clone(),
            notes: self.notes.clone(),
            notified: self.notified,
        }
    }
}

/// A meeting that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeeting {
    pub title: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub attendees: Vec<String>,
    pub link: Option<String>,
    pub notes: Option<String>,
    pub notified: bool,
}

impl NewMeeting {
    pub fn new(title: impl Into<String>, start: DateTime<Local>, end: DateTime<Local>) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            attendees: Vec::new(),
            link: None,
            notes: None,
            notified: false,
        }
    }

    /// Create a builder for constructing meetings with optional fields
    pub fn builder() -> MeetingBuilder {
        MeetingBuilder::new()
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Builder for creating meetings with optional fields.
///
/// Interval problems are not rejected here; the store clamps `end` when it
/// is not after `start`.
#[derive(Default)]
pub struct MeetingBuilder {
    title: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    attendees: Vec<String>,
    link: Option<String>,
    notes: Option<String>,
}

impl MeetingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn attendee(mut self, name: impl Into<String>) -> Self {
        self.attendees.push(name.into());
        self
    }

    pub fn attendees<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attendees.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Build the meeting. Title may be empty; start and end are required.
    pub fn build(self) -> Result<NewMeeting, String> {
        let start = self.start.ok_or("Meeting start time is required")?;
        let end = self.end.ok_or("Meeting end time is required")?;

        Ok(NewMeeting {
            title: self.title.unwrap_or_default(),
            start,
            end,
            attendees: self.attendees,
            link: self.link,
            notes: self.notes,
            notified: false,
        })
    }
}
