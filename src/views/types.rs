use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::meeting::{Meeting, MeetingId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewType {
    #[default]
    Month,
    Week,
    Day,
}

impl ViewType {
    pub fn label(&self) -> &'static str {
        match self {
            ViewType::Month => "Month",
            ViewType::Week => "Week",
            ViewType::Day => "Day",
        }
    }
}

/// What a single pointer click landed on.
///
/// Meeting blocks sit above the grid, so one click resolves to exactly one
/// target.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickTarget {
    Meeting(MeetingId),
    /// Empty space on a week/day track, `fraction` down from midnight
    TimeGrid { date: NaiveDate, fraction: f64 },
    MonthDay(NaiveDate),
}

/// Where a dragged meeting was released.
#[derive(Debug, Clone, PartialEq)]
pub enum DropTarget {
    TimeGrid { date: NaiveDate, fraction: f64 },
    /// Released over anything that is not a day track
    Outside,
}

/// What the surrounding UI should do after a click.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    OpenCreate { start: DateTime<Local> },
    OpenDetail(Meeting),
    SwitchToDay(NaiveDate),
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    Moved(Meeting),
    /// Released outside a track; the meeting was not touched
    Cancelled,
    /// The meeting was deleted while it was being dragged
    Missing(MeetingId),
    NoDrag,
}
