//! Week and day timeline layout.
//!
//! Every meeting starting on a visible day becomes a block positioned on that
//! day's 24-hour track, tagged with its temporal status at render time.

use chrono::{DateTime, Local, NaiveDate};

use super::geometry::{timeline_block, TimelineBlock};
use crate::models::meeting::{classify, Meeting, TemporalStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    pub meeting: Meeting,
    pub block: TimelineBlock,
    pub status: TemporalStatus,
}

impl TimelineEvent {
    /// `10:00 - 11:30`
    pub fn time_range_label(&self) -> String {
        format!(
            "{} - {}",
            self.meeting.start.format("%H:%M"),
            self.meeting.end.format("%H:%M")
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_today: bool,
    pub events: Vec<TimelineEvent>,
}

impl DayColumn {
    /// Topmost event drawn at `fraction` on a track `track_height` pixels
    /// tall, i.e. the one a click there lands on. Later-starting blocks are
    /// drawn above earlier ones.
    pub fn event_at(&self, fraction: f64, track_height: f32) -> Option<&TimelineEvent> {
        self.events
            .iter()
            .rev()
            .find(|event| event.block.contains(fraction, track_height))
    }
}

/// `00:00` .. `23:00` labels for the hour gutter.
pub fn hour_labels() -> Vec<String> {
    (0..24).map(|hour| format!("{:02}:00", hour)).collect()
}

pub fn build_day_columns(
    dates: &[NaiveDate],
    meetings: &[Meeting],
    now: DateTime<Local>,
) -> Vec<DayColumn> {
    let today = now.date_naive();

    dates
        .iter()
        .map(|&date| {
            let mut on_day: Vec<&Meeting> = meetings
                .iter()
                .filter(|m| m.start.date_naive() == date)
                .collect();
            on_day.sort_by_key(|m| m.start);

            DayColumn {
                date,
                is_today: date == today,
                events: on_day
                    .into_iter()
                    .map(|m| TimelineEvent {
                        meeting: m.clone(),
                        block: timeline_block(m.start, m.end),
                        status: classify(now, m.start, m.end),
                    })
                    .collect(),
            }
        })
        .collect()
}
