//! Month grid layout.
//!
//! Produces plain data for a 7-column month: one cell per day holding the
//! first few meetings (ordered by start) and a count of the rest.

use chrono::{DateTime, Local, NaiveDate};

use super::geometry::{GridCell, MonthGrid};
use crate::models::meeting::{classify, Meeting, MeetingId, TemporalStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthEntry {
    pub meeting_id: MeetingId,
    pub title: String,
    pub start: DateTime<Local>,
    pub status: TemporalStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthDayCell {
    pub date: NaiveDate,
    pub cell: GridCell,
    pub is_today: bool,
    pub entries: Vec<MonthEntry>,
    /// Meetings on this day that did not fit in `entries`
    pub overflow: usize,
}

impl MonthDayCell {
    /// `+ N more`, or `None` when every meeting is listed.
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+ {} more", self.overflow))
    }

    pub fn total_meetings(&self) -> usize {
        self.entries.len() + self.overflow
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub title: String,
    pub weekday_labels: [&'static str; 7],
    pub leading_blanks: u32,
    pub rows: u32,
    pub days: Vec<MonthDayCell>,
}

impl MonthLayout {
    pub fn day(&self, date: NaiveDate) -> Option<&MonthDayCell> {
        self.days.iter().find(|cell| cell.date == date)
    }
}

pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

/// Lay out `meetings` on `grid`, listing at most `visible_per_day` per day.
pub fn build_month_layout(
    grid: &MonthGrid,
    meetings: &[Meeting],
    now: DateTime<Local>,
    visible_per_day: usize,
) -> MonthLayout {
    let today = now.date_naive();

    let days = grid
        .dates()
        .filter_map(|date| {
            let cell = grid.date_to_cell(date)?;
            let mut on_day: Vec<&Meeting> = meetings
                .iter()
                .filter(|m| m.start.date_naive() == date)
                .collect();
            on_day.sort_by_key(|m| m.start);

            let overflow = on_day.len().saturating_sub(visible_per_day);
            let entries = on_day
                .into_iter()
                .take(visible_per_day)
                .map(|m| MonthEntry {
                    meeting_id: m.id.clone(),
                    title: m.title.clone(),
                    start: m.start,
                    status: classify(now, m.start, m.end),
                })
                .collect();

            Some(MonthDayCell {
                date,
                cell,
                is_today: date == today,
                entries,
                overflow,
            })
        })
        .collect();

    MonthLayout {
        title: month_title(grid.first_day()),
        weekday_labels: grid.weekday_labels(),
        leading_blanks: grid.leading_blanks(),
        rows: grid.row_count(),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::meeting::NewMeeting;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn meeting(id: &str, day: u32, hour: u32) -> Meeting {
        let start = Local.with_ymd_and_hms(2024, 7, day, hour, 0, 0).unwrap();
        Meeting::from_new(
            MeetingId::new(id),
            NewMeeting::new(format!("Meeting {}", id), start, start + Duration::hours(1)),
        )
    }

    #[test]
    fn test_three_meetings_show_two_and_overflow() {
        let grid = MonthGrid::new(2024, 7, 0).unwrap();
        let meetings = vec![
            meeting("c", 15, 16),
            meeting("a", 15, 10),
            meeting("b", 15, 14),
            meeting("d", 16, 9),
        ];
        let now = Local.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();

        let layout = build_month_layout(&grid, &meetings, now, 2);
        let day = layout
            .day(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
            .unwrap();

        let ids: Vec<&str> = day.entries.iter().map(|e| e.meeting_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(day.overflow, 1);
        assert_eq!(day.overflow_label().as_deref(), Some("+ 1 more"));
        assert_eq!(day.total_meetings(), 3);
    }

    #[test]
    fn test_layout_shape_and_today() {
        let grid = MonthGrid::new(2024, 7, 0).unwrap();
        let now = Local.with_ymd_and_hms(2024, 7, 4, 12, 0, 0).unwrap();
        let layout = build_month_layout(&grid, &[], now, 2);

        assert_eq!(layout.title, "July 2024");
        assert_eq!(layout.days.len(), 31);
        assert_eq!(layout.leading_blanks, 1);
        assert_eq!(layout.weekday_labels[0], "Sun");

        let today: Vec<NaiveDate> = layout.days.iter().filter(|d| d.is_today).map(|d| d.date).collect();
        assert_eq!(today, vec![NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()]);
        assert!(layout.days.iter().all(|d| d.overflow_label().is_none()));
    }

    #[test]
    fn test_meetings_outside_month_are_ignored() {
        let grid = MonthGrid::new(2024, 8, 0).unwrap();
        let now = Local.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap();
        let layout = build_month_layout(&grid, &[meeting("a", 15, 10)], now, 2);
        assert!(layout.days.iter().all(|d| d.entries.is_empty()));
    }
}
