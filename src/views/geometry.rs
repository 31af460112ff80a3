//! Time geometry for the calendar views.
//!
//! Month views place days on a 7-column grid. Week and day views map the
//! 24 hours of a day onto a vertical track expressed as fractions in `[0, 1)`,
//! so callers multiply by their own pixel height. The inverse mapping turns a
//! pointer fraction back into a start time.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Timelike};

use super::navigation::last_day_of_month;
use crate::utils::date::at_minutes_from_midnight;

pub const MINUTES_PER_DAY: u32 = 24 * 60;
const MILLIS_PER_DAY: f64 = 60_000.0 * MINUTES_PER_DAY as f64;

/// Smallest rendered block height in pixels, so short meetings stay clickable.
pub const MIN_BLOCK_HEIGHT_PX: f32 = 20.0;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Row/column position in a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: u32,
    pub col: u32,
}

/// One displayed month laid out on a 7-column grid.
///
/// Column 0 is `first_day_of_week`; row 0 is the row holding day 1. Cells
/// before day 1 are blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    first: NaiveDate,
    days_in_month: u32,
    first_day_of_week: u8,
}

impl MonthGrid {
    /// # Arguments
    /// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
    pub fn new(year: i32, month: u32, first_day_of_week: u8) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self {
            first,
            days_in_month: last_day_of_month(year, month),
            first_day_of_week: first_day_of_week % 7,
        })
    }

    /// Grid for the month containing `date`.
    pub fn containing(date: NaiveDate, first_day_of_week: u8) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
            days_in_month: last_day_of_month(date.year(), date.month()),
            first_day_of_week: first_day_of_week % 7,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    /// Empty cells rendered before day 1.
    pub fn leading_blanks(&self) -> u32 {
        let weekday = self.first.weekday().num_days_from_sunday();
        (weekday + 7 - self.first_day_of_week as u32) % 7
    }

    pub fn row_count(&self) -> u32 {
        (self.leading_blanks() + self.days_in_month).div_ceil(7)
    }

    /// Cell for `date`, or `None` when the date is outside this month.
    pub fn date_to_cell(&self, date: NaiveDate) -> Option<GridCell> {
        if date.year() != self.first.year() || date.month() != self.first.month() {
            return None;
        }
        let index = self.leading_blanks() + date.day() - 1;
        Some(GridCell {
            row: index / 7,
            col: index % 7,
        })
    }

    /// Date shown in `cell`, or `None` for blank and out-of-range cells.
    pub fn cell_to_date(&self, cell: GridCell) -> Option<NaiveDate> {
        if cell.col > 6 {
            return None;
        }
        let index = cell.row * 7 + cell.col;
        let day = index.checked_sub(self.leading_blanks())? + 1;
        if day > self.days_in_month {
            return None;
        }
        self.first.with_day(day)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.days_in_month).filter_map(move |day| self.first.with_day(day))
    }

    /// Column headers, starting from `first_day_of_week`.
    pub fn weekday_labels(&self) -> [&'static str; 7] {
        let mut labels = [""; 7];
        for (col, label) in labels.iter_mut().enumerate() {
            *label = DAY_NAMES[(col + self.first_day_of_week as usize) % 7];
        }
        labels
    }
}

/// Minutes since local midnight, ignoring seconds.
pub fn minutes_from_midnight(time: DateTime<Local>) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Vertical position of `time` on the day track, in `[0, 1)`.
pub fn time_to_offset(time: DateTime<Local>) -> f64 {
    minutes_from_midnight(time) as f64 / MINUTES_PER_DAY as f64
}

/// Height of a duration on the day track. Negative durations map to zero.
pub fn duration_to_extent(duration: Duration) -> f64 {
    let millis = duration.num_milliseconds().max(0) as f64;
    millis / MILLIS_PER_DAY
}

/// Inverse of [`time_to_offset`]: `floor(p * 1440)`, clamped to the day.
pub fn offset_to_minutes(fraction: f64) -> u32 {
    if !fraction.is_finite() {
        return 0;
    }
    let minutes = (fraction.clamp(0.0, 1.0) * MINUTES_PER_DAY as f64).floor() as u32;
    minutes.min(MINUTES_PER_DAY - 1)
}

/// Grid a pointer-derived time snaps down to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapMode {
    /// Start of the hour slot under the pointer (click-to-create)
    Hour,
    /// Minute under the pointer (drag-drop)
    Minute,
    /// Start of an N-minute slot
    Minutes(u32),
}

impl SnapMode {
    pub fn apply(self, minutes: u32) -> u32 {
        let step = match self {
            SnapMode::Hour => 60,
            SnapMode::Minute => 1,
            SnapMode::Minutes(step) => step.max(1),
        };
        minutes - minutes % step
    }
}

/// Start time for a pointer at `fraction` of the track for `date`.
pub fn pointer_to_start(date: NaiveDate, fraction: f64, snap: SnapMode) -> DateTime<Local> {
    let minutes = snap.apply(offset_to_minutes(fraction));
    at_minutes_from_midnight(date, minutes)
}

/// Pointer position as a fraction of a track `track_height` pixels tall.
pub fn pointer_fraction(y: f32, track_height: f32) -> f64 {
    if track_height <= 0.0 {
        return 0.0;
    }
    (y / track_height).clamp(0.0, 1.0) as f64
}

/// A meeting's block on the day track, as fractions of the track height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineBlock {
    pub top: f64,
    pub height: f64,
}

impl TimelineBlock {
    /// Pixel `(top, height)` on a track of `track_height` pixels.
    pub fn to_pixels(&self, track_height: f32) -> (f32, f32) {
        let top = self.top as f32 * track_height;
        let height = (self.height as f32 * track_height).max(MIN_BLOCK_HEIGHT_PX);
        (top, height)
    }

    /// Whether `fraction` falls inside the block as drawn on a track of
    /// `track_height` pixels, minimum height included.
    pub fn contains(&self, fraction: f64, track_height: f32) -> bool {
        let min_extent = if track_height > 0.0 {
            (MIN_BLOCK_HEIGHT_PX / track_height) as f64
        } else {
            0.0
        };
        let extent = self.height.max(min_extent);
        fraction >= self.top && fraction < self.top + extent
    }
}

/// Block for `[start, end)`. Blocks are not clipped at midnight.
pub fn timeline_block(start: DateTime<Local>, end: DateTime<Local>) -> TimelineBlock {
    TimelineBlock {
        top: time_to_offset(start),
        height: duration_to_extent(end - start),
    }
}

/// New interval for a meeting dropped at `fraction` on `date`.
///
/// The start snaps to the minute under the pointer and the original
/// duration is carried over unchanged.
pub fn reschedule_on_drop(
    date: NaiveDate,
    fraction: f64,
    original_start: DateTime<Local>,
    original_end: DateTime<Local>,
) -> (DateTime<Local>, DateTime<Local>) {
    let new_start = pointer_to_start(date, fraction, SnapMode::Minute);
    (new_start, new_start + (original_end - original_start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn july_2024() -> MonthGrid {
        MonthGrid::new(2024, 7, 0).unwrap()
    }

    #[test]
    fn test_month_grid_july_2024_sunday_start() {
        // July 1, 2024 is a Monday
        let grid = july_2024();
        assert_eq!(grid.leading_blanks(), 1);
        assert_eq!(grid.days_in_month(), 31);
        assert_eq!(grid.row_count(), 5);

        let d15 = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        assert_eq!(grid.date_to_cell(d15), Some(GridCell { row: 2, col: 1 }));
    }

    #[test]
    fn test_month_grid_monday_start() {
        let grid = MonthGrid::new(2024, 7, 1).unwrap();
        assert_eq!(grid.leading_blanks(), 0);
        assert_eq!(grid.weekday_labels()[0], "Mon");
        assert_eq!(grid.weekday_labels()[6], "Sun");
    }

    #[test]
    fn test_month_grid_cell_round_trip() {
        let grid = july_2024();
        for date in grid.dates() {
            let cell = grid.date_to_cell(date).unwrap();
            assert_eq!(grid.cell_to_date(cell), Some(date));
        }
    }

    #[test]
    fn test_month_grid_blank_and_foreign_cells() {
        let grid = july_2024();
        assert_eq!(grid.cell_to_date(GridCell { row: 0, col: 0 }), None);
        assert_eq!(grid.cell_to_date(GridCell { row: 5, col: 0 }), None);
        assert_eq!(
            grid.date_to_cell(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()),
            None
        );
    }

    #[test]
    fn test_month_grid_february_leap_year() {
        let grid = MonthGrid::new(2024, 2, 0).unwrap();
        assert_eq!(grid.days_in_month(), 29);
        // Feb 1, 2024 is a Thursday
        assert_eq!(grid.leading_blanks(), 4);
    }

    #[test_case(0, 0, 0.0 ; "midnight")]
    #[test_case(6, 0, 0.25 ; "six am")]
    #[test_case(12, 0, 0.5 ; "noon")]
    #[test_case(18, 0, 0.75 ; "six pm")]
    fn test_time_to_offset(hour: u32, minute: u32, expected: f64) {
        let time = Local.with_ymd_and_hms(2024, 7, 15, hour, minute, 0).unwrap();
        assert_eq!(time_to_offset(time), expected);
    }

    #[test]
    fn test_duration_to_extent() {
        assert_eq!(duration_to_extent(Duration::hours(6)), 0.25);
        assert_eq!(duration_to_extent(Duration::minutes(-30)), 0.0);
    }

    #[test]
    fn test_offset_to_minutes_clamps() {
        assert_eq!(offset_to_minutes(0.5), 720);
        assert_eq!(offset_to_minutes(-0.2), 0);
        assert_eq!(offset_to_minutes(1.0), MINUTES_PER_DAY - 1);
        assert_eq!(offset_to_minutes(f64::NAN), 0);
    }

    #[test]
    fn test_snap_modes() {
        assert_eq!(SnapMode::Hour.apply(10 * 60 + 47), 10 * 60);
        assert_eq!(SnapMode::Minute.apply(10 * 60 + 47), 10 * 60 + 47);
        assert_eq!(SnapMode::Minutes(15).apply(10 * 60 + 47), 10 * 60 + 45);
        assert_eq!(SnapMode::Minutes(0).apply(7), 7);
    }

    #[test]
    fn test_pointer_to_start_hour_snap() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let start = pointer_to_start(date, (14.0 * 60.0 + 40.0) / 1440.0, SnapMode::Hour);
        assert_eq!(start, Local.with_ymd_and_hms(2024, 7, 15, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_reschedule_on_drop_preserves_duration() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 16).unwrap();
        let original_start = Local.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap();
        let original_end = original_start + Duration::minutes(90);

        let (start, end) = reschedule_on_drop(date, 0.5, original_start, original_end);
        assert_eq!(start, Local.with_ymd_and_hms(2024, 7, 16, 12, 0, 0).unwrap());
        assert_eq!(end - start, Duration::minutes(90));
    }

    #[test]
    fn test_reschedule_past_midnight_is_not_clipped() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 16).unwrap();
        let original_start = Local.with_ymd_and_hms(2024, 7, 15, 10, 0, 0).unwrap();
        let original_end = original_start + Duration::hours(2);

        let (start, end) = reschedule_on_drop(date, 23.5 / 24.0, original_start, original_end);
        assert_eq!(end.date_naive(), NaiveDate::from_ymd_opt(2024, 7, 17).unwrap());
        assert_eq!(end - start, Duration::hours(2));
    }

    #[test]
    fn test_timeline_block_pixels() {
        let start = Local.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
        let block = timeline_block(start, start + Duration::minutes(5));
        let (top, height) = block.to_pixels(1536.0);
        assert_eq!(top, 768.0);
        assert_eq!(height, MIN_BLOCK_HEIGHT_PX);
        assert!(block.contains(0.5, 1536.0));
        assert!(!block.contains(0.49, 1536.0));
        // Inside the drawn 20px even though the meeting covers only 5 minutes.
        assert!(block.contains(783.0 / 1536.0, 1536.0));
        assert!(!block.contains(789.0 / 1536.0, 1536.0));
    }

    #[test]
    fn test_pointer_fraction() {
        assert_eq!(pointer_fraction(384.0, 1536.0), 0.25);
        assert_eq!(pointer_fraction(-5.0, 1536.0), 0.0);
        assert_eq!(pointer_fraction(10.0, 0.0), 0.0);
    }
}
