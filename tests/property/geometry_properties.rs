// Property-based tests for the calendar geometry
// Checks ordering and duration guarantees over random times

use chrono::{Duration, Local, NaiveDate, TimeZone};
use meeting_scheduler::views::geometry::{
    offset_to_minutes, pointer_to_start, reschedule_on_drop, time_to_offset, MonthGrid, SnapMode,
};
use proptest::prelude::*;

fn july_15() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()
}

proptest! {
    /// Property: a later time of day never sits higher on the track
    #[test]
    fn prop_offset_monotonic_within_day(a in 0u32..1440, b in 0u32..1440) {
        let (early, late) = if a <= b { (a, b) } else { (b, a) };
        let day = Local.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap();
        let early_t = day + Duration::minutes(early as i64);
        let late_t = day + Duration::minutes(late as i64);

        prop_assert!(time_to_offset(early_t) <= time_to_offset(late_t));
        prop_assert!((0.0..1.0).contains(&time_to_offset(late_t)));
    }

    /// Property: dropping anywhere keeps the meeting's duration
    #[test]
    fn prop_drop_preserves_duration(
        fraction in 0.0f64..1.0,
        start_minute in 0i64..1440,
        duration_minutes in 1i64..600,
        day_offset in -3i64..3,
    ) {
        let original_start = Local.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap()
            + Duration::minutes(start_minute);
        let original_end = original_start + Duration::minutes(duration_minutes);
        let target = july_15() + Duration::days(day_offset);

        let (start, end) = reschedule_on_drop(target, fraction, original_start, original_end);
        prop_assert_eq!(end - start, original_end - original_start);
    }

    /// Property: the inverse mapping lands inside the day and snaps down
    #[test]
    fn prop_inverse_mapping_in_range(fraction in -1.0f64..2.0) {
        let minutes = offset_to_minutes(fraction);
        prop_assert!(minutes < 1440);

        let start = pointer_to_start(july_15(), fraction, SnapMode::Hour);
        prop_assert_eq!(start.date_naive(), july_15());
        prop_assert_eq!(chrono::Timelike::minute(&start), 0);
    }

    /// Property: every day of a month maps to a unique cell and back
    #[test]
    fn prop_month_cells_round_trip(year in 1990i32..2100, month in 1u32..=12, first_day in 0u8..7) {
        let grid = MonthGrid::new(year, month, first_day).unwrap();
        let mut seen = std::collections::HashSet::new();
        for date in grid.dates() {
            let cell = grid.date_to_cell(date).unwrap();
            prop_assert!(cell.col < 7);
            prop_assert!(cell.row < grid.row_count());
            prop_assert!(seen.insert(cell));
            prop_assert_eq!(grid.cell_to_date(cell), Some(date));
        }
    }
}
