// Date utility functions
// Local-time helpers that never panic on DST gaps

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

pub fn is_same_day(date1: DateTime<Local>, date2: DateTime<Local>) -> bool {
    date1.date_naive() == date2.date_naive()
}

/// Resolve a wall-clock date and time in the local zone.
///
/// Ambiguous times take the earlier instant; times inside a DST gap are read
/// as if they were UTC offsets of the local zone, which lands just past the gap.
pub fn local_datetime(date: NaiveDate, time: NaiveTime) -> DateTime<Local> {
    resolve_local(date.and_time(time))
}

pub fn resolve_local(naive: NaiveDateTime) -> DateTime<Local> {
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => Local.from_utc_datetime(&naive),
    }
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Local> {
    local_datetime(date, NaiveTime::MIN)
}

/// `hour:minute` on `date`; minutes past 23:59 roll into the next day.
pub fn at_minutes_from_midnight(date: NaiveDate, minutes: u32) -> DateTime<Local> {
    let naive = date.and_time(NaiveTime::MIN) + chrono::Duration::minutes(minutes as i64);
    resolve_local(naive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_start_of_day() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let start = start_of_day(date);
        assert_eq!(start.date_naive(), date);
        assert_eq!(start.hour(), 0);
        assert_eq!(start.minute(), 0);
    }

    #[test]
    fn test_at_minutes_from_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let dt = at_minutes_from_midnight(date, 14 * 60 + 45);
        assert_eq!((dt.hour(), dt.minute()), (14, 45));
    }

    #[test]
    fn test_is_same_day() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
        let morning = at_minutes_from_midnight(date, 60);
        let evening = at_minutes_from_midnight(date, 23 * 60);
        assert!(is_same_day(morning, evening));
    }
}
