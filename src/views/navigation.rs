use chrono::{Datelike, Duration, NaiveDate};

use super::ViewType;

/// Move the anchor date one step of the view's granularity.
///
/// Month steps keep the day-of-month where possible, clamping to the last
/// day of shorter months (Jan 31 + 1 month = Feb 29 in a leap year).
pub fn step(view: ViewType, anchor: NaiveDate, delta: i32) -> NaiveDate {
    match view {
        ViewType::Day => anchor + Duration::days(delta as i64),
        ViewType::Week => anchor + Duration::weeks(delta as i64),
        ViewType::Month => shift_month_preserving_day(anchor, delta),
    }
}

pub fn shift_month_preserving_day(current: NaiveDate, delta_months: i32) -> NaiveDate {
    let total_months = (current.year() * 12) + (current.month() as i32 - 1) + delta_months;
    let new_year = total_months.div_euclid(12);
    let new_month = total_months.rem_euclid(12) + 1;
    clamp_day(new_year, new_month as u32, current.day()).unwrap_or(current)
}

fn clamp_day(year: i32, month: u32, desired_day: u32) -> Option<NaiveDate> {
    let max_day = last_day_of_month(year, month);
    NaiveDate::from_ymd_opt(year, month, desired_day.min(max_day))
}

pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(28)
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn get_week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64 + 7) % 7;
    date - Duration::days(offset)
}

pub fn week_dates(date: NaiveDate, first_day_of_week: u8) -> Vec<NaiveDate> {
    let start = get_week_start(date, first_day_of_week);
    (0..7).map(|offset| start + Duration::days(offset)).collect()
}
