//! Age-of-majority check with an injectable clock

use chrono::{DateTime, Datelike, Local, NaiveDate};

/// Minimum age in whole years for account opening
pub const MINIMUM_AGE: i32 = 18;

/// Accepted plain date layouts, tried in order
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Source of the current calendar date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the local calendar date from the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Parse a date of birth. RFC 3339 timestamps contribute their date part.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Whole years between `dob` and `today`
///
/// One year is subtracted while today's (month, day) is strictly before the
/// birthday's, so the birthday itself counts as having occurred.
pub fn age_in_years(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Whether the person born on `date` is at least `min_years` old today
pub fn is_at_least(date: &str, min_years: i32, clock: &impl Clock) -> bool {
    match parse_date(date) {
        Some(dob) => age_in_years(dob, clock.today()) >= min_years,
        None => false,
    }
}

/// Whether the person born on `date` is at least 18 today
pub fn is_at_least_18(date: &str, clock: &impl Clock) -> bool {
    is_at_least(date, MINIMUM_AGE, clock)
}
