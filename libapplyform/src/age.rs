//! Age derivation from a date of birth
//!
//! The age is a display value: an empty string stands for "unknown" and is
//! returned for empty input, unparsable input, and dates in the future.

use chrono::{Datelike, Local, NaiveDate};

/// Compute the age in whole years for an ISO date (`YYYY-MM-DD`) as of today
pub fn compute_age(dob: &str) -> String {
    compute_age_on(dob, Local::now().date_naive())
}

/// Compute the age in whole years for an ISO date as of `today`
///
/// One year is subtracted when the birthday has not been reached yet in
/// `today`'s year. Never panics; returns an empty string instead of an error.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use libapplyform::age::compute_age_on;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
/// assert_eq!(compute_age_on("2000-06-15", today), "23");
/// ```
pub fn compute_age_on(dob: &str, today: NaiveDate) -> String {
    let dob = dob.trim();
    if dob.is_empty() {
        return String::new();
    }

    let born = match NaiveDate::parse_from_str(dob, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => return String::new(),
    };

    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }

    if years < 0 {
        String::new()
    } else {
        years.to_string()
    }
}
