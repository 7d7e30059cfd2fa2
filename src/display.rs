//! Derived display values
//!
//! Pure functions from stored fields to what the pages show. They are called
//! while view models are assembled, so the persisted records stay free of
//! presentation concerns.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

pub const UNKNOWN: &str = "unknown";

/// "family_name, first_name", or empty unless both parts are present
pub fn author_name(first_name: &str, family_name: &str) -> String {
    if first_name.is_empty() || family_name.is_empty() {
        String::new()
    } else {
        format!("{}, {}", family_name, first_name)
    }
}

/// Difference of the calendar years of death and birth.
/// "unknown" when either date is missing.
pub fn author_lifespan(date_of_birth: Option<NaiveDate>, date_of_death: Option<NaiveDate>) -> String {
    match (date_of_birth, date_of_death) {
        (Some(birth), Some(death)) => (death.year() - birth.year()).to_string(),
        _ => UNKNOWN.to_string(),
    }
}

pub fn author_url(id: Uuid) -> String {
    format!("/catalog/author/{}", id)
}

pub fn book_url(id: Uuid) -> String {
    format!("/catalog/book/{}", id)
}

pub fn genre_url(id: Uuid) -> String {
    format!("/catalog/genre/{}", id)
}

pub fn book_instance_url(id: Uuid) -> String {
    format!("/catalog/bookinstance/{}", id)
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Long form such as "Dec 16th, 1775"
pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%b"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

pub fn long_date_or_unknown(date: Option<NaiveDate>) -> String {
    date.map(long_date).unwrap_or_else(|| UNKNOWN.to_string())
}

/// `YYYY-MM-DD`, the value format of HTML date inputs
pub fn input_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Empty when absent, so date inputs start blank
pub fn input_date_or_empty(date: Option<NaiveDate>) -> String {
    date.map(input_date).unwrap_or_default()
}
