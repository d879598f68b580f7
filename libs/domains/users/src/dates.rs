//! Date of birth codec and age calculation.
//!
//! Dates travel over the wire as `YYYY-MM-DD` and nothing else. The parser is
//! strict about the shape before handing the text to chrono, since chrono's
//! `%Y`/`%m`/`%d` specifiers also accept unpadded or signed values.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// The only accepted date layout.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("date must use the YYYY-MM-DD format, got '{0}'")]
    InvalidFormat(String),

    #[error("'{0}' is not a valid calendar date")]
    InvalidDate(String),
}

/// Parse a `YYYY-MM-DD` string into a calendar date.
///
/// Rejects anything that is not exactly four digits, a dash, two digits, a
/// dash and two digits, as well as dates that do not exist (`2023-02-29`).
pub fn parse_date(text: &str) -> Result<NaiveDate, DateError> {
    if !has_date_shape(text) {
        return Err(DateError::InvalidFormat(text.to_string()));
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| DateError::InvalidDate(text.to_string()))
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn has_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Age in completed years on `today` for someone born on `birth`.
///
/// One year is subtracted when `today`'s (month, day) sorts before the birth
/// (month, day). February 29 is compared as a plain pair, so in common years
/// the birthday is reached on March 1.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth.year();

    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years - 1
    } else {
        years
    }
}
