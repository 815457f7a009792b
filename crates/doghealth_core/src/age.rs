//! Age calculation from a birth date.
//!
//! # Invariants
//! - Uses calendar arithmetic: a year is "birthday advanced by one year",
//!   never a fixed number of days. Feb 29 birthdays anniversary on Feb 28 in
//!   common years.
//! - `days` counts calendar days since the most recent anniversary on or
//!   before the reference date, so it is `0` on the anniversary itself.
//! - Never panics; a birthday after the reference date is flagged rather
//!   than producing negative values.

use chrono::{Datelike, Months, NaiveDate};
use std::fmt::{Display, Formatter};

/// Result of [`age`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeResult {
    /// No birthday recorded.
    Unknown,
    /// Birthday lies after the reference date.
    FutureBirthday,
    /// Whole years plus days since the last birthday.
    Known { years: u32, days: u32 },
}

impl Display for AgeResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => f.write_str("Unknown age"),
            Self::FutureBirthday => f.write_str("Birthday is in the future"),
            Self::Known { years, days } => write!(f, "{years} years and {days} days"),
        }
    }
}

/// Computes the age of a dog born on `birthday` as of `as_of`.
pub fn age(birthday: Option<NaiveDate>, as_of: NaiveDate) -> AgeResult {
    let Some(birthday) = birthday else {
        return AgeResult::Unknown;
    };
    if birthday > as_of {
        return AgeResult::FutureBirthday;
    }

    let mut years = u32::try_from(as_of.year() - birthday.year()).unwrap_or(0);
    let anchor = loop {
        match anniversary(birthday, years) {
            Some(anchor) if anchor <= as_of => break anchor,
            _ if years > 0 => years -= 1,
            _ => break birthday,
        }
    };

    let days = u32::try_from((as_of - anchor).num_days()).unwrap_or(0);
    AgeResult::Known { years, days }
}

/// `birthday` advanced by `years` calendar years, clamped to month end.
fn anniversary(birthday: NaiveDate, years: u32) -> Option<NaiveDate> {
    let months = years.checked_mul(12)?;
    birthday.checked_add_months(Months::new(months))
}
