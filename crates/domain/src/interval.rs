// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar-day intervals.
//!
//! Every date-only value in the system is an ISO `YYYY-MM-DD` string at the
//! boundaries and a `time::Date` inside. This module is the single place
//! where the two are converted, and where inclusive day ranges are expanded.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Month};

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(pub iso_date, Date, "[year]-[month]-[day]");

/// Parses an ISO `YYYY-MM-DD` date string.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid calendar date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), ISO_DATE).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as an ISO `YYYY-MM-DD` string.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Returns every calendar day from `start` to `end`, both inclusive.
///
/// An empty vector is returned when `end` is before `start`.
#[must_use]
pub fn days_in_span(start: Date, end: Date) -> Vec<Date> {
    let mut days: Vec<Date> = Vec::new();
    let mut current: Date = start;
    while current <= end {
        days.push(current);
        match current.next_day() {
            Some(next) => current = next,
            None => break,
        }
    }
    days
}

/// Returns the ISO dates from `start_date` to `end_date`, both inclusive.
///
/// This is a total function: an unparseable bound, or a start after the end,
/// yields an empty sequence rather than an error.
#[must_use]
pub fn days_between(start_date: &str, end_date: &str) -> Vec<String> {
    let (Ok(start), Ok(end)) = (parse_iso_date(start_date), parse_iso_date(end_date)) else {
        return Vec::new();
    };
    days_in_span(start, end)
        .into_iter()
        .map(format_iso_date)
        .collect()
}

/// Returns the first and last day of a calendar month.
///
/// # Errors
///
/// Returns an error if the year is outside the supported calendar range.
pub fn month_span(year: i32, month: Month) -> Result<(Date, Date), DomainError> {
    let first: Date = Date::from_calendar_date(year, month, 1).map_err(|e| {
        DomainError::DateParseError {
            date_string: format!("{year:04}-{:02}", u8::from(month)),
            error: e.to_string(),
        }
    })?;

    let next_year: i32 = if month == Month::December {
        year + 1
    } else {
        year
    };
    let last: Date = Date::from_calendar_date(next_year, month.next(), 1)
        .ok()
        .and_then(Date::previous_day)
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing the last day of {year:04}-{:02}", u8::from(month)),
        })?;

    Ok((first, last))
}

/// Parses a `YYYY-MM` month selector into its first and last day.
///
/// # Errors
///
/// Returns an error if the selector is malformed.
pub fn parse_month(value: &str) -> Result<(Date, Date), DomainError> {
    let first: Date = parse_iso_date(&format!("{}-01", value.trim()))?;
    month_span(first.year(), first.month())
}

/// An inclusive span of calendar days.
///
/// Used both for permission durations and for mission schedules. A span
/// whose `start` equals its `end` covers exactly one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateSpan {
    /// First day of the span.
    #[serde(with = "iso_date")]
    pub start: Date,
    /// Last day of the span (inclusive).
    #[serde(with = "iso_date")]
    pub end: Date,
}

impl DateSpan {
    /// Creates a new span, rejecting a start after the end.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `start` is after `end`.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidDateRange {
                start: format_iso_date(start),
                end: format_iso_date(end),
            });
        }
        Ok(Self { start, end })
    }

    /// Creates a span covering a single day.
    #[must_use]
    pub const fn single_day(day: Date) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    /// Parses a span from two ISO date strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is unparseable or the range is reversed.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        Self::new(parse_iso_date(start)?, parse_iso_date(end)?)
    }

    /// Returns whether `day` falls inside the span, by calendar day.
    #[must_use]
    pub fn contains(&self, day: Date) -> bool {
        self.start <= day && day <= self.end
    }

    /// Returns every day of the span in order.
    #[must_use]
    pub fn days(&self) -> Vec<Date> {
        days_in_span(self.start, self.end)
    }

    /// Returns the number of days covered by the span.
    #[must_use]
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }
}
