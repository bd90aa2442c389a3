//!  Nomad Rental Search
//!
//!  Copyright (C) 2026  Nomad Camper Hire
//!
//!  This program is free software: you can redistribute it and/or modify
//!  it under the terms of the GNU Affero General Public License as published by
//!  the Free Software Foundation, either version 3 of the License, or
//!  (at your option) any later version.
//!
//!  This program is distributed in the hope that it will be useful,
//!  but WITHOUT ANY WARRANTY; without even the implied warranty of
//!  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//!  GNU Affero General Public License for more details.
//!
//!  You should have received a copy of the GNU Affero General Public License
//!  along with this program.  If not, see <http://www.gnu.org/licenses/>.

//! # Date Parsing and Normalization
//!
//! Calendar-day values for the search form. Everything is normalized at day
//! granularity in UTC so the validation outcome cannot drift with the
//! submitter's local timezone.

use chrono::{DateTime, NaiveDate, Utc};

/// A date-like input: raw form text, an already-normalized day, or a UTC
/// timestamp from a richer source.
#[derive(Debug, Clone, Copy)]
pub enum DateInput<'a> {
    Text(&'a str),
    Day(NaiveDate),
    Stamp(DateTime<Utc>),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(text: &'a str) -> Self {
        DateInput::Text(text)
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(day: NaiveDate) -> Self {
        DateInput::Day(day)
    }
}

impl From<DateTime<Utc>> for DateInput<'_> {
    fn from(stamp: DateTime<Utc>) -> Self {
        DateInput::Stamp(stamp)
    }
}

/// Parse a `YYYY-MM-DD` form value into a calendar day.
///
/// Exactly three integer components are required, and the day must exist in
/// the calendar: `2024-02-30`, `2024-13-01` and `2024-00-10` all return
/// `None`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut components = text.split('-');
    let (year, month, day) = (
        components.next()?,
        components.next()?,
        components.next()?,
    );
    if components.next().is_some() {
        return None;
    }

    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Strip any time-of-day component, keeping the UTC calendar day.
/// Unparseable text yields `None`.
pub fn normalize<'a>(input: impl Into<DateInput<'a>>) -> Option<NaiveDate> {
    match input.into() {
        DateInput::Text(text) => parse_date(text),
        DateInput::Day(day) => Some(day),
        DateInput::Stamp(stamp) => Some(stamp.date_naive()),
    }
}

/// Today as a UTC calendar day, the reference for past-date checks.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
