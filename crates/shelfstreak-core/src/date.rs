//! Calendar dates and the clock that produces "today".
//!
//! Streak continuity is measured in UTC calendar days, never in elapsed
//! wall-clock time. A [`CalendarDate`] has no time-of-day component and is
//! only turned into a string at the storage edge (`YYYY-MM-DD`).

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

const ISO_FORMAT: &str = "%Y-%m-%d";

/// A calendar date in the fixed reference timezone (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from year/month/day, `None` if it does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse an ISO `YYYY-MM-DD` string.
    pub fn parse_iso(value: &str) -> Result<Self, ValidationError> {
        NaiveDate::parse_from_str(value.trim(), ISO_FORMAT)
            .map(Self)
            .map_err(|e| ValidationError::invalid("date", format!("'{value}' is not a YYYY-MM-DD date: {e}")))
    }

    /// The date immediately following this one.
    ///
    /// Saturates at the last representable date instead of panicking.
    pub fn next_day(self) -> Self {
        self.0.checked_add_days(Days::new(1)).map(Self).unwrap_or(self)
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).num_days()
    }

    pub fn to_iso_string(self) -> String {
        self.0.format(ISO_FORMAT).to_string()
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for CalendarDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_iso(s)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_FORMAT))
    }
}

/// Source of the current calendar date.
///
/// Handlers read it once per command so a single invocation never
/// straddles a date boundary.
pub trait Clock: Send + Sync {
    fn today(&self) -> CalendarDate;
}

/// Today's date according to the system clock, in UTC.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate(Utc::now().date_naive())
    }
}

/// A clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}
