//! Inclusive day intervals.
//!
//! A visit occupies every calendar day between its arrival and departure
//! dates, both ends included. All interval logic in the calendar goes
//! through `DateSpan` so the containment rule lives in one place.

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::error::{StaycalError, StaycalResult};

/// An inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> StaycalResult<Self> {
        if end < start {
            return Err(StaycalError::InvalidDateRange { start, end });
        }
        Ok(DateSpan { start, end })
    }

    /// Whether `day` falls within the span, endpoints included.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Whether two spans share at least one day.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Iterate every day the span covers, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// Number of days covered. A single-day span counts as 1.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Parse YYYY-MM-DD into a date.
pub fn parse_date(s: &str) -> StaycalResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| StaycalError::DateParse(s.to_string()))
}

/// Parse HH:MM (or HH:MM:SS) into a time of day.
pub fn parse_time(s: &str) -> StaycalResult<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| StaycalError::TimeParse(s.to_string()))
}

/// Parse YYYY-MM into a (year, month) pair.
pub fn parse_month(s: &str) -> StaycalResult<(i32, u32)> {
    let parsed = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
        .map_err(|_| StaycalError::DateParse(s.to_string()))?;
    Ok((parsed.year(), parsed.month()))
}
