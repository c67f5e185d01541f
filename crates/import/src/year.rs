//! Year inference for transaction dates printed without one.
//!
//! Statements list `14 AUG` style dates. The year comes from the statement
//! period: normally the year of the closing date, except when the statement
//! closes early in a year and the transaction month is late in a year, in
//! which case the statement straddles New Year and the transaction belongs
//! to the opening date's year.
//!
//! Known limitation: the June threshold is empirical. Statements covering
//! more than one year boundary, or starting near June, can get the wrong year.

use chrono::{Datelike, NaiveDate, Utc};
use folio_core::StatementPeriod;

/// Closing months before this, with transaction months after it, roll the
/// transaction back to the opening year.
pub const ROLLBACK_THRESHOLD_MONTH: u32 = 6;

/// A transaction date as printed on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDate {
    DayMonth { day: u32, month: u32 },
    Full(NaiveDate),
}

impl LineDate {
    pub fn month(self) -> u32 {
        match self {
            LineDate::DayMonth { month, .. } => month,
            LineDate::Full(d) => d.month(),
        }
    }
}

/// Year used when the period is incomplete: the closing year, else the
/// opening year, else `default_year`, else the current year.
pub fn fallback_year(period: &StatementPeriod, default_year: Option<i32>) -> i32 {
    period
        .to_date
        .or(period.from_date)
        .map(|d| d.year())
        .or(default_year)
        .unwrap_or_else(|| Utc::now().year())
}

/// Year for a transaction in `month` given a fully known period.
pub fn year_within(from: NaiveDate, to: NaiveDate, month: u32) -> i32 {
    if to.month() < ROLLBACK_THRESHOLD_MONTH && month > ROLLBACK_THRESHOLD_MONTH {
        from.year()
    } else {
        to.year()
    }
}

/// Resolve a line date to a calendar date. `None` only for day/month pairs
/// that do not exist in the chosen year (29 Feb outside a leap year).
pub fn resolve(date: LineDate, period: &StatementPeriod, fallback: i32) -> Option<NaiveDate> {
    match date {
        LineDate::Full(d) => Some(d),
        LineDate::DayMonth { day, month } => {
            let year = match period.range() {
                Some(range) => year_within(range.start, range.end, month),
                None => fallback,
            };
            NaiveDate::from_ymd_opt(year, month, day)
        }
    }
}
