use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which end of a statement period a date belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Boundary {
    From,
    To,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::From => write!(f, "from"),
            Boundary::To => write!(f, "to"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The from/to dates a statement covers, as far as they have been found.
///
/// Each boundary is write-once: the first date recorded for a boundary
/// sticks for the rest of the parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPeriod {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
}

impl StatementPeriod {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, boundary: Boundary) -> Option<NaiveDate> {
        match boundary {
            Boundary::From => self.from_date,
            Boundary::To => self.to_date,
        }
    }

    pub fn is_set(&self, boundary: Boundary) -> bool {
        self.get(boundary).is_some()
    }

    /// Record `date` for `boundary`. Returns `false` (and changes nothing)
    /// when the boundary already holds a date.
    pub fn set(&mut self, boundary: Boundary, date: NaiveDate) -> bool {
        let slot = match boundary {
            Boundary::From => &mut self.from_date,
            Boundary::To => &mut self.to_date,
        };
        if slot.is_some() {
            return false;
        }
        *slot = Some(date);
        true
    }

    /// Both boundaries, once both are known.
    pub fn range(&self) -> Option<DateRange> {
        Some(DateRange::new(self.from_date?, self.to_date?))
    }
}
