//! Timeframes and the per-session decision context.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::compliance::{ComplianceSet, Standard};

/// A half-open date range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Timeframe {
    /// Create a timeframe. Returns `None` unless `start < end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// The calendar year `year`.
    pub fn year(year: i32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)?;
        Self::new(start, end)
    }

    /// The current calendar year (UTC).
    pub fn current_year() -> Self {
        let year = Utc::now().year();
        Self::year(year).unwrap_or(Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        })
    }

    pub fn includes(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Self::current_year()
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    /// Parses `START/END` (ISO dates) or a bare year such as `2011`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(year) = s.parse::<i32>() {
            return Self::year(year).ok_or_else(|| format!("invalid year '{s}'"));
        }
        let (start, end) = s
            .split_once('/')
            .ok_or_else(|| format!("invalid timeframe '{s}' (expected START/END or YEAR)"))?;
        let parse = |d: &str| {
            NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d")
                .map_err(|e| format!("invalid date '{d}': {e}"))
        };
        let (start, end) = (parse(start)?, parse(end)?);
        Self::new(start, end).ok_or_else(|| format!("timeframe '{s}' ends before it starts"))
    }
}

/// Global inputs shared by every quorum in a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub timeframe: Timeframe,
    /// Standards every selected method must comply with. Empty means any method.
    pub compliance: ComplianceSet,
}

impl Context {
    pub fn new(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            compliance: ComplianceSet::new(),
        }
    }

    pub fn complying_with(mut self, standards: impl IntoIterator<Item = Standard>) -> Self {
        self.compliance.extend(standards);
        self
    }
}
