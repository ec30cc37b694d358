//! Period tokens selected in dashboard filters and the intervals they resolve to.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Closed vocabulary of relative date windows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PeriodToken {
    Today,
    Yesterday,
    Week,
    Month,
    Year,
}

impl PeriodToken {
    pub const ALL: [PeriodToken; 5] = [
        PeriodToken::Today,
        PeriodToken::Yesterday,
        PeriodToken::Week,
        PeriodToken::Month,
        PeriodToken::Year,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PeriodToken::Today => "today",
            PeriodToken::Yesterday => "yesterday",
            PeriodToken::Week => "week",
            PeriodToken::Month => "month",
            PeriodToken::Year => "year",
        }
    }
}

impl fmt::Display for PeriodToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Raised when a string does not name a known period.
pub struct ParsePeriodError(pub String);

impl fmt::Display for ParsePeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown period `{}` (expected all, today, yesterday, week, month or year)",
            self.0
        )
    }
}

impl std::error::Error for ParsePeriodError {}

impl FromStr for PeriodToken {
    type Err = ParsePeriodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        PeriodToken::ALL
            .into_iter()
            .find(|token| token.as_str() == normalized)
            .ok_or(ParsePeriodError(normalized))
    }
}

/// Selection made in a dashboard filter: either no bound or a relative period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodFilter {
    #[default]
    All,
    Period(PeriodToken),
}

impl PeriodFilter {
    pub fn token(self) -> Option<PeriodToken> {
        match self {
            PeriodFilter::All => None,
            PeriodFilter::Period(token) => Some(token),
        }
    }
}

impl From<PeriodToken> for PeriodFilter {
    fn from(token: PeriodToken) -> Self {
        PeriodFilter::Period(token)
    }
}

impl fmt::Display for PeriodFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodFilter::All => f.write_str("all"),
            PeriodFilter::Period(token) => token.fmt(f),
        }
    }
}

impl FromStr for PeriodFilter {
    type Err = ParsePeriodError;

    /// Strict parse: `all` and the empty string mean no bound, anything else must be a token.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(PeriodFilter::All);
        }
        trimmed.parse().map(PeriodFilter::Period)
    }
}

/// Half-open time range `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, IntervalError> {
        if end < start {
            return Err(IntervalError::EndBeforeStart);
        }
        Ok(Self { start, end })
    }

    /// Includes `start`, excludes `end`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Errors that can occur when constructing [`Interval`] values.
pub enum IntervalError {
    EndBeforeStart,
}

impl fmt::Display for IntervalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalError::EndBeforeStart => f.write_str("interval end must not precede start"),
        }
    }
}

impl std::error::Error for IntervalError {}
