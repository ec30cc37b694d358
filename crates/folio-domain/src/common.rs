//! Shared traits and enums implemented by every dashboard record.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exposes a stable identifier for entities stored in a record book.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// A dated record that can be filtered by period and grouped by a field.
pub trait Record {
    /// Timestamp used for period filtering (`date` or `due_date`).
    fn date(&self) -> DateTime<Utc>;

    /// Value of the requested discriminant, or `None` when the record does not carry it.
    fn field(&self, field: RecordField) -> Option<String>;

    /// Numeric weight used by summing reductions. Records without one count as zero.
    fn amount(&self) -> Option<f64> {
        None
    }
}

/// Records that support free-text search in list views.
pub trait Searchable {
    /// Returns `true` when `needle` (already lower-cased) occurs in the record's text.
    fn matches_text(&self, needle: &str) -> bool;
}

/// Record attribute used to group records for aggregation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecordField {
    Type,
    Category,
    Status,
    Mood,
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordField::Type => "type",
            RecordField::Category => "category",
            RecordField::Status => "status",
            RecordField::Mood => "mood",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError(pub String);

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown record field `{}` (expected type, category, status or mood)",
            self.0
        )
    }
}

impl std::error::Error for ParseFieldError {}

impl FromStr for RecordField {
    type Err = ParseFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "type" | "kind" => Ok(RecordField::Type),
            "category" => Ok(RecordField::Category),
            "status" => Ok(RecordField::Status),
            "mood" => Ok(RecordField::Mood),
            other => Err(ParseFieldError(other.to_string())),
        }
    }
}
