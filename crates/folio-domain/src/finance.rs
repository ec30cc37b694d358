//! Finance tracker entries.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

/// A single income/expense/... movement recorded in the finance tracker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FinanceRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: FinanceType,
    pub amount: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

impl FinanceRecord {
    pub fn new(
        kind: FinanceType,
        amount: f64,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            category: category.into(),
            description: None,
            date,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Identifiable for FinanceRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for FinanceRecord {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn field(&self, field: RecordField) -> Option<String> {
        match field {
            RecordField::Type => Some(self.kind.to_string()),
            RecordField::Category => Some(self.category.clone()),
            RecordField::Status | RecordField::Mood => None,
        }
    }

    fn amount(&self) -> Option<f64> {
        Some(self.amount)
    }
}

impl Searchable for FinanceRecord {
    fn matches_text(&self, needle: &str) -> bool {
        self.category.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(needle))
    }
}

/// Closed set of finance entry types. Declaration order is the dashboard order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FinanceType {
    Income,
    Expense,
    Saving,
    Investment,
    Debt,
    Loan,
    Other,
}

impl FinanceType {
    pub const ALL: [FinanceType; 7] = [
        FinanceType::Income,
        FinanceType::Expense,
        FinanceType::Saving,
        FinanceType::Investment,
        FinanceType::Debt,
        FinanceType::Loan,
        FinanceType::Other,
    ];

    /// Contribution sign of this type to the dashboard balance. `Other` is excluded.
    pub fn balance_sign(self) -> f64 {
        match self {
            FinanceType::Income | FinanceType::Saving | FinanceType::Investment => 1.0,
            FinanceType::Expense | FinanceType::Debt | FinanceType::Loan => -1.0,
            FinanceType::Other => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FinanceType::Income => "income",
            FinanceType::Expense => "expense",
            FinanceType::Saving => "saving",
            FinanceType::Investment => "investment",
            FinanceType::Debt => "debt",
            FinanceType::Loan => "loan",
            FinanceType::Other => "other",
        }
    }
}

impl fmt::Display for FinanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinanceType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        FinanceType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown finance type `{value}`"))
    }
}
