//! To-do list items.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TodoRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TodoStatus,
    pub due_date: DateTime<Utc>,
}

impl TodoRecord {
    pub fn new(title: impl Into<String>, status: TodoStatus, due_date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            status,
            due_date,
        }
    }
}

impl Identifiable for TodoRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for TodoRecord {
    fn date(&self) -> DateTime<Utc> {
        self.due_date
    }

    fn field(&self, field: RecordField) -> Option<String> {
        match field {
            RecordField::Status => Some(self.status.to_string()),
            _ => None,
        }
    }
}

impl Searchable for TodoRecord {
    fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|text| text.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TodoStatus {
    Pending,
    InProgress,
    Completed,
}

impl TodoStatus {
    pub const ALL: [TodoStatus; 3] = [
        TodoStatus::Pending,
        TodoStatus::InProgress,
        TodoStatus::Completed,
    ];
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TodoStatus::Pending => "pending",
            TodoStatus::InProgress => "in-progress",
            TodoStatus::Completed => "completed",
        };
        f.write_str(label)
    }
}
