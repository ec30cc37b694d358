//! The persisted document holding every back-office collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{FinanceRecord, JournalEntry, TodoRecord};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordBook {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub finance: Vec<FinanceRecord>,
    #[serde(default)]
    pub todos: Vec<TodoRecord>,
    #[serde(default)]
    pub journal: Vec<JournalEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "RecordBook::schema_version_default")]
    pub schema_version: u8,
}

impl RecordBook {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            finance: Vec::new(),
            todos: Vec::new(),
            journal: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_finance(&mut self, record: FinanceRecord) -> Uuid {
        let id = record.id;
        self.finance.push(record);
        self.touch();
        id
    }

    pub fn add_todo(&mut self, record: TodoRecord) -> Uuid {
        let id = record.id;
        self.todos.push(record);
        self.touch();
        id
    }

    pub fn add_journal(&mut self, entry: JournalEntry) -> Uuid {
        let id = entry.id;
        self.journal.push(entry);
        self.touch();
        id
    }

    pub fn record_count(&self) -> usize {
        self.finance.len() + self.todos.len() + self.journal.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
