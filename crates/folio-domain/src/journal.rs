//! Journal entries. Mood is free text, so it is an unbounded discriminant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub mood: String,
    pub date: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(title: impl Into<String>, mood: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: String::new(),
            mood: mood.into(),
            date,
        }
    }
}

impl Identifiable for JournalEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for JournalEntry {
    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn field(&self, field: RecordField) -> Option<String> {
        match field {
            RecordField::Mood => Some(self.mood.clone()),
            _ => None,
        }
    }
}

impl Searchable for JournalEntry {
    fn matches_text(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.content.to_lowercase().contains(needle)
    }
}
