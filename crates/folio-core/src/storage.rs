use std::{collections::HashSet, path::Path};

use folio_domain::{Identifiable, RecordBook};
use uuid::Uuid;

use crate::CoreError;

/// Abstraction over persistence backends capable of storing record books.
pub trait RecordStorage: Send + Sync {
    fn save_book(&self, name: &str, book: &RecordBook) -> Result<(), CoreError>;
    fn load_book(&self, name: &str) -> Result<RecordBook, CoreError>;
    fn list_books(&self) -> Result<Vec<String>, CoreError>;
    fn delete_book(&self, name: &str) -> Result<(), CoreError>;
    fn save_book_to_path(&self, book: &RecordBook, path: &Path) -> Result<(), CoreError>;
    fn load_book_from_path(&self, path: &Path) -> Result<RecordBook, CoreError>;
}

/// Detects malformed records that aggregation would silently accept.
pub fn book_warnings(book: &RecordBook) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut seen: HashSet<Uuid> = HashSet::new();
    let ids = book
        .finance
        .iter()
        .map(Identifiable::id)
        .chain(book.todos.iter().map(Identifiable::id))
        .chain(book.journal.iter().map(Identifiable::id));
    for id in ids {
        if !seen.insert(id) {
            warnings.push(format!("duplicate record id {id}"));
        }
    }

    for record in &book.finance {
        if !record.amount.is_finite() {
            warnings.push(format!(
                "finance record {} has non-finite amount {}",
                record.id, record.amount
            ));
        }
        if record.category.trim().is_empty() {
            warnings.push(format!("finance record {} has no category", record.id));
        }
    }
    for entry in &book.journal {
        if entry.mood.trim().is_empty() {
            warnings.push(format!("journal entry {} has no mood", entry.id));
        }
    }
    warnings
}
