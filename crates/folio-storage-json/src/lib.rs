//! folio-storage-json
//!
//! Filesystem JSON persistence for record books. Stands in for the document
//! database the dashboards query in production.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use folio_core::{
    storage::{book_warnings, RecordStorage},
    CoreError,
};
use folio_domain::{RecordBook, CURRENT_SCHEMA_VERSION};

const BOOK_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each record book as `<books_dir>/<slug>.json`.
#[derive(Debug, Clone)]
pub struct JsonRecordStorage {
    books_dir: PathBuf,
}

/// Listing row for a stored book.
#[derive(Debug, Clone)]
pub struct BookMetadata {
    pub slug: String,
    pub name: String,
    pub path: PathBuf,
    pub updated_at: DateTime<Utc>,
    pub finance_count: usize,
    pub todo_count: usize,
    pub journal_count: usize,
}

impl JsonRecordStorage {
    pub fn new(books_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&books_dir)?;
        Ok(Self { books_dir })
    }

    pub fn books_dir(&self) -> &Path {
        &self.books_dir
    }

    pub fn book_path(&self, name: &str) -> PathBuf {
        self.books_dir
            .join(format!("{}.{}", canonical_name(name), BOOK_EXTENSION))
    }

    pub fn list_book_metadata(&self) -> Result<Vec<BookMetadata>, CoreError> {
        let mut rows = Vec::new();
        for slug in self.list_books()? {
            let path = self.book_path(&slug);
            let book = load_book_from_path(&path)?;
            rows.push(BookMetadata {
                slug,
                name: book.name.clone(),
                path,
                updated_at: book.updated_at,
                finance_count: book.finance.len(),
                todo_count: book.todos.len(),
                journal_count: book.journal.len(),
            });
        }
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }
}

impl RecordStorage for JsonRecordStorage {
    fn save_book(&self, name: &str, book: &RecordBook) -> Result<(), CoreError> {
        save_book_to_path(book, &self.book_path(name))
    }

    fn load_book(&self, name: &str) -> Result<RecordBook, CoreError> {
        let path = self.book_path(name);
        if !path.exists() {
            return Err(CoreError::BookNotFound(name.to_string()));
        }
        load_book_from_path(&path)
    }

    fn list_books(&self) -> Result<Vec<String>, CoreError> {
        if !self.books_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.books_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(BOOK_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_book(&self, name: &str) -> Result<(), CoreError> {
        let path = self.book_path(name);
        if !path.exists() {
            return Err(CoreError::BookNotFound(name.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    fn save_book_to_path(&self, book: &RecordBook, path: &Path) -> Result<(), CoreError> {
        save_book_to_path(book, path)
    }

    fn load_book_from_path(&self, path: &Path) -> Result<RecordBook, CoreError> {
        load_book_from_path(path)
    }
}

/// Saves a book to an arbitrary path on disk.
pub fn save_book_to_path(book: &RecordBook, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(book)
        .map_err(|err| CoreError::Serialization(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a book, rejecting schemas newer than this build understands.
///
/// Anomalies that do not prevent loading are logged as warnings.
pub fn load_book_from_path(path: &Path) -> Result<RecordBook, CoreError> {
    let data = fs::read_to_string(path)?;
    let book: RecordBook =
        serde_json::from_str(&data).map_err(|err| CoreError::Serialization(err.to_string()))?;
    if book.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(CoreError::Storage(format!(
            "book `{}` uses schema v{} but only v{} is supported",
            book.name, book.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    for warning in book_warnings(&book) {
        tracing::warn!(path = %path.display(), "{warning}");
    }
    Ok(book)
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "book".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
