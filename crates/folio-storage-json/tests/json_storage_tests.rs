use chrono::{TimeZone, Utc};
use folio_core::{storage::RecordStorage, CoreError};
use folio_domain::{FinanceRecord, FinanceType, JournalEntry, RecordBook};
use folio_storage_json::{load_book_from_path, JsonRecordStorage};
use tempfile::tempdir;

fn sample_book(name: &str) -> RecordBook {
    let date = Utc.with_ymd_and_hms(2024, 2, 29, 10, 0, 0).unwrap();
    let mut book = RecordBook::new(name);
    book.add_finance(FinanceRecord::new(FinanceType::Income, 10.5, "Freelance", date));
    book.add_journal(JournalEntry::new("Leap day", "amused", date));
    book
}

#[test]
fn json_storage_can_save_and_load_book() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonRecordStorage::new(dir.path().join("books")).expect("create storage");
    let book = sample_book("Home Finance");

    storage.save_book("Home Finance", &book).expect("save book");
    let loaded = storage.load_book("home finance").expect("load book");

    assert_eq!(loaded, book);
    let path = storage.book_path("Home Finance");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("home_finance.json"));
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn json_storage_lists_and_deletes_books() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonRecordStorage::new(dir.path().join("books")).expect("create storage");
    storage.save_book("work", &sample_book("Work")).expect("save");
    storage.save_book("home", &sample_book("Home")).expect("save");

    assert_eq!(storage.list_books().expect("list"), vec!["home", "work"]);
    let metadata = storage.list_book_metadata().expect("metadata");
    assert_eq!(metadata[0].name, "Home");
    assert_eq!(metadata[0].finance_count, 1);
    assert_eq!(metadata[0].journal_count, 1);

    storage.delete_book("work").expect("delete");
    assert_eq!(storage.list_books().expect("list"), vec!["home"]);
    assert!(matches!(
        storage.delete_book("work"),
        Err(CoreError::BookNotFound(_))
    ));
}

#[test]
fn missing_book_is_reported_by_name() {
    let dir = tempdir().expect("tempdir");
    let storage = JsonRecordStorage::new(dir.path().join("books")).expect("create storage");
    let err = storage.load_book("ghost").expect_err("missing book");
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn newer_schema_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("future.json");
    let mut book = sample_book("Future");
    book.schema_version = 99;
    std::fs::write(&path, serde_json::to_string(&book).unwrap()).expect("write");

    let err = load_book_from_path(&path).expect_err("future schema");
    assert!(matches!(err, CoreError::Storage(_)));
    assert!(err.to_string().contains("v99"));
}

#[test]
fn corrupt_file_surfaces_serialization_error() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("write");
    assert!(matches!(
        load_book_from_path(&path),
        Err(CoreError::Serialization(_))
    ));
}
