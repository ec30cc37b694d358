use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{DateTime, TimeZone, Utc};
use folio_core::storage::RecordStorage;
use folio_domain::{FinanceRecord, FinanceType, JournalEntry, RecordBook, TodoRecord, TodoStatus};
use folio_storage_json::JsonRecordStorage;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Keeps TempDir guards alive for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Wednesday 2024-05-15 noon UTC; the week runs Sunday 12th to Sunday 19th.
pub const NOW: &str = "2024-05-15T12:00:00Z";

fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap()
}

pub fn sample_book() -> RecordBook {
    let mut book = RecordBook::new("Home");
    book.add_finance(FinanceRecord::new(FinanceType::Income, 3000.0, "Salary", at(5, 13, 9)));
    book.add_finance(
        FinanceRecord::new(FinanceType::Expense, 120.0, "Groceries", at(5, 14, 18))
            .with_description("weekly shop"),
    );
    book.add_finance(FinanceRecord::new(FinanceType::Saving, 500.0, "Emergency", at(5, 1, 10)));
    book.add_finance(FinanceRecord::new(FinanceType::Expense, 80.0, "Fuel", at(4, 28, 8)));

    book.add_todo(TodoRecord::new("File taxes", TodoStatus::Completed, at(5, 15, 8)));
    book.add_todo(TodoRecord::new("Renew passport", TodoStatus::Pending, at(5, 20, 9)));
    book.add_todo(TodoRecord::new("Book dentist", TodoStatus::InProgress, at(5, 14, 9)));

    book.add_journal(JournalEntry::new("Sunny walk", "happy", at(5, 15, 7)));
    book.add_journal(JournalEntry::new("Long day", "tired", at(5, 14, 21)));
    book
}

/// Creates an isolated data directory holding `config` and the sample book as `home`.
pub fn setup_home(config: &str) -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    std::fs::write(base.join("config.json"), config).expect("write config");
    let storage = JsonRecordStorage::new(base.join("books")).expect("create storage");
    storage.save_book("home", &sample_book()).expect("save sample book");
    base
}

pub fn cli(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("folio_cli").expect("binary built");
    cmd.env("FOLIO_HOME", home)
        .env("NO_COLOR", "1")
        .env_remove("FOLIO_CLI_SCRIPT")
        .env_remove("RUST_LOG")
        .current_dir(home);
    cmd
}
