#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub use stocklens::adapters::csv_source_adapter::CsvSourceAdapter;
pub use stocklens::adapters::sqlite_store_adapter::SqliteStoreAdapter;
pub use stocklens::domain::analyzer::Analyzer;
pub use stocklens::domain::loader::Loader;

/// Write a CSV source file with the engine's expected header and
/// `MM/DD/YYYY` dates. Rows are `(date, close)`; the other price columns
/// are derived from close, volume is fixed.
pub fn write_csv(dir: &TempDir, name: &str, rows: &[(&str, f64)]) -> PathBuf {
    let mut content = String::from("Date,Open,High,Low,Close,Volume\n");
    for (date, close) in rows {
        content.push_str(&format!(
            "{},{},{},{},{},1000\n",
            date,
            close - 1.0,
            close + 1.0,
            close - 2.0,
            close
        ));
    }
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

pub fn in_memory_store() -> SqliteStoreAdapter {
    SqliteStoreAdapter::in_memory().unwrap()
}
