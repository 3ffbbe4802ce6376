//! CSV source file adapter.
//!
//! Source files carry a header row and `MM/DD/YYYY` dates; dates are parsed
//! here so the store only ever sees `chrono` dates it can render as ISO-8601.

use crate::domain::error::StocklensError;
use crate::domain::price_bar::PriceBar;
use crate::ports::source_port::SourcePort;
use chrono::NaiveDate;
use std::fs;
use std::path::Path;

pub struct CsvSourceAdapter;

impl CsvSourceAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvSourceAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn read_error(path: &Path, reason: String) -> StocklensError {
    StocklensError::SourceRead {
        file: path.display().to_string(),
        reason,
    }
}

fn field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    column: &str,
    path: &Path,
) -> Result<&'r str, StocklensError> {
    record
        .get(index)
        .ok_or_else(|| read_error(path, format!("missing {column} column")))
}

fn real(
    record: &csv::StringRecord,
    index: usize,
    column: &str,
    path: &Path,
) -> Result<f64, StocklensError> {
    field(record, index, column, path)?
        .trim()
        .parse()
        .map_err(|e| read_error(path, format!("invalid {column} value: {e}")))
}

impl SourcePort for CsvSourceAdapter {
    fn read_bars(&self, path: &Path) -> Result<Vec<PriceBar>, StocklensError> {
        let content = fs::read_to_string(path)
            .map_err(|e| read_error(path, format!("failed to read file: {e}")))?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| read_error(path, format!("CSV parse error: {e}")))?;

            let date_str = field(&record, 0, "date", path)?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%m/%d/%Y")
                .map_err(|e| read_error(path, format!("invalid date {date_str:?}: {e}")))?;

            bars.push(PriceBar {
                date,
                open: real(&record, 1, "open", path)?,
                high: real(&record, 2, "high", path)?,
                low: real(&record, 3, "low", path)?,
                close: real(&record, 4, "close", path)?,
                volume: real(&record, 5, "volume", path)?,
            });
        }

        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn reads_rows_and_normalizes_dates() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "MSFT.csv",
            "Date,Open,High,Low,Close,Volume\n\
             01/15/2024,100.0,110.0,90.0,105.0,50000\n\
             01/16/2024,105.0,115.0,100.0,110.0,60000\n",
        );

        let bars = CsvSourceAdapter::new().read_bars(&path).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].close, 105.0);
        assert_eq!(bars[1].volume, 60000.0);
    }

    #[test]
    fn header_row_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "msft.csv",
            "Date,Open,High,Low,Close,Volume\n01/15/2024,1,2,0.5,1.5,10\n",
        );

        let bars = CsvSourceAdapter::new().read_bars(&path).unwrap();
        assert_eq!(bars.len(), 1);
    }

    #[test]
    fn iso_date_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "msft.csv",
            "Date,Open,High,Low,Close,Volume\n2024-01-15,1,2,0.5,1.5,10\n",
        );

        let result = CsvSourceAdapter::new().read_bars(&path);
        assert!(matches!(result, Err(StocklensError::SourceRead { .. })));
    }

    #[test]
    fn malformed_number_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "msft.csv",
            "Date,Open,High,Low,Close,Volume\n01/15/2024,abc,2,0.5,1.5,10\n",
        );

        let result = CsvSourceAdapter::new().read_bars(&path);
        assert!(matches!(result, Err(StocklensError::SourceRead { .. })));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = CsvSourceAdapter::new().read_bars(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(StocklensError::SourceRead { .. })));
    }

    #[test]
    fn empty_file_with_header_yields_no_bars() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "msft.csv", "Date,Open,High,Low,Close,Volume\n");

        let bars = CsvSourceAdapter::new().read_bars(&path).unwrap();
        assert!(bars.is_empty());
    }
}
