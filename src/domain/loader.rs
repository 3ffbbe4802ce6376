//! Instrument loading service.
//!
//! Replaces the instrument table named after a source file with the file's
//! rows. Destructive by design: reloading the same file is idempotent, and a
//! failed ingestion leaves an empty created table rather than a stale one.

use crate::domain::error::StocklensError;
use crate::domain::instrument::table_name_from_path;
use crate::ports::source_port::SourcePort;
use crate::ports::store_port::StorePort;
use std::path::Path;
use tracing::{info, warn};

/// Outcome of a single load call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub table: String,
    pub rows_inserted: usize,
}

pub struct Loader<'a> {
    store: &'a dyn StorePort,
    source: &'a dyn SourcePort,
}

impl<'a> Loader<'a> {
    pub fn new(store: &'a dyn StorePort, source: &'a dyn SourcePort) -> Self {
        Self { store, source }
    }

    /// Load one source file into its derived instrument table.
    ///
    /// The table is dropped and recreated before the source is read, so the
    /// end state after any ingestion failure is an empty table, never a
    /// half-written or stale one. Ingestion errors (unreadable file, bad
    /// date, bad number) are logged and contained: the call returns a
    /// zero-row summary. Store errors propagate.
    pub fn load_instrument(&self, path: &Path) -> Result<LoadSummary, StocklensError> {
        let table = table_name_from_path(path)?;

        self.store.replace_table(&table)?;

        let bars = match self.source.read_bars(path) {
            Ok(bars) => bars,
            Err(e) => {
                warn!(table = %table, file = %path.display(), error = %e, "ingestion failed, table left empty");
                return Ok(LoadSummary {
                    table,
                    rows_inserted: 0,
                });
            }
        };

        let rows_inserted = self.store.insert_bars(&table, &bars)?;
        info!(table = %table, rows = rows_inserted, "instrument loaded");

        Ok(LoadSummary {
            table,
            rows_inserted,
        })
    }
}
