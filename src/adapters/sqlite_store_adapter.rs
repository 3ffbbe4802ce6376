//! SQLite store adapter.
//!
//! One table per instrument, named by the sanitized instrument identifier.
//! Table names cannot be bound as statement parameters, so every identifier
//! is re-checked against the allow-list and double-quoted before it reaches
//! query text; day counts are bound as `DATE` modifier parameters.

use crate::domain::error::StocklensError;
use crate::domain::instrument::is_safe_identifier;
use crate::domain::price_bar::PriceBar;
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::StorePort;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

pub struct SqliteStoreAdapter {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteStoreAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, StocklensError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| StocklensError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("sqlite", "pool_size", 4) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool =
            Pool::builder()
                .max_size(pool_size)
                .build(manager)
                .map_err(|e: r2d2::Error| StocklensError::Database {
                    reason: e.to_string(),
                })?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, StocklensError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e: r2d2::Error| StocklensError::Database {
                reason: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, StocklensError> {
        self.pool
            .get()
            .map_err(|e: r2d2::Error| StocklensError::Database {
                reason: e.to_string(),
            })
    }

    /// Quote `name` for use as a schema object identifier. Only names that
    /// pass the allow-list are accepted, which also guarantees the quoted
    /// form contains no quoting metacharacters.
    fn quoted_table(name: &str) -> Result<String, StocklensError> {
        if !is_safe_identifier(name) {
            return Err(StocklensError::InvalidInstrumentName {
                source_name: name.to_string(),
            });
        }
        Ok(format!("\"{name}\""))
    }
}

impl StorePort for SqliteStoreAdapter {
    fn replace_table(&self, name: &str) -> Result<(), StocklensError> {
        let table = Self::quoted_table(name)?;
        let conn = self.conn()?;

        conn.execute_batch(&format!(
            "DROP TABLE IF EXISTS {table};
             CREATE TABLE {table} (
                Date TEXT NOT NULL,
                Open REAL,
                High REAL,
                Low REAL,
                Close REAL,
                Volume REAL
            );"
        ))
        .map_err(|e: rusqlite::Error| StocklensError::DatabaseQuery {
            reason: e.to_string(),
        })?;

        Ok(())
    }

    fn insert_bars(&self, name: &str, bars: &[PriceBar]) -> Result<usize, StocklensError> {
        let table = Self::quoted_table(name)?;
        let mut conn = self.conn()?;

        let tx =
            conn.transaction()
                .map_err(|e: rusqlite::Error| StocklensError::DatabaseQuery {
                    reason: e.to_string(),
                })?;

        {
            let mut stmt = tx
                .prepare(&format!(
                    "INSERT INTO {table} (Date, Open, High, Low, Close, Volume)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
                ))
                .map_err(|e: rusqlite::Error| StocklensError::DatabaseQuery {
                    reason: e.to_string(),
                })?;

            for bar in bars {
                stmt.execute(params![
                    bar.date.format("%Y-%m-%d").to_string(),
                    bar.open,
                    bar.high,
                    bar.low,
                    bar.close,
                    bar.volume
                ])
                .map_err(|e: rusqlite::Error| StocklensError::DatabaseQuery {
                    reason: e.to_string(),
                })?;
            }
        }

        // Dropping an uncommitted transaction rolls back, so a failed batch
        // leaves the freshly created table empty.
        tx.commit()
            .map_err(|e: rusqlite::Error| StocklensError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        Ok(bars.len())
    }

    fn list_instruments(&self) -> Result<Vec<String>, StocklensError> {
        let conn = self.conn()?;

        let mut stmt = conn
            .prepare(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                 ORDER BY name",
            )
            .map_err(|e: rusqlite::Error| StocklensError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let rows = stmt
            .query_map([], |row| row.get(0))
            .map_err(|e: rusqlite::Error| StocklensError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let mut names = Vec::new();
        for row in rows {
            names.push(
                row.map_err(|e: rusqlite::Error| StocklensError::DatabaseQuery {
                    reason: e.to_string(),
                })?,
            );
        }

        Ok(names)
    }

    fn window_average_close(
        &self,
        name: &str,
        days: u32,
    ) -> Result<Option<f64>, StocklensError> {
        let table = Self::quoted_table(name)?;
        let conn = self.conn()?;

        let query = format!(
            "SELECT AVG(Close) FROM {table}
             WHERE Date >= DATE((SELECT MAX(Date) FROM {table}), ?1)"
        );

        conn.query_row(&query, params![format!("-{days} days")], |row| row.get(0))
            .map_err(|e: rusqlite::Error| StocklensError::DatabaseQuery {
                reason: e.to_string(),
            })
    }

    fn window_closes(&self, name: &str, days: u32) -> Result<Vec<f64>, StocklensError> {
        let table = Self::quoted_table(name)?;
        let conn = self.conn()?;

        let query = format!(
            "SELECT Close FROM {table}
             WHERE Date >= DATE((SELECT MAX(Date) FROM {table}), ?1)
             ORDER BY Date ASC"
        );

        let mut stmt =
            conn.prepare(&query)
                .map_err(|e: rusqlite::Error| StocklensError::DatabaseQuery {
                    reason: e.to_string(),
                })?;

        let rows = stmt
            .query_map(params![format!("-{days} days")], |row| row.get(0))
            .map_err(|e: rusqlite::Error| StocklensError::DatabaseQuery {
                reason: e.to_string(),
            })?;

        let mut closes = Vec::new();
        for row in rows {
            closes.push(
                row.map_err(|e: rusqlite::Error| StocklensError::DatabaseQuery {
                    reason: e.to_string(),
                })?,
            );
        }

        Ok(closes)
    }
}
