//! Persistent store port trait.
//!
//! The store owns all durable state: one six-column table per instrument.
//! Identifier arguments must already be registry-validated (or freshly derived
//! through the allow-list filter); implementations re-check before splicing a
//! name into query text.

use crate::domain::error::StocklensError;
use crate::domain::price_bar::PriceBar;

pub trait StorePort {
    /// Drop any existing table named `name` and create it fresh with the
    /// fixed `Date/Open/High/Low/Close/Volume` schema.
    fn replace_table(&self, name: &str) -> Result<(), StocklensError>;

    /// Insert `bars` into `name` as one batch inside one transaction:
    /// all rows become visible atomically or none do.
    fn insert_bars(&self, name: &str, bars: &[PriceBar]) -> Result<usize, StocklensError>;

    /// Every instrument table currently present, excluding store internals.
    /// Empty when nothing has been loaded; `Err` only if the store itself
    /// is unreachable.
    fn list_instruments(&self) -> Result<Vec<String>, StocklensError>;

    /// Store-side `AVG(Close)` over the trailing window
    /// `[max(Date) - days, max(Date)]`. `None` when the window has no rows.
    fn window_average_close(&self, name: &str, days: u32) -> Result<Option<f64>, StocklensError>;

    /// Close prices in the trailing window, ascending by date.
    fn window_closes(&self, name: &str, days: u32) -> Result<Vec<f64>, StocklensError>;
}
