//! Indicator analysis service.
//!
//! Every computation re-validates the instrument against the live registry
//! before any query runs; an identifier that does not name an existing table
//! never reaches query construction. Unknown instruments and empty windows
//! degrade to a neutral zero result, query failures likewise; only a missing
//! store connection propagates as an error.

use crate::domain::error::StocklensError;
use crate::domain::indicator::{population_stddev, trailing_ema};
use crate::ports::store_port::StorePort;
use tracing::warn;

pub struct Analyzer<'a> {
    store: &'a dyn StorePort,
}

impl<'a> Analyzer<'a> {
    pub fn new(store: &'a dyn StorePort) -> Self {
        Self { store }
    }

    /// Every instrument currently loaded, as reported by the store.
    pub fn list_instruments(&self) -> Result<Vec<String>, StocklensError> {
        self.store.list_instruments()
    }

    /// True iff `id` names an existing instrument table. Read fresh on every
    /// call; tables can be added or dropped between calls.
    pub fn is_valid_instrument(&self, id: &str) -> Result<bool, StocklensError> {
        Ok(self.store.list_instruments()?.iter().any(|name| name == id))
    }

    /// Simple moving average of close over the trailing `days` window.
    /// Zero for an unknown instrument or an empty window.
    pub fn compute_sma(&self, id: &str, days: u32) -> Result<f64, StocklensError> {
        if !self.is_valid_instrument(id)? {
            return Ok(0.0);
        }
        match self.store.window_average_close(id, days) {
            Ok(avg) => Ok(avg.unwrap_or(0.0)),
            Err(e) => zero_on_query_error(e, id, "sma"),
        }
    }

    /// Exponential moving average over the trailing `days` window, computed
    /// as a sequential fold over date-ascending closes with
    /// `alpha = 2 / (days + 1)`, seeded with the window's earliest close.
    /// Zero for an unknown instrument or an empty window.
    pub fn compute_ema(&self, id: &str, days: u32) -> Result<f64, StocklensError> {
        if !self.is_valid_instrument(id)? {
            return Ok(0.0);
        }
        match self.store.window_closes(id, days) {
            Ok(closes) => Ok(trailing_ema(&closes, days).unwrap_or(0.0)),
            Err(e) => zero_on_query_error(e, id, "ema"),
        }
    }

    /// Population standard deviation of close over the trailing `days`
    /// window. Zero for an unknown instrument or an empty window; note a
    /// constant-price window legitimately yields zero as well.
    pub fn compute_volatility(&self, id: &str, days: u32) -> Result<f64, StocklensError> {
        if !self.is_valid_instrument(id)? {
            return Ok(0.0);
        }
        match self.store.window_closes(id, days) {
            Ok(closes) => Ok(population_stddev(&closes).unwrap_or(0.0)),
            Err(e) => zero_on_query_error(e, id, "volatility"),
        }
    }
}

/// Query failures on a live connection degrade to the neutral zero result;
/// anything else (notably an unreachable store) propagates.
fn zero_on_query_error(
    err: StocklensError,
    id: &str,
    indicator: &str,
) -> Result<f64, StocklensError> {
    match err {
        StocklensError::DatabaseQuery { .. } => {
            warn!(instrument = id, indicator, error = %err, "analysis query failed");
            Ok(0.0)
        }
        other => Err(other),
    }
}
