//! Tabular source reader port trait.

use crate::domain::error::StocklensError;
use crate::domain::price_bar::PriceBar;
use std::path::Path;

pub trait SourcePort {
    /// Read every data row of the file at `path` as price bars, header row
    /// skipped, source dates parsed from their `MM/DD/YYYY` form.
    fn read_bars(&self, path: &Path) -> Result<Vec<PriceBar>, StocklensError>;
}
