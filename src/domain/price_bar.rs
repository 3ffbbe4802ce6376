//! Daily price bar representation.

use chrono::NaiveDate;

/// One day of price history for an instrument. All price and volume fields
/// are stored as reals, matching the six-column table schema.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_bar_clone_eq() {
        let bar = PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            open: 100.0,
            high: 110.0,
            low: 90.0,
            close: 105.0,
            volume: 50_000.0,
        };
        assert_eq!(bar.clone(), bar);
    }
}
