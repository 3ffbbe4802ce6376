//! Windowed indicator math over date-ascending close prices.
//!
//! The analyzer fetches the trailing window once and hands the closes here.
//! EMA is a strictly sequential recurrence, so it is computed as an explicit
//! fold rather than a store-side aggregate.

/// Arithmetic mean of `closes`, `None` for an empty window.
pub fn mean(closes: &[f64]) -> Option<f64> {
    if closes.is_empty() {
        return None;
    }
    Some(closes.iter().sum::<f64>() / closes.len() as f64)
}

/// Exponential moving average with smoothing factor `alpha = 2 / (days + 1)`.
///
/// Seeded with the earliest close, then `ema = alpha * close + (1 - alpha) * ema`
/// for each subsequent close in ascending date order. Returns the last term,
/// or `None` for an empty window or a zero day count.
pub fn trailing_ema(closes: &[f64], days: u32) -> Option<f64> {
    if days == 0 {
        return None;
    }
    let (&seed, rest) = closes.split_first()?;

    let alpha = 2.0 / (days as f64 + 1.0);
    let ema = rest
        .iter()
        .fold(seed, |ema, &close| alpha * close + (1.0 - alpha) * ema);

    Some(ema)
}

/// Population standard deviation of `closes` around their own mean,
/// `sqrt(mean((close - mean)^2))`. `None` for an empty window.
pub fn population_stddev(closes: &[f64]) -> Option<f64> {
    let m = mean(closes)?;
    let variance = closes
        .iter()
        .map(|close| {
            let diff = close - m;
            diff * diff
        })
        .sum::<f64>()
        / closes.len() as f64;

    Some(variance.sqrt())
}
