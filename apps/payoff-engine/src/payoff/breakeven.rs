//! Break-even detection on a sampled curve.

use super::curve::ensure_strictly_increasing;
use crate::error::PayoffError;

/// Prices where the sampled curve crosses zero, in increasing order.
///
/// For each adjacent pair `(x0, y0), (x1, y1)` with `y0 * y1 < 0` the
/// crossing is placed by linear interpolation:
/// `x0 - y0 * (x1 - x0) / (y1 - y0)`.
///
/// The sign test is strict. A sample that is exactly zero never forms a
/// crossing with either neighbour, so a curve that touches zero on a grid
/// point, or runs along zero, reports nothing there. There is no bisection
/// refinement; accuracy is bounded by the grid spacing.
///
/// # Errors
///
/// Returns [`PayoffError::InvalidGrid`] if there are fewer than two samples,
/// the slices differ in length, a value is not finite, or the prices are not
/// strictly increasing.
pub fn find_break_evens(prices: &[f64], payoffs: &[f64]) -> Result<Vec<f64>, PayoffError> {
    if prices.len() != payoffs.len() {
        return Err(PayoffError::invalid_grid(format!(
            "got {} prices but {} payoff values",
            prices.len(),
            payoffs.len()
        )));
    }
    if prices.len() < 2 {
        return Err(PayoffError::invalid_grid(format!(
            "break-even search needs at least 2 samples, got {}",
            prices.len()
        )));
    }
    if prices.iter().chain(payoffs).any(|v| !v.is_finite()) {
        return Err(PayoffError::invalid_grid("samples must be finite"));
    }
    ensure_strictly_increasing(prices)?;

    let crossings = prices
        .windows(2)
        .zip(payoffs.windows(2))
        .filter_map(|(x, y)| {
            let (x0, x1, y0, y1) = (x[0], x[1], y[0], y[1]);
            // y0 * y1 < 0 implies y0 != y1, so the division below is safe.
            (y0 * y1 < 0.0).then(|| x0 - y0 * (x1 - x0) / (y1 - y0))
        })
        .collect::<Vec<_>>();

    tracing::trace!(samples = prices.len(), crossings = crossings.len(), "Break-even scan");

    Ok(crossings)
}
