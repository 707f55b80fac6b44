//! Price grids and sampled payoff curves.

use serde::{Deserialize, Serialize};

use super::breakeven::find_break_evens;
use super::leg::OptionLeg;
use super::portfolio::{portfolio_payoff, strike_range};
use crate::error::PayoffError;

/// Hard ceiling on grid length, whatever the configuration says.
pub const MAX_GRID_SAMPLES: usize = 1_000_000;

/// Settings for the reference grid derived from a portfolio's strikes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSettings {
    /// Number of evenly spaced samples, endpoints included.
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Lower bound as a multiple of the lowest strike.
    #[serde(default = "default_lower_factor")]
    pub lower_factor: f64,
    /// Upper bound as a multiple of the highest strike.
    #[serde(default = "default_upper_factor")]
    pub upper_factor: f64,
    /// Largest grid a caller may request.
    #[serde(default = "default_max_samples")]
    pub max_samples: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            lower_factor: default_lower_factor(),
            upper_factor: default_upper_factor(),
            max_samples: default_max_samples(),
        }
    }
}

const fn default_samples() -> usize {
    500
}
const fn default_lower_factor() -> f64 {
    0.5
}
const fn default_upper_factor() -> f64 {
    1.5
}
const fn default_max_samples() -> usize {
    10_000
}

impl GridSettings {
    /// Check that the settings describe a usable grid.
    pub fn validate(&self) -> Result<(), PayoffError> {
        if self.samples < 2 {
            return Err(PayoffError::invalid_grid(format!(
                "samples must be at least 2, got {}",
                self.samples
            )));
        }
        if !(self.lower_factor > 0.0 && self.lower_factor.is_finite()) {
            return Err(PayoffError::invalid_grid(format!(
                "lower_factor must be positive, got {}",
                self.lower_factor
            )));
        }
        if !(self.upper_factor > self.lower_factor && self.upper_factor.is_finite()) {
            return Err(PayoffError::invalid_grid(format!(
                "upper_factor ({}) must exceed lower_factor ({})",
                self.upper_factor, self.lower_factor
            )));
        }
        if self.max_samples > MAX_GRID_SAMPLES {
            return Err(PayoffError::invalid_grid(format!(
                "max_samples must be at most {MAX_GRID_SAMPLES}, got {}",
                self.max_samples
            )));
        }
        self.check_len(self.samples)
    }

    /// Reject a grid of `len` samples above `max_samples`.
    pub fn check_len(&self, len: usize) -> Result<(), PayoffError> {
        ensure_len_within(len, self.max_samples)
    }
}

fn ensure_len_within(len: usize, limit: usize) -> Result<(), PayoffError> {
    if len > limit {
        return Err(PayoffError::invalid_grid(format!(
            "grid has {len} samples, limit is {limit}"
        )));
    }
    Ok(())
}

/// Strictly increasing sample prices.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceGrid {
    prices: Vec<f64>,
}

impl PriceGrid {
    /// Create a grid from caller-supplied prices.
    ///
    /// Any spacing is accepted. A single point is a valid grid.
    ///
    /// # Errors
    ///
    /// Returns [`PayoffError::InvalidGrid`] if a price is not finite, the
    /// prices are not strictly increasing, or there are more than
    /// [`MAX_GRID_SAMPLES`].
    pub fn new(prices: Vec<f64>) -> Result<Self, PayoffError> {
        ensure_len_within(prices.len(), MAX_GRID_SAMPLES)?;
        if let Some(bad) = prices.iter().find(|p| !p.is_finite()) {
            return Err(PayoffError::invalid_grid(format!(
                "prices must be finite, got {bad}"
            )));
        }
        ensure_strictly_increasing(&prices)?;
        Ok(Self { prices })
    }

    /// `samples` evenly spaced prices from `start` to `end` inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`PayoffError::InvalidGrid`] for zero samples, more than
    /// [`MAX_GRID_SAMPLES`], non-finite bounds, or `start >= end` with more
    /// than one sample.
    pub fn linspace(start: f64, end: f64, samples: usize) -> Result<Self, PayoffError> {
        if samples == 0 {
            return Err(PayoffError::invalid_grid("samples must be at least 1"));
        }
        ensure_len_within(samples, MAX_GRID_SAMPLES)?;
        if !start.is_finite() || !end.is_finite() {
            return Err(PayoffError::invalid_grid(format!(
                "bounds must be finite, got [{start}, {end}]"
            )));
        }
        if samples == 1 {
            return Ok(Self {
                prices: vec![start],
            });
        }
        if start >= end {
            return Err(PayoffError::invalid_grid(format!(
                "lower bound {start} must be below upper bound {end}"
            )));
        }

        let last = samples - 1;
        let step = (end - start) / last as f64;
        let prices = (0..samples)
            .map(|i| if i == last { end } else { start + step * i as f64 })
            .collect();

        Ok(Self { prices })
    }

    /// Reference grid spanning the strikes of `legs`:
    /// `lower_factor * min strike` to `upper_factor * max strike`.
    ///
    /// # Errors
    ///
    /// Returns [`PayoffError::InvalidGrid`] if `legs` is empty (there are no
    /// strikes to span) or the settings are invalid.
    pub fn for_legs(legs: &[OptionLeg], settings: &GridSettings) -> Result<Self, PayoffError> {
        settings.validate()?;
        let (lowest, highest) = strike_range(legs).ok_or_else(|| {
            PayoffError::invalid_grid("cannot derive a grid from an empty portfolio")
        })?;
        Self::linspace(
            lowest * settings.lower_factor,
            highest * settings.upper_factor,
            settings.samples,
        )
    }

    /// Get the prices.
    #[must_use]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Check if the grid has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

pub(crate) fn ensure_strictly_increasing(prices: &[f64]) -> Result<(), PayoffError> {
    for (i, pair) in prices.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(PayoffError::invalid_grid(format!(
                "prices must be strictly increasing, got {} then {} at index {}",
                pair[0],
                pair[1],
                i + 1
            )));
        }
    }
    Ok(())
}

/// One `(price, payoff)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffSample {
    /// Underlying price.
    pub price: f64,
    /// Aggregate profit/loss at that price.
    pub payoff: f64,
}

/// Apply [`portfolio_payoff`] at every price in `prices`.
///
/// Each price is evaluated independently; the grid may be non-uniform and
/// of any length.
#[must_use]
pub fn payoff_curve(legs: &[OptionLeg], prices: &[f64]) -> Vec<PayoffSample> {
    prices
        .iter()
        .map(|&price| PayoffSample {
            price,
            payoff: portfolio_payoff(price, legs),
        })
        .collect()
}

/// Sampled payoff curve together with the break-evens found on its grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PayoffCurve {
    samples: Vec<PayoffSample>,
    break_evens: Vec<f64>,
}

impl PayoffCurve {
    /// Sample `legs` over `grid` and locate break-evens.
    ///
    /// Grids with fewer than two samples have no adjacent pairs and so no
    /// break-evens.
    ///
    /// # Errors
    ///
    /// Returns [`PayoffError::InvalidLeg`] if the legs overflow to a
    /// non-finite payoff anywhere on the grid.
    pub fn compute(legs: &[OptionLeg], grid: &PriceGrid) -> Result<Self, PayoffError> {
        let samples = payoff_curve(legs, grid.prices());

        if let Some(bad) = samples.iter().find(|s| !s.payoff.is_finite()) {
            return Err(PayoffError::invalid_leg(format!(
                "payoff is not finite at price {}",
                bad.price
            )));
        }

        let break_evens = if samples.len() < 2 {
            Vec::new()
        } else {
            let payoffs: Vec<f64> = samples.iter().map(|s| s.payoff).collect();
            find_break_evens(grid.prices(), &payoffs)?
        };

        tracing::debug!(
            legs = legs.len(),
            samples = samples.len(),
            break_evens = break_evens.len(),
            "Computed payoff curve"
        );

        Ok(Self {
            samples,
            break_evens,
        })
    }

    /// Get the samples.
    #[must_use]
    pub fn samples(&self) -> &[PayoffSample] {
        &self.samples
    }

    /// Get the break-even prices in increasing order.
    #[must_use]
    pub fn break_evens(&self) -> &[f64] {
        &self.break_evens
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the curve has no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Lowest sampled payoff.
    #[must_use]
    pub fn min_payoff(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.payoff).reduce(f64::min)
    }

    /// Highest sampled payoff.
    #[must_use]
    pub fn max_payoff(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.payoff).reduce(f64::max)
    }

    /// Payoff at `price` by linear interpolation between grid samples.
    ///
    /// Prices outside the grid take the first or last sampled value. Near a
    /// strike the result can differ from the exact payoff by up to the grid
    /// resolution. `None` for an empty curve or a non-finite price.
    #[must_use]
    pub fn interpolate(&self, price: f64) -> Option<f64> {
        let first = self.samples.first()?;
        let last = self.samples.last()?;
        if !price.is_finite() {
            return None;
        }
        if price <= first.price {
            return Some(first.payoff);
        }
        if price >= last.price {
            return Some(last.payoff);
        }

        // first.price < price < last.price, so 1 <= upper < len.
        let upper = self.samples.partition_point(|s| s.price <= price);
        let a = self.samples[upper - 1];
        let b = self.samples[upper];
        Some(a.payoff + (b.payoff - a.payoff) * (price - a.price) / (b.price - a.price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payoff::leg::OptionKind;

    fn long_call() -> Vec<OptionLeg> {
        vec![OptionLeg::long(OptionKind::Call, 100.0, 5.0, 1).unwrap()]
    }

    #[test]
    fn linspace_includes_endpoints() {
        let grid = PriceGrid::linspace(50.0, 150.0, 5).unwrap();
        assert_eq!(grid.prices(), &[50.0, 75.0, 100.0, 125.0, 150.0]);
    }

    #[test]
    fn linspace_single_sample() {
        let grid = PriceGrid::linspace(80.0, 120.0, 1).unwrap();
        assert_eq!(grid.prices(), &[80.0]);
    }

    #[test]
    fn linspace_rejects_degenerate_input() {
        assert!(PriceGrid::linspace(1.0, 2.0, 0).is_err());
        assert!(PriceGrid::linspace(2.0, 2.0, 10).is_err());
        assert!(PriceGrid::linspace(3.0, 2.0, 10).is_err());
        assert!(PriceGrid::linspace(f64::NAN, 2.0, 10).is_err());
    }

    #[test]
    fn reference_grid_spans_strikes() {
        let legs = vec![
            OptionLeg::long(OptionKind::Put, 90.0, 1.0, 1).unwrap(),
            OptionLeg::long(OptionKind::Call, 110.0, 1.0, 1).unwrap(),
        ];
        let grid = PriceGrid::for_legs(&legs, &GridSettings::default()).unwrap();

        assert_eq!(grid.len(), 500);
        assert_eq!(grid.prices()[0], 45.0);
        assert_eq!(grid.prices()[499], 165.0);
    }

    #[test]
    fn reference_grid_requires_legs() {
        let result = PriceGrid::for_legs(&[], &GridSettings::default());
        assert!(matches!(result, Err(PayoffError::InvalidGrid { .. })));
    }

    #[test]
    fn settings_validation() {
        assert!(GridSettings::default().validate().is_ok());

        let too_few = GridSettings {
            samples: 1,
            ..GridSettings::default()
        };
        assert!(too_few.validate().is_err());

        let inverted = GridSettings {
            lower_factor: 2.0,
            upper_factor: 1.0,
            ..GridSettings::default()
        };
        assert!(inverted.validate().is_err());
    }

    #[test]
    fn grid_rejects_unordered_prices() {
        assert!(PriceGrid::new(vec![1.0, 3.0, 2.0]).is_err());
        assert!(PriceGrid::new(vec![1.0, 1.0]).is_err());
        assert!(PriceGrid::new(vec![1.0, f64::INFINITY]).is_err());
        assert!(PriceGrid::new(vec![7.0]).is_ok());
        assert!(PriceGrid::new(Vec::new()).is_ok());
    }

    #[test]
    fn curve_accepts_non_uniform_grid() {
        let samples = payoff_curve(&long_call(), &[10.0, 99.0, 100.0, 105.0, 300.0]);
        let payoffs: Vec<f64> = samples.iter().map(|s| s.payoff).collect();
        assert_eq!(payoffs, vec![-5.0, -5.0, -5.0, 0.0, 195.0]);
    }

    #[test]
    fn single_point_curve() {
        let grid = PriceGrid::new(vec![110.0]).unwrap();
        let curve = PayoffCurve::compute(&long_call(), &grid).unwrap();
        assert_eq!(curve.len(), 1);
        assert_eq!(curve.samples()[0].payoff, 5.0);
        assert!(curve.break_evens().is_empty());
    }

    #[test]
    fn compute_finds_break_even() {
        // 100 samples keep 105 off the grid so the crossing is a true sign change.
        let grid = PriceGrid::linspace(50.0, 150.0, 100).unwrap();
        let curve = PayoffCurve::compute(&long_call(), &grid).unwrap();
        assert_eq!(curve.break_evens().len(), 1);
        assert!((curve.break_evens()[0] - 105.0).abs() < 1e-9);
        assert_eq!(curve.min_payoff(), Some(-5.0));
        assert_eq!(curve.max_payoff(), Some(45.0));
    }

    #[test]
    fn interpolate_matches_numpy_semantics() {
        let grid = PriceGrid::new(vec![90.0, 100.0, 120.0]).unwrap();
        let curve = PayoffCurve::compute(&long_call(), &grid).unwrap();

        // Clamped outside the grid.
        assert_eq!(curve.interpolate(10.0), Some(-5.0));
        assert_eq!(curve.interpolate(500.0), Some(15.0));
        // Exact at a sample.
        assert_eq!(curve.interpolate(100.0), Some(-5.0));
        // Linear between samples: exact payoff at 110 is 5, the chord gives 5 too.
        assert!((curve.interpolate(110.0).unwrap() - 5.0).abs() < 1e-12);
        assert_eq!(curve.interpolate(f64::NAN), None);
    }

    #[test]
    fn interpolation_smooths_kinks() {
        // The chord from 90 to 110 misses the kink at 100.
        let grid = PriceGrid::new(vec![90.0, 110.0]).unwrap();
        let curve = PayoffCurve::compute(&long_call(), &grid).unwrap();
        assert_eq!(curve.interpolate(100.0), Some(0.0));
    }

    #[test]
    fn grid_size_is_capped() {
        let err = PriceGrid::linspace(1.0, 2.0, usize::MAX).unwrap_err();
        assert!(matches!(err, PayoffError::InvalidGrid { .. }));
        assert!(PriceGrid::linspace(1.0, 2.0, MAX_GRID_SAMPLES + 1).is_err());
        assert_eq!(
            PriceGrid::linspace(1.0, 2.0, MAX_GRID_SAMPLES).unwrap().len(),
            MAX_GRID_SAMPLES
        );

        let prices: Vec<f64> = (0..=MAX_GRID_SAMPLES).map(|i| i as f64).collect();
        assert!(PriceGrid::new(prices).is_err());
    }

    #[test]
    fn settings_limit_grid_length() {
        let settings = GridSettings::default();
        assert_eq!(settings.max_samples, 10_000);
        assert!(settings.check_len(10_000).is_ok());
        assert!(settings.check_len(10_001).is_err());

        let above_ceiling = GridSettings {
            max_samples: MAX_GRID_SAMPLES + 1,
            ..GridSettings::default()
        };
        assert!(above_ceiling.validate().is_err());

        let samples_over_max = GridSettings {
            samples: 600,
            max_samples: 500,
            ..GridSettings::default()
        };
        assert!(samples_over_max.validate().is_err());
    }

    #[test]
    fn overflowing_legs_are_rejected() {
        // Each leg is finite on its own; the sum is not.
        let leg = OptionLeg::long(OptionKind::Call, 100.0, 1e308, 1).unwrap();
        let grid = PriceGrid::new(vec![90.0, 110.0]).unwrap();

        let err = PayoffCurve::compute(&[leg, leg], &grid).unwrap_err();
        assert!(matches!(err, PayoffError::InvalidLeg { .. }));
        assert!(err.to_string().contains("not finite"));
    }

    #[test]
    fn empty_curve() {
        let curve = PayoffCurve::compute(&long_call(), &PriceGrid::default()).unwrap();
        assert!(curve.is_empty());
        assert_eq!(curve.interpolate(100.0), None);
        assert_eq!(curve.min_payoff(), None);
    }
}
