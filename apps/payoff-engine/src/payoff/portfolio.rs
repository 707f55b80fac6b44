//! Portfolio aggregation.

use serde::{Deserialize, Serialize};

use super::leg::OptionLeg;

/// An ordered list of option legs.
///
/// Owned by the caller (an editor view-model or a request); the engine only
/// ever borrows it. Aggregation is order-independent and legs may repeat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    legs: Vec<OptionLeg>,
}

impl Portfolio {
    /// Create a portfolio from legs.
    #[must_use]
    pub const fn new(legs: Vec<OptionLeg>) -> Self {
        Self { legs }
    }

    /// Get the legs.
    #[must_use]
    pub fn legs(&self) -> &[OptionLeg] {
        &self.legs
    }

    /// Append a leg.
    pub fn push(&mut self, leg: OptionLeg) {
        self.legs.push(leg);
    }

    /// Remove and return the leg at `index`, if present.
    pub fn remove(&mut self, index: usize) -> Option<OptionLeg> {
        (index < self.legs.len()).then(|| self.legs.remove(index))
    }

    /// Check if the portfolio has no legs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Number of legs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// Aggregate profit/loss at `price`.
    #[must_use]
    pub fn payoff(&self, price: f64) -> f64 {
        portfolio_payoff(price, &self.legs)
    }

    /// Net premium across all legs (positive = credit).
    #[must_use]
    pub fn net_premium(&self) -> f64 {
        net_premium(&self.legs)
    }
}

impl From<Vec<OptionLeg>> for Portfolio {
    fn from(legs: Vec<OptionLeg>) -> Self {
        Self::new(legs)
    }
}

impl AsRef<[OptionLeg]> for Portfolio {
    fn as_ref(&self) -> &[OptionLeg] {
        &self.legs
    }
}

/// Aggregate profit/loss of `legs` at `price`. Zero for an empty slice.
#[must_use]
pub fn portfolio_payoff(price: f64, legs: &[OptionLeg]) -> f64 {
    legs.iter().map(|leg| leg.payoff(price)).sum()
}

/// Exact payoff at a single price, e.g. the current underlying price.
#[must_use]
pub fn payoff_at_price(legs: &[OptionLeg], price: f64) -> f64 {
    portfolio_payoff(price, legs)
}

/// Net premium across `legs` (positive = credit, negative = debit).
#[must_use]
pub fn net_premium(legs: &[OptionLeg]) -> f64 {
    legs.iter().map(OptionLeg::net_premium).sum()
}

/// Lowest and highest strike across `legs`, `None` when empty.
#[must_use]
pub fn strike_range(legs: &[OptionLeg]) -> Option<(f64, f64)> {
    legs.iter().map(OptionLeg::strike).fold(None, |acc, strike| {
        Some(match acc {
            None => (strike, strike),
            Some((lo, hi)) => (lo.min(strike), hi.max(strike)),
        })
    })
}
