//! Expiration payoff engine.
//!
//! Pure functions over borrowed legs; nothing here holds state between calls.
//!
//! - Per-leg payoff: long `(intrinsic - premium) * qty`, short `(premium - intrinsic) * qty`
//! - Portfolio payoff: sum over legs, zero when empty
//! - Payoff curves over any caller-supplied grid
//! - Break-evens by linear interpolation between samples of opposite sign
//!
//! # Example
//!
//! ```
//! use payoff_engine::payoff::{OptionKind, OptionLeg, PayoffCurve, PriceGrid, portfolio_payoff};
//!
//! let legs = vec![
//!     OptionLeg::long(OptionKind::Call, 100.0, 5.0, 1)?,
//!     OptionLeg::short(OptionKind::Call, 110.0, 2.0, 1)?,
//! ];
//! assert_eq!(portfolio_payoff(120.0, &legs), 7.0);
//!
//! let grid = PriceGrid::linspace(50.0, 165.0, 500)?;
//! let curve = PayoffCurve::compute(&legs, &grid)?;
//! assert!((curve.break_evens()[0] - 103.0).abs() < 0.25);
//! # Ok::<(), payoff_engine::PayoffError>(())
//! ```

mod breakeven;
mod curve;
mod leg;
mod portfolio;

pub use breakeven::find_break_evens;
pub use curve::{
    GridSettings, MAX_GRID_SAMPLES, PayoffCurve, PayoffSample, PriceGrid, payoff_curve,
};
pub use leg::{LegDirection, LegRecord, OptionKind, OptionLeg, leg_payoff};
pub use portfolio::{Portfolio, net_premium, payoff_at_price, portfolio_payoff, strike_range};
