// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Payoff Engine - Rust Core Library
//!
//! Profit/loss at expiration for multi-leg option strategies.
//!
//! # Modules
//!
//! - `payoff`: leg and portfolio payoff, price grids, payoff curves, break-evens
//! - `presets`: named example strategies loaded once at startup
//! - `chart`: render-ready chart data with an enumerated style
//! - `server`: stateless JSON API (the portfolio is request-scoped)
//! - `config`, `telemetry`, `error`: ambient concerns
//!
//! This is not a pricing model: no time value, volatility, rates, or early
//! exercise.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Chart data model.
pub mod chart;

/// Configuration loading and validation.
pub mod config;

/// Error types.
pub mod error;

/// Payoff engine.
pub mod payoff;

/// Preset strategy library.
pub mod presets;

/// HTTP API.
pub mod server;

/// Tracing setup.
pub mod telemetry;

pub use chart::{ChartModel, ChartStyle};
pub use error::{ErrorCode, PayoffError};
pub use payoff::{
    LegDirection, OptionKind, OptionLeg, PayoffCurve, PayoffSample, Portfolio, PriceGrid,
    find_break_evens, leg_payoff, payoff_at_price, payoff_curve, portfolio_payoff,
};
pub use presets::{Preset, PresetLibrary};
