//! HTTP request DTOs.

use serde::{Deserialize, Serialize};

use crate::chart::ChartStyle;
use crate::payoff::LegRecord;

/// Request to evaluate a portfolio.
///
/// The portfolio is given either as `legs` or by `preset` name, never both.
/// With neither, the portfolio is empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayoffRequest {
    /// Explicit leg records.
    #[serde(default)]
    pub legs: Option<Vec<LegRecord>>,
    /// Name of a preset to evaluate instead of `legs`.
    #[serde(default)]
    pub preset: Option<String>,
    /// Price grid; the reference grid around the strikes when absent.
    #[serde(default)]
    pub grid: Option<GridRequest>,
    /// Current underlying price for the marker.
    #[serde(default)]
    pub current_price: Option<f64>,
    /// Chart style; the configured default when absent.
    #[serde(default)]
    pub style: Option<ChartStyle>,
}

/// Caller-chosen price grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridRequest {
    /// Explicit, strictly increasing prices (any spacing).
    Explicit {
        /// Sample prices.
        prices: Vec<f64>,
    },
    /// Evenly spaced prices between two bounds, inclusive.
    Range {
        /// Lowest price.
        lower: f64,
        /// Highest price.
        upper: f64,
        /// Number of samples; the configured count when absent.
        #[serde(default)]
        samples: Option<usize>,
    },
}
