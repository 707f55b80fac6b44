//! HTTP response DTOs.

use serde::{Deserialize, Serialize};

use crate::chart::ChartModel;
use crate::payoff::{OptionLeg, PayoffSample};
use crate::presets::Preset;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Preset listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetListResponse {
    /// Presets in library order.
    pub presets: Vec<Preset>,
}

/// Payoff at the current underlying price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentPayoff {
    /// Current underlying price.
    pub price: f64,
    /// Exact payoff at that price.
    pub payoff: f64,
}

/// Evaluated portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoffResponse {
    /// Validated legs that were evaluated.
    pub legs: Vec<OptionLeg>,
    /// Net premium (positive = credit).
    pub net_premium: f64,
    /// `(price, payoff)` samples over the grid.
    pub samples: Vec<PayoffSample>,
    /// Break-even prices in increasing order.
    pub break_evens: Vec<f64>,
    /// Exact payoff at the current price, if one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current: Option<CurrentPayoff>,
    /// Render-ready chart data.
    pub chart: ChartModel,
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g. `INVALID_ARGUMENT`).
    pub code: String,
    /// Human-readable message.
    pub message: String,
}
