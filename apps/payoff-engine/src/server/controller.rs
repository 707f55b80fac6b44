//! HTTP Controller
//!
//! Axum-based JSON API over the payoff engine. Handlers are stateless: the
//! portfolio arrives with each request and nothing is kept between calls.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::chart::{ChartModel, ChartStyle};
use crate::config::Config;
use crate::error::{ErrorCode, PayoffError};
use crate::payoff::{
    GridSettings, LegRecord, OptionLeg, PayoffCurve, PriceGrid, net_premium, payoff_at_price,
};
use crate::presets::{Preset, PresetLibrary};

use super::request::{GridRequest, PayoffRequest};
use super::response::{
    CurrentPayoff, ErrorResponse, HealthResponse, PayoffResponse, PresetListResponse,
};

/// Application state shared across handlers. Read-only after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Preset library loaded at startup.
    pub presets: Arc<PresetLibrary>,
    /// Reference grid settings.
    pub grid: GridSettings,
    /// Default chart style.
    pub chart_style: ChartStyle,
    /// Application version.
    pub version: String,
}

impl AppState {
    /// Build state from configuration and a loaded preset library.
    #[must_use]
    pub fn new(config: &Config, presets: PresetLibrary) -> Self {
        Self {
            presets: Arc::new(presets),
            grid: config.grid,
            chart_style: config.chart.style,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/presets", get(list_presets))
        .route("/api/v1/presets/{name}", get(get_preset))
        .route("/api/v1/payoff", post(compute_payoff))
        .with_state(state)
}

/// Error wrapper mapping [`PayoffError`] to an HTTP response.
#[derive(Debug)]
pub struct ApiError(PayoffError);

impl From<PayoffError> for ApiError {
    fn from(err: PayoffError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status = match code {
            ErrorCode::InvalidArgument => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }

        let body = ErrorResponse {
            code: code.reason().to_string(),
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// List all presets.
async fn list_presets(State(state): State<AppState>) -> impl IntoResponse {
    Json(PresetListResponse {
        presets: state.presets.iter().cloned().collect(),
    })
}

/// Get one preset by name.
async fn get_preset(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Preset>, ApiError> {
    Ok(Json(state.presets.get(&name)?.clone()))
}

/// Evaluate a portfolio.
async fn compute_payoff(
    State(state): State<AppState>,
    payload: Result<Json<PayoffRequest>, JsonRejection>,
) -> Result<Json<PayoffResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| PayoffError::InvalidRequest {
        message: rejection.body_text(),
    })?;
    Ok(Json(evaluate(&state, request)?))
}

/// Resolve the request's portfolio and grid, then sample, locate
/// break-evens, and build the chart model.
pub fn evaluate(state: &AppState, request: PayoffRequest) -> Result<PayoffResponse, PayoffError> {
    let legs = resolve_legs(&state.presets, request.legs, request.preset.as_deref())?;
    let grid = resolve_grid(&legs, request.grid, &state.grid)?;
    let curve = PayoffCurve::compute(&legs, &grid)?;

    let style = request.style.unwrap_or(state.chart_style);
    let current_price = request
        .current_price
        .filter(|p| *p > 0.0 && p.is_finite());
    let chart = ChartModel::build(&curve, style, current_price);

    tracing::debug!(
        legs = legs.len(),
        samples = curve.len(),
        break_evens = ?curve.break_evens(),
        %style,
        "Evaluated payoff"
    );

    let premium = net_premium(&legs);
    if !premium.is_finite() {
        return Err(PayoffError::invalid_leg("net premium overflows"));
    }

    let current = match current_price {
        Some(price) => {
            let payoff = payoff_at_price(&legs, price);
            if !payoff.is_finite() {
                return Err(PayoffError::InvalidRequest {
                    message: format!("payoff at current price {price} is not finite"),
                });
            }
            Some(CurrentPayoff { price, payoff })
        }
        None => None,
    };

    Ok(PayoffResponse {
        net_premium: premium,
        samples: curve.samples().to_vec(),
        break_evens: curve.break_evens().to_vec(),
        current,
        chart,
        legs,
    })
}

fn resolve_legs(
    presets: &PresetLibrary,
    records: Option<Vec<LegRecord>>,
    preset: Option<&str>,
) -> Result<Vec<OptionLeg>, PayoffError> {
    match (records, preset) {
        (Some(_), Some(_)) => Err(PayoffError::invalid_leg(
            "specify either legs or preset, not both",
        )),
        (None, Some(name)) => Ok(presets.get(name)?.legs.legs().to_vec()),
        (Some(records), None) => records
            .into_iter()
            .enumerate()
            .map(|(i, record)| {
                OptionLeg::try_from(record).map_err(|e| match e {
                    PayoffError::InvalidLeg { message } => PayoffError::InvalidLeg {
                        message: format!("leg {i}: {message}"),
                    },
                    other => other,
                })
            })
            .collect(),
        (None, None) => Ok(Vec::new()),
    }
}

fn resolve_grid(
    legs: &[OptionLeg],
    grid: Option<GridRequest>,
    settings: &GridSettings,
) -> Result<PriceGrid, PayoffError> {
    match grid {
        Some(GridRequest::Explicit { prices }) => {
            settings.check_len(prices.len())?;
            PriceGrid::new(prices)
        }
        Some(GridRequest::Range {
            lower,
            upper,
            samples,
        }) => {
            let samples = samples.unwrap_or(settings.samples);
            settings.check_len(samples)?;
            PriceGrid::linspace(lower, upper, samples)
        }
        // Nothing to span: an empty portfolio yields an empty curve.
        None if legs.is_empty() => Ok(PriceGrid::default()),
        None => PriceGrid::for_legs(legs, settings),
    }
}
