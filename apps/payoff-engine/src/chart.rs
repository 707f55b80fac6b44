//! Render-ready chart data for a payoff curve.
//!
//! One model replaces per-page plotting variants: the visual treatment is an
//! enumerated [`ChartStyle`]. Colors, titles and fonts belong to the
//! renderer and are not part of the model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::payoff::{PayoffCurve, PayoffSample};

/// How the payoff curve is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartStyle {
    /// Payoff line only.
    Line,
    /// Payoff line plus profit (`max(payoff, 0)`) and loss (`min(payoff, 0)`) areas.
    #[default]
    Filled,
    /// Payoff line split into runs colored by sign, joined at zero crossings.
    SignSegmented,
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line => write!(f, "line"),
            Self::Filled => write!(f, "filled"),
            Self::SignSegmented => write!(f, "sign_segmented"),
        }
    }
}

/// What a series represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesRole {
    /// The payoff line.
    Payoff,
    /// Profit area or non-negative run.
    Profit,
    /// Loss area or negative run.
    Loss,
}

/// A polyline or area outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Role of the series.
    pub role: SeriesRole,
    /// Whether the renderer should fill down to zero.
    pub fill_to_zero: bool,
    /// Points in increasing price order.
    pub points: Vec<PayoffSample>,
}

/// Current underlying price annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrentPriceMarker {
    /// Current underlying price.
    pub price: f64,
    /// Payoff interpolated against the sampled grid.
    pub payoff: f64,
    /// Bottom of the vertical guide (lowest sampled payoff).
    pub line_low: f64,
    /// Top of the vertical guide (highest sampled payoff).
    pub line_high: f64,
}

impl CurrentPriceMarker {
    /// Locate the marker on `curve`.
    ///
    /// `None` unless `price` is positive and finite and the curve has samples.
    #[must_use]
    pub fn locate(curve: &PayoffCurve, price: f64) -> Option<Self> {
        if !(price > 0.0 && price.is_finite()) {
            return None;
        }
        Some(Self {
            price,
            payoff: curve.interpolate(price)?,
            line_low: curve.min_payoff()?,
            line_high: curve.max_payoff()?,
        })
    }
}

/// Everything a renderer needs to draw a payoff chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartModel {
    /// Style the series were built for.
    pub style: ChartStyle,
    /// Series to draw, back to front.
    pub series: Vec<ChartSeries>,
    /// Horizontal zero line from the first to the last grid price.
    pub zero_line: Option<[PayoffSample; 2]>,
    /// Break-even markers (payoff is zero).
    pub break_evens: Vec<PayoffSample>,
    /// Current price marker, if one was requested.
    pub current: Option<CurrentPriceMarker>,
}

impl ChartModel {
    /// Build the model for `curve`.
    #[must_use]
    pub fn build(curve: &PayoffCurve, style: ChartStyle, current_price: Option<f64>) -> Self {
        let samples = curve.samples();

        let series = match style {
            ChartStyle::Line => vec![payoff_line(samples)],
            ChartStyle::Filled => vec![
                payoff_line(samples),
                clipped_area(samples, SeriesRole::Profit, |y| y.max(0.0)),
                clipped_area(samples, SeriesRole::Loss, |y| y.min(0.0)),
            ],
            ChartStyle::SignSegmented => sign_runs(samples),
        };

        let zero_line = match (samples.first(), samples.last()) {
            (Some(first), Some(last)) => Some([
                PayoffSample {
                    price: first.price,
                    payoff: 0.0,
                },
                PayoffSample {
                    price: last.price,
                    payoff: 0.0,
                },
            ]),
            _ => None,
        };

        let break_evens = curve
            .break_evens()
            .iter()
            .map(|&price| PayoffSample { price, payoff: 0.0 })
            .collect();

        Self {
            style,
            series,
            zero_line,
            break_evens,
            current: current_price.and_then(|p| CurrentPriceMarker::locate(curve, p)),
        }
    }
}

fn payoff_line(samples: &[PayoffSample]) -> ChartSeries {
    ChartSeries {
        role: SeriesRole::Payoff,
        fill_to_zero: false,
        points: samples.to_vec(),
    }
}

fn clipped_area(
    samples: &[PayoffSample],
    role: SeriesRole,
    clip: impl Fn(f64) -> f64,
) -> ChartSeries {
    ChartSeries {
        role,
        fill_to_zero: true,
        points: samples
            .iter()
            .map(|s| PayoffSample {
                price: s.price,
                payoff: clip(s.payoff),
            })
            .collect(),
    }
}

fn role_of(payoff: f64) -> SeriesRole {
    if payoff >= 0.0 {
        SeriesRole::Profit
    } else {
        SeriesRole::Loss
    }
}

/// Split the curve into same-sign runs. Adjacent runs share their boundary
/// point: the interpolated zero for a strict sign change, otherwise the
/// zero-valued sample.
fn sign_runs(samples: &[PayoffSample]) -> Vec<ChartSeries> {
    let Some(&first) = samples.first() else {
        return Vec::new();
    };

    let mut runs = Vec::new();
    let mut role = role_of(first.payoff);
    let mut points = vec![first];

    for pair in samples.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let next_role = role_of(b.payoff);

        if next_role != role {
            let boundary = if a.payoff * b.payoff < 0.0 {
                PayoffSample {
                    price: a.price - a.payoff * (b.price - a.price) / (b.payoff - a.payoff),
                    payoff: 0.0,
                }
            } else if b.payoff == 0.0 {
                b
            } else {
                a
            };

            if points.last() != Some(&boundary) {
                points.push(boundary);
            }
            runs.push(ChartSeries {
                role,
                fill_to_zero: false,
                points: std::mem::replace(&mut points, vec![boundary]),
            });
            role = next_role;
        }

        if points.last() != Some(&b) {
            points.push(b);
        }
    }

    runs.push(ChartSeries {
        role,
        fill_to_zero: false,
        points,
    });
    runs
}
