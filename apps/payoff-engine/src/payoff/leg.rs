//! Option leg value object and per-leg payoff at expiration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PayoffError;

/// Option kind (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Call option (right to buy).
    Call,
    /// Put option (right to sell).
    Put,
}

impl OptionKind {
    /// Intrinsic value at expiration for the given underlying price.
    #[must_use]
    pub fn intrinsic(&self, price: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (price - strike).max(0.0),
            Self::Put => (strike - price).max(0.0),
        }
    }

    /// Lowercase name used in records and JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKind {
    type Err = PayoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(Self::Call),
            "put" => Ok(Self::Put),
            other => Err(PayoffError::invalid_leg(format!(
                "unknown option kind '{other}' (expected call or put)"
            ))),
        }
    }
}

/// Position direction for a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegDirection {
    /// Long position (bought, premium paid).
    Long,
    /// Short position (sold/written, premium received).
    Short,
}

impl LegDirection {
    /// Get the sign multiplier for this direction.
    #[must_use]
    pub const fn sign(&self) -> f64 {
        match self {
            Self::Long => 1.0,
            Self::Short => -1.0,
        }
    }

    /// Check if this is a long position.
    #[must_use]
    pub const fn is_long(&self) -> bool {
        matches!(self, Self::Long)
    }

    /// Lowercase name used in records and JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

impl fmt::Display for LegDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegDirection {
    type Err = PayoffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" => Ok(Self::Long),
            "short" => Ok(Self::Short),
            other => Err(PayoffError::invalid_leg(format!(
                "unknown leg direction '{other}' (expected long or short)"
            ))),
        }
    }
}

/// Untyped leg record as supplied by an editor, a preset file, or a request.
///
/// Converted into an [`OptionLeg`] with [`OptionLeg::try_from`], which is
/// where kind/direction text and strike positivity are checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegRecord {
    /// `call` or `put` (case-insensitive).
    pub kind: String,
    /// `long` or `short` (case-insensitive).
    pub direction: String,
    /// Strike price.
    pub strike: f64,
    /// Premium per contract.
    pub premium: f64,
    /// Number of contracts.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// A single leg of an options strategy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LegRecord", into = "LegRecord")]
pub struct OptionLeg {
    kind: OptionKind,
    direction: LegDirection,
    strike: f64,
    premium: f64,
    quantity: u32,
}

impl OptionLeg {
    /// Create a new leg.
    ///
    /// # Errors
    ///
    /// Returns [`PayoffError::InvalidLeg`] if the strike is not a positive
    /// finite number, the premium is not finite, or premium times quantity
    /// overflows.
    pub fn new(
        kind: OptionKind,
        direction: LegDirection,
        strike: f64,
        premium: f64,
        quantity: u32,
    ) -> Result<Self, PayoffError> {
        if !strike.is_finite() || strike <= 0.0 {
            return Err(PayoffError::invalid_leg(format!(
                "strike must be a positive number, got {strike}"
            )));
        }
        if !premium.is_finite() {
            return Err(PayoffError::invalid_leg(format!(
                "premium must be finite, got {premium}"
            )));
        }
        if !(premium * f64::from(quantity)).is_finite() {
            return Err(PayoffError::invalid_leg(format!(
                "premium {premium} times quantity {quantity} overflows"
            )));
        }

        Ok(Self {
            kind,
            direction,
            strike,
            premium,
            quantity,
        })
    }

    /// Create a long leg.
    pub fn long(
        kind: OptionKind,
        strike: f64,
        premium: f64,
        quantity: u32,
    ) -> Result<Self, PayoffError> {
        Self::new(kind, LegDirection::Long, strike, premium, quantity)
    }

    /// Create a short leg.
    pub fn short(
        kind: OptionKind,
        strike: f64,
        premium: f64,
        quantity: u32,
    ) -> Result<Self, PayoffError> {
        Self::new(kind, LegDirection::Short, strike, premium, quantity)
    }

    /// Get the option kind.
    #[must_use]
    pub const fn kind(&self) -> OptionKind {
        self.kind
    }

    /// Get the direction.
    #[must_use]
    pub const fn direction(&self) -> LegDirection {
        self.direction
    }

    /// Get the strike.
    #[must_use]
    pub const fn strike(&self) -> f64 {
        self.strike
    }

    /// Get the premium per contract.
    #[must_use]
    pub const fn premium(&self) -> f64 {
        self.premium
    }

    /// Get the number of contracts.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Intrinsic value of one contract at `price`.
    #[must_use]
    pub fn intrinsic(&self, price: f64) -> f64 {
        self.kind.intrinsic(price, self.strike)
    }

    /// Profit/loss of this leg at expiration for underlying `price`.
    #[must_use]
    pub fn payoff(&self, price: f64) -> f64 {
        (self.intrinsic(price) - self.premium) * self.direction.sign() * f64::from(self.quantity)
    }

    /// Net premium (positive = credit, negative = debit).
    #[must_use]
    pub fn net_premium(&self) -> f64 {
        -self.direction.sign() * self.premium * f64::from(self.quantity)
    }
}

impl TryFrom<LegRecord> for OptionLeg {
    type Error = PayoffError;

    fn try_from(record: LegRecord) -> Result<Self, Self::Error> {
        let kind: OptionKind = record.kind.parse()?;
        let direction: LegDirection = record.direction.parse()?;
        Self::new(kind, direction, record.strike, record.premium, record.quantity)
    }
}

impl From<OptionLeg> for LegRecord {
    fn from(leg: OptionLeg) -> Self {
        Self {
            kind: leg.kind.as_str().to_string(),
            direction: leg.direction.as_str().to_string(),
            strike: leg.strike,
            premium: leg.premium,
            quantity: leg.quantity,
        }
    }
}

/// Profit/loss of a single leg at expiration for underlying `price`.
///
/// Long: `(intrinsic - premium) * quantity`.
/// Short: `(premium - intrinsic) * quantity`.
#[must_use]
pub fn leg_payoff(price: f64, leg: &OptionLeg) -> f64 {
    leg.payoff(price)
}
