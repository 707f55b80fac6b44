//! Error types for the payoff engine.
//!
//! Every failure is classified by an [`ErrorCode`] so outer layers (the
//! HTTP API) can map it to a status without matching on variants.
//!
//! | Code | Usage |
//! |------|-------|
//! | `INVALID_ARGUMENT` | Malformed request body or leg, degenerate, oversized or unordered price grid |
//! | `NOT_FOUND` | Unknown preset name |
//! | `INTERNAL` | Preset library failed to load |

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Caller supplied invalid input.
    InvalidArgument,
    /// Requested entity does not exist.
    NotFound,
    /// Unexpected failure on our side.
    Internal,
}

impl ErrorCode {
    /// Get the reason string for this code.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::NotFound => "NOT_FOUND",
            Self::Internal => "INTERNAL",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// Errors from payoff computation and preset lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayoffError {
    /// Invalid leg: unknown kind/direction, non-positive strike, non-finite value.
    #[error("Invalid leg: {message}")]
    InvalidLeg {
        /// Error message.
        message: String,
    },

    /// Invalid price grid or sample sequence.
    #[error("Invalid price grid: {message}")]
    InvalidGrid {
        /// Error message.
        message: String,
    },

    /// Request body could not be read.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Preset name not present in the library.
    #[error("Unknown preset: {name}")]
    UnknownPreset {
        /// Requested preset name.
        name: String,
    },

    /// Preset library could not be loaded.
    #[error("Preset library error: {message}")]
    PresetLibrary {
        /// Error message.
        message: String,
    },
}

impl PayoffError {
    /// Shorthand for [`PayoffError::InvalidLeg`].
    pub fn invalid_leg(message: impl Into<String>) -> Self {
        Self::InvalidLeg {
            message: message.into(),
        }
    }

    /// Shorthand for [`PayoffError::InvalidGrid`].
    pub fn invalid_grid(message: impl Into<String>) -> Self {
        Self::InvalidGrid {
            message: message.into(),
        }
    }

    /// Get the classification of this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidLeg { .. } | Self::InvalidGrid { .. } | Self::InvalidRequest { .. } => {
                ErrorCode::InvalidArgument
            }
            Self::UnknownPreset { .. } => ErrorCode::NotFound,
            Self::PresetLibrary { .. } => ErrorCode::Internal,
        }
    }
}
