//! Preset strategy library.
//!
//! Presets are static data: a name, human-readable description and example
//! text, and a fixed list of legs. The built-in library is embedded from
//! `presets.yaml`; a replacement file can be configured. The library is
//! loaded once at startup and shared read-only.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::PayoffError;
use crate::payoff::Portfolio;

const BUILTIN_PRESETS: &str = include_str!("../presets.yaml");

/// A named example portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Display name, unique within a library (case-insensitive).
    pub name: String,
    /// What the strategy is and when it is used.
    #[serde(default)]
    pub description: String,
    /// Worked example for the preset's numbers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    /// Legs used to pre-populate the portfolio.
    pub legs: Portfolio,
}

#[derive(Debug, Deserialize)]
struct PresetFile {
    presets: Vec<Preset>,
}

/// Ordered collection of presets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PresetLibrary {
    presets: Vec<Preset>,
}

impl PresetLibrary {
    /// The library embedded in the binary.
    pub fn builtin() -> Result<Self, PayoffError> {
        Self::from_yaml_str(BUILTIN_PRESETS)
    }

    /// Load a library from a YAML file, or the built-in one when `path` is `None`.
    pub fn load(path: Option<&str>) -> Result<Self, PayoffError> {
        let Some(path) = path else {
            return Self::builtin();
        };

        let contents = std::fs::read_to_string(path).map_err(|e| PayoffError::PresetLibrary {
            message: format!("failed to read '{path}': {e}"),
        })?;
        let library = Self::from_yaml_str(&contents)?;

        tracing::info!(path, presets = library.len(), "Loaded preset library");
        Ok(library)
    }

    /// Parse a library from YAML text.
    ///
    /// Every leg is validated while parsing; duplicate names are rejected.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, PayoffError> {
        let file: PresetFile =
            serde_yaml_bw::from_str(yaml).map_err(|e| PayoffError::PresetLibrary {
                message: e.to_string(),
            })?;
        Self::new(file.presets)
    }

    /// Build a library from presets, rejecting empty or duplicate names.
    pub fn new(presets: Vec<Preset>) -> Result<Self, PayoffError> {
        let mut seen = HashSet::new();
        for preset in &presets {
            let key = preset.name.trim().to_lowercase();
            if key.is_empty() {
                return Err(PayoffError::PresetLibrary {
                    message: "preset name must not be empty".to_string(),
                });
            }
            if !seen.insert(key) {
                return Err(PayoffError::PresetLibrary {
                    message: format!("duplicate preset name '{}'", preset.name),
                });
            }
        }
        Ok(Self { presets })
    }

    /// Look up a preset by name (case-insensitive).
    pub fn get(&self, name: &str) -> Result<&Preset, PayoffError> {
        let wanted = name.trim();
        self.presets
            .iter()
            .find(|p| p.name.trim().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PayoffError::UnknownPreset {
                name: name.to_string(),
            })
    }

    /// Preset names in library order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.iter().map(|p| p.name.as_str())
    }

    /// Iterate over presets in library order.
    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    /// Number of presets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Check if the library has no presets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
