//! Per-request inputs: the wearer's skin profile and an optional mood description.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PH_RANGE: (f64, f64) = (3.0, 9.0);
pub const TEMPERATURE_RANGE: (f64, f64) = (35.0, 40.0);
pub const DEFAULT_TEMPERATURE_C: f64 = 36.5;

pub const DEFAULT_VALENCE: f64 = 0.3;
pub const DEFAULT_AROUSAL: f64 = 0.2;
pub const DEFAULT_MOOD_TEXT: &str = "a balanced, elegant fragrance for everyday wear";

#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    #[error("skin pH {0} outside range 3.0..=9.0")]
    PhOutOfRange(f64),

    #[error("skin temperature {0}C outside range 35.0..=40.0")]
    TemperatureOutOfRange(f64),

    #[error("{axis} {value} outside range -1.0..=1.0")]
    MoodOutOfRange { axis: &'static str, value: f64 },

    #[error("unknown skin type: {0:?} (expected dry, normal, or oily)")]
    UnknownSkinType(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinType {
    #[serde(alias = "Dry")]
    Dry,
    #[serde(alias = "Normal")]
    Normal,
    #[serde(alias = "Oily")]
    Oily,
}

impl SkinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dry => "dry",
            Self::Normal => "normal",
            Self::Oily => "oily",
        }
    }
}

impl fmt::Display for SkinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkinType {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dry" => Ok(Self::Dry),
            "normal" => Ok(Self::Normal),
            "oily" => Ok(Self::Oily),
            _ => Err(ProfileError::UnknownSkinType(s.to_string())),
        }
    }
}

/// Skin chemistry of the wearer, supplied once per formulation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysiologicalProfile {
    pub ph: f64,
    pub skin_type: SkinType,
    #[serde(default = "default_temperature")]
    pub temperature_c: f64,
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE_C
}

impl PhysiologicalProfile {
    /// Build a profile, rejecting values outside the accepted physiological ranges.
    pub fn new(ph: f64, skin_type: SkinType, temperature_c: f64) -> Result<Self, ProfileError> {
        let profile = Self {
            ph,
            skin_type,
            temperature_c,
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if !(PH_RANGE.0..=PH_RANGE.1).contains(&self.ph) {
            return Err(ProfileError::PhOutOfRange(self.ph));
        }
        if !(TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1).contains(&self.temperature_c) {
            return Err(ProfileError::TemperatureOutOfRange(self.temperature_c));
        }
        Ok(())
    }
}

/// Optional emotional input on the circumplex (valence/arousal) model.
///
/// Every field may be absent; the accessors resolve the documented defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodInput {
    #[serde(default)]
    pub free_text: Option<String>,
    #[serde(default)]
    pub valence: Option<f64>,
    #[serde(default)]
    pub arousal: Option<f64>,
}

impl MoodInput {
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (axis, value) in [("valence", self.valence), ("arousal", self.arousal)] {
            if let Some(value) = value
                && !(-1.0..=1.0).contains(&value)
            {
                return Err(ProfileError::MoodOutOfRange { axis, value });
            }
        }
        Ok(())
    }

    pub fn text(&self) -> &str {
        match self.free_text.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => DEFAULT_MOOD_TEXT,
        }
    }

    pub fn valence(&self) -> f64 {
        self.valence.unwrap_or(DEFAULT_VALENCE)
    }

    pub fn arousal(&self) -> f64 {
        self.arousal.unwrap_or(DEFAULT_AROUSAL)
    }
}
