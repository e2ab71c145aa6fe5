//! Intermediate records produced by the two generative stages.
//!
//! A [`ScentRecommendation`] is the abstract scent profile from the first
//! stage; a [`FormulaRecommendation`] is the concrete ingredient list from
//! the second. Neither is persisted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::formula::NoteType;

/// Raised when a generated enum value is not one of the accepted labels.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

pub(crate) fn normalise_label(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['_', ' '], "-")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ScentFamily {
    Floral,
    Oriental,
    Woody,
    Fresh,
    Citrus,
    Aromatic,
    Chypre,
    Fougere,
    Gourmand,
    Aquatic,
}

impl ScentFamily {
    pub const ALL: [ScentFamily; 10] = [
        Self::Floral,
        Self::Oriental,
        Self::Woody,
        Self::Fresh,
        Self::Citrus,
        Self::Aromatic,
        Self::Chypre,
        Self::Fougere,
        Self::Gourmand,
        Self::Aquatic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Floral => "Floral",
            Self::Oriental => "Oriental",
            Self::Woody => "Woody",
            Self::Fresh => "Fresh",
            Self::Citrus => "Citrus",
            Self::Aromatic => "Aromatic",
            Self::Chypre => "Chypre",
            Self::Fougere => "Fougere",
            Self::Gourmand => "Gourmand",
            Self::Aquatic => "Aquatic",
        }
    }
}

impl fmt::Display for ScentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScentFamily {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalise_label(s);
        Self::ALL
            .into_iter()
            .find(|family| family.as_str().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UnknownLabel {
                kind: "scent family",
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for ScentFamily {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Intensity {
    Light,
    #[default]
    Moderate,
    Intense,
}

impl FromStr for Intensity {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_label(s).as_str() {
            "light" => Ok(Self::Light),
            "moderate" => Ok(Self::Moderate),
            "intense" => Ok(Self::Intense),
            _ => Err(UnknownLabel {
                kind: "intensity",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Intensity {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum Longevity {
    Ephemeral,
    #[default]
    Moderate,
    LongLasting,
}

impl FromStr for Longevity {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_label(s).as_str() {
            "ephemeral" => Ok(Self::Ephemeral),
            "moderate" => Ok(Self::Moderate),
            "long-lasting" => Ok(Self::LongLasting),
            _ => Err(UnknownLabel {
                kind: "longevity",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Longevity {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Abstract scent profile derived from mood and skin chemistry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScentRecommendation {
    pub primary_family: ScentFamily,
    pub secondary_family: ScentFamily,
    pub mood_interpretation: String,
    pub top_notes: Vec<String>,
    pub heart_notes: Vec<String>,
    pub base_notes: Vec<String>,
    pub intensity: Intensity,
    pub longevity: Longevity,
    pub occasion: String,
    pub personality_match: String,
    pub confidence_score: f64,
}

/// One ingredient line as the generative backend describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedIngredient {
    pub name: String,
    pub percentage: f64,
    pub note_type: NoteType,
    pub purpose: String,
}

/// Concrete formula produced by the second generative stage.
///
/// Percentages and `ifra_compliant` are self-reported by the backend and
/// are not re-checked here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaRecommendation {
    pub name: String,
    pub description: String,
    pub ingredients: Vec<GeneratedIngredient>,
    pub total_concentration: f64,
    pub sustainability_score: f64,
    pub ifra_compliant: bool,
    pub physio_adjustments: Vec<String>,
}
