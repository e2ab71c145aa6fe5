//! Decode-with-defaults for extracted model output.
//!
//! Each field is optional on the wire: absent or `null` takes the documented
//! default. A field that is present with the wrong type fails the whole
//! decode instead of being silently replaced. An ingredient's note class is
//! the one exception: any string is accepted, and a label that names no known
//! class falls back to middle.

use aether_core::{
    FormulaRecommendation, GeneratedIngredient, Intensity, Longevity, NoteType, ScentFamily,
    ScentRecommendation,
};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::GenerationError;

#[derive(Deserialize)]
struct RawRecommendation {
    primary_family: Option<ScentFamily>,
    secondary_family: Option<ScentFamily>,
    mood_interpretation: Option<String>,
    top_notes: Option<Vec<String>>,
    heart_notes: Option<Vec<String>>,
    base_notes: Option<Vec<String>>,
    intensity: Option<Intensity>,
    longevity: Option<Longevity>,
    occasion: Option<String>,
    personality_match: Option<String>,
    confidence_score: Option<f64>,
}

#[derive(Deserialize)]
struct RawIngredient {
    name: Option<String>,
    percentage: Option<f64>,
    note_type: Option<String>,
    purpose: Option<String>,
}

#[derive(Deserialize)]
struct RawFormula {
    name: Option<String>,
    description: Option<String>,
    ingredients: Option<Vec<RawIngredient>>,
    total_concentration: Option<f64>,
    sustainability_score: Option<f64>,
    ifra_compliant: Option<bool>,
    physio_adjustments: Option<Vec<String>>,
}

pub(crate) fn recommendation(
    obj: Map<String, Value>,
) -> Result<ScentRecommendation, GenerationError> {
    let raw: RawRecommendation =
        serde_json::from_value(Value::Object(obj)).map_err(|source| GenerationError::Decode {
            stage: "recommendation",
            source,
        })?;

    Ok(ScentRecommendation {
        primary_family: raw.primary_family.unwrap_or(ScentFamily::Fresh),
        secondary_family: raw.secondary_family.unwrap_or(ScentFamily::Floral),
        mood_interpretation: raw.mood_interpretation.unwrap_or_default(),
        top_notes: raw.top_notes.unwrap_or_default(),
        heart_notes: raw.heart_notes.unwrap_or_default(),
        base_notes: raw.base_notes.unwrap_or_default(),
        intensity: raw.intensity.unwrap_or(Intensity::Moderate),
        longevity: raw.longevity.unwrap_or(Longevity::Moderate),
        occasion: raw.occasion.unwrap_or_else(|| "everyday".to_string()),
        personality_match: raw.personality_match.unwrap_or_default(),
        confidence_score: raw.confidence_score.unwrap_or(0.8),
    })
}

pub(crate) fn formula(obj: Map<String, Value>) -> Result<FormulaRecommendation, GenerationError> {
    let raw: RawFormula =
        serde_json::from_value(Value::Object(obj)).map_err(|source| GenerationError::Decode {
            stage: "formula",
            source,
        })?;

    let ingredients = raw
        .ingredients
        .unwrap_or_default()
        .into_iter()
        .map(|ing| GeneratedIngredient {
            name: ing.name.unwrap_or_else(|| "Unknown".to_string()),
            percentage: ing.percentage.unwrap_or(5.0),
            note_type: ing.note_type.as_deref().map_or(NoteType::Middle, note_class),
            purpose: ing.purpose.unwrap_or_default(),
        })
        .collect();

    Ok(FormulaRecommendation {
        name: raw.name.unwrap_or_else(|| "Custom Fragrance".to_string()),
        description: raw.description.unwrap_or_default(),
        ingredients,
        total_concentration: raw.total_concentration.unwrap_or(15.0),
        sustainability_score: raw.sustainability_score.unwrap_or(0.7),
        ifra_compliant: raw.ifra_compliant.unwrap_or(true),
        physio_adjustments: raw.physio_adjustments.unwrap_or_default(),
    })
}

fn note_class(label: &str) -> NoteType {
    label.parse().unwrap_or_else(|_| {
        debug!(label, "unrecognised note type, counting as middle");
        NoteType::Middle
    })
}
