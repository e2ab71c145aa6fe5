//! Deterministic reference formula used when generation is unavailable.
//!
//! No network access. The ingredient list, pyramid, and scores are fixed;
//! only the physiology correction notes and the formula name vary with input.

use uuid::Uuid;

use crate::formula::{
    FormulaResponse, FormulaSource, Ingredient, IngredientSource, NotePyramid, NoteType,
};
use crate::profile::{PhysiologicalProfile, SkinType};

pub const ACIDIC_PH: f64 = 4.5;
pub const ALKALINE_PH: f64 = 6.0;
pub const WARM_SKIN_C: f64 = 37.2;

pub const FALLBACK_DESCRIPTION: &str =
    "A personalized fragrance crafted by Aether AI, optimized for your unique skin chemistry.";

/// Correction notes for the given skin profile, in rule order.
pub fn physio_corrections(profile: &PhysiologicalProfile) -> Vec<String> {
    let mut corrections = Vec::new();

    if profile.ph < ACIDIC_PH {
        corrections.push("Reduced aldehyde concentration (acidic skin)".to_string());
    } else if profile.ph > ALKALINE_PH {
        corrections.push("Increased floral core (alkaline skin)".to_string());
    }

    match profile.skin_type {
        SkinType::Dry => {
            corrections.push("Boosted high-LogP fixatives (dry skin longevity)".to_string())
        }
        SkinType::Oily => {
            corrections.push("Enhanced top note projection (oily skin)".to_string())
        }
        SkinType::Normal => {}
    }

    if profile.temperature_c > WARM_SKIN_C {
        corrections.push("Adjusted volatility curve (warm skin)".to_string());
    }

    corrections
}

/// Pick a name by keyword. "fresh" is checked first.
pub fn formula_name(free_text: Option<&str>) -> &'static str {
    let Some(text) = free_text else {
        return "Aether Signature";
    };
    let lower = text.to_lowercase();
    if lower.contains("fresh") {
        "Morning Dew"
    } else if lower.contains("warm") || lower.contains("cozy") {
        "Golden Hour"
    } else {
        "Aether Signature"
    }
}

pub fn reference_ingredients() -> Vec<Ingredient> {
    let line = |name: &str, smiles: &str, concentration, note_type, logp, source| Ingredient {
        name: name.to_string(),
        smiles: smiles.to_string(),
        concentration,
        note_type,
        logp,
        is_sustainable: true,
        source,
    };

    vec![
        line(
            "Bergamot Oil (Citrus bergamia)",
            "CC(C)=CCCC(C)=CC=O",
            8.0,
            NoteType::Top,
            2.8,
            IngredientSource::Natural,
        ),
        line(
            "Linalool (Bio-based)",
            "CC(C)=CCCC(C)(O)C=C",
            12.0,
            NoteType::Middle,
            2.97,
            IngredientSource::BioBased,
        ),
        line(
            "Vanillin (Lignin-derived)",
            "COc1cc(C=O)ccc1O",
            5.0,
            NoteType::Base,
            1.37,
            IngredientSource::Upcycled,
        ),
        line(
            "Iso E Super (Bio Musk)",
            "CC1(C)CC2CCC1(C)C2(C)CC=O",
            15.0,
            NoteType::Base,
            4.2,
            IngredientSource::BioBased,
        ),
    ]
}

/// Build the complete fallback formula for a request.
pub fn fallback_formula(
    profile: &PhysiologicalProfile,
    free_text: Option<&str>,
) -> FormulaResponse {
    let corrections = physio_corrections(profile);
    tracing::debug!(corrections = corrections.len(), "built fallback formula");

    FormulaResponse {
        formula_id: Uuid::new_v4(),
        name: formula_name(free_text).to_string(),
        description: FALLBACK_DESCRIPTION.to_string(),
        ingredients: reference_ingredients(),
        note_pyramid: NotePyramid {
            top: 20.0,
            middle: 35.0,
            base: 45.0,
        },
        longevity_score: 8.5,
        projection_score: 7.2,
        sustainability_score: 9.0,
        ifra_compliant: true,
        physio_corrections_applied: corrections,
        source: FormulaSource::Fallback,
    }
}
