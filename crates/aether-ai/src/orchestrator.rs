//! Formulation orchestrator: generative path first, deterministic fallback last.
//!
//! A request runs the recommendation stage, then the formula stage, strictly
//! in sequence. If either fails, or no backend is configured, the partial
//! result is dropped and the complete fallback formula is returned instead.
//! Generation failures never reach the caller; they are logged.

use std::sync::Arc;

use aether_core::{
    FormulaRecommendation, FormulaResponse, FormulaSource, Ingredient, IngredientSource,
    Longevity, MoodInput, NotePyramid, PhysiologicalProfile, ProfileError, ScentRecommendation,
    fallback_formula,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::backend::ChatBackend;
use crate::error::GenerationError;
use crate::stages::{generate_formula, recommend_scent};

pub const LONG_LASTING_SCORE: f64 = 8.0;
pub const DEFAULT_LONGEVITY_SCORE: f64 = 6.0;
pub const GENERATED_PROJECTION_SCORE: f64 = 7.0;

/// Whether requests can reach the generative backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Direct,
    Fallback,
}

/// Entry point for formulation requests.
///
/// Cheap to clone; the backend handle is shared.
#[derive(Clone)]
pub struct Formulator {
    backend: Option<Arc<dyn ChatBackend>>,
}

impl Formulator {
    pub fn new(backend: Option<Arc<dyn ChatBackend>>) -> Self {
        Self { backend }
    }

    /// A formulator that always returns the reference formula.
    pub fn fallback_only() -> Self {
        Self { backend: None }
    }

    pub fn mode(&self) -> Mode {
        if self.backend.is_some() {
            Mode::Direct
        } else {
            Mode::Fallback
        }
    }

    /// Produce a formula for the given wearer and mood.
    ///
    /// Only invalid input is an error. Every generation failure degrades to
    /// the fallback formula.
    pub async fn formulate(
        &self,
        profile: &PhysiologicalProfile,
        mood: &MoodInput,
    ) -> Result<FormulaResponse, ProfileError> {
        profile.validate()?;
        mood.validate()?;

        match self.generate(profile, mood).await {
            Ok(formula) => {
                info!(
                    formula_id = %formula.formula_id,
                    name = %formula.name,
                    ingredients = formula.ingredients.len(),
                    "generated formula"
                );
                Ok(formula)
            }
            Err(GenerationError::NotConfigured) => {
                debug!("generative backend not configured; using fallback formula");
                Ok(fallback_formula(profile, mood.free_text.as_deref()))
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "generation failed, using fallback formula");
                Ok(fallback_formula(profile, mood.free_text.as_deref()))
            }
        }
    }

    /// Run both generative stages without fallback.
    pub async fn generate(
        &self,
        profile: &PhysiologicalProfile,
        mood: &MoodInput,
    ) -> Result<FormulaResponse, GenerationError> {
        let backend = self
            .backend
            .as_deref()
            .ok_or(GenerationError::NotConfigured)?;

        let recommendation = recommend_scent(backend, mood, profile).await?;
        let formula = generate_formula(backend, &recommendation, profile).await?;
        Ok(normalize(&recommendation, formula))
    }
}

/// Map a generated formula onto the public response shape.
pub fn normalize(
    recommendation: &ScentRecommendation,
    formula: FormulaRecommendation,
) -> FormulaResponse {
    let ingredients: Vec<Ingredient> = formula
        .ingredients
        .into_iter()
        .map(|ing| Ingredient {
            name: ing.name,
            // Structure and logP need cheminformatics we don't run.
            smiles: String::new(),
            concentration: ing.percentage,
            note_type: ing.note_type,
            logp: 0.0,
            is_sustainable: true,
            source: IngredientSource::Natural,
        })
        .collect();

    let note_pyramid = NotePyramid::from_ingredients(&ingredients);

    let longevity_score = if recommendation.longevity == Longevity::LongLasting {
        LONG_LASTING_SCORE
    } else {
        DEFAULT_LONGEVITY_SCORE
    };

    let description = if formula.description.is_empty() {
        recommendation.mood_interpretation.clone()
    } else {
        formula.description
    };

    FormulaResponse {
        formula_id: Uuid::new_v4(),
        name: formula.name,
        description,
        ingredients,
        note_pyramid,
        longevity_score,
        projection_score: GENERATED_PROJECTION_SCORE,
        sustainability_score: formula.sustainability_score * 10.0,
        ifra_compliant: formula.ifra_compliant,
        physio_corrections_applied: formula.physio_adjustments,
        source: FormulaSource::Generated,
    }
}
