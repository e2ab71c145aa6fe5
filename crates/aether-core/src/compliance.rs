//! Simplified IFRA-style compliance rules.
//!
//! This is an approximation, not a certified regulatory check. It covers
//! three rules only:
//!
//! - Total declarable allergen content must not exceed 1.0% (leave-on products).
//! - Oakmoss must not exceed 0.1%.
//! - Any single ingredient above 20% is flagged as a warning.
//!
//! Allergens are matched by case-insensitive substring on the ingredient
//! name. An ingredient whose name contains several allergen names counts
//! once per match.

use serde::{Deserialize, Serialize};

use crate::formula::Ingredient;

pub const ALLERGENS: &[&str] = &["linalool", "citral", "limonene", "geraniol", "eugenol"];
pub const ALLERGEN_LIMIT_PCT: f64 = 1.0;
pub const OAKMOSS_LIMIT_PCT: f64 = 0.1;
pub const HIGH_CONCENTRATION_PCT: f64 = 20.0;

/// Input shape for a validation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationRequest {
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub compliant: bool,
    pub violations: Vec<String>,
    /// Informational only; never affect `compliant`.
    pub warnings: Vec<String>,
    pub allergen_total_pct: f64,
    pub allergen_limit_pct: f64,
}

/// Evaluate an ingredient list against the allergen and concentration rules.
pub fn validate_ingredients(ingredients: &[Ingredient]) -> ValidationResult {
    let mut violations = Vec::new();
    let mut warnings = Vec::new();
    let mut allergen_total = 0.0;

    for ingredient in ingredients {
        let name_lower = ingredient.name.to_lowercase();

        for allergen in ALLERGENS {
            if name_lower.contains(allergen) {
                allergen_total += ingredient.concentration;
            }
        }

        if name_lower.contains("oakmoss") && ingredient.concentration > OAKMOSS_LIMIT_PCT {
            violations.push(format!(
                "Oakmoss concentration ({:?}%) exceeds IFRA limit ({OAKMOSS_LIMIT_PCT:?}%)",
                ingredient.concentration
            ));
        }

        if ingredient.concentration > HIGH_CONCENTRATION_PCT {
            warnings.push(format!(
                "High concentration of {} ({:?}%)",
                ingredient.name, ingredient.concentration
            ));
        }
    }

    if allergen_total > ALLERGEN_LIMIT_PCT {
        violations.push(format!(
            "Total allergen concentration ({allergen_total:.2}%) exceeds limit ({ALLERGEN_LIMIT_PCT:?}%)"
        ));
    }

    tracing::debug!(
        ingredients = ingredients.len(),
        allergen_total,
        violations = violations.len(),
        warnings = warnings.len(),
        "validated formula"
    );

    ValidationResult {
        compliant: violations.is_empty(),
        violations,
        warnings,
        allergen_total_pct: allergen_total,
        allergen_limit_pct: ALLERGEN_LIMIT_PCT,
    }
}
