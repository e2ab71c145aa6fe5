//! Public formula shape returned to callers, plus the note pyramid arithmetic.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scent::{UnknownLabel, normalise_label};

/// Volatility class of an ingredient. `heart` and `middle` name the same class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum NoteType {
    Top,
    Middle,
    Base,
}

impl NoteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Base => "base",
        }
    }
}

impl fmt::Display for NoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = normalise_label(s);
        let class = label
            .strip_suffix("-notes")
            .or_else(|| label.strip_suffix("-note"))
            .unwrap_or(label.as_str());
        match class {
            "top" => Ok(Self::Top),
            "heart" | "middle" | "mid" => Ok(Self::Middle),
            "base" => Ok(Self::Base),
            _ => Err(UnknownLabel {
                kind: "note type",
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for NoteType {
    type Error = UnknownLabel;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IngredientSource {
    Natural,
    BioBased,
    Upcycled,
    Synthetic,
}

/// A single formula line in the public response and validation request shape.
///
/// `smiles` and `logp` are only populated by the fallback reference formula;
/// generated formulas carry empty/zero values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub smiles: String,
    /// Percentage of the finished product.
    pub concentration: f64,
    pub note_type: NoteType,
    pub logp: f64,
    pub is_sustainable: bool,
    pub source: IngredientSource,
}

/// Share of total concentration per note class, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NotePyramid {
    pub top: f64,
    pub middle: f64,
    pub base: f64,
}

impl NotePyramid {
    /// Compute the pyramid from ingredient concentrations.
    ///
    /// A zero total is treated as 1 so an all-zero formula yields `{0, 0, 0}`.
    pub fn from_ingredients(ingredients: &[Ingredient]) -> Self {
        let sum_of = |note: NoteType| -> f64 {
            ingredients
                .iter()
                .filter(|i| i.note_type == note)
                .map(|i| i.concentration)
                .sum()
        };
        let top = sum_of(NoteType::Top);
        let middle = sum_of(NoteType::Middle);
        let base = sum_of(NoteType::Base);

        let mut total = top + middle + base;
        if total == 0.0 {
            total = 1.0;
        }

        Self {
            top: round1(top / total * 100.0),
            middle: round1(middle / total * 100.0),
            base: round1(base / total * 100.0),
        }
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Which producer built a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormulaSource {
    Generated,
    Fallback,
}

/// Terminal artifact of a formulation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaResponse {
    pub formula_id: Uuid,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub note_pyramid: NotePyramid,
    /// 1–10.
    pub longevity_score: f64,
    /// 1–10.
    pub projection_score: f64,
    /// 0–10.
    pub sustainability_score: f64,
    pub ifra_compliant: bool,
    pub physio_corrections_applied: Vec<String>,
    pub source: FormulaSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ing(note_type: NoteType, concentration: f64) -> Ingredient {
        Ingredient {
            name: "Test".into(),
            smiles: String::new(),
            concentration,
            note_type,
            logp: 0.0,
            is_sustainable: true,
            source: IngredientSource::Natural,
        }
    }

    #[test]
    fn note_type_heart_aliases_middle() {
        assert_eq!("heart".parse::<NoteType>().unwrap(), NoteType::Middle);
        assert_eq!("Middle".parse::<NoteType>().unwrap(), NoteType::Middle);
        let parsed: NoteType = serde_json::from_str("\"heart\"").unwrap();
        assert_eq!(parsed, NoteType::Middle);
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"middle\"");
    }

    #[test]
    fn note_type_accepts_note_suffix() {
        assert_eq!("Heart Note".parse::<NoteType>().unwrap(), NoteType::Middle);
        assert_eq!("top note".parse::<NoteType>().unwrap(), NoteType::Top);
        assert_eq!("base_notes".parse::<NoteType>().unwrap(), NoteType::Base);
        assert_eq!("Middle-Note".parse::<NoteType>().unwrap(), NoteType::Middle);
        assert!("note".parse::<NoteType>().is_err());
        assert!("accord".parse::<NoteType>().is_err());
    }

    #[test]
    fn pyramid_splits_by_note_class() {
        let ingredients = vec![
            ing(NoteType::Top, 2.0),
            ing(NoteType::Middle, 3.0),
            ing(NoteType::Base, 4.0),
            ing(NoteType::Base, 1.0),
        ];
        let pyramid = NotePyramid::from_ingredients(&ingredients);
        assert_eq!(pyramid.top, 20.0);
        assert_eq!(pyramid.middle, 30.0);
        assert_eq!(pyramid.base, 50.0);
    }

    #[test]
    fn pyramid_rounds_to_one_decimal() {
        let ingredients = vec![ing(NoteType::Top, 1.0), ing(NoteType::Base, 2.0)];
        let pyramid = NotePyramid::from_ingredients(&ingredients);
        assert_eq!(pyramid.top, 33.3);
        assert_eq!(pyramid.middle, 0.0);
        assert_eq!(pyramid.base, 66.7);
    }

    #[test]
    fn pyramid_all_zero_does_not_divide_by_zero() {
        let ingredients = vec![ing(NoteType::Top, 0.0), ing(NoteType::Base, 0.0)];
        assert_eq!(NotePyramid::from_ingredients(&ingredients), NotePyramid::default());
        assert_eq!(NotePyramid::from_ingredients(&[]), NotePyramid::default());
    }

    #[test]
    fn ingredient_source_kebab_case() {
        assert_eq!(
            serde_json::to_string(&IngredientSource::BioBased).unwrap(),
            "\"bio-based\""
        );
    }
}
