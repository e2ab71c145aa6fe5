pub mod compliance;
pub mod fallback;
pub mod formula;
pub mod profile;
pub mod scent;

pub use compliance::{ValidationResult, validate_ingredients};
pub use fallback::{fallback_formula, physio_corrections};
pub use formula::{
    FormulaResponse, FormulaSource, Ingredient, IngredientSource, NotePyramid, NoteType,
};
pub use profile::{MoodInput, PhysiologicalProfile, ProfileError, SkinType};
pub use scent::{
    FormulaRecommendation, GeneratedIngredient, Intensity, Longevity, ScentFamily,
    ScentRecommendation,
};
