use aether_core::{MoodInput, PhysiologicalProfile};

// ── Persona ──

pub(crate) const SYSTEM_PROMPT: &str = "\
You are Aether, an expert AI perfumer with deep knowledge of:
- Fragrance chemistry and molecular interactions
- Emotion-to-scent mapping based on neurological research
- IFRA safety guidelines and regulations
- Sustainability in perfumery

Your role is to analyze emotional states and physiological data to create
personalized fragrance formulations. You understand the circumplex model of
affect (valence-arousal) and how different scent molecules affect mood.

Always respond in valid JSON format.";

// ── Stage 1: scent recommendation ──

pub(crate) const RECOMMEND_TEMPERATURE: f32 = 0.7;
pub(crate) const RECOMMEND_MAX_TOKENS: u32 = 1500;

pub(crate) fn recommendation_prompt(mood: &MoodInput, profile: &PhysiologicalProfile) -> String {
    format!(
        "Analyze this emotional input and physiological profile to recommend a fragrance:\n\
         \n\
         **User Emotional Input:**\n\
         {emotional_input}\n\
         \n\
         **Mood Coordinates (Circumplex Model):**\n\
         - Valence: {valence} (range: -1 to 1, negative=unpleasant, positive=pleasant)\n\
         - Arousal: {arousal} (range: -1 to 1, low=calm, high=excited)\n\
         \n\
         **Physiological Profile:**\n\
         - Skin pH: {ph}\n\
         - Skin Type: {skin_type}\n\
         - Body Temperature: {temperature}C\n\
         \n\
         Based on this information, provide a scent recommendation in this exact JSON format:\n\
         {{\n\
         \x20   \"primary_family\": \"one of: Floral, Oriental, Woody, Fresh, Citrus, Aromatic, Chypre, Fougere, Gourmand, Aquatic\",\n\
         \x20   \"secondary_family\": \"complementary family from the same list\",\n\
         \x20   \"mood_interpretation\": \"2-3 sentence interpretation of the emotional state\",\n\
         \x20   \"top_notes\": [\"3-4 specific ingredients\"],\n\
         \x20   \"heart_notes\": [\"3-4 specific ingredients\"],\n\
         \x20   \"base_notes\": [\"2-3 specific ingredients\"],\n\
         \x20   \"intensity\": \"light/moderate/intense\",\n\
         \x20   \"longevity\": \"ephemeral/moderate/long-lasting\",\n\
         \x20   \"occasion\": \"suggested occasion for this fragrance\",\n\
         \x20   \"personality_match\": \"personality traits this fragrance suits\",\n\
         \x20   \"confidence_score\": 0.85\n\
         }}",
        emotional_input = mood.text(),
        valence = mood.valence(),
        arousal = mood.arousal(),
        ph = profile.ph,
        skin_type = profile.skin_type,
        temperature = profile.temperature_c,
    )
}

// ── Stage 2: concrete formula ──

pub(crate) const FORMULA_TEMPERATURE: f32 = 0.7;
pub(crate) const FORMULA_MAX_TOKENS: u32 = 2000;

pub(crate) fn formula_prompt(recommendation_json: &str, profile: &PhysiologicalProfile) -> String {
    format!(
        "Based on this scent recommendation, create a complete perfume formula:\n\
         \n\
         **Recommendation:**\n\
         {recommendation_json}\n\
         \n\
         **Physiological Constraints:**\n\
         - Skin pH: {ph} (affects volatility and projection)\n\
         - Skin Type: {skin_type} (affects longevity)\n\
         - Temperature: {temperature}C (affects diffusion)\n\
         \n\
         Create an IFRA-compliant formula with specific percentages. Respond in this exact JSON format:\n\
         {{\n\
         \x20   \"name\": \"creative fragrance name\",\n\
         \x20   \"description\": \"evocative 2-3 sentence description\",\n\
         \x20   \"ingredients\": [\n\
         \x20       {{\"name\": \"ingredient name\", \"percentage\": 5.0, \"note_type\": \"top/heart/base\", \"purpose\": \"brief purpose\"}},\n\
         \x20       ...\n\
         \x20   ],\n\
         \x20   \"total_concentration\": 15.0,\n\
         \x20   \"sustainability_score\": 0.75,\n\
         \x20   \"ifra_compliant\": true,\n\
         \x20   \"physio_adjustments\": [\"list of adjustments made for user's physiology\"]\n\
         }}\n\
         \n\
         Ensure total_concentration is between 10-20% for Eau de Parfum.\n\
         Include 8-12 ingredients total.",
        ph = profile.ph,
        skin_type = profile.skin_type,
        temperature = profile.temperature_c,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use aether_core::SkinType;

    fn profile() -> PhysiologicalProfile {
        PhysiologicalProfile {
            ph: 4.2,
            skin_type: SkinType::Oily,
            temperature_c: 37.5,
        }
    }

    #[test]
    fn recommendation_prompt_embeds_inputs() {
        let mood = MoodInput {
            free_text: Some("rainy afternoon in a library".into()),
            valence: Some(-0.4),
            arousal: None,
        };
        let prompt = recommendation_prompt(&mood, &profile());
        assert!(prompt.contains("rainy afternoon in a library"));
        assert!(prompt.contains("- Valence: -0.4"));
        assert!(prompt.contains("- Arousal: 0.2"));
        assert!(prompt.contains("- Skin pH: 4.2"));
        assert!(prompt.contains("- Skin Type: oily"));
        assert!(prompt.contains("- Body Temperature: 37.5C"));
        assert!(prompt.contains("\"confidence_score\": 0.85"));
    }

    #[test]
    fn formula_prompt_embeds_recommendation() {
        let prompt = formula_prompt("{\"primary_family\": \"Woody\"}", &profile());
        assert!(prompt.contains("{\"primary_family\": \"Woody\"}"));
        assert!(prompt.contains("Include 8-12 ingredients total."));
        assert!(prompt.contains("between 10-20%"));
    }
}
