//! The two generative stages. Each makes exactly one backend call.

use aether_core::{FormulaRecommendation, MoodInput, PhysiologicalProfile, ScentRecommendation};
use tracing::debug;

use crate::backend::{ChatBackend, ChatRequest};
use crate::error::GenerationError;
use crate::extract::extract_json_object;
use crate::{decode, prompts};

/// Stage 1: interpret mood and skin profile as an abstract scent profile.
pub async fn recommend_scent(
    backend: &dyn ChatBackend,
    mood: &MoodInput,
    profile: &PhysiologicalProfile,
) -> Result<ScentRecommendation, GenerationError> {
    let request = ChatRequest {
        system: prompts::SYSTEM_PROMPT.to_string(),
        user: prompts::recommendation_prompt(mood, profile),
        temperature: prompts::RECOMMEND_TEMPERATURE,
        max_tokens: prompts::RECOMMEND_MAX_TOKENS,
    };

    let raw = backend.complete_chat(&request).await?;
    let recommendation = decode::recommendation(extract_json_object(&raw)?)?;
    debug!(
        primary = %recommendation.primary_family,
        secondary = %recommendation.secondary_family,
        confidence = recommendation.confidence_score,
        "scent recommendation decoded"
    );
    Ok(recommendation)
}

/// Stage 2: turn a scent profile into a percentaged ingredient list.
///
/// Percentages are taken as generated; nothing here checks that they sum
/// to the requested total.
pub async fn generate_formula(
    backend: &dyn ChatBackend,
    recommendation: &ScentRecommendation,
    profile: &PhysiologicalProfile,
) -> Result<FormulaRecommendation, GenerationError> {
    let recommendation_json = serde_json::to_string_pretty(recommendation).map_err(|source| {
        GenerationError::Decode {
            stage: "recommendation",
            source,
        }
    })?;

    let request = ChatRequest {
        system: prompts::SYSTEM_PROMPT.to_string(),
        user: prompts::formula_prompt(&recommendation_json, profile),
        temperature: prompts::FORMULA_TEMPERATURE,
        max_tokens: prompts::FORMULA_MAX_TOKENS,
    };

    let raw = backend.complete_chat(&request).await?;
    let formula = decode::formula(extract_json_object(&raw)?)?;
    debug!(
        name = %formula.name,
        ingredients = formula.ingredients.len(),
        total_concentration = formula.total_concentration,
        "formula decoded"
    );
    Ok(formula)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::backend::{ChatBackend, ChatRequest};
    use crate::error::BackendError;

    /// Backend that replays scripted replies in order and records each request.
    pub(crate) struct ScriptedBackend {
        replies: Mutex<VecDeque<Result<String, BackendError>>>,
        pub(crate) requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedBackend {
        pub(crate) fn new(replies: Vec<Result<String, BackendError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn ok(replies: &[&str]) -> Self {
            Self::new(replies.iter().map(|r| Ok(r.to_string())).collect())
        }

        pub(crate) fn calls(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn complete_chat(&self, request: &ChatRequest) -> Result<String, BackendError> {
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(BackendError::EmptyResponse))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedBackend;
    use super::*;
    use aether_core::{Longevity, NoteType, ScentFamily, SkinType};

    use crate::error::BackendError;

    fn profile() -> PhysiologicalProfile {
        PhysiologicalProfile {
            ph: 5.5,
            skin_type: SkinType::Normal,
            temperature_c: 36.5,
        }
    }

    #[tokio::test]
    async fn recommendation_uses_persona_and_budget() {
        let backend = ScriptedBackend::ok(&[r#"{"primary_family": "Citrus"}"#]);
        let rec = recommend_scent(&backend, &MoodInput::default(), &profile())
            .await
            .unwrap();
        assert_eq!(rec.primary_family, ScentFamily::Citrus);

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].system.starts_with("You are Aether"));
        assert_eq!(requests[0].temperature, 0.7);
        assert_eq!(requests[0].max_tokens, 1500);
        assert!(requests[0].user.contains("a balanced, elegant fragrance for everyday wear"));
    }

    #[tokio::test]
    async fn recommendation_from_fenced_reply() {
        let reply = "Here you go:\n```json\n{\"longevity\": \"long-lasting\"}\n```";
        let backend = ScriptedBackend::ok(&[reply]);
        let rec = recommend_scent(&backend, &MoodInput::default(), &profile())
            .await
            .unwrap();
        assert_eq!(rec.longevity, Longevity::LongLasting);
        assert_eq!(rec.secondary_family, ScentFamily::Floral);
    }

    #[tokio::test]
    async fn recommendation_propagates_backend_error() {
        let backend = ScriptedBackend::new(vec![Err(BackendError::Status {
            status: 500,
            body: "boom".into(),
        })]);
        let err = recommend_scent(&backend, &MoodInput::default(), &profile())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "backend");
    }

    #[tokio::test]
    async fn recommendation_propagates_parse_error() {
        let backend = ScriptedBackend::ok(&["I'd suggest something woody."]);
        let err = recommend_scent(&backend, &MoodInput::default(), &profile())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[tokio::test]
    async fn formula_prompt_carries_recommendation_json() {
        let backend = ScriptedBackend::ok(&[
            r#"{"name": "Cedar Rain", "ingredients": [{"name": "Cedarwood", "percentage": 6.0, "note_type": "base"}]}"#,
        ]);
        let rec = crate::decode::recommendation(serde_json::Map::new()).unwrap();
        let formula = generate_formula(&backend, &rec, &profile()).await.unwrap();

        assert_eq!(formula.name, "Cedar Rain");
        assert_eq!(formula.ingredients[0].note_type, NoteType::Base);
        assert_eq!(formula.sustainability_score, 0.7);

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests[0].max_tokens, 2000);
        assert!(requests[0].user.contains("\"primary_family\": \"Fresh\""));
        assert!(requests[0].user.contains("\"occasion\": \"everyday\""));
    }
}
