//! Recommendation orchestrator: normalize, predict, select, pick, explain.

use crate::catalog::{validate_catalog, RagaCluster, MODEL_COEFFICIENTS, RAGA_CLUSTERS};
use crate::explanation::{explain, ExplanationContext};
use crate::features::FeatureVector;
use crate::policy::EpsilonGreedy;
use crate::reward::predict_arm_rewards;
use raga_core::config::EngineConfig;
use raga_core::{Assessment, Gender, RagaResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub cluster: usize,
    pub cluster_name: String,
    pub cluster_description: String,
    pub raga: String,
    /// Predicted score of the chosen cluster.
    pub confidence: f64,
    /// Predicted score of every cluster, in catalog order.
    pub all_probabilities: Vec<f64>,
    pub explanation: String,
    /// Whether the cluster came from exploration rather than the arg-max.
    #[serde(default)]
    pub explored: bool,
}

/// Stateless recommendation engine over the shipped catalog. Safe to share
/// across threads; every call draws its own randomness.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    policy: EpsilonGreedy,
}

impl RecommendationEngine {
    /// Build an engine after validating the shipped catalog and epsilon.
    pub fn new(config: &EngineConfig) -> RagaResult<Self> {
        Self::with_epsilon(config.epsilon)
    }

    pub fn with_epsilon(epsilon: f64) -> RagaResult<Self> {
        validate_catalog(&RAGA_CLUSTERS, &MODEL_COEFFICIENTS)?;
        Ok(Self {
            policy: EpsilonGreedy::new(epsilon)?,
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.policy.epsilon()
    }

    pub fn catalog(&self) -> &'static [RagaCluster] {
        &RAGA_CLUSTERS
    }

    pub fn recommend(
        &self,
        stress_level: i32,
        energy_level: f64,
        gender: Gender,
    ) -> RecommendationResult {
        self.recommend_with_rng(stress_level, energy_level, gender, &mut rand::thread_rng())
    }

    pub fn recommend_assessment(&self, assessment: &Assessment) -> RecommendationResult {
        self.recommend(
            assessment.stress_level,
            assessment.energy_level,
            assessment.gender,
        )
    }

    /// Same as [`recommend`](Self::recommend) with an explicit randomness
    /// source for both the exploration coin flip and the raga pick.
    pub fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        stress_level: i32,
        energy_level: f64,
        gender: Gender,
        rng: &mut R,
    ) -> RecommendationResult {
        let features = FeatureVector::normalize(stress_level, energy_level, gender);
        let scores = predict_arm_rewards(&features);

        // Scores are never empty for a validated catalog.
        let selection = self.policy.select(&scores, rng).unwrap_or_default();
        let cluster = &RAGA_CLUSTERS[selection.index];
        let raga = cluster.pick_raga(rng).unwrap_or_default();
        let confidence = scores[selection.index];

        let explanation = explain(
            selection.index,
            &ExplanationContext {
                confidence,
                stress_level,
                energy_level,
            },
        );

        debug!(
            cluster = selection.index,
            raga,
            confidence,
            explored = selection.explored,
            "Recommendation selected"
        );

        RecommendationResult {
            cluster: selection.index,
            cluster_name: cluster.name.to_string(),
            cluster_description: cluster.description.to_string(),
            raga: raga.to_string(),
            confidence,
            all_probabilities: scores,
            explanation,
            explored: selection.explored,
        }
    }
}

/// One-shot recommendation with the default exploration rate.
pub fn recommend(stress_level: i32, energy_level: f64, gender: Gender) -> RecommendationResult {
    RecommendationEngine::default().recommend(stress_level, energy_level, gender)
}
