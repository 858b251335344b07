//! Raga recommendation engine: a fixed logistic-linear reward model over four
//! raga clusters, epsilon-greedy cluster selection, uniform raga pick and a
//! templated explanation of the choice.

pub mod catalog;
pub mod explanation;
pub mod features;
pub mod policy;
pub mod recommender;
pub mod reward;

pub use catalog::{catalog, RagaCluster, CLUSTER_COUNT, RAGA_CLUSTERS};
pub use features::FeatureVector;
pub use policy::EpsilonGreedy;
pub use recommender::{recommend, RecommendationEngine, RecommendationResult};
pub use reward::predict_arm_rewards;
