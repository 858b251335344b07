//! Per-cluster reward prediction from the fixed logistic model.

use crate::catalog::{ModelCoefficients, MODEL_COEFFICIENTS};
use crate::features::FeatureVector;

pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Linear score `intercept + w_s*stress + w_e*energy + w_g*[gender == M]`.
pub fn linear_score(coef: &ModelCoefficients, features: &FeatureVector) -> f64 {
    coef.intercept
        + coef.stress * features.stress
        + coef.energy * features.energy
        + coef.gender_m * features.gender.indicator()
}

/// Predicted reward probability for every cluster, in catalog order.
pub fn predict_arm_rewards(features: &FeatureVector) -> Vec<f64> {
    predict_with(&MODEL_COEFFICIENTS, features)
}

pub fn predict_with(coefficients: &[ModelCoefficients], features: &FeatureVector) -> Vec<f64> {
    coefficients
        .iter()
        .map(|coef| sigmoid(linear_score(coef, features)))
        .collect()
}
