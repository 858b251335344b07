//! Input normalization into the model's feature range.

use raga_core::{Assessment, Gender};

/// Upper end of the raw stress scale.
pub const STRESS_SCALE: f64 = 5.0;
/// Upper end of the raw energy scale.
pub const ENERGY_SCALE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub stress: f64,
    pub energy: f64,
    pub gender: Gender,
}

impl FeatureVector {
    /// Rescale raw inputs into `[0, 1]`. Out-of-range inputs are not clamped
    /// and land outside that range.
    pub fn normalize(stress_level: i32, energy_level: f64, gender: Gender) -> Self {
        Self {
            stress: f64::from(stress_level) / STRESS_SCALE,
            energy: energy_level / ENERGY_SCALE,
            gender,
        }
    }
}

impl From<&Assessment> for FeatureVector {
    fn from(assessment: &Assessment) -> Self {
        Self::normalize(
            assessment.stress_level,
            assessment.energy_level,
            assessment.gender,
        )
    }
}
