//! Static raga catalog and the per-cluster model coefficients.

use raga_core::{RagaError, RagaResult};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use utoipa::ToSchema;

pub const CLUSTER_COUNT: usize = 4;

/// A fixed grouping of ragas sharing one set of scoring weights.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RagaCluster {
    pub id: usize,
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = Vec<String>)]
    pub ragas: &'static [&'static str],
    #[schema(value_type = String)]
    pub description: &'static str,
}

impl RagaCluster {
    /// Uniform pick from this cluster's ragas. `None` only for an empty list,
    /// which catalog validation rules out.
    pub fn pick_raga<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&'static str> {
        self.ragas.choose(rng).copied()
    }

    /// Every raga in the cluster except `raga`.
    pub fn others<'a>(&'a self, raga: &'a str) -> impl Iterator<Item = &'static str> + 'a {
        self.ragas.iter().copied().filter(move |r| *r != raga)
    }
}

/// Logistic regression weights for one cluster. Only the `M` gender effect is
/// stored; `F` contributes nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelCoefficients {
    pub intercept: f64,
    pub stress: f64,
    pub energy: f64,
    pub gender_m: f64,
}

pub static RAGA_CLUSTERS: [RagaCluster; CLUSTER_COUNT] = [
    RagaCluster {
        id: 0,
        name: "Tension Relief",
        ragas: &["Bageshree", "Marwa", "Shankara"],
        description: "These ragas help alleviate tension and mental stress through their soothing melodic structures.",
    },
    RagaCluster {
        id: 1,
        name: "Energy & Focus",
        ragas: &["Darbari Kanada", "Yaman", "Bhairav"],
        description: "Ragas that enhance concentration and provide steady, balanced energy.",
    },
    RagaCluster {
        id: 2,
        name: "Uplift & Energize",
        ragas: &["Hamsadhwani", "Kedar", "Bihag"],
        description: "Bright, uplifting ragas that help counteract low energy states.",
    },
    RagaCluster {
        id: 3,
        name: "Balanced Calming",
        ragas: &["Kafi", "Madhuvanti", "Desh"],
        description: "These ragas provide a harmonizing effect, balancing both energy and calm.",
    },
];

pub static MODEL_COEFFICIENTS: [ModelCoefficients; CLUSTER_COUNT] = [
    // Tension Relief: high stress, lower energy
    ModelCoefficients {
        intercept: 0.2,
        stress: 0.3,
        energy: -0.005,
        gender_m: 0.1,
    },
    // Energy & Focus: lower stress, slightly higher energy
    ModelCoefficients {
        intercept: -0.1,
        stress: -0.15,
        energy: 0.01,
        gender_m: 0.05,
    },
    // Uplift & Energize: low stress, low energy
    ModelCoefficients {
        intercept: -0.3,
        stress: -0.1,
        energy: -0.02,
        gender_m: -0.1,
    },
    // Balanced Calming: moderate stress, slightly higher energy
    ModelCoefficients {
        intercept: 0.1,
        stress: 0.1,
        energy: 0.005,
        gender_m: -0.05,
    },
];

/// The shipped catalog, ordered by cluster id.
pub fn catalog() -> &'static [RagaCluster] {
    &RAGA_CLUSTERS
}

pub fn cluster(id: usize) -> Option<&'static RagaCluster> {
    RAGA_CLUSTERS.get(id)
}

/// Check the data invariants the engine relies on: ids match positions, no
/// cluster is empty, and every cluster has exactly one coefficient record.
pub fn validate_catalog(
    clusters: &[RagaCluster],
    coefficients: &[ModelCoefficients],
) -> RagaResult<()> {
    if clusters.is_empty() {
        return Err(RagaError::Catalog("catalog has no clusters".to_string()));
    }
    if clusters.len() != coefficients.len() {
        return Err(RagaError::Catalog(format!(
            "{} clusters but {} coefficient records",
            clusters.len(),
            coefficients.len()
        )));
    }
    for (position, cluster) in clusters.iter().enumerate() {
        if cluster.id != position {
            return Err(RagaError::Catalog(format!(
                "cluster '{}' has id {} at position {}",
                cluster.name, cluster.id, position
            )));
        }
        if cluster.ragas.is_empty() {
            return Err(RagaError::Catalog(format!(
                "cluster '{}' has no ragas",
                cluster.name
            )));
        }
    }
    Ok(())
}
