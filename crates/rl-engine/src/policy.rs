//! Epsilon-greedy cluster selection.

use raga_core::{RagaError, RagaResult};
use rand::Rng;

pub const DEFAULT_EPSILON: f64 = 0.1;

/// Outcome of one policy decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    /// True when the index came from the exploration branch.
    pub explored: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> RagaResult<Self> {
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(RagaError::Config(format!(
                "epsilon must be within [0, 1], got {epsilon}"
            )));
        }
        Ok(Self { epsilon })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// With probability epsilon pick a uniform random index, otherwise the
    /// arg-max. Returns `None` for an empty score slice.
    pub fn select<R: Rng + ?Sized>(&self, scores: &[f64], rng: &mut R) -> Option<Selection> {
        if scores.is_empty() {
            return None;
        }

        if rng.gen::<f64>() < self.epsilon {
            return Some(Selection {
                index: rng.gen_range(0..scores.len()),
                explored: true,
            });
        }

        argmax(scores).map(|index| Selection {
            index,
            explored: false,
        })
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// Index of the highest score; the earliest index wins ties.
pub fn argmax(scores: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &score) in scores.iter().enumerate() {
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }
    best.map(|(index, _)| index)
}
