//! Human-readable rationale for a recommendation.
//!
//! Each cluster owns one template function. Templates branch on the raw
//! stress and energy values the user reported, not the normalized features.

use crate::catalog::CLUSTER_COUNT;

/// Stress above this (0-5 scale) counts as elevated.
pub const HIGH_STRESS_THRESHOLD: i32 = 3;
/// Energy below this (0-100 scale) counts as low.
pub const LOW_ENERGY_THRESHOLD: f64 = 40.0;

/// Inputs a template may interpolate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplanationContext {
    pub confidence: f64,
    pub stress_level: i32,
    pub energy_level: f64,
}

impl ExplanationContext {
    fn high_stress(&self) -> bool {
        self.stress_level > HIGH_STRESS_THRESHOLD
    }

    fn low_energy(&self) -> bool {
        self.energy_level < LOW_ENERGY_THRESHOLD
    }

    fn match_pct(&self) -> f64 {
        (self.confidence * 100.0).round()
    }
}

type Explainer = fn(&ExplanationContext) -> String;

static EXPLAINERS: [Explainer; CLUSTER_COUNT] = [
    tension_relief,
    energy_and_focus,
    uplift_and_energize,
    balanced_calming,
];

/// Explanation for `cluster`, or a generic fallback for unknown clusters.
pub fn explain(cluster: usize, ctx: &ExplanationContext) -> String {
    match EXPLAINERS.get(cluster) {
        Some(explainer) => explainer(ctx),
        None => fallback(ctx),
    }
}

fn tension_relief(ctx: &ExplanationContext) -> String {
    if ctx.high_stress() {
        format!(
            "Your stress level of {}/5 is elevated. Tension Relief ragas use slow, \
             soothing phrases to help release mental strain ({}% match).",
            ctx.stress_level,
            ctx.match_pct()
        )
    } else {
        format!(
            "At a stress level of {}/5, Tension Relief ragas gently ease the \
             everyday tension that builds up even on calmer days ({}% match).",
            ctx.stress_level,
            ctx.match_pct()
        )
    }
}

fn energy_and_focus(ctx: &ExplanationContext) -> String {
    if ctx.low_energy() {
        format!(
            "With your energy at {}%, Energy & Focus ragas offer a steady pulse \
             that helps you concentrate without feeling drained ({}% match).",
            ctx.energy_level,
            ctx.match_pct()
        )
    } else {
        format!(
            "Your energy level of {}% gives a good base for focus. Energy & Focus \
             ragas help channel it into sustained concentration ({}% match).",
            ctx.energy_level,
            ctx.match_pct()
        )
    }
}

fn uplift_and_energize(ctx: &ExplanationContext) -> String {
    if ctx.low_energy() {
        format!(
            "Your energy level of {}% is on the low side. Uplift & Energize ragas \
             have bright, lively melodies to lift your mood ({}% match).",
            ctx.energy_level,
            ctx.match_pct()
        )
    } else {
        format!(
            "With your energy at {}%, Uplift & Energize ragas keep a bright mood \
             going and carry your current momentum forward ({}% match).",
            ctx.energy_level,
            ctx.match_pct()
        )
    }
}

fn balanced_calming(ctx: &ExplanationContext) -> String {
    if ctx.high_stress() {
        format!(
            "With stress at {}/5, Balanced Calming ragas settle the mind while \
             keeping you alert ({}% match).",
            ctx.stress_level,
            ctx.match_pct()
        )
    } else if ctx.low_energy() {
        format!(
            "With energy at {}%, Balanced Calming ragas restore calm without \
             pulling your energy down further ({}% match).",
            ctx.energy_level,
            ctx.match_pct()
        )
    } else {
        format!(
            "With stress at {}/5 and energy at {}%, you seem fairly balanced right \
             now. Balanced Calming ragas help you keep that harmony between energy \
             and calm ({}% match).",
            ctx.stress_level,
            ctx.energy_level,
            ctx.match_pct()
        )
    }
}

fn fallback(ctx: &ExplanationContext) -> String {
    format!(
        "This recommendation is based on your current stress and energy levels \
         ({}% match).",
        ctx.match_pct()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(stress_level: i32, energy_level: f64) -> ExplanationContext {
        ExplanationContext {
            confidence: 0.6455,
            stress_level,
            energy_level,
        }
    }

    #[test]
    fn test_tension_relief_mentions_high_stress() {
        let text = explain(0, &ctx(5, 10.0));
        assert!(text.contains("5/5"));
        assert!(text.contains("elevated"));
        assert!(text.contains("65% match"));
    }

    #[test]
    fn test_tension_relief_alternate_phrasing() {
        for stress in 0..=3 {
            let text = explain(0, &ctx(stress, 80.0));
            assert!(!text.contains("elevated"));
            assert!(text.contains(&format!("stress level of {stress}/5")));
            assert!(text.contains("everyday tension"));
        }
    }

    #[test]
    fn test_energy_threshold_is_strict() {
        assert!(explain(2, &ctx(1, 39.0)).contains("39% is on the low side"));
        assert!(!explain(2, &ctx(1, 40.0)).contains("low side"));
        assert!(explain(2, &ctx(1, 40.0)).contains("energy at 40%"));
        assert!(explain(1, &ctx(1, 20.0)).contains("energy at 20%"));
        assert!(explain(1, &ctx(1, 70.0)).contains("energy level of 70%"));
    }

    #[test]
    fn test_balanced_calming_branches() {
        assert!(explain(3, &ctx(4, 20.0)).contains("stress at 4/5"));
        assert!(explain(3, &ctx(2, 20.0)).contains("energy at 20%"));
        let balanced = explain(3, &ctx(2, 60.0));
        assert!(balanced.contains("fairly balanced"));
        assert!(balanced.contains("stress at 2/5 and energy at 60%"));
    }

    #[test]
    fn test_fractional_energy_is_rendered() {
        assert!(explain(1, &ctx(0, 37.5)).contains("37.5%"));
    }

    #[test]
    fn test_unknown_cluster_falls_back() {
        let text = explain(17, &ctx(5, 10.0));
        assert!(text.starts_with("This recommendation is based on"));
    }
}
