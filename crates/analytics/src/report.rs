//! Aggregate views over a user's session history.

use chrono::{DateTime, Utc};
use raga_core::{Feedback, HistoryEntry, RagaError, RagaResult};
use raga_rl_engine::{catalog, CLUSTER_COUNT};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of entries shown in the "recent sessions" list.
pub const RECENT_SESSIONS: usize = 3;

/// Divisor putting 0-100 energy on the 0-5 stress axis.
const ENERGY_TO_STRESS_AXIS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WellnessBand {
    Excellent,
    Good,
    Fair,
    Low,
    Unrated,
}

impl WellnessBand {
    pub fn from_score(score: Option<u32>) -> Self {
        match score {
            Some(s) if s >= 80 => WellnessBand::Excellent,
            Some(s) if s >= 60 => WellnessBand::Good,
            Some(s) if s >= 40 => WellnessBand::Fair,
            Some(s) if s > 0 => WellnessBand::Low,
            _ => WellnessBand::Unrated,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterShare {
    pub cluster: usize,
    pub name: String,
    pub count: usize,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RagaFeedbackSummary {
    pub name: String,
    pub cluster: usize,
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Every session with this raga, with or without feedback.
    pub total: usize,
    pub satisfaction_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    pub stress_level: i32,
    /// Energy rescaled onto the 0-5 stress axis.
    pub energy_level: f64,
    pub energy_level_raw: f64,
}

/// Rounded mean of feedback points, `None` when no entry carries feedback.
pub fn wellness_score(history: &[HistoryEntry]) -> Option<u32> {
    let scores: Vec<u32> = history
        .iter()
        .filter_map(|e| e.feedback.map(Feedback::score))
        .collect();
    if scores.is_empty() {
        return None;
    }
    let mean = f64::from(scores.iter().sum::<u32>()) / scores.len() as f64;
    Some(mean.round() as u32)
}

pub fn feedback_count(history: &[HistoryEntry]) -> usize {
    history.iter().filter(|e| e.feedback.is_some()).count()
}

/// Reject entries whose `ragaCluster` is not in the catalog.
pub fn validate_history(history: &[HistoryEntry]) -> RagaResult<()> {
    match history.iter().position(|e| e.raga_cluster >= CLUSTER_COUNT) {
        Some(index) => Err(RagaError::Validation(format!(
            "history entry {index} has an unknown 'ragaCluster' {}",
            history[index].raga_cluster
        ))),
        None => Ok(()),
    }
}

/// Sessions per catalog cluster, omitting clusters never recommended.
/// Percentages are taken over entries with a known cluster.
pub fn cluster_distribution(history: &[HistoryEntry]) -> Vec<ClusterShare> {
    let total = history
        .iter()
        .filter(|e| e.raga_cluster < CLUSTER_COUNT)
        .count();
    catalog()
        .iter()
        .filter_map(|cluster| {
            let count = history
                .iter()
                .filter(|e| e.raga_cluster == cluster.id)
                .count();
            (count > 0).then(|| ClusterShare {
                cluster: cluster.id,
                name: cluster.name.to_string(),
                count,
                percent: count as f64 / total as f64 * 100.0,
            })
        })
        .collect()
}

/// Feedback tallies per raga, most frequent first. Ties keep the order in
/// which ragas first appear in the history.
pub fn feedback_by_raga(history: &[HistoryEntry]) -> Vec<RagaFeedbackSummary> {
    let mut summaries: Vec<RagaFeedbackSummary> = Vec::new();

    for entry in history {
        let index = match summaries.iter().position(|s| s.name == entry.raga_name) {
            Some(index) => index,
            None => {
                summaries.push(RagaFeedbackSummary {
                    name: entry.raga_name.clone(),
                    cluster: entry.raga_cluster,
                    positive: 0,
                    neutral: 0,
                    negative: 0,
                    total: 0,
                    satisfaction_score: 0.0,
                });
                summaries.len() - 1
            }
        };
        let summary = &mut summaries[index];
        match entry.feedback {
            Some(Feedback::Positive) => summary.positive += 1,
            Some(Feedback::Neutral) => summary.neutral += 1,
            Some(Feedback::Negative) => summary.negative += 1,
            None => {}
        }
        summary.total += 1;
    }

    for summary in &mut summaries {
        summary.satisfaction_score = if summary.total > 0 {
            (summary.positive * 100 + summary.neutral * 50) as f64 / (summary.total * 100) as f64
                * 100.0
        } else {
            0.0
        };
    }

    // stable: equal totals keep first-appearance order
    summaries.sort_by(|a, b| b.total.cmp(&a.total));
    summaries
}

/// History in chronological order with energy also on the stress axis.
pub fn stress_energy_trend(history: &[HistoryEntry]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = history
        .iter()
        .map(|e| TrendPoint {
            date: e.date,
            stress_level: e.stress_level,
            energy_level: e.energy_level / ENERGY_TO_STRESS_AXIS,
            energy_level_raw: e.energy_level,
        })
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

pub fn average_stress(history: &[HistoryEntry]) -> Option<f64> {
    if history.is_empty() {
        return None;
    }
    let sum: i64 = history.iter().map(|e| i64::from(e.stress_level)).sum();
    Some(sum as f64 / history.len() as f64)
}

pub fn average_energy(history: &[HistoryEntry]) -> Option<f64> {
    if history.is_empty() {
        return None;
    }
    let sum: f64 = history.iter().map(|e| e.energy_level).sum();
    Some(sum / history.len() as f64)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_sessions: usize,
    pub feedback_entries: usize,
    pub wellness_score: Option<u32>,
    pub wellness_band: WellnessBand,
    pub average_stress: Option<f64>,
    pub average_energy: Option<f64>,
    pub cluster_distribution: Vec<ClusterShare>,
    pub feedback_by_raga: Vec<RagaFeedbackSummary>,
    pub trend: Vec<TrendPoint>,
    /// Newest first.
    pub recent_sessions: Vec<HistoryEntry>,
}

impl AnalyticsReport {
    pub fn build(history: &[HistoryEntry]) -> Self {
        let score = wellness_score(history);
        Self {
            total_sessions: history.len(),
            feedback_entries: feedback_count(history),
            wellness_score: score,
            wellness_band: WellnessBand::from_score(score),
            average_stress: average_stress(history),
            average_energy: average_energy(history),
            cluster_distribution: cluster_distribution(history),
            feedback_by_raga: feedback_by_raga(history),
            trend: stress_energy_trend(history),
            recent_sessions: history.iter().rev().take(RECENT_SESSIONS).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use raga_core::Gender;

    fn entry(day: i64, cluster: usize, raga: &str, feedback: Option<Feedback>) -> HistoryEntry {
        HistoryEntry {
            date: Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap() + Duration::days(day),
            stress_level: 2 + (day % 3) as i32,
            energy_level: 40.0 + day as f64 * 5.0,
            gender: Gender::M,
            raga_cluster: cluster,
            raga_name: raga.to_string(),
            feedback,
        }
    }

    #[test]
    fn test_wellness_score() {
        assert_eq!(wellness_score(&[]), None);
        assert_eq!(wellness_score(&[entry(0, 0, "Marwa", None)]), None);

        let history = vec![
            entry(0, 0, "Marwa", Some(Feedback::Positive)),
            entry(1, 0, "Marwa", Some(Feedback::Neutral)),
            entry(2, 1, "Yaman", None),
        ];
        assert_eq!(wellness_score(&history), Some(75));

        let history = vec![
            entry(0, 0, "Marwa", Some(Feedback::Positive)),
            entry(1, 0, "Marwa", Some(Feedback::Negative)),
            entry(2, 0, "Marwa", Some(Feedback::Negative)),
        ];
        // 33.33 rounds down
        assert_eq!(wellness_score(&history), Some(33));
    }

    #[test]
    fn test_wellness_bands() {
        assert_eq!(WellnessBand::from_score(Some(100)), WellnessBand::Excellent);
        assert_eq!(WellnessBand::from_score(Some(80)), WellnessBand::Excellent);
        assert_eq!(WellnessBand::from_score(Some(79)), WellnessBand::Good);
        assert_eq!(WellnessBand::from_score(Some(40)), WellnessBand::Fair);
        assert_eq!(WellnessBand::from_score(Some(1)), WellnessBand::Low);
        assert_eq!(WellnessBand::from_score(Some(0)), WellnessBand::Unrated);
        assert_eq!(WellnessBand::from_score(None), WellnessBand::Unrated);
    }

    #[test]
    fn test_cluster_distribution_omits_empty_clusters() {
        let history = vec![
            entry(0, 0, "Marwa", None),
            entry(1, 0, "Shankara", None),
            entry(2, 2, "Kedar", None),
            entry(3, 0, "Marwa", None),
        ];
        let shares = cluster_distribution(&history);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].cluster, 0);
        assert_eq!(shares[0].name, "Tension Relief");
        assert_eq!(shares[0].count, 3);
        assert!((shares[0].percent - 75.0).abs() < 1e-9);
        assert_eq!(shares[1].cluster, 2);
        assert_eq!(shares[1].count, 1);
        assert!(cluster_distribution(&[]).is_empty());
    }

    #[test]
    fn test_cluster_distribution_ignores_unknown_clusters() {
        let history = vec![
            entry(0, 0, "Marwa", None),
            entry(1, 9, "Unlisted", None),
            entry(2, 3, "Bhimpalasi", None),
            entry(3, 0, "Marwa", None),
        ];
        let shares = cluster_distribution(&history);
        assert_eq!(shares.len(), 2);
        assert!((shares[0].percent - 200.0 / 3.0).abs() < 1e-9);
        let sum: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((sum - 100.0).abs() < 1e-9);

        assert!(cluster_distribution(&[entry(0, 9, "Unlisted", None)]).is_empty());
    }

    #[test]
    fn test_validate_history() {
        assert!(validate_history(&[]).is_ok());
        assert!(validate_history(&[entry(0, 3, "Bhimpalasi", None)]).is_ok());

        let history = vec![entry(0, 1, "Yaman", None), entry(1, 4, "Unlisted", None)];
        let err = validate_history(&history).unwrap_err();
        assert!(matches!(err, RagaError::Validation(_)));
        assert!(err.to_string().contains("entry 1"));
    }

    #[test]
    fn test_feedback_by_raga() {
        let history = vec![
            entry(0, 1, "Yaman", Some(Feedback::Positive)),
            entry(1, 0, "Marwa", Some(Feedback::Positive)),
            entry(2, 0, "Marwa", Some(Feedback::Neutral)),
            entry(3, 0, "Marwa", None),
            entry(4, 3, "Desh", Some(Feedback::Negative)),
        ];
        let summaries = feedback_by_raga(&history);
        assert_eq!(summaries.len(), 3);

        let marwa = &summaries[0];
        assert_eq!(marwa.name, "Marwa");
        assert_eq!((marwa.positive, marwa.neutral, marwa.negative), (1, 1, 0));
        assert_eq!(marwa.total, 3);
        assert!((marwa.satisfaction_score - 50.0).abs() < 1e-9);

        // tie on total keeps first appearance
        assert_eq!(summaries[1].name, "Yaman");
        assert!((summaries[1].satisfaction_score - 100.0).abs() < 1e-9);
        assert_eq!(summaries[2].name, "Desh");
        assert_eq!(summaries[2].satisfaction_score, 0.0);
        assert_eq!(summaries[2].cluster, 3);
    }

    #[test]
    fn test_trend_is_chronological() {
        let history = vec![
            entry(5, 0, "Marwa", None),
            entry(1, 1, "Yaman", None),
            entry(3, 2, "Bihag", None),
        ];
        let trend = stress_energy_trend(&history);
        let dates: Vec<_> = trend.iter().map(|p| p.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        assert_eq!(trend[0].energy_level_raw, 45.0);
        assert!((trend[0].energy_level - 2.25).abs() < 1e-9);
    }

    #[test]
    fn test_report() {
        let empty = AnalyticsReport::build(&[]);
        assert_eq!(empty.total_sessions, 0);
        assert_eq!(empty.wellness_band, WellnessBand::Unrated);
        assert!(empty.average_stress.is_none());

        let history: Vec<_> = (0..5)
            .map(|day| entry(day, 0, "Marwa", Some(Feedback::Positive)))
            .collect();
        let report = AnalyticsReport::build(&history);
        assert_eq!(report.total_sessions, 5);
        assert_eq!(report.feedback_entries, 5);
        assert_eq!(report.wellness_score, Some(100));
        assert_eq!(report.wellness_band, WellnessBand::Excellent);
        assert_eq!(report.recent_sessions.len(), RECENT_SESSIONS);
        assert_eq!(report.recent_sessions[0].date, history[4].date);
        // energy 40, 45, 50, 55, 60
        assert!((report.average_energy.unwrap() - 50.0).abs() < 1e-9);
        // stress 2, 3, 4, 2, 3
        assert!((report.average_stress.unwrap() - 2.8).abs() < 1e-9);
    }
}
