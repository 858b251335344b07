//! In-memory session state: the last assessment, the last recommendation and
//! the history they produce once the user leaves feedback.

use chrono::{DateTime, Utc};
use raga_core::{Assessment, Feedback, HistoryEntry};
use raga_rl_engine::RecommendationResult;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRecommendation {
    pub cluster: usize,
    pub raga_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct SessionTracker {
    history: Vec<HistoryEntry>,
    last_assessment: Option<Assessment>,
    last_recommendation: Option<LastRecommendation>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session over previously stored history.
    pub fn with_history(history: Vec<HistoryEntry>) -> Self {
        Self {
            history,
            ..Self::default()
        }
    }

    pub fn save_assessment(&mut self, assessment: Assessment) {
        self.last_assessment = Some(assessment);
    }

    pub fn save_recommendation(&mut self, result: &RecommendationResult) {
        self.last_recommendation = Some(LastRecommendation {
            cluster: result.cluster,
            raga_name: result.raga.clone(),
        });
    }

    /// Append a history entry for the last assessment and recommendation.
    /// Does nothing until both have been saved.
    pub fn save_feedback(
        &mut self,
        feedback: Feedback,
        at: DateTime<Utc>,
    ) -> Option<&HistoryEntry> {
        let (Some(assessment), Some(recommendation)) =
            (self.last_assessment, self.last_recommendation.as_ref())
        else {
            warn!("Feedback received without a pending recommendation, ignoring");
            return None;
        };

        self.history.push(HistoryEntry {
            date: at,
            stress_level: assessment.stress_level,
            energy_level: assessment.energy_level,
            gender: assessment.gender,
            raga_cluster: recommendation.cluster,
            raga_name: recommendation.raga_name.clone(),
            feedback: Some(feedback),
        });
        debug!(
            feedback = ?feedback,
            entries = self.history.len(),
            "Feedback recorded"
        );
        self.history.last()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn into_history(self) -> Vec<HistoryEntry> {
        self.history
    }

    /// Up to `n` entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.history.iter().rev().take(n).collect()
    }

    pub fn last_assessment(&self) -> Option<&Assessment> {
        self.last_assessment.as_ref()
    }

    pub fn last_recommendation(&self) -> Option<&LastRecommendation> {
        self.last_recommendation.as_ref()
    }

    /// Drop all session state, as on sign-out.
    pub fn clear(&mut self) {
        self.history.clear();
        self.last_assessment = None;
        self.last_recommendation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use raga_core::Gender;
    use raga_rl_engine::RecommendationEngine;

    fn assessment() -> Assessment {
        Assessment {
            stress_level: 4,
            energy_level: 30.0,
            gender: Gender::F,
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_feedback_requires_assessment_and_recommendation() {
        let mut session = SessionTracker::new();
        assert!(session.save_feedback(Feedback::Positive, t0()).is_none());

        session.save_assessment(assessment());
        assert!(session.save_feedback(Feedback::Positive, t0()).is_none());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_feedback_appends_entry() {
        let engine = RecommendationEngine::with_epsilon(0.0).unwrap();
        let mut session = SessionTracker::new();
        let input = assessment();
        session.save_assessment(input);
        let result = engine.recommend_assessment(&input);
        session.save_recommendation(&result);

        let entry = session
            .save_feedback(Feedback::Neutral, t0())
            .unwrap()
            .clone();
        assert_eq!(entry.stress_level, 4);
        assert_eq!(entry.energy_level, 30.0);
        assert_eq!(entry.gender, Gender::F);
        assert_eq!(entry.raga_cluster, result.cluster);
        assert_eq!(entry.raga_name, result.raga);
        assert_eq!(entry.feedback, Some(Feedback::Neutral));
        assert_eq!(entry.date, t0());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut session = SessionTracker::new();
        session.save_assessment(assessment());
        session.last_recommendation = Some(LastRecommendation {
            cluster: 0,
            raga_name: "Marwa".to_string(),
        });
        for day in 0..5 {
            session.save_feedback(Feedback::Positive, t0() + Duration::days(day));
        }

        let recent = session.recent(3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].date, t0() + Duration::days(4));
        assert_eq!(recent[2].date, t0() + Duration::days(2));
        assert_eq!(session.recent(10).len(), 5);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut session = SessionTracker::new();
        session.save_assessment(assessment());
        session.last_recommendation = Some(LastRecommendation {
            cluster: 3,
            raga_name: "Desh".to_string(),
        });
        session.save_feedback(Feedback::Negative, t0());

        session.clear();
        assert!(session.history().is_empty());
        assert!(session.last_assessment().is_none());
        assert!(session.last_recommendation().is_none());
    }
}
