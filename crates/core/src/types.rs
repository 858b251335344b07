use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Self-reported gender used as a binary model feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// Model indicator: 1 for `M`, 0 for `F`.
    pub fn indicator(self) -> f64 {
        match self {
            Gender::M => 1.0,
            Gender::F => 0.0,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::M => f.write_str("M"),
            Gender::F => f.write_str("F"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" | "male" => Ok(Gender::M),
            "f" | "female" => Ok(Gender::F),
            other => Err(format!("unknown gender '{other}', expected M or F")),
        }
    }
}

/// User feedback on a delivered recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Positive,
    Neutral,
    Negative,
}

impl Feedback {
    /// Points contributed to the wellness score.
    pub fn score(self) -> u32 {
        match self {
            Feedback::Positive => 100,
            Feedback::Neutral => 50,
            Feedback::Negative => 0,
        }
    }
}

/// Raw self-assessment as submitted by the user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    /// Stress on a 0-5 scale.
    pub stress_level: i32,
    /// Energy on a 0-100 scale.
    pub energy_level: f64,
    pub gender: Gender,
}

/// One completed session in a user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub stress_level: i32,
    pub energy_level: f64,
    pub gender: Gender,
    pub raga_cluster: usize,
    pub raga_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
}
