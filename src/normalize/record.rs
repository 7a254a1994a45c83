use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parser::fields::scalar_text;

/// Placeholder score for a match that has not been played.
pub const UNPLAYED_SCORE: &str = "-";

/// A side's score: goals when the source gave a count, text otherwise
/// (`"-"`, `""`, `"3 (4)"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Goals(u64),
    Text(String),
}

impl Score {
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Some(goals) = value.as_u64() {
            return Some(Self::Goals(goals));
        }
        let text = scalar_text(value)?;
        Some(match text.parse::<u64>() {
            Ok(goals) => Self::Goals(goals),
            Err(_) => Self::Text(text),
        })
    }

    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

/// The normalized output unit, serialized field for field into the
/// persisted array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub home_team: String,
    pub home_logo: String,
    pub home_score: Score,
    pub away_team: String,
    pub away_logo: String,
    pub away_score: Score,
    pub league_name: String,
    pub league_logo: String,
    pub league_round: String,
    pub status: String,
    pub match_date: String,
    pub match_time: String,
    #[serde(skip)]
    pub sort_instant: i64,
    pub link: String,
}
