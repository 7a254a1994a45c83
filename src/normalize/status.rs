use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::time::KickoffEncoding;

fn minute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{1,3}(\+\d{1,2})?'?$").expect("valid minute pattern"))
}

/// Coarse match phase behind a status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    Scheduled,
    Live,
    HalfTime,
    Finished,
    Postponed,
    Cancelled,
    Unknown,
}

impl MatchPhase {
    /// Whether the match has not kicked off (and so has no score yet).
    pub fn is_unplayed(self) -> bool {
        matches!(self, Self::Scheduled | Self::Postponed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub label: String,
    pub phase: MatchPhase,
}

impl Status {
    fn new(label: &str, phase: MatchPhase) -> Self {
        Self {
            label: label.to_string(),
            phase,
        }
    }
}

const TABLE: &[(&str, &str, MatchPhase)] = &[
    ("NS", "Scheduled", MatchPhase::Scheduled),
    ("TBD", "Scheduled", MatchPhase::Scheduled),
    ("VS", "Scheduled", MatchPhase::Scheduled),
    ("SCHEDULED", "Scheduled", MatchPhase::Scheduled),
    ("TIMED", "Scheduled", MatchPhase::Scheduled),
    ("NOT_STARTED", "Scheduled", MatchPhase::Scheduled),
    ("NOTSTARTED", "Scheduled", MatchPhase::Scheduled),
    ("PRE", "Scheduled", MatchPhase::Scheduled),
    ("FT", "Full Time", MatchPhase::Finished),
    ("FINISHED", "Full Time", MatchPhase::Finished),
    ("ENDED", "Full Time", MatchPhase::Finished),
    ("FULL_TIME", "Full Time", MatchPhase::Finished),
    ("FULLTIME", "Full Time", MatchPhase::Finished),
    ("SELESAI", "Full Time", MatchPhase::Finished),
    ("AET", "After Extra Time", MatchPhase::Finished),
    ("PEN", "Penalties", MatchPhase::Finished),
    ("FT_PEN", "Penalties", MatchPhase::Finished),
    ("HT", "Half Time", MatchPhase::HalfTime),
    ("HALFTIME", "Half Time", MatchPhase::HalfTime),
    ("HALF_TIME", "Half Time", MatchPhase::HalfTime),
    ("PAUSED", "Half Time", MatchPhase::HalfTime),
    ("PST", "Postponed", MatchPhase::Postponed),
    ("POSTPONED", "Postponed", MatchPhase::Postponed),
    ("DITUNDA", "Postponed", MatchPhase::Postponed),
    ("CANC", "Cancelled", MatchPhase::Cancelled),
    ("CANCELLED", "Cancelled", MatchPhase::Cancelled),
    ("CANCELED", "Cancelled", MatchPhase::Cancelled),
    ("DIBATALKAN", "Cancelled", MatchPhase::Cancelled),
    ("ABD", "Abandoned", MatchPhase::Cancelled),
    ("ABANDONED", "Abandoned", MatchPhase::Cancelled),
    ("LIVE", "Live", MatchPhase::Live),
    ("IN_PLAY", "Live", MatchPhase::Live),
    ("INPLAY", "Live", MatchPhase::Live),
];

/// Fixed lookup from source status codes to display labels.
///
/// Codes missing from the table are treated as live phase markers
/// (`"67"` becomes `"Live 67"`, `"2H"` becomes `"Live 2H"`); longer free text
/// is passed through as written.
#[derive(Debug, Clone, Default)]
pub struct StatusTable {
    overrides: HashMap<String, String>,
}

impl StatusTable {
    pub fn new(overrides: HashMap<String, String>) -> Self {
        Self {
            overrides: overrides
                .into_iter()
                .map(|(code, label)| (Self::key(&code), label))
                .collect(),
        }
    }

    fn key(code: &str) -> String {
        code.trim()
            .to_ascii_uppercase()
            .replace([' ', '-'], "_")
    }

    pub fn resolve(&self, code: Option<&str>) -> Status {
        let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
            return Status::new("Scheduled", MatchPhase::Scheduled);
        };
        let key = Self::key(code);

        if let Some(label) = self.overrides.get(&key) {
            let phase = TABLE
                .iter()
                .find(|(k, _, _)| *k == key)
                .map(|(_, _, phase)| *phase)
                .unwrap_or(MatchPhase::Unknown);
            return Status::new(label, phase);
        }

        if let Some((_, label, phase)) = TABLE.iter().find(|(k, _, _)| *k == key) {
            return Status::new(label, *phase);
        }

        // A kickoff clock in the status slot means the match has not started.
        if matches!(KickoffEncoding::classify(code), KickoffEncoding::Clock(_)) {
            return Status::new("Scheduled", MatchPhase::Scheduled);
        }

        if minute_pattern().is_match(code) || Self::is_code(code) {
            return Status {
                label: format!("Live {}", code),
                phase: MatchPhase::Live,
            };
        }

        Status {
            label: code.to_string(),
            phase: MatchPhase::Unknown,
        }
    }

    fn is_code(code: &str) -> bool {
        code.len() <= 4 && code.chars().all(|c| c.is_ascii_alphanumeric())
    }
}
