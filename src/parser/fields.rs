//! Alias tables and path lookups shared by the signatures, the deduplicator
//! and the projector.
//!
//! Sites rename keys between deployments (`homeTeam`, `home_team`,
//! `homeCompetitor`, ...), so every field is looked up through a list of
//! aliases and the first non-empty hit wins.

use serde_json::{Map, Value};

use super::context::GroupFields;

pub const HOME_KEYS: &[&str] = &[
    "homeTeam",
    "home_team",
    "homeCompetitor",
    "home",
    "teamHome",
    "localteam",
    "team1",
    "teamA",
];

pub const AWAY_KEYS: &[&str] = &[
    "awayTeam",
    "away_team",
    "awayCompetitor",
    "away",
    "teamAway",
    "visitorteam",
    "team2",
    "teamB",
];

pub const KICKOFF_KEYS: &[&str] = &[
    "kickoff",
    "kickoffTime",
    "kickoffAt",
    "kickOff",
    "startDate",
    "startTime",
    "start_time",
    "startTimestamp",
    "utcDate",
    "kickoff_time",
    "matchTime",
    "match_time",
    "dateTime",
    "datetime",
    "date",
    "time",
    "timestamp",
];

/// Date-only fields that pair with a bare clock kickoff.
const DATE_KEYS: &[&str] = &["date", "matchDate", "match_date", "day"];

const TEAM_NAME_KEYS: &[&str] = &["name", "displayName", "teamName", "shortName", "title"];

const TEAM_LOGO_KEYS: &[&str] = &[
    "logo",
    "logoUrl",
    "imageUrl",
    "image",
    "crest",
    "badge",
    "imageObject.path",
    "image.url",
];

const TEAM_SCORE_KEYS: &[&str] = &["score", "goals", "currentScore", "score.current"];

const HOME_LOGO_KEYS: &[&str] = &["homeLogo", "home_logo", "homeTeamLogo"];
const AWAY_LOGO_KEYS: &[&str] = &["awayLogo", "away_logo", "awayTeamLogo"];

const HOME_SCORE_KEYS: &[&str] = &[
    "homeScore",
    "home_score",
    "scoreHome",
    "homeGoals",
    "score.home",
    "homeScore.current",
    "homeScore.display",
    "score.fullTime.home",
];

const AWAY_SCORE_KEYS: &[&str] = &[
    "awayScore",
    "away_score",
    "scoreAway",
    "awayGoals",
    "score.away",
    "awayScore.current",
    "awayScore.display",
    "score.fullTime.away",
];

const STATUS_KEYS: &[&str] = &[
    "status.short",
    "status.code",
    "status.type",
    "statusCode",
    "status",
    "matchStatus",
    "state",
    "period",
    "infoMessage",
    "minute",
];

const LINK_KEYS: &[&str] = &["link", "url", "href", "matchLink", "match_link", "matchUrl", "@id"];

const GROUP_NAME_KEYS: &[&str] = &[
    "sectionHeader.title",
    "sectionHeader.name",
    "competition.name",
    "league.name",
    "tournament.name",
    "competitionName",
    "leagueName",
    "tournamentName",
    "title",
    "name",
];

const GROUP_LOGO_KEYS: &[&str] = &[
    "sectionHeader.logo",
    "sectionHeader.image",
    "sectionHeader.imageObject.path",
    "competition.logo",
    "competition.image",
    "competition.emblem",
    "league.logo",
    "league.image",
    "tournament.logo",
    "competitionLogo",
    "leagueLogo",
    "logo",
    "emblem",
    "image",
    "imageObject.path",
];

const GROUP_ROUND_KEYS: &[&str] = &[
    "sectionHeader.subtitle",
    "round",
    "roundName",
    "roundInfo.name",
    "roundInfo.round",
    "stage",
    "matchday",
    "competition.round",
    "league.round",
];

/// Competition keys a record may carry about itself. Bare `name`/`title`
/// are left out: on a record they usually describe the match.
const RECORD_COMPETITION_NAME_KEYS: &[&str] = &[
    "competition.name",
    "league.name",
    "tournament.name",
    "competitionName",
    "leagueName",
    "tournamentName",
    "competition",
    "league",
];

const RECORD_COMPETITION_LOGO_KEYS: &[&str] = &[
    "competition.logo",
    "competition.image",
    "competition.emblem",
    "league.logo",
    "league.image",
    "tournament.logo",
    "competitionLogo",
    "leagueLogo",
];

/// Keys whose object value announces the competition of everything below it.
pub const HEADER_KEYS: &[&str] = &["sectionHeader", "competition", "league", "tournament"];

/// Walks a dotted path through nested mappings.
pub fn lookup<'a>(map: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = map.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Text of a scalar: trimmed non-empty strings and numbers. Objects, arrays,
/// booleans and null have no text.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn first_text(map: &Map<String, Value>, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| lookup(map, path).and_then(scalar_text))
}

/// A team side is either a bare name or a mapping describing the team.
/// Purely numeric strings are scores, not names.
pub fn is_team_like(value: &Value) -> bool {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && trimmed.parse::<f64>().is_err()
        }
        Value::Object(_) => true,
        _ => false,
    }
}

/// Competition metadata declared directly on a container node.
pub fn group_fields(map: &Map<String, Value>) -> GroupFields {
    GroupFields {
        name: first_text(map, GROUP_NAME_KEYS),
        logo: first_text(map, GROUP_LOGO_KEYS),
        round: first_text(map, GROUP_ROUND_KEYS),
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Side {
    Home,
    Away,
}

/// Read-only accessor over a candidate match record.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> RecordView<'a> {
    pub fn new(node: &'a Value) -> Option<Self> {
        node.as_object().map(|map| Self { map })
    }

    pub fn raw(&self) -> &'a Map<String, Value> {
        self.map
    }

    fn side_keys(side: Side) -> &'static [&'static str] {
        match side {
            Side::Home => HOME_KEYS,
            Side::Away => AWAY_KEYS,
        }
    }

    fn team(&self, side: Side) -> Option<&'a Value> {
        Self::side_keys(side)
            .iter()
            .filter_map(|key| self.map.get(*key))
            .find(|value| is_team_like(value))
    }

    pub fn team_name(&self, side: Side) -> Option<String> {
        match self.team(side)? {
            Value::Object(team) => first_text(team, TEAM_NAME_KEYS),
            other => scalar_text(other),
        }
    }

    pub fn team_logo(&self, side: Side) -> Option<String> {
        let flat = match side {
            Side::Home => HOME_LOGO_KEYS,
            Side::Away => AWAY_LOGO_KEYS,
        };
        self.team(side)
            .and_then(Value::as_object)
            .and_then(|team| first_text(team, TEAM_LOGO_KEYS))
            .or_else(|| first_text(self.map, flat))
    }

    pub fn team_score(&self, side: Side) -> Option<&'a Value> {
        let flat = match side {
            Side::Home => HOME_SCORE_KEYS,
            Side::Away => AWAY_SCORE_KEYS,
        };
        let nested = self.team(side).and_then(Value::as_object).and_then(|team| {
            TEAM_SCORE_KEYS
                .iter()
                .filter_map(|path| lookup(team, path))
                .find(|value| scalar_text(value).is_some())
        });
        nested.or_else(|| {
            flat.iter()
                .filter_map(|path| lookup(self.map, path))
                .find(|value| scalar_text(value).is_some())
        })
    }

    /// Every kickoff alias holding text or a number, in alias order.
    pub fn kickoff_values(&self) -> impl Iterator<Item = &'a Value> + 'a {
        let map = self.map;
        KICKOFF_KEYS
            .iter()
            .filter_map(move |key| map.get(*key))
            .filter(|value| value.is_string() || value.is_number())
    }

    /// First kickoff alias present, parseable or not.
    pub fn kickoff(&self) -> Option<&'a Value> {
        self.kickoff_values().next()
    }

    pub fn match_date(&self) -> Option<String> {
        first_text(self.map, DATE_KEYS)
    }

    /// Kickoff rendered as text, used for identity keys.
    pub fn kickoff_text(&self) -> Option<String> {
        self.kickoff().and_then(scalar_text)
    }

    pub fn status_code(&self) -> Option<String> {
        first_text(self.map, STATUS_KEYS)
    }

    pub fn link(&self) -> Option<String> {
        first_text(self.map, LINK_KEYS)
    }

    /// Competition metadata the record carries about itself.
    pub fn competition(&self) -> GroupFields {
        GroupFields {
            name: first_text(self.map, RECORD_COMPETITION_NAME_KEYS),
            logo: first_text(self.map, RECORD_COMPETITION_LOGO_KEYS),
            round: first_text(self.map, GROUP_ROUND_KEYS),
        }
    }
}
