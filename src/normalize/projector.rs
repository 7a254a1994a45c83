use chrono::{DateTime, Utc};
use log::debug;

use super::image::ImageCanonicalizer;
use super::link::canonical_link;
use super::record::{CanonicalRecord, Score, UNPLAYED_SCORE};
use super::status::{MatchPhase, StatusTable};
use super::time::{KickoffEncoding, TimeNormalizer};
use crate::core::{PipelineConfig, SkipReason};
use crate::parser::{CandidateRecord, RecordView, Side};

pub const UNKNOWN_LEAGUE: &str = "Unknown League";

/// Maps one candidate and its group context onto a `CanonicalRecord`.
#[derive(Debug, Clone)]
pub struct Projector {
    time: TimeNormalizer,
    images: ImageCanonicalizer,
    statuses: StatusTable,
    base_url: Option<url::Url>,
}

impl Projector {
    pub fn new(config: &PipelineConfig, reference: DateTime<Utc>) -> Self {
        Self {
            time: TimeNormalizer::from_config(config).with_reference(reference),
            images: ImageCanonicalizer::from_config(config),
            statuses: StatusTable::new(config.status_overrides.clone()),
            base_url: config.base_url.clone(),
        }
    }

    pub fn project(&self, candidate: &CandidateRecord<'_>) -> Result<CanonicalRecord, SkipReason> {
        let view = RecordView::new(candidate.node).ok_or(SkipReason::NotAMapping)?;

        let (home_team, away_team) = match (view.team_name(Side::Home), view.team_name(Side::Away)) {
            (Some(home), Some(away)) => (home, away),
            (None, Some(_)) => return Err(SkipReason::MissingHomeTeam),
            (Some(_), None) => return Err(SkipReason::MissingAwayTeam),
            (None, None) => return Err(SkipReason::MissingTeams),
        };

        let status = self.statuses.resolve(view.status_code().as_deref());
        let kickoff = self.time.resolve(KickoffEncoding::of_record(&view));
        let competition = view.competition().overlay(candidate.context.fields());

        let score = |side| {
            view.team_score(side)
                .and_then(Score::from_value)
                .unwrap_or_else(|| Self::missing_score(status.phase))
        };
        let logo = |side| {
            view.team_logo(side)
                .map(|raw| self.images.canonicalize(&raw))
                .unwrap_or_default()
        };

        let record = CanonicalRecord {
            home_logo: logo(Side::Home),
            home_score: score(Side::Home),
            away_logo: logo(Side::Away),
            away_score: score(Side::Away),
            league_name: competition
                .name
                .unwrap_or_else(|| UNKNOWN_LEAGUE.to_string()),
            league_logo: competition
                .logo
                .map(|raw| self.images.canonicalize(&raw))
                .unwrap_or_default(),
            league_round: competition.round.unwrap_or_default(),
            status: status.label,
            match_date: kickoff.date,
            match_time: kickoff.time,
            sort_instant: kickoff.sort_instant,
            link: view
                .link()
                .and_then(|raw| canonical_link(&raw, self.base_url.as_ref()))
                .unwrap_or_default(),
            home_team,
            away_team,
        };
        debug!(
            "Projected {} vs {} ({}, {} {})",
            record.home_team, record.away_team, record.league_name, record.match_date, record.match_time
        );
        Ok(record)
    }

    fn missing_score(phase: MatchPhase) -> Score {
        if phase.is_unplayed() {
            Score::text(UNPLAYED_SCORE)
        } else {
            Score::default()
        }
    }
}
