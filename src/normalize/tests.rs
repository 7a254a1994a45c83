use super::*;
use crate::core::{PipelineConfig, SkipReason};
use crate::parser::{SignatureSet, StructuralMatcher};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use url::Url;

fn project_all(config: &PipelineConfig, tree: &Value) -> Vec<Result<CanonicalRecord, SkipReason>> {
    let reference = Utc.with_ymd_and_hms(2026, 1, 7, 20, 0, 0).unwrap();
    let projector = Projector::new(config, reference);
    let signatures = SignatureSet::default();
    StructuralMatcher::new(&signatures)
        .matches(tree)
        .map(|candidate| projector.project(&candidate))
        .collect()
}

fn record(date: &str, time: &str, league: &str, home: &str) -> CanonicalRecord {
    CanonicalRecord {
        home_team: home.into(),
        home_logo: String::new(),
        home_score: Score::default(),
        away_team: "Away".into(),
        away_logo: String::new(),
        away_score: Score::default(),
        league_name: league.into(),
        league_logo: String::new(),
        league_round: String::new(),
        status: "Scheduled".into(),
        match_date: date.into(),
        match_time: time.into(),
        sort_instant: 0,
        link: String::new(),
    }
}

#[test]
fn projects_the_section_header_scenario() {
    let tree = json!({
        "matchCards": [{
            "homeTeam": {"name": "A"},
            "awayTeam": {"name": "B"},
            "kickoff": "2026-01-07T17:30:00Z"
        }],
        "sectionHeader": {"title": "Test League"}
    });
    let out = project_all(&PipelineConfig::default(), &tree);
    assert_eq!(out.len(), 1);

    let record = out[0].as_ref().unwrap();
    assert_eq!(record.league_name, "Test League");
    assert_eq!(record.home_team, "A");
    assert_eq!(record.away_team, "B");
    assert_eq!(record.match_date, "2026-01-08");
    assert_eq!(record.match_time, "00:30");
    assert_eq!(record.status, "Scheduled");
    assert_eq!(record.home_score, Score::text(UNPLAYED_SCORE));
}

#[test]
fn fills_literal_defaults() {
    let tree = json!([{"home": "A", "away": "B", "status": "FT"}]);
    let record = project_all(&PipelineConfig::default(), &tree)
        .remove(0)
        .unwrap();

    assert_eq!(record.league_name, UNKNOWN_LEAGUE);
    assert_eq!(record.league_logo, "");
    assert_eq!(record.home_logo, "");
    assert_eq!(record.link, "");
    assert_eq!(record.status, "Full Time");
    // Played but no score in the source.
    assert_eq!(record.home_score, Score::default());
    assert_eq!((record.match_date.as_str(), record.match_time.as_str()), (TBD, TBD));
}

#[test]
fn maps_scores_logos_links_and_live_status() {
    let tree = json!({
        "league": {"name": "Liga 1", "logo": "https://img.example/l.png?w=16&h=16"},
        "events": [{
            "homeTeam": {"name": "Persija", "logo": "https://img.example/p.png?w=32&h=32", "score": 2},
            "awayTeam": {"name": "Persib", "score": "1"},
            "status": "67'",
            "startTimestamp": 1767807000,
            "link": "/match/persija-persib#stats"
        }]
    });
    let config = PipelineConfig::default()
        .with_base_url(Url::parse("https://site.example/fixtures").unwrap());
    let record = project_all(&config, &tree).remove(0).unwrap();

    assert_eq!(record.home_score, Score::Goals(2));
    assert_eq!(record.away_score, Score::Goals(1));
    assert_eq!(record.status, "Live 67'");
    assert_eq!(record.home_logo, "https://img.example/p.png?w=128&h=128");
    assert_eq!(record.league_logo, "https://img.example/l.png?w=128&h=128");
    assert_eq!(record.link, "https://site.example/match/persija-persib");
    assert_eq!(record.sort_instant, 1767807000);
    assert_eq!(record.match_time, "00:30");
}

#[test]
fn nested_current_score_and_relative_logo() {
    let tree = json!([{
        "homeTeam": {"name": "A", "score": {"current": 2}, "logo": "/crests/a.png?w=24&h=24"},
        "awayTeam": {"name": "B", "score": {"current": 0}},
        "status": "FT"
    }]);
    let config = PipelineConfig::default()
        .with_base_url(Url::parse("https://site.example/fixtures").unwrap());
    let record = project_all(&config, &tree).remove(0).unwrap();

    assert_eq!(record.home_score, Score::Goals(2));
    assert_eq!(record.away_score, Score::Goals(0));
    assert_eq!(record.home_logo, "https://site.example/crests/a.png?w=128&h=128");
}

#[test]
fn kickoff_comes_from_the_first_readable_alias() {
    let tree = json!([
        {"home": "A", "away": "B", "kickoff": "TBA", "startTimestamp": 1767807000},
        {"home": "C", "away": "D", "date": "2026-01-08", "time": "19:30"},
        {"home": "E", "away": "F", "time": 67}
    ]);
    let times: Vec<_> = project_all(&PipelineConfig::default(), &tree)
        .into_iter()
        .map(|record| record.unwrap())
        .map(|record| (record.match_date, record.match_time))
        .collect();

    assert_eq!(
        times,
        vec![
            ("2026-01-08".to_string(), "00:30".to_string()),
            ("2026-01-08".to_string(), "19:30".to_string()),
            (TBD.to_string(), TBD.to_string()),
        ]
    );
}

#[test]
fn record_competition_beats_group_context() {
    let tree = json!({
        "sectionHeader": {"title": "Featured"},
        "matchCards": [{"homeTeam": "A", "awayTeam": "B", "competitionName": "Serie A"}]
    });
    let record = project_all(&PipelineConfig::default(), &tree)
        .remove(0)
        .unwrap();
    assert_eq!(record.league_name, "Serie A");
}

#[test]
fn records_without_both_names_are_skipped_with_a_reason() {
    let tree = json!([
        {"homeTeam": {"logo": "x.png"}, "awayTeam": {"name": "B"}},
        {"homeTeam": {"name": "A"}, "awayTeam": {"name": "  "}},
        {"homeTeam": {"id": 1}, "awayTeam": {"id": 2}},
    ]);
    let out = project_all(&PipelineConfig::default(), &tree);
    assert_eq!(
        out,
        vec![
            Err(SkipReason::MissingHomeTeam),
            Err(SkipReason::MissingAwayTeam),
            Err(SkipReason::MissingTeams),
        ]
    );
}

#[test]
fn now_fallback_and_status_overrides_apply() {
    let config = PipelineConfig::default()
        .with_time_fallback(crate::core::TimeFallback::Now)
        .with_status("FT", "Selesai");
    let tree = json!([{"home": "A", "away": "B", "status": "FT", "kickoff": "soon"}]);
    let record = project_all(&config, &tree).remove(0).unwrap();
    assert_eq!(record.status, "Selesai");
    assert_eq!((record.match_date.as_str(), record.match_time.as_str()), ("2026-01-08", "03:00"));
}

#[test]
fn orders_by_date_then_time_then_league() {
    let mut records = vec![
        record("2026-01-08", "19:00", "Liga 1", "a"),
        record("2026-01-07", "19:00", "Liga 1", "b"),
        record(TBD, TBD, "Liga 1", "c"),
        record("2026-01-07", "19:00", "EPL", "d"),
    ];
    order_records(&mut records);
    let homes: Vec<_> = records.iter().map(|r| r.home_team.as_str()).collect();
    assert_eq!(homes, vec!["d", "b", "a", "c"]);
}

#[test]
fn ordering_is_stable_for_equal_keys() {
    let mut records: Vec<_> = ["first", "second", "third"]
        .into_iter()
        .map(|home| record("2026-01-07", "19:00", "Liga 1", home))
        .collect();
    order_records(&mut records);
    let homes: Vec<_> = records.iter().map(|r| r.home_team.as_str()).collect();
    assert_eq!(homes, vec!["first", "second", "third"]);
}
