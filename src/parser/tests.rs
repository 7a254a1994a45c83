use super::*;
use serde_json::{json, Value};
use std::sync::Arc;

fn names(records: &[CandidateRecord<'_>]) -> Vec<String> {
    records
        .iter()
        .map(|r| {
            let view = RecordView::new(r.node).unwrap();
            format!(
                "{}-{}",
                view.team_name(Side::Home).unwrap_or_default(),
                view.team_name(Side::Away).unwrap_or_default()
            )
        })
        .collect()
}

fn drop_iteratively(value: Value) {
    let mut stack = vec![value];
    while let Some(node) = stack.pop() {
        match node {
            Value::Object(map) => stack.extend(map.into_iter().map(|(_, v)| v)),
            Value::Array(items) => stack.extend(items),
            _ => {}
        }
    }
}

#[test]
fn finds_records_under_a_section_header() {
    let tree = json!({
        "matchCards": [{
            "homeTeam": {"name": "A"},
            "awayTeam": {"name": "B"},
            "kickoff": "2026-01-07T17:30:00Z"
        }],
        "sectionHeader": {"title": "Test League"}
    });
    let signatures = SignatureSet::default();
    let records: Vec<_> = StructuralMatcher::new(&signatures).matches(&tree).collect();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].context.name(), Some("Test League"));
    assert_eq!(records[0].depth, 2);
}

#[test]
fn records_in_one_group_share_its_declared_context() {
    let tree = json!({
        "competition": {"name": "Premier League", "logo": "pl.png"},
        "round": "Matchday 20",
        "fixtures": [
            {"homeTeam": "Arsenal", "awayTeam": "Chelsea"},
            {"homeTeam": "Leeds", "awayTeam": "Everton"}
        ]
    });
    let signatures = SignatureSet::default();
    let records: Vec<_> = StructuralMatcher::new(&signatures).matches(&tree).collect();

    assert_eq!(records.len(), 2);
    assert!(Arc::ptr_eq(&records[0].context, &records[1].context));

    let expected = GroupFields {
        name: Some("Premier League".into()),
        logo: Some("pl.png".into()),
        round: Some("Matchday 20".into()),
    };
    assert_eq!(records[0].context.fields(), &expected);
    assert_eq!(records[0].context.declared(), &expected);
}

#[test]
fn innermost_group_wins_and_orphans_get_unknown_context() {
    let tree = json!({
        "loose": [{"home": "X", "away": "Y"}],
        "league": {"name": "Outer"},
        "groups": [{
            "sectionHeader": {"title": "Inner"},
            "matches": [{"home": "A", "away": "B"}]
        }, {
            "round": "Final",
            "matches": [{"home": "C", "away": "D"}]
        }]
    });
    let signatures = SignatureSet::default();
    let records: Vec<_> = StructuralMatcher::new(&signatures).matches(&tree).collect();

    assert_eq!(names(&records), vec!["X-Y", "A-B", "C-D"]);
    assert_eq!(records[0].context.name(), Some("Outer"));
    assert_eq!(records[1].context.name(), Some("Inner"));
    // Undeclared name is inherited, declared round is kept.
    assert_eq!(records[2].context.name(), Some("Outer"));
    assert_eq!(records[2].context.fields().round.as_deref(), Some("Final"));
    assert_eq!(records[2].context.ancestors().count(), 2);

    let orphan = json!([{"home": "E", "away": "F"}]);
    let records: Vec<_> = StructuralMatcher::new(&signatures).matches(&orphan).collect();
    assert!(records[0].context.is_unknown());
    assert_eq!(records[0].context.name(), None);
}

#[test]
fn nested_record_like_nodes_surface_unless_leaf() {
    let tree = json!({
        "events": [{
            "homeTeam": "A",
            "awayTeam": "B",
            "detail": {"homeTeam": "A", "awayTeam": "B"}
        }]
    });

    let signatures = SignatureSet::default();
    let records: Vec<_> = StructuralMatcher::new(&signatures).matches(&tree).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].depth, 2);
    assert_eq!(records[1].depth, 3);

    let leaf = SignatureSet::new()
        .with_record(RecordSignature::default().leaf(true))
        .with_group(ContainerSignature::default());
    let records: Vec<_> = StructuralMatcher::new(&leaf).matches(&tree).collect();
    assert_eq!(records.len(), 1);
}

#[test]
fn record_that_also_looks_like_a_group_still_scans_children() {
    let tree = json!({
        "sectionHeader": {"title": "Cup"},
        "matchCards": [{
            "homeTeam": "A",
            "awayTeam": "B",
            "league": {"name": "Own League"},
            "related": [{"homeTeam": "C", "awayTeam": "D"}]
        }]
    });
    let leaf = SignatureSet::new()
        .with_record(RecordSignature::default().leaf(true))
        .with_group(ContainerSignature::default())
        .with_group(HeaderSignature);
    let records: Vec<_> = StructuralMatcher::new(&leaf).matches(&tree).collect();

    assert_eq!(names(&records), vec!["A-B", "C-D"]);
    // The outer record is not a group, so its children keep the outer context.
    assert_eq!(records[0].context.name(), Some("Cup"));
    assert_eq!(records[1].context.name(), Some("Cup"));
}

#[test]
fn discovery_follows_document_order() {
    let tree = json!({
        "z": [{"home": "Z1", "away": "Z2"}],
        "a": {"inner": [{"home": "A1", "away": "A2"}, {"home": "A3", "away": "A4"}]},
        "m": {"home": "M1", "away": "M2"}
    });
    let signatures = SignatureSet::default();
    let records: Vec<_> = StructuralMatcher::new(&signatures).matches(&tree).collect();

    assert_eq!(names(&records), vec!["Z1-Z2", "A1-A2", "A3-A4", "M1-M2"]);
    let ordinals: Vec<_> = records.iter().map(|r| r.ordinal).collect();
    assert_eq!(ordinals, vec![0, 1, 2, 3]);
}

#[test]
fn structural_miss_is_an_empty_sequence() {
    let tree = json!({"props": {"pageProps": {"items": [1, "two", null, {"x": []}]}}});
    let signatures = SignatureSet::default();
    assert_eq!(StructuralMatcher::new(&signatures).matches(&tree).count(), 0);
    assert_eq!(StructuralMatcher::new(&signatures).matches(&json!(42)).count(), 0);
}

#[test]
fn empty_signature_set_matches_nothing() {
    let tree = json!([{"home": "A", "away": "B"}]);
    let signatures = SignatureSet::new();
    assert!(signatures.is_empty());
    assert_eq!(StructuralMatcher::new(&signatures).matches(&tree).count(), 0);
}

#[test]
fn survives_very_deep_nesting() {
    const DEPTH: usize = 50_000;
    let mut tree = json!({"homeTeam": "Deep", "awayTeam": "Down"});
    for _ in 0..DEPTH {
        tree = Value::Array(vec![tree]);
    }

    let signatures = SignatureSet::default();
    let mut matches = StructuralMatcher::new(&signatures).matches(&tree);
    let record = matches.next().unwrap();
    assert_eq!(record.depth, DEPTH);
    assert!(matches.next().is_none());
    assert_eq!(matches.visited(), DEPTH + 1);
    drop(matches);
    drop(record);

    drop_iteratively(tree);
}

#[test]
fn matching_is_lazy() {
    let tree = json!([
        {"home": "A", "away": "B"},
        {"home": "C", "away": "D"},
        {"home": "E", "away": "F"}
    ]);
    let signatures = SignatureSet::default();
    let mut matches = StructuralMatcher::new(&signatures).matches(&tree);
    matches.next();
    // Root array plus the first record.
    assert_eq!(matches.visited(), 2);
}
