//! Shape signatures: predicates over a mapping node's keys that identify
//! match records and the containers grouping them.
//!
//! Supporting a new site layout means registering another signature in a
//! [`SignatureSet`], not writing another traversal.

use serde_json::{Map, Value};

use super::context::GroupFields;
use super::fields::{self, AWAY_KEYS, HEADER_KEYS, HOME_KEYS};

pub trait ShapeSignature: Send + Sync {
    fn name(&self) -> &str;

    fn matches(&self, node: &Map<String, Value>) -> bool;

    /// A leaf record is not descended into once matched.
    fn is_leaf(&self) -> bool {
        false
    }
}

pub trait GroupSignature: ShapeSignature {
    /// Metadata the container declares for everything below it.
    fn capture(&self, node: &Map<String, Value>) -> GroupFields {
        fields::group_fields(node)
    }
}

/// A match record: a home side and an away side, each either a bare name or
/// a team mapping. Extra keys can be required on top.
#[derive(Debug, Clone)]
pub struct RecordSignature {
    name: String,
    home_keys: Vec<String>,
    away_keys: Vec<String>,
    required: Vec<Vec<String>>,
    leaf: bool,
}

impl Default for RecordSignature {
    fn default() -> Self {
        Self {
            name: "match_record".to_string(),
            home_keys: HOME_KEYS.iter().map(|k| k.to_string()).collect(),
            away_keys: AWAY_KEYS.iter().map(|k| k.to_string()).collect(),
            required: Vec::new(),
            leaf: false,
        }
    }
}

impl RecordSignature {
    pub fn new(name: &str, home_keys: &[&str], away_keys: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            home_keys: home_keys.iter().map(|k| k.to_string()).collect(),
            away_keys: away_keys.iter().map(|k| k.to_string()).collect(),
            required: Vec::new(),
            leaf: false,
        }
    }

    /// Additionally require one of `aliases` to be present and non-null.
    pub fn requiring(mut self, aliases: &[&str]) -> Self {
        self.required
            .push(aliases.iter().map(|k| k.to_string()).collect());
        self
    }

    pub fn leaf(mut self, leaf: bool) -> Self {
        self.leaf = leaf;
        self
    }

    fn has_side(node: &Map<String, Value>, keys: &[String]) -> bool {
        keys.iter()
            .filter_map(|key| node.get(key))
            .any(fields::is_team_like)
    }
}

impl ShapeSignature for RecordSignature {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, node: &Map<String, Value>) -> bool {
        Self::has_side(node, &self.home_keys)
            && Self::has_side(node, &self.away_keys)
            && self.required.iter().all(|aliases| {
                aliases
                    .iter()
                    .any(|key| node.get(key).is_some_and(|v| !v.is_null()))
            })
    }

    fn is_leaf(&self) -> bool {
        self.leaf
    }
}

/// A container holding a sequence of match records under any key, like
/// `{"matchCards": [...], "sectionHeader": {...}}`.
#[derive(Debug, Clone, Default)]
pub struct ContainerSignature {
    record: RecordSignature,
}

impl ContainerSignature {
    pub fn new(record: RecordSignature) -> Self {
        Self { record }
    }
}

impl ShapeSignature for ContainerSignature {
    fn name(&self) -> &str {
        "record_container"
    }

    fn matches(&self, node: &Map<String, Value>) -> bool {
        node.values().any(|value| match value {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_object)
                .any(|item| self.record.matches(item)),
            _ => false,
        })
    }
}

impl GroupSignature for ContainerSignature {}

/// A node announcing a competition through a header-like child object,
/// e.g. `{"league": {"name": ...}, "rounds": [...]}`.
#[derive(Debug, Clone, Default)]
pub struct HeaderSignature;

impl ShapeSignature for HeaderSignature {
    fn name(&self) -> &str {
        "competition_header"
    }

    fn matches(&self, node: &Map<String, Value>) -> bool {
        HEADER_KEYS.iter().any(|key| {
            node.get(*key)
                .and_then(Value::as_object)
                .is_some_and(|header| {
                    ["name", "title"]
                        .iter()
                        .any(|k| header.get(*k).and_then(fields::scalar_text).is_some())
                })
        })
    }
}

impl GroupSignature for HeaderSignature {}

/// Registered record and group signatures, tried in registration order.
pub struct SignatureSet {
    records: Vec<Box<dyn ShapeSignature>>,
    groups: Vec<Box<dyn GroupSignature>>,
}

impl Default for SignatureSet {
    fn default() -> Self {
        Self::new()
            .with_record(RecordSignature::default())
            .with_group(ContainerSignature::default())
            .with_group(HeaderSignature)
    }
}

impl SignatureSet {
    /// An empty set; nothing matches until signatures are registered.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn with_record<S: ShapeSignature + 'static>(mut self, signature: S) -> Self {
        self.records.push(Box::new(signature));
        self
    }

    pub fn with_group<S: GroupSignature + 'static>(mut self, signature: S) -> Self {
        self.groups.push(Box::new(signature));
        self
    }

    pub fn record_match(&self, node: &Map<String, Value>) -> Option<&dyn ShapeSignature> {
        self.records
            .iter()
            .find(|sig| sig.matches(node))
            .map(|sig| sig.as_ref())
    }

    pub fn group_match(&self, node: &Map<String, Value>) -> Option<&dyn GroupSignature> {
        self.groups
            .iter()
            .find(|sig| sig.matches(node))
            .map(|sig| sig.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
