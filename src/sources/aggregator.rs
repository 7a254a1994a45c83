use log::debug;
use serde_json::Value;

use crate::parser::{CandidateRecord, SignatureSet, StructuralMatcher};

/// Where a raw tree was captured from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// JSON embedded in the page's HTML.
    EmbeddedBlob,
    /// A live response body, keyed by the URL it was fetched from.
    Intercepted(String),
    /// Records rebuilt from the rendered DOM.
    Dom,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmbeddedBlob => "embedded_blob",
            Self::Intercepted(_) => "intercepted",
            Self::Dom => "dom",
        }
    }
}

/// One independently captured snapshot of the page state.
#[derive(Debug, Clone)]
pub struct Source {
    pub kind: SourceKind,
    pub tree: Value,
}

impl Source {
    pub fn embedded(tree: Value) -> Self {
        Self {
            kind: SourceKind::EmbeddedBlob,
            tree,
        }
    }

    pub fn intercepted(url: &str, tree: Value) -> Self {
        Self {
            kind: SourceKind::Intercepted(url.to_string()),
            tree,
        }
    }

    pub fn dom(tree: Value) -> Self {
        Self {
            kind: SourceKind::Dom,
            tree,
        }
    }
}

/// Runs the matcher over every source and chains the results in source
/// order, then discovery order.
pub struct SourceAggregator<'s> {
    signatures: &'s SignatureSet,
}

impl<'s> SourceAggregator<'s> {
    pub fn new(signatures: &'s SignatureSet) -> Self {
        Self { signatures }
    }

    pub fn aggregate<'a>(
        &self,
        sources: &'a [Source],
    ) -> impl Iterator<Item = CandidateRecord<'a>> + 'a
    where
        's: 'a,
    {
        let signatures: &'a SignatureSet = self.signatures;
        sources
            .iter()
            .enumerate()
            .flat_map(move |(index, source)| {
                debug!("Scanning source #{} ({})", index, source.kind.label());
                StructuralMatcher::new(signatures)
                    .matches(&source.tree)
                    .map(move |candidate| candidate.with_source(index))
            })
    }
}
