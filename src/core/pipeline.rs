use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use super::{PipelineConfig, SkipReason};
use crate::normalize::{order_records, CanonicalRecord, Projector};
use crate::parser::SignatureSet;
use crate::sources::{Deduplicator, Source, SourceAggregator};

/// A candidate the projector rejected, with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub source: usize,
    pub ordinal: usize,
    pub reason: SkipReason,
}

/// Why a run produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// No raw tree was captured at all.
    NoSources,
    /// Trees were captured but no node matched a record signature.
    NoCandidates,
    /// Every candidate was rejected by the projector.
    AllSkipped,
}

#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    pub records: Vec<CanonicalRecord>,
    pub skipped: Vec<SkippedRecord>,
    pub sources: usize,
    pub candidates: usize,
    pub duplicates: usize,
}

impl PipelineReport {
    /// Set only when the output is empty.
    pub fn diagnostic(&self) -> Option<Diagnostic> {
        if !self.records.is_empty() {
            None
        } else if self.sources == 0 {
            Some(Diagnostic::NoSources)
        } else if self.candidates == 0 {
            Some(Diagnostic::NoCandidates)
        } else {
            Some(Diagnostic::AllSkipped)
        }
    }
}

/// Captured trees in, ordered canonical records out.
///
/// Pure and synchronous: matching, deduplication, projection and ordering
/// all happen in memory over trees the caller already holds.
pub struct Pipeline {
    config: PipelineConfig,
    signatures: SignatureSet,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            signatures: SignatureSet::default(),
        }
    }

    pub fn with_signatures(mut self, signatures: SignatureSet) -> Self {
        self.signatures = signatures;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self, sources: &[Source]) -> PipelineReport {
        self.run_at(sources, Utc::now())
    }

    /// Like [`Pipeline::run`] with "now" pinned, which fixes the day bare
    /// clock readings land on and the `Now` time fallback.
    pub fn run_at(&self, sources: &[Source], reference: DateTime<Utc>) -> PipelineReport {
        if sources.is_empty() {
            warn!("No raw sources captured; nothing to extract");
            return PipelineReport::default();
        }

        let projector = Projector::new(&self.config, reference);
        let aggregator = SourceAggregator::new(&self.signatures);
        let mut candidates = 0;
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        let duplicates = {
            let counted = aggregator.aggregate(sources).inspect(|_| candidates += 1);
            let mut unique =
                Deduplicator::new(counted).with_base_url(self.config.base_url.clone());

            for candidate in unique.by_ref() {
                match projector.project(&candidate) {
                    Ok(record) => records.push(record),
                    Err(reason) => {
                        debug!(
                            "Skipping candidate #{} from source #{}: {}",
                            candidate.ordinal, candidate.source, reason
                        );
                        skipped.push(SkippedRecord {
                            source: candidate.source,
                            ordinal: candidate.ordinal,
                            reason,
                        });
                    }
                }
            }
            unique.duplicates()
        };

        order_records(&mut records);

        let report = PipelineReport {
            records,
            skipped,
            sources: sources.len(),
            candidates,
            duplicates,
        };
        info!(
            "Extracted {} records from {} sources ({} candidates, {} duplicates, {} skipped)",
            report.records.len(),
            report.sources,
            report.candidates,
            report.duplicates,
            report.skipped.len()
        );
        if let Some(diagnostic) = report.diagnostic() {
            warn!("Extraction produced no records: {:?}", diagnostic);
        }
        report
    }
}
