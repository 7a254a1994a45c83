pub mod aggregator;
pub mod dedup;

pub use aggregator::{Source, SourceAggregator, SourceKind};
pub use dedup::{Deduplicator, IdentityKey};
