pub mod core;
pub mod http;
pub mod normalize;
pub mod parser;
pub mod scrapers;
pub mod sources;
pub mod spiders;
pub mod stats;
pub mod storage;

pub use crate::core::{
    Crawler, Pipeline, PipelineConfig, PipelineReport, ScraperError, ScraperResult, Spider,
    SpiderConfig,
};
pub use crate::http::{HttpRequest, HttpResponse};
pub use crate::normalize::CanonicalRecord;
pub use crate::parser::{SignatureSet, StructuralMatcher};
pub use crate::scrapers::Scraper;
pub use crate::sources::Source;
pub use crate::stats::StatsTracker;
pub use crate::storage::DiskStorage;
