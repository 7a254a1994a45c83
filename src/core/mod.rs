mod config;
mod crawler;
mod errors;
mod pipeline;
mod spider;

pub use config::{DomFallback, ImageSize, PipelineConfig, SpiderConfig, TimeFallback};
pub use crawler::Crawler;
pub use errors::{ScraperError, ScraperResult, SkipReason};
pub use pipeline::{Diagnostic, Pipeline, PipelineReport, SkippedRecord};
pub use spider::Spider;
