use anyhow::Context;
use log::warn;
use std::env;

use fixturescraper::core::TimeFallback;
use fixturescraper::scrapers::HttpScraper;
use fixturescraper::spiders::onefootball::{OneFootballSpider, DEFAULT_URL};
use fixturescraper::{Crawler, DiskStorage, PipelineConfig};

const DEFAULT_OUTPUT: &str = "data/fixtures.json";

/// `fixturescraper [URL] [OUTPUT]`; arguments win over the environment.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .parse_default_env()
        .init();

    let mut args = env::args().skip(1);
    let url = args
        .next()
        .or_else(|| env::var("FIXTURES_URL").ok())
        .unwrap_or_else(|| DEFAULT_URL.to_string());
    let output = args
        .next()
        .or_else(|| env::var("FIXTURES_OUTPUT").ok())
        .unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let mut pipeline = PipelineConfig::default().with_unwrap_image_proxy(true);
    if let Ok(hours) = env::var("FIXTURES_OFFSET_HOURS") {
        let hours = hours
            .trim()
            .parse::<i32>()
            .with_context(|| format!("FIXTURES_OFFSET_HOURS is not a number: {hours}"))?;
        pipeline = pipeline.with_offset_hours(hours);
    }
    if let Ok(policy) = env::var("FIXTURES_TIME_FALLBACK") {
        match TimeFallback::parse(&policy) {
            Some(fallback) => pipeline = pipeline.with_time_fallback(fallback),
            None => warn!("Unknown FIXTURES_TIME_FALLBACK {:?}, keeping the default", policy),
        }
    }

    let spider = OneFootballSpider::with_url(&url)
        .with_context(|| format!("invalid start URL {url}"))?
        .with_pipeline(pipeline);

    let crawler = Crawler::new(Box::new(HttpScraper::new()?));
    let report = crawler.run(&spider).await?;

    // An empty run still writes `[]`.
    let storage = DiskStorage::new(".")?;
    let path = storage.store(&output, &report.records)?;
    println!("Saved {} matches to {}", report.records.len(), path.display());

    Ok(())
}
