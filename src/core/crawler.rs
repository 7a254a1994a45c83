use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;

use super::{DomFallback, Pipeline, PipelineReport, ScraperResult, Spider, SpiderConfig};
use crate::http::{HttpResponse, ResponseType};
use crate::parser::html::{extract_blobs, extract_dom_records};
use crate::parser::SignatureSet;
use crate::scrapers::Scraper;
use crate::sources::{Source, SourceAggregator, SourceKind};
use crate::stats::StatsTracker;

/// Drives a scraper over a spider's pages and hands the captured trees to
/// the extraction pipeline.
pub struct Crawler {
    scraper: Box<dyn Scraper>,
    stats: Arc<StatsTracker>,
}

impl Crawler {
    pub fn new(scraper: Box<dyn Scraper>) -> Self {
        info!("Initializing crawler");
        let stats = Arc::new(StatsTracker::new());
        let mut scraper = scraper;
        scraper.set_stats(Arc::clone(&stats));

        Self { scraper, stats }
    }

    pub fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    /// Fetches every start page and intercept URL, at most
    /// `max_concurrency` at a time. Failed captures are logged and skipped;
    /// only invalid DOM selectors are an error.
    pub async fn capture<S: Spider + ?Sized>(&self, spider: &S) -> ScraperResult<Vec<Source>> {
        let config = spider.config();
        let requests = spider.start_requests();
        debug!(
            "Capturing {} URLs with concurrency {}",
            requests.len(),
            config.max_concurrency
        );

        let scraper = &self.scraper;
        let responses: Vec<_> = stream::iter(requests)
            .map(|request| async move {
                let url = request.url.clone();
                (url, scraper.fetch(request, config).await)
            })
            .buffered(config.max_concurrency.max(1))
            .collect()
            .await;

        let mut sources = Vec::new();
        let mut pages = Vec::new();
        for (url, result) in responses {
            match result {
                Ok(response) if response.is_success() => {
                    if let Some(html) = self.collect_sources(response, &mut sources)? {
                        pages.push(html);
                    }
                }
                Ok(response) => {
                    warn!("Capture of {} returned status {}", url, response.status);
                    self.stats.record_capture_failure();
                }
                Err(e) => {
                    warn!("Capture of {} failed: {}", url, e);
                    self.stats.record_capture_failure();
                }
            }
        }

        if Self::wants_dom(config, &spider.signatures(), &sources) {
            for html in &pages {
                sources.push(Source::dom(extract_dom_records(html, &config.dom_selectors)?));
            }
        }

        for source in &sources {
            self.stats.record_source(source.kind.label());
        }
        info!("Captured {} sources for {}", sources.len(), spider.name());
        Ok(sources)
    }

    /// Turns one response into sources; HTML bodies are handed back for the
    /// DOM fallback.
    fn collect_sources(
        &self,
        response: HttpResponse,
        sources: &mut Vec<Source>,
    ) -> ScraperResult<Option<String>> {
        match response.response_type {
            ResponseType::Html => {
                let blobs = extract_blobs(&response.body)?;
                debug!("Found {} embedded blobs in {}", blobs.len(), response.url);
                sources.extend(blobs.into_iter().map(Source::embedded));
                Ok(Some(response.body))
            }
            ResponseType::Json | ResponseType::Text => {
                match serde_json::from_str::<Value>(&response.body) {
                    Ok(tree) => sources.push(match &response.from_request.kind {
                        SourceKind::Intercepted(url) => Source::intercepted(url, tree),
                        SourceKind::EmbeddedBlob | SourceKind::Dom => Source::embedded(tree),
                    }),
                    Err(e) => {
                        warn!("Body of {} is not JSON: {}", response.url, e);
                        self.stats.record_capture_failure();
                    }
                }
                Ok(None)
            }
            ResponseType::Binary => {
                warn!("Ignoring binary body from {}", response.url);
                Ok(None)
            }
        }
    }

    fn wants_dom(config: &SpiderConfig, signatures: &SignatureSet, sources: &[Source]) -> bool {
        match config.dom_fallback {
            DomFallback::Never => false,
            DomFallback::Always => true,
            DomFallback::WhenEmpty => {
                let empty = SourceAggregator::new(signatures)
                    .aggregate(sources)
                    .next()
                    .is_none();
                if empty {
                    info!("No records in JSON sources, falling back to the DOM");
                }
                empty
            }
        }
    }

    /// Captures, extracts and records statistics for one spider run.
    pub async fn run<S: Spider + ?Sized>(&self, spider: &S) -> ScraperResult<PipelineReport> {
        info!("Starting spider: {}", spider.name());
        let sources = self.capture(spider).await?;

        let pipeline =
            Pipeline::new(spider.pipeline_config()).with_signatures(spider.signatures());
        let report = pipeline.run(&sources);

        self.stats.record_report(&report);
        self.stats.finish();
        self.stats.print_summary();
        info!(
            "Spider {} completed with {} records",
            spider.name(),
            report.records.len()
        );
        Ok(report)
    }
}
