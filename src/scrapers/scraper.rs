use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use std::sync::Arc;

use crate::core::{ScraperResult, SpiderConfig};
use crate::http::{HttpRequest, HttpResponse};
use crate::stats::StatsTracker;

#[async_trait]
pub trait Scraper: Send + Sync {
    async fn fetch_single(
        &self,
        request: HttpRequest,
        config: &SpiderConfig,
    ) -> ScraperResult<HttpResponse>;
    fn stats(&self) -> &StatsTracker;
    fn set_stats(&mut self, stats: Arc<StatsTracker>);

    async fn fetch(
        &self,
        request: HttpRequest,
        config: &SpiderConfig,
    ) -> ScraperResult<HttpResponse> {
        let start_time = Utc::now();
        info!("Fetching URL: {}", request.url);

        let response = self.fetch_single(request, config).await?;
        debug!(
            "Received response: status={}, type={:?}, body_length={}",
            response.status,
            response.response_type,
            response.body.len()
        );

        let duration = Utc::now().signed_duration_since(start_time);
        self.stats()
            .record_request(response.status, response.body.len(), duration);
        Ok(response)
    }
}
