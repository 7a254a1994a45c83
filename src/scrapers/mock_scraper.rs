use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

use super::Scraper;
use crate::core::{ScraperResult, SpiderConfig};
use crate::http::{HttpRequest, HttpResponse, ResponseType};
use crate::stats::StatsTracker;

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    pub content_type: Option<String>,
    pub delay: Option<Duration>,
}

impl MockResponse {
    pub fn html(body: &str) -> Self {
        Self::with_type(200, body, "text/html; charset=utf-8")
    }

    pub fn json(body: &str) -> Self {
        Self::with_type(200, body, "application/json")
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            content_type: None,
            delay: None,
        }
    }

    fn with_type(status: u16, body: &str, content_type: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            content_type: Some(content_type.to_string()),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Serves canned responses keyed by URL; unknown URLs get a 404.
#[derive(Clone)]
pub struct MockScraper {
    responses: Arc<HashMap<String, MockResponse>>,
    stats: Arc<StatsTracker>,
}

impl MockScraper {
    pub fn new(responses: Vec<(&str, MockResponse)>) -> Self {
        Self {
            responses: Arc::new(
                responses
                    .into_iter()
                    .map(|(url, response)| (url.to_string(), response))
                    .collect(),
            ),
            stats: Arc::new(StatsTracker::new()),
        }
    }
}

#[async_trait]
impl Scraper for MockScraper {
    async fn fetch_single(
        &self,
        request: HttpRequest,
        _config: &SpiderConfig,
    ) -> ScraperResult<HttpResponse> {
        let response = self
            .responses
            .get(request.url.as_str())
            .cloned()
            .unwrap_or_else(|| MockResponse::status(404));

        if let Some(delay) = response.delay {
            sleep(delay).await;
        }

        let mut headers = HashMap::new();
        if let Some(content_type) = response.content_type {
            headers.insert("content-type".to_string(), content_type);
        }
        let response_type = ResponseType::detect(&headers, &response.body);

        Ok(HttpResponse {
            url: request.url.clone(),
            status: response.status,
            headers,
            body: response.body,
            timestamp: Utc::now(),
            response_type,
            from_request: Box::new(request),
        })
    }

    fn stats(&self) -> &StatsTracker {
        &self.stats
    }

    fn set_stats(&mut self, stats: Arc<StatsTracker>) {
        self.stats = stats;
    }
}
