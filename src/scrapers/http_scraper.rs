use async_trait::async_trait;
use chrono::Utc;
use reqwest::{header, Client, ClientBuilder};
use std::collections::HashMap;
use std::sync::Arc;

use super::Scraper;
use crate::core::{ScraperResult, SpiderConfig};
use crate::http::{HttpRequest, HttpResponse, ResponseType};
use crate::stats::StatsTracker;

#[derive(Clone)]
pub struct HttpScraper {
    client: Client,
    stats: Arc<StatsTracker>,
}

impl HttpScraper {
    pub fn new() -> ScraperResult<Self> {
        let client = ClientBuilder::new().gzip(true).brotli(true).deflate(true).build()?;

        Ok(Self {
            client,
            stats: Arc::new(StatsTracker::new()),
        })
    }

    fn extract_headers(response: &reqwest::Response) -> HashMap<String, String> {
        response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|val| (k.to_string(), val.to_string())))
            .collect()
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch_single(
        &self,
        request: HttpRequest,
        config: &SpiderConfig,
    ) -> ScraperResult<HttpResponse> {
        let mut req = self
            .client
            .get(request.url.clone())
            .header(header::USER_AGENT, config.user_agent.as_str());

        // Spider-wide headers first so request headers can override them.
        for (key, value) in &config.headers {
            req = req.header(key, value);
        }
        for (key, value) in &request.headers {
            req = req.header(key, value);
        }

        let timestamp = Utc::now();
        let response = req.send().await?;
        let status = response.status().as_u16();
        let headers = Self::extract_headers(&response);
        let body = response.text().await?;
        let response_type = ResponseType::detect(&headers, &body);

        Ok(HttpResponse {
            url: request.url.clone(),
            status,
            headers,
            body,
            timestamp,
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
