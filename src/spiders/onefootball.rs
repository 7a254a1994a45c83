use url::Url;

use crate::core::{PipelineConfig, ScraperResult, Spider, SpiderConfig};

pub const DEFAULT_URL: &str = "https://onefootball.com/id/pertandingan";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// The OneFootball Indonesian fixtures page. Crests are served through an
/// image-service proxy, so the proxy is unwrapped to the real logo URL.
pub struct OneFootballSpider {
    start_url: Url,
    config: SpiderConfig,
    pipeline: PipelineConfig,
}

impl OneFootballSpider {
    pub fn new() -> ScraperResult<Self> {
        Self::with_url(DEFAULT_URL)
    }

    pub fn with_url(url: &str) -> ScraperResult<Self> {
        let start_url = Url::parse(url)?;
        let config = SpiderConfig::default()
            .with_user_agent(USER_AGENT)
            .with_headers(vec![
                (
                    "Accept",
                    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
                ),
                ("Accept-Language", "id-ID,id;q=0.9,en-US;q=0.8,en;q=0.7"),
            ]);
        let pipeline = PipelineConfig::default()
            .with_unwrap_image_proxy(true)
            .with_base_url(start_url.clone());

        Ok(Self {
            start_url,
            config,
            pipeline,
        })
    }

    pub fn with_config(mut self, config: SpiderConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the pipeline settings; the base URL stays the start URL
    /// unless the new settings name one.
    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = match pipeline.base_url {
            Some(_) => pipeline,
            None => pipeline.with_base_url(self.start_url.clone()),
        };
        self
    }
}

impl Spider for OneFootballSpider {
    fn name(&self) -> String {
        "onefootball".to_string()
    }

    fn start_urls(&self) -> Vec<Url> {
        vec![self.start_url.clone()]
    }

    fn config(&self) -> &SpiderConfig {
        &self.config
    }

    fn pipeline_config(&self) -> PipelineConfig {
        self.pipeline.clone()
    }
}
