use url::Url;

use super::{PipelineConfig, SpiderConfig};
use crate::http::HttpRequest;
use crate::parser::SignatureSet;

/// A fixtures site: where to capture from and how to read what comes back.
pub trait Spider: Send + Sync {
    fn name(&self) -> String;

    fn start_urls(&self) -> Vec<Url>;

    fn config(&self) -> &SpiderConfig;

    /// Relative match links resolve against the first start URL.
    fn pipeline_config(&self) -> PipelineConfig {
        let config = PipelineConfig::default();
        match self.start_urls().into_iter().next() {
            Some(base) => config.with_base_url(base),
            None => config,
        }
    }

    fn signatures(&self) -> SignatureSet {
        SignatureSet::default()
    }

    /// Page requests first, then every intercept URL.
    fn start_requests(&self) -> Vec<HttpRequest> {
        let config = self.config();
        self.start_urls()
            .into_iter()
            .map(HttpRequest::page)
            .chain(config.intercept_urls.iter().cloned().map(HttpRequest::intercept))
            .collect()
    }
}
