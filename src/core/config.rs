use chrono::FixedOffset;
use std::collections::HashMap;
use url::Url;

use crate::parser::html::DomSelectors;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// What a kickoff that cannot be parsed turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFallback {
    /// `{date: "TBD", time: "TBD", sort_instant: 0}`
    #[default]
    Sentinel,
    /// The run's reference instant, rendered in the target zone.
    Now,
}

impl TimeFallback {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sentinel" | "tbd" | "zero" => Some(Self::Sentinel),
            "now" | "clock" => Some(Self::Now),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ImageSize {
    fn default() -> Self {
        Self {
            width: 128,
            height: 128,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub target_offset: FixedOffset,
    pub time_fallback: TimeFallback,
    pub image_size: ImageSize,
    pub unwrap_image_proxy: bool,
    pub base_url: Option<Url>,
    pub status_overrides: HashMap<String, String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            // UTC+7
            target_offset: FixedOffset::east_opt(7 * 3600).expect("UTC+7 is a valid offset"),
            time_fallback: TimeFallback::default(),
            image_size: ImageSize::default(),
            unwrap_image_proxy: false,
            base_url: None,
            status_overrides: HashMap::new(),
        }
    }
}

impl PipelineConfig {
    /// Offsets outside +-23h are ignored and the current offset is kept.
    pub fn with_offset_hours(mut self, hours: i32) -> Self {
        if let Some(offset) = hours.checked_mul(3600).and_then(FixedOffset::east_opt) {
            self.target_offset = offset;
        }
        self
    }

    pub fn with_time_fallback(mut self, fallback: TimeFallback) -> Self {
        self.time_fallback = fallback;
        self
    }

    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.image_size = ImageSize { width, height };
        self
    }

    pub fn with_unwrap_image_proxy(mut self, unwrap: bool) -> Self {
        self.unwrap_image_proxy = unwrap;
        self
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn with_status(mut self, code: &str, label: &str) -> Self {
        self.status_overrides
            .insert(code.to_string(), label.to_string());
        self
    }
}

/// When the DOM of a captured page is scraped as an extra source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomFallback {
    Never,
    /// Only when no JSON source yielded a single candidate record.
    #[default]
    WhenEmpty,
    Always,
}

#[derive(Debug, Clone)]
pub struct SpiderConfig {
    pub user_agent: String,
    pub headers: Vec<(String, String)>,
    pub intercept_urls: Vec<Url>,
    pub max_concurrency: usize,
    pub dom_selectors: DomSelectors,
    pub dom_fallback: DomFallback,
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: Vec::new(),
            intercept_urls: Vec::new(),
            max_concurrency: 4,
            dom_selectors: DomSelectors::default(),
            dom_fallback: DomFallback::default(),
        }
    }
}

impl SpiderConfig {
    pub fn with_headers(mut self, headers: Vec<(&str, &str)>) -> Self {
        self.headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn with_intercept_url(mut self, url: Url) -> Self {
        self.intercept_urls.push(url);
        self
    }

    pub fn with_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_dom_selectors(mut self, selectors: DomSelectors) -> Self {
        self.dom_selectors = selectors;
        self
    }

    pub fn with_dom_fallback(mut self, policy: DomFallback) -> Self {
        self.dom_fallback = policy;
        self
    }
}
