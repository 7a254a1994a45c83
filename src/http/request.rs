use url::Url;

use crate::sources::SourceKind;

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(String, String)>,
    /// How the body should be treated once captured.
    pub kind: SourceKind,
}

impl HttpRequest {
    pub fn page(url: Url) -> Self {
        Self {
            url,
            headers: Vec::new(),
            kind: SourceKind::EmbeddedBlob,
        }
    }

    pub fn intercept(url: Url) -> Self {
        Self {
            kind: SourceKind::Intercepted(url.to_string()),
            url,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }
}
