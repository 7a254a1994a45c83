use chrono::prelude::*;
use std::collections::HashMap;
use url::Url;

use super::HttpRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Html,
    Json,
    Text,
    Binary,
}

impl ResponseType {
    pub fn detect(headers: &HashMap<String, String>, body: &str) -> Self {
        if let Some(content_type) = headers.get("content-type") {
            if content_type.contains("text/html") {
                return ResponseType::Html;
            } else if content_type.contains("json") {
                return ResponseType::Json;
            } else if content_type.contains("text/") {
                return ResponseType::Text;
            } else if !content_type.is_empty() && !content_type.contains("javascript") {
                return ResponseType::Binary;
            }
        }

        let trimmed = body.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            ResponseType::Json
        } else if trimmed
            .get(..9)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("<!DOCTYPE"))
            || trimmed.starts_with("<html")
        {
            ResponseType::Html
        } else {
            ResponseType::Text
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub url: Url,
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
    pub timestamp: DateTime<Utc>,
    pub response_type: ResponseType,
    pub from_request: Box<HttpRequest>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
