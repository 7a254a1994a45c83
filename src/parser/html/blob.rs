use log::{debug, trace};
use scraper::Html;
use serde_json::Value;

use super::selector;
use crate::ScraperResult;

/// Collects every JSON document embedded in the page, in document order:
/// `__NEXT_DATA__`, `application/json` and `application/ld+json` scripts.
pub fn extract_blobs(html: &str) -> ScraperResult<Vec<Value>> {
    let document = Html::parse_document(html);
    let scripts = selector("script")?;

    let mut blobs = Vec::new();
    for (index, script) in document.select(&scripts).enumerate() {
        let attrs = script.value();
        let is_next_data = attrs.id() == Some("__NEXT_DATA__");
        let is_json = attrs
            .attr("type")
            .is_some_and(|t| t.to_ascii_lowercase().contains("json"));
        if !is_next_data && !is_json {
            continue;
        }

        let text: String = script.text().collect();
        let text = text.trim();
        if text.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                trace!("Script #{} yielded a {} byte blob", index, text.len());
                blobs.push(value);
            }
            Err(e) => debug!("Skipping unparseable script #{}: {}", index, e),
        }
    }

    debug!("Found {} embedded JSON blobs", blobs.len());
    Ok(blobs)
}
