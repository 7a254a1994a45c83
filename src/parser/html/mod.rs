//! HTML entry points: JSON blobs embedded in `<script>` tags, and a
//! selector-driven DOM fallback for pages that ship no usable blob.

mod blob;
mod dom;

pub use blob::extract_blobs;
pub use dom::{extract_dom_records, DomSelectors};

use crate::{ScraperError, ScraperResult};
use scraper::Selector;

pub(crate) fn selector(css: &str) -> ScraperResult<Selector> {
    Selector::parse(css)
        .map_err(|e| ScraperError::ExtractionError(format!("invalid selector `{}`: {}", css, e)))
}
