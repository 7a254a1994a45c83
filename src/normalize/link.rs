use url::Url;

/// Absolute match-detail URL for a raw link.
///
/// Relative links are resolved against `base`; without a base they are kept
/// as written. Fragments are dropped so that `#lineups` and `#stats` views of
/// the same match share one link.
pub fn canonical_link(raw: &str, base: Option<&Url>) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let parsed = match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => base.and_then(|base| base.join(raw).ok()),
        Err(_) => None,
    };

    match parsed {
        Some(mut url) if matches!(url.scheme(), "http" | "https") => {
            url.set_fragment(None);
            Some(url.to_string())
        }
        Some(_) => None,
        None => Some(raw.to_string()),
    }
}
