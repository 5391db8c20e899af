//! URL canonicalization for cross-engine deduplication.
//!
//! Two hits are the same result when their canonical URLs are equal. The
//! canonical form:
//!
//! 1. lower-cases scheme and host,
//! 2. drops default ports (`:80` for http, `:443` for https),
//! 3. drops the fragment,
//! 4. drops known tracking query parameters and sorts the rest,
//! 5. strips trailing slashes from the path.
//!
//! Input that does not parse as an absolute URL is used trimmed and
//! otherwise verbatim, so the function is total.

use url::form_urlencoded;
use url::Url;

/// Query parameters stripped during normalization (exact keys).
const TRACKING_PARAMS: &[&str] = &[
    "fbclid", "gclid", "dclid", "msclkid", "yclid", "igshid", "mc_cid", "mc_eid", "_ga", "_hsenc",
    "_hsmi",
];

/// Query parameter prefix stripped during normalization.
const TRACKING_PREFIX: &str = "utm_";

/// Returns the canonical form of `raw` used as the deduplication key.
pub fn normalize_url(raw: &str) -> String {
    let raw = raw.trim();
    let parsed = match Url::parse(raw) {
        Ok(url) if !url.cannot_be_a_base() => url,
        _ => return raw.to_string(),
    };

    let mut key = String::with_capacity(raw.len());
    key.push_str(parsed.scheme());
    key.push_str("://");
    if let Some(host) = parsed.host_str() {
        key.push_str(&host.to_ascii_lowercase());
    }
    // `port()` is already `None` for the scheme's default port.
    if let Some(port) = parsed.port() {
        key.push(':');
        key.push_str(&port.to_string());
    }
    key.push_str(parsed.path().trim_end_matches('/'));

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| !is_tracking_param(k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if !params.is_empty() {
        params.sort();
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(params)
            .finish();
        key.push('?');
        key.push_str(&query);
    }

    key
}

fn is_tracking_param(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.starts_with(TRACKING_PREFIX) || TRACKING_PARAMS.contains(&key.as_str())
}
