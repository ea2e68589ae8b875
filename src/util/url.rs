// src/util/url.rs
use url::Url;

/// Resolves a possibly-relative URL found in scraped HTML against the URL
/// of the page it was found on. Pure string manipulation, no network.
///
/// Rules, in order: an absolute candidate (a scheme of its own) passes
/// through unchanged; `//`-prefixed candidates get the base scheme;
/// `/`-prefixed candidates get scheme and host; everything else is relative
/// to the directory of the base path. A malformed base falls back to the
/// `https` scheme and an empty host rather than failing.
pub fn resolve_url(candidate: &str, base_url: &str) -> String {
    if Url::parse(candidate).is_ok() {
        return candidate.to_string();
    }

    let (scheme, host, dir) = match Url::parse(base_url) {
        Ok(base) => (
            base.scheme().to_string(),
            base.host_str().unwrap_or("").to_string(),
            parent_dir(base.path()).to_string(),
        ),
        Err(_) => ("https".to_string(), String::new(), String::new()),
    };

    if candidate.starts_with("//") {
        return format!("{}:{}", scheme, candidate);
    }

    if candidate.starts_with('/') {
        return format!("{}://{}{}", scheme, host, candidate);
    }

    format!("{}://{}{}/{}", scheme, host, dir, candidate)
}

/// Path up to (not including) the last component, without a trailing slash.
fn parent_dir(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => &trimmed[..idx],
        None => "",
    }
}
