//! Host and subdomain extraction from HTTP request headers.

use axum::http::{HeaderMap, header};

/// Extracts the host name from the `Host` header, without its port.
///
/// Returns `None` if the header is missing or is not valid UTF-8.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "us.getnews.tech:5000".parse().unwrap());
///
/// assert_eq!(extract_host(&headers).as_deref(), Some("us.getnews.tech"));
/// ```
pub fn extract_host(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(header::HOST)?.to_str().ok()?;

    let host = if host.starts_with('[') {
        // IPv6 address (e.g., [::1] or [::1]:8080)
        match host.find(']') {
            Some(end_bracket) => &host[..=end_bracket],
            None => host,
        }
    } else {
        host.split(':').next().unwrap_or(host)
    };

    Some(host.to_ascii_lowercase())
}

/// Returns the subdomain labels of `host` relative to `base_domain`.
///
/// Labels are ordered outermost to innermost, so the label closest to the base
/// domain comes first: `us.dev.getnews.tech` yields `["dev", "us"]`. Hosts that
/// are not under `base_domain` (IP addresses, `localhost`, other names) have no
/// subdomains.
pub fn subdomains_of(host: &str, base_domain: &str) -> Vec<String> {
    let host = host.trim_end_matches('.');
    let base_domain = base_domain.trim_end_matches('.');

    let Some(prefix) = host
        .strip_suffix(base_domain)
        .and_then(|rest| rest.strip_suffix('.'))
    else {
        return Vec::new();
    };

    prefix
        .split('.')
        .rev()
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extracts the subdomain labels of the request host.
///
/// A missing or unreadable `Host` header yields no subdomains.
pub fn extract_subdomains(headers: &HeaderMap, base_domain: &str) -> Vec<String> {
    extract_host(headers)
        .map(|host| subdomains_of(&host, base_domain))
        .unwrap_or_default()
}
