//! Request inspection: URL parts, headers, form bodies.

use anyhow::{Context, Result};
use percent_encoding::percent_decode_str;
use std::{borrow::Cow, io::Read, net::SocketAddr};
use tiny_http::Request;

use crate::terminal::Origin;

/// Form bodies larger than this are truncated; a command line is tiny.
const MAX_FORM_BYTES: u64 = 16 * 1024;

/// Split a request target into `(path, query)`.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    let target = target.split('#').next().unwrap_or(target);
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Percent-decode a URL path. Invalid UTF-8 decodes lossily.
pub fn decode_path(path: &str) -> Cow<'_, str> {
    percent_decode_str(path).decode_utf8_lossy()
}

/// Look up a header value (case-insensitive name).
pub fn header<'r>(request: &'r Request, name: &'static str) -> Option<&'r str> {
    request
        .headers()
        .iter()
        .find(|h| h.field.equiv(name))
        .map(|h| h.value.as_str())
}

/// Facts about a request that outlive reading its body.
#[derive(Debug, Clone)]
pub struct RequestInfo {
    /// `scheme://host/path?query` as the browser sees it.
    pub full_url: String,
    pub remote_addr: String,
    pub user_agent: String,
    /// Query string of the request target, if any.
    pub query: Option<String>,
}

impl RequestInfo {
    /// Collect URL, peer and agent. `fallback_host` is used when the client
    /// sent no `Host` header.
    pub fn from_request(request: &Request, fallback_host: &str) -> Self {
        let forwarded_proto = header(request, "X-Forwarded-Proto");
        let host = header(request, "Host").unwrap_or(fallback_host);
        let (_, query) = split_target(request.url());

        Self {
            full_url: full_url(forwarded_proto, host, request.url()),
            remote_addr: request
                .remote_addr()
                .map(SocketAddr::to_string)
                .unwrap_or_default(),
            user_agent: header(request, "User-Agent").unwrap_or_default().to_string(),
            query: query.map(str::to_string),
        }
    }

    pub fn origin(&self) -> Origin<'_> {
        Origin {
            remote_addr: &self.remote_addr,
            user_agent: &self.user_agent,
        }
    }
}

/// Rebuild the absolute URL of a request.
///
/// The server speaks plain HTTP, so the scheme is `http` unless a proxy says
/// otherwise through `X-Forwarded-Proto`.
pub fn full_url(forwarded_proto: Option<&str>, host: &str, target: &str) -> String {
    let scheme = forwarded_proto
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or("http");
    let (path, query) = split_target(target);

    match query.filter(|q| !q.is_empty()) {
        Some(query) => format!("{scheme}://{host}{path}?{query}"),
        None => format!("{scheme}://{host}{path}"),
    }
}

/// Read the request body as a form and return the value of `field`.
///
/// The body takes precedence; the query string is the fallback.
pub fn form_value(request: &mut Request, query: Option<&str>, field: &str) -> Result<String> {
    let mut body = Vec::new();
    request
        .as_reader()
        .take(MAX_FORM_BYTES)
        .read_to_end(&mut body)
        .context("Failed to read request body")?;

    Ok(find_field(&body, field)
        .or_else(|| query.and_then(|q| find_field(q.as_bytes(), field)))
        .unwrap_or_default())
}

/// First value of `field` in an `application/x-www-form-urlencoded` body.
///
/// Invalid UTF-8 decodes lossily, so a stray byte never hides the field.
pub fn find_field(encoded: &[u8], field: &str) -> Option<String> {
    url::form_urlencoded::parse(encoded)
        .find(|(key, _)| key == field)
        .map(|(_, value)| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_target() {
        assert_eq!(split_target("/blog/post"), ("/blog/post", None));
        assert_eq!(split_target("/blog?page=2"), ("/blog", Some("page=2")));
        assert_eq!(split_target("/a?b=c#frag"), ("/a", Some("b=c")));
        assert_eq!(split_target("/"), ("/", None));
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/blog/hello%20world"), "/blog/hello world");
        assert_eq!(decode_path("/plain"), "/plain");
    }

    #[test]
    fn test_full_url() {
        assert_eq!(
            full_url(None, "localhost:8081", "/commands/blog"),
            "http://localhost:8081/commands/blog"
        );
        assert_eq!(
            full_url(Some("https"), "example.com", "/commands/?x=1"),
            "https://example.com/commands/?x=1"
        );
        assert_eq!(
            full_url(Some(""), "example.com", "/commands?"),
            "http://example.com/commands"
        );
    }

    #[test]
    fn test_find_field() {
        assert_eq!(find_field(b"cmd=cd+..", "cmd").as_deref(), Some("cd .."));
        assert_eq!(
            find_field(b"other=1&cmd=echo%20%3Cb%3E", "cmd").as_deref(),
            Some("echo <b>")
        );
        assert_eq!(find_field(b"other=1", "cmd"), None);
        assert_eq!(find_field(b"", "cmd"), None);
    }

    #[test]
    fn test_find_field_tolerates_invalid_utf8() {
        assert_eq!(find_field(b"cmd=echo+hi&x=\xFF", "cmd").as_deref(), Some("echo hi"));
        let value = find_field(b"cmd=echo+%FF\xFE", "cmd").unwrap();
        assert!(value.starts_with("echo "));
    }
}
