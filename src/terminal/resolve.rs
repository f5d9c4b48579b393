//! Navigation target resolution for the `cd` command.
//!
//! Resolves a navigation token against the URL of the page the terminal was
//! used on. The command endpoint is mounted under a prefix (`/commands` by
//! default) and the page path travels after it, so the prefix is stripped
//! before any segment arithmetic.
//!
//! | target        | result path                          |
//! |---------------|--------------------------------------|
//! | `""`, `home`  | `/`                                  |
//! | `..`          | parent of the current path, or `/`   |
//! | `/abs/path`   | `/abs/path` verbatim                 |
//! | `rel`         | current path + `/rel`                |
//!
//! The query string of the current URL is never carried over.

use thiserror::Error;
use url::Url;

/// Errors produced while resolving a navigation target.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("malformed url `{url}`: {reason}")]
    MalformedUrl { url: String, reason: String },
}

impl ResolveError {
    fn malformed(url: &str, reason: impl ToString) -> Self {
        Self::MalformedUrl {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Resolve `target` against `current_url`, returning `scheme://host/path`.
///
/// # Examples
/// ```ignore
/// resolve("http://x/commands/blog/post1", "..", "/commands") // "http://x/blog"
/// resolve("http://x/commands/blog", "post1", "/commands")    // "http://x/blog/post1"
/// resolve("http://x/commands/blog", "/about", "/commands")   // "http://x/about"
/// ```
pub fn resolve(current_url: &str, target: &str, mount_prefix: &str) -> Result<String, ResolveError> {
    let parsed = Url::parse(current_url).map_err(|e| ResolveError::malformed(current_url, e))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| ResolveError::malformed(current_url, "missing host"))?;

    let path = resolve_path(parsed.path(), target, mount_prefix);

    let authority = match parsed.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };

    Ok(format!("{}://{}{}", parsed.scheme(), authority, path))
}

/// Path arithmetic behind [`resolve`], operating on the URL path alone.
fn resolve_path(current_path: &str, target: &str, mount_prefix: &str) -> String {
    let app_path = match current_path.strip_prefix(mount_prefix) {
        Some("") => "/",
        Some(rest) => rest,
        None => current_path,
    };

    let segments: Vec<&str> = app_path.trim_matches('/').split('/').collect();

    match target {
        "" | "home" => "/".to_string(),
        ".." if segments.len() > 1 => format!("/{}", segments[..segments.len() - 1].join("/")),
        ".." => "/".to_string(),
        absolute if absolute.starts_with('/') => absolute.to_string(),
        relative if app_path == "/" => format!("/{relative}"),
        relative => format!("/{}/{}", segments.join("/"), relative),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOUNT: &str = "/commands";

    fn path_of(url: &str) -> String {
        Url::parse(url).unwrap().path().to_string()
    }

    #[test]
    fn test_home_and_empty_target_go_to_root() {
        for current in [
            "http://x/commands/blog/post1",
            "http://x/commands/",
            "https://example.com:8080/commands/a/b/c?page=2",
        ] {
            assert_eq!(path_of(&resolve(current, "", MOUNT).unwrap()), "/");
            assert_eq!(path_of(&resolve(current, "home", MOUNT).unwrap()), "/");
        }
    }

    #[test]
    fn test_parent_drops_last_segment() {
        let url = resolve("http://x/commands/blog/post1", "..", MOUNT).unwrap();
        assert_eq!(url, "http://x/blog");

        let url = resolve("http://x/commands/a/b/c", "..", MOUNT).unwrap();
        assert_eq!(url, "http://x/a/b");
    }

    #[test]
    fn test_parent_of_single_segment_is_root() {
        let url = resolve("http://x/commands/blog", "..", MOUNT).unwrap();
        assert_eq!(url, "http://x/");

        let url = resolve("http://x/commands/", "..", MOUNT).unwrap();
        assert_eq!(url, "http://x/");
    }

    #[test]
    fn test_absolute_target_overrides_path() {
        for current in ["http://x/commands/blog/post1", "http://x/commands/", "http://x/"] {
            let url = resolve(current, "/about/me", MOUNT).unwrap();
            assert_eq!(path_of(&url), "/about/me");
        }
    }

    #[test]
    fn test_relative_append() {
        let url = resolve("http://x/commands/blog", "post1", MOUNT).unwrap();
        assert_eq!(url, "http://x/blog/post1");

        let url = resolve("http://x/commands/", "blog", MOUNT).unwrap();
        assert_eq!(url, "http://x/blog");
    }

    #[test]
    fn test_request_to_bare_mount_point_counts_as_root() {
        let url = resolve("http://x/commands", "blog", MOUNT).unwrap();
        assert_eq!(url, "http://x/blog");
    }

    #[test]
    fn test_query_is_dropped_and_port_kept() {
        let url = resolve("https://example.com:8080/commands/blog?x=1#top", "post", MOUNT).unwrap();
        assert_eq!(url, "https://example.com:8080/blog/post");
    }

    #[test]
    fn test_path_without_mount_prefix_is_used_as_is() {
        let url = resolve("http://x/blog/post1", "..", MOUNT).unwrap();
        assert_eq!(url, "http://x/blog");
    }

    #[test]
    fn test_append_then_parent_round_trips() {
        for current in [
            "http://x/commands/blog",
            "http://x/commands/blog/post1",
            "http://x/commands/a/b/c",
        ] {
            let appended = resolve(current, "a", MOUNT).unwrap();
            let back = resolve(&appended, "..", MOUNT).unwrap();
            let normalized = current.replacen("/commands", "", 1);
            assert_eq!(path_of(&back), path_of(&normalized));
        }
    }

    #[test]
    fn test_malformed_url() {
        let err = resolve("not a url", "..", MOUNT).unwrap_err();
        assert!(matches!(err, ResolveError::MalformedUrl { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[test]
    fn test_url_without_host_is_malformed() {
        let err = resolve("mailto:someone@example.com", "blog", MOUNT).unwrap_err();
        assert!(err.to_string().contains("missing host"));
    }
}
