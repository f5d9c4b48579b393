//! URL path routing.

/// What a request path maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// File under the static dir; the part after `/static/`.
    Static(&'a str),
    /// Permanent redirect to a canonical path.
    Redirect(&'static str),
    /// Post list.
    Blog,
    /// Single post by slug.
    Post(&'a str),
    /// The 404 page, served with status 404.
    NotFound,
    /// Terminal command endpoint.
    Command,
    /// Home page; also the fallback for unknown paths.
    Home,
}

/// Map a decoded request path to a [`Route`].
///
/// `mount` is the terminal endpoint prefix; anything below it is a command
/// request whose remainder is the page the terminal lives on.
pub fn route<'a>(path: &'a str, mount: &str) -> Route<'a> {
    if is_under(path, mount) {
        return Route::Command;
    }

    match path {
        "/blog" => Route::Redirect("/blog/"),
        "/blog/" => Route::Blog,
        "/404" => Route::NotFound,
        "/static" => Route::Static(""),
        _ => {
            if let Some(rel) = path.strip_prefix("/static/") {
                Route::Static(rel)
            } else if let Some(slug) = path.strip_prefix("/blog/") {
                Route::Post(slug)
            } else {
                Route::Home
            }
        }
    }
}

/// `path` equals `prefix` or continues it with a `/`.
fn is_under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
