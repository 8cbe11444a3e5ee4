//! Static site files for every non-API path.
//!
//! Extensionless paths fall back to the matching `.html` file, so
//! `/services` serves `services.html` the way the site's links expect.

use std::path::Path;

use axum::{
    Router,
    extract::Request,
    http::Uri,
};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::info;

/// Mount `dir` as the router's fallback service.
pub(super) fn attach(router: Router, dir: &Path) -> Router {
    info!(static_dir = %dir.display(), "serving static site files");

    let html_pages = ServeDir::new(dir).map_request(with_html_extension);
    let files = ServeDir::new(dir)
        .append_index_html_on_directories(true)
        .fallback(html_pages);

    router.fallback_service(files)
}

/// Rewrite `/services` to `/services.html`. Paths ending in `/` or whose last
/// segment already has an extension pass through unchanged.
fn with_html_extension(mut req: Request) -> Request {
    let rewritten = {
        let uri = req.uri();
        let path = uri.path();
        let last = path.rsplit('/').next().unwrap_or_default();
        if last.is_empty() || last.contains('.') {
            None
        } else {
            Some(match uri.query() {
                Some(q) => format!("{path}.html?{q}"),
                None => format!("{path}.html"),
            })
        }
    };

    if let Some(uri) = rewritten.and_then(|s| s.parse::<Uri>().ok()) {
        *req.uri_mut() = uri;
    }
    req
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn rewrite(uri: &str) -> String {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        with_html_extension(req).uri().to_string()
    }

    #[test]
    fn extensionless_paths_gain_html() {
        assert_eq!(rewrite("/services"), "/services.html");
        assert_eq!(rewrite("/about/team"), "/about/team.html");
        assert_eq!(rewrite("/services?lang=en"), "/services.html?lang=en");
    }

    #[test]
    fn directories_and_files_are_untouched() {
        assert_eq!(rewrite("/"), "/");
        assert_eq!(rewrite("/blog/"), "/blog/");
        assert_eq!(rewrite("/assets/js/chatbot.js"), "/assets/js/chatbot.js");
    }
}
