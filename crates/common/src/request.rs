//! Request-side helpers: current page and base URI extraction.

use axum::http::Uri;
use tracing::{debug, warn};

use crate::pagination::{build_page_links, Page, PaginationConfig};

fn query_pairs(uri: &Uri) -> Vec<(String, String)> {
    let query = uri.query().unwrap_or("");
    serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_else(|e| {
        debug!(error = %e, %query, "unreadable query string; treating as empty");
        Vec::new()
    })
}

/// Current page from the `page_param` query value; `1` when absent or not an integer.
pub fn current_page(uri: &Uri, page_param: &str) -> i64 {
    let Some((_, raw)) = query_pairs(uri).into_iter().find(|(k, _)| k == page_param) else {
        return 1;
    };
    match raw.parse::<i64>() {
        Ok(page) => page,
        Err(e) => {
            debug!(param = page_param, value = %raw, error = %e, "invalid page value; using 1");
            1
        }
    }
}

/// Request path plus every query parameter except `page_param`, sorted by key.
///
/// The `?` is always present so a page parameter can be appended directly.
pub fn uri_without_page(uri: &Uri, page_param: &str) -> String {
    let mut rest: Vec<(String, String)> = query_pairs(uri)
        .into_iter()
        .filter(|(k, _)| k != page_param)
        .collect();
    rest.sort_by(|a, b| a.0.cmp(&b.0));

    let query = serde_urlencoded::to_string(&rest).unwrap_or_else(|e| {
        warn!(error = %e, "failed to encode query parameters");
        String::new()
    });
    format!("{}?{}", uri.path(), query)
}

/// Link target for `page` given a base URI produced by [`uri_without_page`].
pub fn page_href(base_uri: &str, page_param: &str, page: i64) -> String {
    let pair = serde_urlencoded::to_string([(page_param, page)])
        .unwrap_or_else(|_| format!("{page_param}={page}"));
    if base_uri.ends_with('?') {
        format!("{base_uri}{pair}")
    } else if base_uri.contains('?') {
        format!("{base_uri}&{pair}")
    } else {
        format!("{base_uri}?{pair}")
    }
}

/// Build the [`Page`] for a request URI listing `total_items` items.
pub fn build_page(uri: &Uri, total_items: u64, config: &PaginationConfig) -> Page {
    let page = current_page(uri, &config.page_param);
    let page_links = build_page_links(page, total_items, config);
    debug!(page, total = total_items, links = page_links.len(), "built page links");
    Page {
        page,
        total: total_items,
        uri: uri_without_page(uri, &config.page_param),
        page_links,
    }
}
