use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::Uri,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use common::{build_page, request::page_href, types::Health, Page, PaginationConfig};

#[derive(Clone)]
pub struct ServerState {
    pub pagination: Arc<PaginationConfig>,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub total: u64,
}

/// A [`Page`] plus the link target of each entry in `page_links`, in order.
#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    #[serde(flatten)]
    pub page: Page,
    pub hrefs: Vec<String>,
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Page links for `total` items, with the current page read from the request.
pub async fn preview(
    State(state): State<ServerState>,
    uri: Uri,
    Query(q): Query<PreviewQuery>,
) -> Json<PreviewResponse> {
    let page = build_page(&uri, q.total, &state.pagination);
    info!(page = page.page, total = page.total, links = page.page_links.len(), "pagination preview");
    let hrefs = page
        .page_links
        .iter()
        .map(|l| page_href(&page.uri, &state.pagination.page_param, l.page))
        .collect();
    Json(PreviewResponse { page, hrefs })
}

/// Build the application router
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/pagination", get(preview))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
