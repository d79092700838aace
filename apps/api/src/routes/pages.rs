//! Static page catalogue: navigation, home content and path resolution.

use axum::{extract::Query, Json};
use serde::{Deserialize, Serialize};

use crate::pages::{feature_cards, home_stats, nav_items, FeatureCard, HomeStat, NavItem, Page};

#[derive(Debug, Serialize)]
pub struct PagesResponse {
    pub nav: Vec<NavItem>,
    pub features: Vec<FeatureCard>,
    pub stats: Vec<HomeStat>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub page: Page,
    pub label: &'static str,
    /// Whether the page can be mounted as a session.
    pub interactive: bool,
}

/// GET /api/v1/pages
pub async fn handle_list_pages() -> Json<PagesResponse> {
    Json(PagesResponse {
        nav: nav_items(),
        features: feature_cards(),
        stats: home_stats(),
    })
}

/// GET /api/v1/pages/resolve?path=
pub async fn handle_resolve(Query(query): Query<ResolveQuery>) -> Json<ResolveResponse> {
    let page = Page::resolve(&query.path);
    Json(ResolveResponse {
        page,
        label: page.label(),
        interactive: page.is_interactive(),
    })
}
