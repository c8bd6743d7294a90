//! Navigation API endpoint.
//!
//! Returns the resolved navigation tree: manifest candidates (with the
//! synthetic `Home` prepended) merged with the CMS visibility and ordering
//! overrides. The override fetch and the candidate list are independent;
//! the handler joins them and resolves.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chorus_routes::{NavOverrides, RouteNode, resolve_navigation};
use serde::Serialize;
use tokio::task;

use crate::state::AppState;

/// Response for GET /api/navigation.
#[derive(Serialize)]
pub(crate) struct NavigationResponse {
    /// Navigation tree items.
    items: Vec<RouteNode>,
}

/// Handle GET /api/navigation.
///
/// A failed override fetch degrades to the un-overridden route list: a
/// marketing site's navigation should render even when the CMS blips.
pub(crate) async fn get_navigation(State(state): State<Arc<AppState>>) -> Json<NavigationResponse> {
    let cms = Arc::clone(&state.cms);
    let overrides = match task::spawn_blocking(move || cms.nav_overrides()).await {
        Ok(Ok(overrides)) => overrides,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "override fetch failed, serving un-overridden navigation");
            NavOverrides::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "override fetch task failed, serving un-overridden navigation");
            NavOverrides::default()
        }
    };

    let mut candidates = Vec::with_capacity(state.routes.len() + 1);
    candidates.push(RouteNode::home());
    candidates.extend(state.routes.iter().cloned());

    let items = resolve_navigation(candidates, &state.bindings, &overrides);
    Json(NavigationResponse { items })
}
