//! Pages API endpoint.
//!
//! Looks a path up in the route manifest and returns the page's CMS content
//! document. Missing content is not an error: the page renders with an
//! explicit "content not configured" placeholder instead.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use chorus_routes::{GALLERY_KEY, RouteBindings, RouteNode};
use serde::Serialize;
use tokio::task;

use crate::error::ServerError;
use crate::state::AppState;

/// Placeholder shown when a page has no CMS document yet.
const PLACEHOLDER: &str = "content not configured";

/// Response for GET /api/pages/{path}.
#[derive(Serialize)]
struct PageResponse {
    /// Display title from the route manifest.
    title: String,
    /// Absolute URL path.
    path: String,
    /// CMS content document, `null` when not configured.
    content: Option<serde_json::Value>,
    /// Placeholder message when content is missing.
    #[serde(skip_serializing_if = "Option::is_none")]
    placeholder: Option<&'static str>,
}

/// Handle GET /api/pages/ (root page).
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    get_page_impl("/".to_owned(), state).await
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    get_page_impl(format!("/{path}"), state).await
}

async fn get_page_impl(
    path: String,
    state: Arc<AppState>,
) -> Result<impl IntoResponse, ServerError> {
    let node = if path == "/" {
        RouteNode::home()
    } else {
        find_node(&state.routes, &path)
            .cloned()
            .ok_or_else(|| ServerError::PageNotFound(path.clone()))?
    };

    let doc_type = content_type_for(&state.bindings, &path);
    let cms = Arc::clone(&state.cms);
    let content = task::spawn_blocking(move || cms.document(&doc_type))
        .await
        .map_err(|_| ServerError::Downstream("Content temporarily unavailable".to_owned()))?
        .map_err(|err| {
            tracing::error!(error = %err, path = %path, "content fetch failed");
            ServerError::Downstream("Content temporarily unavailable".to_owned())
        })?;

    let placeholder = content.is_none().then_some(PLACEHOLDER);
    let response = PageResponse {
        title: node.title,
        path: node.path,
        content,
        placeholder,
    };

    Ok((
        [(header::CACHE_CONTROL, "private, max-age=60")],
        Json(response),
    ))
}

/// Find a route node by path anywhere in the candidate tree.
fn find_node<'a>(routes: &'a [RouteNode], path: &str) -> Option<&'a RouteNode> {
    for node in routes {
        if node.path == path {
            return Some(node);
        }
        if let Some(children) = &node.children
            && let Some(found) = find_node(children, path)
        {
            return Some(found);
        }
    }
    None
}

/// CMS content type for a route path.
///
/// The governing key doubles as the content type, except for the gallery
/// sentinel (its content lives on the `gallery` document). Unbound paths
/// fall back to the trailing segment, the root to `home`.
fn content_type_for(bindings: &RouteBindings, path: &str) -> String {
    match bindings.key_for(path) {
        Some(GALLERY_KEY) => "gallery".to_owned(),
        Some(key) => key.to_owned(),
        None => {
            let segment = path.rsplit('/').next().unwrap_or_default();
            if segment.is_empty() {
                "home".to_owned()
            } else {
                segment.to_owned()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_node_searches_children() {
        let routes = vec![
            RouteNode::new("/agenda", "Agenda"),
            RouteNode::new("/gospelproject", "Gospelproject").with_children(vec![
                RouteNode::new("/gospelproject/team", "Team"),
            ]),
        ];

        assert!(find_node(&routes, "/gospelproject/team").is_some());
        assert!(find_node(&routes, "/missing").is_none());
    }

    #[test]
    fn test_content_type_prefers_governing_key() {
        let mut bindings = RouteBindings::default();
        bindings.bind("/agenda", "agendaPage");

        assert_eq!(content_type_for(&bindings, "/agenda"), "agendaPage");
    }

    #[test]
    fn test_content_type_gallery_sentinel() {
        let mut bindings = RouteBindings::default();
        bindings.bind("/impressionen", GALLERY_KEY);

        assert_eq!(content_type_for(&bindings, "/impressionen"), "gallery");
    }

    #[test]
    fn test_content_type_falls_back_to_segment() {
        let bindings = RouteBindings::default();

        assert_eq!(content_type_for(&bindings, "/impressum"), "impressum");
        assert_eq!(content_type_for(&bindings, "/"), "home");
    }

    #[test]
    fn test_page_response_placeholder_serialization() {
        let response = PageResponse {
            title: "Agenda".to_owned(),
            path: "/agenda".to_owned(),
            content: None,
            placeholder: Some(PLACEHOLDER),
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["content"], serde_json::Value::Null);
        assert_eq!(json["placeholder"], PLACEHOLDER);
    }

    #[test]
    fn test_page_response_omits_placeholder_with_content() {
        let response = PageResponse {
            title: "Agenda".to_owned(),
            path: "/agenda".to_owned(),
            content: Some(serde_json::json!({ "headline": "Konzerte" })),
            placeholder: None,
        };

        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("placeholder").is_none());
        assert_eq!(json["content"]["headline"], "Konzerte");
    }
}
