//! Cache invalidation webhook.
//!
//! The CMS calls this endpoint when content changes. The raw body is
//! HMAC-signed; a valid signature invalidates the cache tag of the named
//! content type so the next fetch sees fresh data.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::signing;
use crate::state::AppState;

/// Header carrying the hex HMAC-SHA256 of the raw body.
const SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Webhook payload: the content type that changed.
#[derive(Deserialize)]
struct RevalidatePayload {
    #[serde(rename = "_type")]
    doc_type: Option<String>,
}

/// Response body.
#[derive(Serialize)]
pub(crate) struct RevalidateResponse {
    revalidated: bool,
    now: i64,
    #[serde(rename = "type")]
    doc_type: String,
}

/// Handle POST /api/revalidate.
pub(crate) async fn revalidate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RevalidateResponse>, ServerError> {
    let Some(secret) = &state.revalidate_secret else {
        return Err(ServerError::Misconfigured("revalidate.secret"));
    };

    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if !signing::verify(secret, &body, signature) {
        return Err(ServerError::Unauthorized("Invalid signature".to_owned()));
    }

    let payload: RevalidatePayload = serde_json::from_slice(&body)
        .map_err(|_| ServerError::Validation("Bad Request".to_owned()))?;
    let Some(doc_type) = payload.doc_type.filter(|doc_type| !doc_type.is_empty()) else {
        return Err(ServerError::Validation("Bad Request".to_owned()));
    };

    tracing::info!(doc_type = %doc_type, "revalidating content type");
    state.cms.invalidate(&doc_type);

    Ok(Json(RevalidateResponse {
        revalidated: true,
        now: Utc::now().timestamp_millis(),
        doc_type,
    }))
}

#[cfg(test)]
mod tests {
    use chorus_intake::{CaptchaConfig, CaptchaVerifier};
    use chorus_routes::RouteBindings;

    use super::*;
    use crate::state::AppState;

    fn state_with_secret(secret: Option<&str>) -> Arc<AppState> {
        let client = chorus_cms::CmsClient::new("http://127.0.0.1:9", None);
        let cache: Arc<dyn chorus_cache::Cache> = Arc::new(chorus_cache::NullCache);
        Arc::new(AppState {
            routes: Vec::new(),
            bindings: RouteBindings::default(),
            cms: Arc::new(chorus_cms::CachedCms::new(client, cache, "siteSettings")),
            captcha: Arc::new(CaptchaVerifier::new(CaptchaConfig::default())),
            contact_sink: None,
            signup_sink: None,
            member: None,
            revalidate_secret: secret.map(str::to_owned),
            production: false,
        })
    }

    fn signed_headers(secret: &str, body: &[u8]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            SIGNATURE_HEADER,
            signing::sign(secret, body).parse().unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_valid_signature_invalidates() {
        let state = state_with_secret(Some("hook-secret"));
        let body = Bytes::from_static(br#"{"_type":"agendaPage"}"#);
        let headers = signed_headers("hook-secret", &body);

        let response = revalidate(State(state), headers, body).await.unwrap();

        assert!(response.0.revalidated);
        assert_eq!(response.0.doc_type, "agendaPage");
    }

    #[tokio::test]
    async fn test_missing_signature_is_unauthorized() {
        let state = state_with_secret(Some("hook-secret"));
        let body = Bytes::from_static(br#"{"_type":"agendaPage"}"#);

        let result = revalidate(State(state), HeaderMap::new(), body).await;

        assert!(matches!(result, Err(ServerError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_tampered_body_is_unauthorized() {
        let state = state_with_secret(Some("hook-secret"));
        let headers = signed_headers("hook-secret", br#"{"_type":"agendaPage"}"#);
        let tampered = Bytes::from_static(br#"{"_type":"galleryPage"}"#);

        let result = revalidate(State(state), headers, tampered).await;

        assert!(matches!(result, Err(ServerError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_wrong_secret_is_unauthorized() {
        let state = state_with_secret(Some("hook-secret"));
        let body = Bytes::from_static(br#"{"_type":"agendaPage"}"#);
        let headers = signed_headers("other-secret", &body);

        let result = revalidate(State(state), headers, body).await;

        assert!(matches!(result, Err(ServerError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_missing_type_is_bad_request() {
        let state = state_with_secret(Some("hook-secret"));
        let body = Bytes::from_static(br"{}");
        let headers = signed_headers("hook-secret", &body);

        let result = revalidate(State(state), headers, body).await;

        assert!(matches!(result, Err(ServerError::Validation(_))));
    }

    #[tokio::test]
    async fn test_without_secret_is_misconfigured() {
        let state = state_with_secret(None);
        let body = Bytes::from_static(br#"{"_type":"agendaPage"}"#);

        let result = revalidate(State(state), HeaderMap::new(), body).await;

        assert!(matches!(result, Err(ServerError::Misconfigured(_))));
    }
}
