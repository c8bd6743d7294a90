//! CMS query client.
//!
//! Sync HTTP client for the CMS query endpoint with optional bearer-token
//! authentication. Handlers running on the async runtime call it under
//! `spawn_blocking`.

use std::time::Duration;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::debug;
use ureq::Agent;

use crate::error::CmsError;
use crate::overrides::NavOverridesDoc;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// The single read query behind navigation rendering: singleton visibility
/// flags, gallery visibility, and the curated ordering sequence.
const NAV_OVERRIDES_QUERY: &str = r#"{
  "singletons": *[defined(navigationVisible)]{ "key": _type, "visible": navigationVisible },
  "gallery": *[_type == "gallery"][0]{ visible },
  "navigationOrder": *[_type == "siteSettings"][0].navigationOrder[]{ "id": id, title, children }
}"#;

/// Query responses arrive wrapped in a `result` envelope.
#[derive(Deserialize)]
struct QueryResponse {
    result: serde_json::Value,
}

/// CMS read client.
pub struct CmsClient {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl CmsClient {
    /// Create a client for the given query endpoint base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - CMS query endpoint base URL
    /// * `token` - Optional bearer token for private datasets
    #[must_use]
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            token,
        }
    }

    /// Issue one read query and return the unwrapped result value.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::HttpResponse`] for non-2xx statuses and
    /// [`CmsError::HttpRequest`] for transport failures.
    pub fn query(&self, query: &str) -> Result<serde_json::Value, CmsError> {
        let url = query_url(&self.base_url, query);
        debug!(url = %url, "CMS query");

        let mut request = self.agent.get(&url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        let response = request.call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(CmsError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let envelope: QueryResponse = body_reader.read_json()?;
        Ok(envelope.result)
    }

    /// Fetch the navigation override document.
    ///
    /// # Errors
    ///
    /// Propagates [`CmsError`] from the underlying query; a malformed
    /// document surfaces as [`CmsError::Json`].
    pub fn nav_overrides(&self) -> Result<NavOverridesDoc, CmsError> {
        let result = self.query(NAV_OVERRIDES_QUERY)?;
        Ok(serde_json::from_value(result)?)
    }

    /// Fetch one page-content document by content type.
    ///
    /// Returns `None` when the document does not exist — missing content is
    /// a placeholder concern for the caller, not an error.
    ///
    /// # Errors
    ///
    /// Propagates [`CmsError`] from the underlying query.
    pub fn document(&self, doc_type: &str) -> Result<Option<serde_json::Value>, CmsError> {
        let result = self.query(&format!("*[_type == \"{doc_type}\"][0]"))?;
        if result.is_null() {
            return Ok(None);
        }
        Ok(Some(result))
    }
}

/// Build the query URL with the query string percent-encoded.
fn query_url(base_url: &str, query: &str) -> String {
    format!(
        "{base_url}/query?query={}",
        utf8_percent_encode(query, NON_ALPHANUMERIC)
    )
}
