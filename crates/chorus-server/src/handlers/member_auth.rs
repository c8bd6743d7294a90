//! Member area gate.
//!
//! POST checks the submitted password against the configured member
//! password and issues a signed, http-only session cookie with a 7-day
//! expiry. GET reports whether the request carries a valid session.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::signing;
use crate::state::AppState;

/// Session cookie name.
const SESSION_COOKIE: &str = "member_session";

/// Session lifetime: 7 days.
const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

/// Login payload.
#[derive(Deserialize)]
pub(crate) struct LoginPayload {
    password: Option<String>,
}

/// Login response body.
#[derive(Serialize)]
struct LoginResponse {
    success: bool,
}

/// Session check response body.
#[derive(Serialize)]
pub(crate) struct SessionResponse {
    authenticated: bool,
}

/// Handle POST /api/member-auth.
pub(crate) async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, ServerError> {
    let Some(member) = &state.member else {
        return Err(ServerError::Misconfigured("member.password"));
    };

    let password = payload.password.unwrap_or_default();
    if password != member.password {
        return Err(ServerError::Unauthorized(
            "Falsches Passwort. Bitte versuche es erneut.".to_owned(),
        ));
    }

    let value = signing::issue_session(
        &member.session_secret,
        Utc::now().timestamp(),
        SESSION_MAX_AGE_SECS,
    );
    let cookie = session_cookie(&value, state.production);

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse { success: true }),
    ))
}

/// Handle GET /api/member-auth.
pub(crate) async fn session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<SessionResponse> {
    let authenticated = state.member.as_ref().is_some_and(|member| {
        cookie_value(&headers, SESSION_COOKIE).is_some_and(|value| {
            signing::session_is_valid(&member.session_secret, value, Utc::now().timestamp())
        })
    });
    Json(SessionResponse { authenticated })
}

/// Build the Set-Cookie value for a session.
fn session_cookie(value: &str, production: bool) -> String {
    let secure = if production { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE}={value}; Max-Age={SESSION_MAX_AGE_SECS}; Path=/; HttpOnly; SameSite=Lax{secure}"
    )
}

/// Extract one cookie value from the Cookie header.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("123.abc", false);

        assert!(cookie.starts_with("member_session=123.abc"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_session_cookie_secure_in_production() {
        assert!(session_cookie("123.abc", true).contains("; Secure"));
    }

    #[test]
    fn test_cookie_value_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; member_session=123.abc; lang=de".parse().unwrap(),
        );

        assert_eq!(cookie_value(&headers, "member_session"), Some("123.abc"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_value_without_header() {
        assert_eq!(cookie_value(&HeaderMap::new(), "member_session"), None);
    }
}
