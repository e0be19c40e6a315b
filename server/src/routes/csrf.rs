//! Double-submit CSRF protection.
//!
//! `GET /api/csrf` hands the browser a token and pins the same value in the
//! `csrftoken` cookie. State-changing routes take [`CsrfVerified`], which
//! only succeeds when the `X-CSRFToken` header echoes that cookie.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use time::Duration;

use super::error::ApiError;
use crate::services::session;
use crate::state::AppState;

pub const CSRF_COOKIE_NAME: &str = "csrftoken";
pub const CSRF_HEADER_NAME: &str = "x-csrftoken";

const CSRF_COOKIE_MAX_AGE_DAYS: i64 = 365;

#[derive(Debug, Serialize)]
pub struct CsrfTokenBody {
    pub token: String,
}

fn is_well_formed(token: &str) -> bool {
    token.len() == 64 && token.chars().all(|c| c.is_ascii_hexdigit())
}

/// Constant-time comparison of the cookie value and the submitted token.
#[must_use]
pub fn tokens_match(cookie: Option<&str>, submitted: Option<&str>) -> bool {
    let (Some(cookie), Some(submitted)) = (cookie, submitted) else {
        return false;
    };
    if cookie.is_empty() || cookie.len() != submitted.len() {
        return false;
    }
    cookie
        .bytes()
        .zip(submitted.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

/// Proof that the request carried a matching CSRF header.
pub struct CsrfVerified;

impl<S> axum::extract::FromRequestParts<S> for CsrfVerified
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(CSRF_COOKIE_NAME).map(Cookie::value);
        let header = header_token(&parts.headers);
        if tokens_match(cookie, header) {
            Ok(Self)
        } else {
            tracing::warn!(path = %parts.uri.path(), "csrf verification failed");
            Err(ApiError::csrf_failed())
        }
    }
}

fn header_token(headers: &HeaderMap) -> Option<&str> {
    headers.get(CSRF_HEADER_NAME).and_then(|v| v.to_str().ok())
}

/// `GET /api/csrf`: return the current CSRF token, minting one if needed.
pub async fn issue_token(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(existing) = jar.get(CSRF_COOKIE_NAME).map(Cookie::value).filter(|t| is_well_formed(t)) {
        let token = existing.to_owned();
        return (jar, Json(CsrfTokenBody { token }));
    }

    let token = session::generate_token();
    let cookie = Cookie::build((CSRF_COOKIE_NAME, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.sessions.cookie_secure)
        .max_age(Duration::days(CSRF_COOKIE_MAX_AGE_DAYS));
    (jar.add(cookie), Json(CsrfTokenBody { token }))
}

#[cfg(test)]
#[path = "csrf_test.rs"]
mod tests;
