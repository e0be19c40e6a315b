//! Auth routes: registration, password login, session cookie management.

use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use time::Duration;

use super::csrf::CsrfVerified;
use super::error::{ApiError, MessageBody};
use crate::services::credentials::{self, NewCustomer};
use crate::services::session;
use crate::state::{AppState, SessionSettings};

pub const SESSION_COOKIE_NAME: &str = "session_token";

fn session_cookie(token: String, settings: SessionSettings) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.cookie_secure)
        .max_age(Duration::days(settings.ttl_days))
        .build()
}

fn cleared_session_cookie(settings: SessionSettings) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.cookie_secure)
        .max_age(Duration::ZERO)
        .build()
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Signed-in customer extracted from the session cookie.
/// Use as a handler parameter to require a login.
pub struct AuthCustomer {
    pub customer: session::SessionCustomer,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthCustomer
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(SESSION_COOKIE_NAME).map(Cookie::value).unwrap_or_default();
        if token.is_empty() {
            return Err(ApiError::not_logged_in());
        }

        let app_state = AppState::from_ref(state);
        let customer = session::validate_session(&app_state.pool, token)
            .await
            .map_err(|e| ApiError::internal(&e))?
            .ok_or_else(ApiError::not_logged_in)?;

        Ok(Self { customer, token: token.to_owned() })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /api/auth/register`: create a customer with savings and chequing accounts.
pub async fn register(
    State(state): State<AppState>,
    _csrf: CsrfVerified,
    Json(form): Json<NewCustomer>,
) -> Result<(StatusCode, Json<MessageBody>), ApiError> {
    credentials::register(&state.pool, &form).await?;
    Ok((StatusCode::CREATED, Json(MessageBody { message: "Account created successfully!".to_owned() })))
}

/// `POST /api/auth/login`: verify the password and set the session cookie.
pub async fn login(
    State(state): State<AppState>,
    _csrf: CsrfVerified,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let ids = credentials::login(&state.pool, &body.username, &body.password).await?;
    let settings = *state.sessions;
    let token = session::create_session(&state.pool, ids.customer_id, ids.login_id, settings.ttl_days)
        .await
        .map_err(|e| ApiError::internal(&e))?;

    tracing::info!(customer_id = ids.customer_id, "customer signed in");
    let jar = jar.add(session_cookie(token, settings));
    Ok((jar, Json(MessageBody { message: "Login successful.".to_owned() })))
}

/// `GET /api/auth/me`: return the signed-in customer.
pub async fn me(auth: AuthCustomer) -> Json<session::SessionCustomer> {
    Json(auth.customer)
}

/// `POST /api/auth/logout`: delete the session, clear the cookie.
pub async fn logout(State(state): State<AppState>, _csrf: CsrfVerified, auth: AuthCustomer) -> impl IntoResponse {
    if let Err(e) = session::delete_session(&state.pool, &auth.token).await {
        tracing::warn!(error = %e, "session delete failed");
    }

    let jar = CookieJar::new().add(cleared_session_cookie(*state.sessions));
    (jar, StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
