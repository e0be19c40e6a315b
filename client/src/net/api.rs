//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics. Error strings are
//! the server's `{ "error": ... }` text when it sent one, so pages can show
//! them to the customer as-is.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

#[cfg(feature = "hydrate")]
use super::types::MessageResponse;
use super::types::{Customer, DepositReceipt, Registration, TransactionRecord};

/// Form path the balance check posts to.
pub const CHECK_BALANCE_ENDPOINT: &str = "/Check-Balance";
/// Hidden form field holding the CSRF token.
pub const CSRF_FIELD_NAME: &str = "csrfmiddlewaretoken";
/// Header the server compares with the `csrftoken` cookie.
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// Headers sent with the balance-check form: the async marker plus the
/// form's CSRF token echoed back.
#[cfg(any(test, feature = "hydrate"))]
fn balance_request_headers(csrf_token: &str) -> [(&'static str, String); 2] {
    [("X-Requested-With", "XMLHttpRequest".to_owned()), (CSRF_HEADER_NAME, csrf_token.to_owned())]
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(status: u16) -> String {
    format!("request failed: {status}")
}

/// Pick the customer-facing message out of a failed response body.
#[cfg(any(test, feature = "hydrate"))]
fn error_message_from_body(status: u16, body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: String,
    }
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| request_failed_message(status))
}

#[cfg(feature = "hydrate")]
async fn failure(resp: gloo_net::http::Response) -> String {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    error_message_from_body(status, &body)
}

/// Fetch the CSRF token from `/api/csrf`, which also pins it in the
/// `csrftoken` cookie.
///
/// # Errors
///
/// Returns an error string if the request fails or the body is malformed.
pub async fn fetch_csrf_token() -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        #[derive(serde::Deserialize)]
        struct TokenResponse {
            token: String,
        }
        let resp = gloo_net::http::Request::get("/api/csrf")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(failure(resp).await);
        }
        let body: TokenResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.token)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// POST a JSON payload with the CSRF header attached.
#[cfg(feature = "hydrate")]
async fn post_json<T: serde::Serialize>(url: &str, payload: &T) -> Result<gloo_net::http::Response, String> {
    let token = fetch_csrf_token().await?;
    let resp = gloo_net::http::Request::post(url)
        .header(CSRF_HEADER_NAME, &token)
        .json(payload)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if resp.ok() { Ok(resp) } else { Err(failure(resp).await) }
}

/// Fetch the currently signed-in customer from `/api/auth/me`.
/// Returns `None` if not signed in or on the server.
pub async fn fetch_current_customer() -> Option<Customer> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me").send().await.ok()?;
        if !resp.ok() {
            return None;
        }
        resp.json::<Customer>().await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Sign in via `POST /api/auth/login`; the server sets the session cookie.
///
/// # Errors
///
/// Returns the server's error text (`Username not found.`, ...) or a
/// transport error string.
pub async fn login(username: &str, password: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({ "username": username, "password": password });
        post_json("/api/auth/login", &payload).await.map(|_| ())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (username, password);
        Err("not available on server".to_owned())
    }
}

/// Create a customer via `POST /api/auth/register`.
///
/// # Errors
///
/// Returns the server's validation message or a transport error string.
pub async fn register(form: &Registration) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = post_json("/api/auth/register", form).await?;
        let body: MessageResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.message)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = form;
        Err("not available on server".to_owned())
    }
}

/// Sign out via `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        if let Err(e) = post_json("/api/auth/logout", &serde_json::json!({})).await {
            log::warn!("logout failed: {e}");
        }
    }
}

/// Credit an account via `POST /api/deposit`.
///
/// # Errors
///
/// Returns the server's error text or a transport error string.
pub async fn deposit(amount: &str, password: &str, account_type: &str) -> Result<DepositReceipt, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({
            "amount": amount,
            "password": password,
            "account_type": account_type,
        });
        let resp = post_json("/api/deposit", &payload).await?;
        resp.json::<DepositReceipt>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (amount, password, account_type);
        Err("not available on server".to_owned())
    }
}

/// E-transfer to another customer via `POST /api/send-money`.
///
/// # Errors
///
/// Returns the server's error text or a transport error string.
pub async fn send_money(amount: &str, account_type: &str, email: &str) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let payload = serde_json::json!({
            "amount": amount,
            "account_type": account_type,
            "email": email,
        });
        let resp = post_json("/api/send-money", &payload).await?;
        let body: MessageResponse = resp.json().await.map_err(|e| e.to_string())?;
        Ok(body.message)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (amount, account_type, email);
        Err("not available on server".to_owned())
    }
}

/// Fetch the customer's transaction history, newest first.
///
/// # Errors
///
/// Returns the server's error text or a transport error string.
pub async fn fetch_transactions() -> Result<Vec<TransactionRecord>, String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/transactions")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(failure(resp).await);
        }
        resp.json::<Vec<TransactionRecord>>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Submit the balance-check form as `multipart/form-data`.
///
/// The CSRF token is read from the form's `csrfmiddlewaretoken` field and
/// echoed as `X-CSRFToken`. Any well-formed `{ balance }` or `{ error }` body
/// is an outcome regardless of status code.
///
/// # Errors
///
/// Returns a description of the transport or parse failure.
#[cfg(feature = "hydrate")]
pub async fn check_balance(form: &web_sys::HtmlFormElement) -> Result<super::types::BalanceOutcome, String> {
    let data = web_sys::FormData::new_with_form(form).map_err(|e| format!("{e:?}"))?;
    let token = data.get(CSRF_FIELD_NAME).as_string().unwrap_or_default();
    let mut request = gloo_net::http::Request::post(CHECK_BALANCE_ENDPOINT);
    for (name, value) in balance_request_headers(&token) {
        request = request.header(name, &value);
    }
    let resp = request
        .body(data)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    let body = resp.text().await.map_err(|e| e.to_string())?;
    super::types::parse_balance_body(&body)
}
