//! Session and CSRF token management.
//!
//! ARCHITECTURE
//! ============
//! Signed-in customers carry an opaque session token in an HttpOnly cookie;
//! the row in `sessions` maps it back to the customer and login. CSRF tokens
//! come from the same generator but are never stored server-side: the cookie
//! itself is the reference value the request header is compared against.

use std::fmt::Write;

use rand::Rng;
use sqlx::{PgPool, Row};

pub(crate) fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(s, "{b:02x}");
    }
    s
}

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    bytes_to_hex(&bytes)
}

/// First whitespace-separated word of a full name, used for greetings.
#[must_use]
pub fn first_name(full_name: &str) -> String {
    full_name.split_whitespace().next().unwrap_or_default().to_owned()
}

/// Customer row returned from session validation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionCustomer {
    /// Customer primary key.
    pub id: i64,
    /// Login row the session was created from.
    #[serde(skip)]
    pub login_id: i64,
    /// Full display name.
    pub full_name: String,
    /// Greeting name.
    pub first_name: String,
}

/// Create a session for the given customer, returning the token.
/// Expired sessions are purged first.
pub async fn create_session(pool: &PgPool, customer_id: i64, login_id: i64, ttl_days: i64) -> Result<String, sqlx::Error> {
    let purged = purge_expired_sessions(pool).await?;
    if purged > 0 {
        tracing::debug!(purged, "expired sessions removed");
    }

    let token = generate_token();
    sqlx::query(
        "INSERT INTO sessions (token, customer_id, login_id, expires_at)
         VALUES ($1, $2, $3, now() + make_interval(days => $4::int))",
    )
    .bind(&token)
    .bind(customer_id)
    .bind(login_id)
    .bind(i32::try_from(ttl_days).unwrap_or(i32::MAX))
    .execute(pool)
    .await?;
    Ok(token)
}

/// Delete every session whose expiry has passed. Returns the number removed.
pub async fn purge_expired_sessions(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Validate a session token and return the associated customer.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionCustomer>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT c.id, c.full_name, s.login_id
          FROM sessions s
          JOIN customers c ON c.id = s.customer_id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| {
        let full_name: String = r.get("full_name");
        SessionCustomer { id: r.get("id"), login_id: r.get("login_id"), first_name: first_name(&full_name), full_name }
    }))
}

/// Delete a session by token.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
