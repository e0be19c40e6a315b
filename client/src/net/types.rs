//! Wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! These mirror the server's JSON bodies. Money arrives as JSON numbers, but
//! the balance endpoint's contract also allows a numeric string, so balance
//! parsing accepts both.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Signed-in customer as returned by `/api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub full_name: String,
    pub first_name: String,
}

/// Outcome of a balance check the server answered.
#[derive(Clone, Debug, PartialEq)]
pub enum BalanceOutcome {
    /// `{ "balance": n }`
    Balance(f64),
    /// `{ "error": "..." }`
    Error(String),
}

#[derive(Deserialize)]
struct BalanceBody {
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    balance: Option<f64>,
    #[serde(default)]
    error: Option<String>,
}

/// Interpret a `/Check-Balance` response body.
///
/// # Errors
///
/// Returns a parse error string when the body is not JSON or carries
/// neither a `balance` nor an `error` field.
pub fn parse_balance_body(body: &str) -> Result<BalanceOutcome, String> {
    let parsed: BalanceBody = serde_json::from_str(body).map_err(|e| e.to_string())?;
    match (parsed.balance, parsed.error) {
        (Some(balance), _) => Ok(BalanceOutcome::Balance(balance)),
        (None, Some(error)) => Ok(BalanceOutcome::Error(error)),
        (None, None) => Err("response carried neither balance nor error".to_owned()),
    }
}

fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(number) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected finite number")),
        serde_json::Value::String(text) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| D::Error::custom("expected numeric string")),
        _ => Err(D::Error::custom("expected number or numeric string")),
    }
}

/// One ledger row from `/api/transactions`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub account_type: String,
    pub transaction_type: String,
    pub amount: f64,
    pub status: String,
    /// `YYYY-MM-DD HH:MM`.
    pub date: String,
    #[serde(default)]
    pub balance_after: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct DepositReceipt {
    pub message: String,
    pub balance: f64,
}

/// Registration form payload for `/api/auth/register`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub fullname: String,
    pub phone: String,
    pub email: String,
    #[serde(rename = "streetAddress")]
    pub street_address: String,
    pub address2: String,
    pub city: String,
    pub province: String,
    pub zipcode: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}
