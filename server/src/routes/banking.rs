//! Banking routes: balance checks, deposits, e-transfers, history.
//!
//! SYSTEM CONTEXT
//! ==============
//! `POST /Check-Balance` is the endpoint behind the check-balance page's
//! in-place form submission. It reads `multipart/form-data` and always answers
//! with either `{ "balance": n }` or `{ "error": "..." }`. The other routes
//! take JSON bodies from the Leptos pages.

use std::collections::HashMap;

use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::response::Json;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::auth::AuthCustomer;
use super::csrf::CsrfVerified;
use super::error::{ApiError, MessageBody};
use crate::services::account::{self, AccountType, TransactionRecord};
use crate::services::{credentials, transfer};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BalanceBody {
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

#[derive(Debug, Serialize)]
pub struct DepositReceipt {
    pub message: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub amount: String,
    pub password: String,
    pub account_type: String,
}

#[derive(Debug, Deserialize)]
pub struct SendMoneyRequest {
    pub amount: String,
    pub account_type: String,
    pub email: String,
}

/// Balance-check form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceForm {
    pub password: String,
    pub account_type: String,
}

impl BalanceForm {
    #[must_use]
    pub fn from_fields(mut fields: HashMap<String, String>) -> Self {
        Self {
            password: fields.remove("password").unwrap_or_default(),
            account_type: fields.remove("account_type").unwrap_or_default(),
        }
    }
}

/// `$1,234.50`-style amount used in confirmation messages.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

async fn read_text_fields(mut multipart: Multipart) -> Result<HashMap<String, String>, ApiError> {
    let mut fields = HashMap::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::bad_request(format!("Malformed form data: {e}")))?;
        fields.insert(name, value);
    }
    Ok(fields)
}

fn is_async_request(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"))
}

/// `POST /Check-Balance`: confirm the password, then report one account's balance.
pub async fn check_balance(
    State(state): State<AppState>,
    _csrf: CsrfVerified,
    auth: AuthCustomer,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<BalanceBody>, ApiError> {
    if !is_async_request(&headers) {
        tracing::debug!(customer_id = auth.customer.id, "balance check without X-Requested-With");
    }
    let form = BalanceForm::from_fields(read_text_fields(multipart).await?);

    credentials::verify_customer_password(&state.pool, auth.customer.id, auth.customer.login_id, &form.password)
        .await?;
    let account_type = account::lookup_account_type(&form.account_type)?;
    let balance = account::balance(&state.pool, auth.customer.id, account_type).await?;

    tracing::info!(customer_id = auth.customer.id, %account_type, "balance checked");
    Ok(Json(BalanceBody { balance }))
}

/// `POST /api/deposit`: credit one of the customer's accounts.
pub async fn deposit(
    State(state): State<AppState>,
    _csrf: CsrfVerified,
    auth: AuthCustomer,
    Json(body): Json<DepositRequest>,
) -> Result<Json<DepositReceipt>, ApiError> {
    let amount = account::parse_amount(&body.amount)?;
    let account_type: AccountType = body.account_type.parse()?;

    credentials::verify_customer_password(&state.pool, auth.customer.id, auth.customer.login_id, &body.password)
        .await?;
    let balance = account::deposit(&state.pool, auth.customer.id, account_type, amount).await?;

    Ok(Json(DepositReceipt {
        message: format!("Deposit of {} to your {account_type} account successful!", format_money(amount)),
        balance,
    }))
}

/// `POST /api/send-money`: e-transfer to another customer's chequing account.
pub async fn send_money(
    State(state): State<AppState>,
    _csrf: CsrfVerified,
    auth: AuthCustomer,
    Json(body): Json<SendMoneyRequest>,
) -> Result<Json<MessageBody>, ApiError> {
    let amount = account::parse_amount(&body.amount).map_err(|e| match e {
        account::AccountError::NonPositiveAmount => transfer::TransferError::NonPositiveAmount.into(),
        other => ApiError::from(other),
    })?;
    let account_type: AccountType = body.account_type.parse()?;

    let receipt = transfer::send_money(&state.pool, auth.customer.id, account_type, &body.email, amount).await?;
    Ok(Json(MessageBody {
        message: format!("{} sent to {} successfully.", format_money(receipt.amount), receipt.recipient_email),
    }))
}

/// `GET /api/transactions`: full history, newest first.
pub async fn transactions(
    State(state): State<AppState>,
    auth: AuthCustomer,
) -> Result<Json<Vec<TransactionRecord>>, ApiError> {
    Ok(Json(account::history(&state.pool, auth.customer.id).await?))
}

#[cfg(test)]
#[path = "banking_test.rs"]
mod tests;
