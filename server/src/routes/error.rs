//! JSON error responses shared by every API route.
//!
//! Every failure leaves the server as `{ "error": "<message>" }`, which is
//! the shape the browser renders inline. Internal failures are logged here
//! and replaced by a generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::services::account::AccountError;
use crate::services::credentials::CredentialError;
use crate::services::transfer::TransferError;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";
pub const NOT_LOGGED_IN_MESSAGE: &str = "Not logged in";
pub const CSRF_FAILED_MESSAGE: &str = "CSRF verification failed.";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: String,
}

/// An HTTP status paired with the message shown to the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[must_use]
    pub fn not_logged_in() -> Self {
        Self::new(StatusCode::FORBIDDEN, NOT_LOGGED_IN_MESSAGE)
    }

    #[must_use]
    pub fn csrf_failed() -> Self {
        Self::new(StatusCode::FORBIDDEN, CSRF_FAILED_MESSAGE)
    }

    /// Log `err` and hide its details from the client.
    pub fn internal(err: &dyn std::error::Error) -> Self {
        tracing::error!(error = %err, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

pub(crate) fn credential_error_status(err: &CredentialError) -> StatusCode {
    match err {
        CredentialError::MissingField(_) | CredentialError::InvalidEmail | CredentialError::PasswordMismatch => {
            StatusCode::BAD_REQUEST
        }
        CredentialError::EmailTaken | CredentialError::UsernameTaken | CredentialError::PhoneTaken => {
            StatusCode::CONFLICT
        }
        CredentialError::UnknownUsername | CredentialError::LoginNotFound => StatusCode::NOT_FOUND,
        CredentialError::IncorrectPassword => StatusCode::FORBIDDEN,
        CredentialError::Hash(_) | CredentialError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn account_error_status(err: &AccountError) -> StatusCode {
    match err {
        AccountError::InvalidAmount
        | AccountError::NonPositiveAmount
        | AccountError::UnknownAccountType
        | AccountError::BalanceLimitExceeded => StatusCode::BAD_REQUEST,
        AccountError::AccountNotFound(_) | AccountError::UnknownAccount(_) => StatusCode::NOT_FOUND,
        AccountError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn transfer_error_status(err: &TransferError) -> StatusCode {
    match err {
        TransferError::NonPositiveAmount | TransferError::SameAccount | TransferError::RecipientBalanceLimit => {
            StatusCode::BAD_REQUEST
        }
        TransferError::SenderAccountMissing
        | TransferError::UnknownRecipient
        | TransferError::RecipientAccountMissing => StatusCode::NOT_FOUND,
        TransferError::InsufficientFunds => StatusCode::UNPROCESSABLE_ENTITY,
        TransferError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn from_status<E: std::error::Error>(status: StatusCode, err: &E) -> ApiError {
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        ApiError::internal(err)
    } else {
        ApiError::new(status, err.to_string())
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        from_status(credential_error_status(&err), &err)
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        from_status(account_error_status(&err), &err)
    }
}

impl From<TransferError> for ApiError {
    fn from(err: TransferError) -> Self {
        from_status(transfer_error_status(&err), &err)
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
