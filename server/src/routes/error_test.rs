use super::*;
use crate::services::account::AccountType;

#[test]
fn credential_errors_map_to_statuses() {
    assert_eq!(credential_error_status(&CredentialError::PasswordMismatch), StatusCode::BAD_REQUEST);
    assert_eq!(credential_error_status(&CredentialError::UsernameTaken), StatusCode::CONFLICT);
    assert_eq!(credential_error_status(&CredentialError::LoginNotFound), StatusCode::NOT_FOUND);
    assert_eq!(credential_error_status(&CredentialError::IncorrectPassword), StatusCode::FORBIDDEN);
    assert_eq!(
        credential_error_status(&CredentialError::Db(sqlx::Error::RowNotFound)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn account_errors_map_to_statuses() {
    assert_eq!(account_error_status(&AccountError::InvalidAmount), StatusCode::BAD_REQUEST);
    assert_eq!(
        account_error_status(&AccountError::AccountNotFound(AccountType::Chequing)),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn unknown_account_kind_is_not_found_with_its_name() {
    let api: ApiError = AccountError::UnknownAccount("Business".into()).into();
    assert_eq!(api, ApiError::new(StatusCode::NOT_FOUND, "Business account not found."));
}

#[test]
fn balance_limit_errors_are_client_errors() {
    let api: ApiError = AccountError::BalanceLimitExceeded.into();
    assert_eq!(api.status, StatusCode::BAD_REQUEST);
    assert_eq!(api.message, "Deposit would exceed the maximum account balance.");

    let api: ApiError = TransferError::RecipientBalanceLimit.into();
    assert_eq!(api.status, StatusCode::BAD_REQUEST);
    assert_eq!(api.message, "Recipient account cannot hold this amount.");
}

#[test]
fn transfer_errors_map_to_statuses() {
    assert_eq!(transfer_error_status(&TransferError::InsufficientFunds), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(transfer_error_status(&TransferError::UnknownRecipient), StatusCode::NOT_FOUND);
    assert_eq!(transfer_error_status(&TransferError::SameAccount), StatusCode::BAD_REQUEST);
}

#[test]
fn client_errors_keep_their_message() {
    let api: ApiError = CredentialError::IncorrectPassword.into();
    assert_eq!(api, ApiError::new(StatusCode::FORBIDDEN, "Incorrect password."));

    let api: ApiError = AccountError::AccountNotFound(AccountType::Savings).into();
    assert_eq!(api.message, "Savings account not found.");
}

#[test]
fn internal_errors_hide_details() {
    let api: ApiError = AccountError::Db(sqlx::Error::PoolTimedOut).into();
    assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(api.message, INTERNAL_ERROR_MESSAGE);
}

#[tokio::test]
async fn api_error_renders_error_body() {
    let response = ApiError::not_logged_in().into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, serde_json::json!({ "error": "Not logged in" }));
}
