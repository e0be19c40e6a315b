use super::*;
use rust_decimal::dec;

#[test]
fn ensure_sufficient_allows_exact_balance() {
    assert!(ensure_sufficient(dec!(50.00), dec!(50.00)).is_ok());
}

#[test]
fn ensure_sufficient_rejects_overdraft() {
    assert!(matches!(ensure_sufficient(dec!(49.99), dec!(50.00)), Err(TransferError::InsufficientFunds)));
}

#[test]
fn ensure_sufficient_rejects_non_positive_amount() {
    assert!(matches!(ensure_sufficient(dec!(100), Decimal::ZERO), Err(TransferError::NonPositiveAmount)));
    assert!(matches!(ensure_sufficient(dec!(100), dec!(-1)), Err(TransferError::NonPositiveAmount)));
}

#[test]
fn transfer_error_messages_are_user_facing() {
    assert_eq!(TransferError::InsufficientFunds.to_string(), "Insufficient funds in your account.");
    assert_eq!(TransferError::UnknownRecipient.to_string(), "Recipient email not registered.");
    assert_eq!(
        TransferError::RecipientAccountMissing.to_string(),
        "Recipient does not have a chequing account."
    );
}

#[test]
fn recipient_limit_message_is_user_facing() {
    assert_eq!(TransferError::RecipientBalanceLimit.to_string(), "Recipient account cannot hold this amount.");
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn send_money_moves_funds_and_writes_both_ledgers() {
    use crate::services::account::{balance, deposit, history};
    use crate::services::test_support::{integration_pool, seed_customer};

    let pool = integration_pool().await;
    let alice = seed_customer(&pool, "alice@example.com", "alice").await;
    let bob = seed_customer(&pool, "bob@example.com", "bob").await;
    deposit(&pool, alice, AccountType::Savings, dec!(100)).await.unwrap();

    let receipt = send_money(&pool, alice, AccountType::Savings, " Bob@Example.com ", dec!(30.50))
        .await
        .expect("transfer should succeed");
    assert_eq!(receipt.recipient_email, "bob@example.com");
    assert_eq!(receipt.sender_balance, dec!(69.50));
    assert_eq!(balance(&pool, bob, AccountType::Chequing).await.unwrap(), dec!(30.50));

    let bob_rows = history(&pool, bob).await.unwrap();
    assert_eq!(bob_rows.len(), 1);
    assert_eq!(bob_rows[0].transaction_type, "E-Transfer");
    assert_eq!(bob_rows[0].amount, dec!(30.50));

    let overdraft = send_money(&pool, alice, AccountType::Savings, "bob@example.com", dec!(1000)).await;
    assert!(matches!(overdraft, Err(TransferError::InsufficientFunds)));
    let unknown = send_money(&pool, alice, AccountType::Savings, "nobody@example.com", dec!(1)).await;
    assert!(matches!(unknown, Err(TransferError::UnknownRecipient)));
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn send_money_refuses_to_overfill_recipient() {
    use crate::services::account::{MAX_AMOUNT, balance, deposit};
    use crate::services::test_support::{integration_pool, seed_customer};

    let pool = integration_pool().await;
    let carol = seed_customer(&pool, "carol@example.com", "carol").await;
    let dave = seed_customer(&pool, "dave@example.com", "dave").await;
    deposit(&pool, carol, AccountType::Savings, dec!(10)).await.unwrap();
    deposit(&pool, dave, AccountType::Chequing, MAX_AMOUNT).await.unwrap();

    let result = send_money(&pool, carol, AccountType::Savings, "dave@example.com", dec!(5)).await;
    assert!(matches!(result, Err(TransferError::RecipientBalanceLimit)));
    assert_eq!(balance(&pool, carol, AccountType::Savings).await.unwrap(), dec!(10));
    assert_eq!(balance(&pool, dave, AccountType::Chequing).await.unwrap(), MAX_AMOUNT);
}
