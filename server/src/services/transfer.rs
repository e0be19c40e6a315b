//! E-Transfers between customers.
//!
//! Money always lands in the recipient's chequing account. The debit, the
//! credit, both ledger rows, and the `fund_transfers` row commit together.
//! Both account rows are locked in id order so two opposite transfers cannot
//! deadlock each other.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Row, Transaction};

use super::account::{
    AccountType, LockedAccount, STATUS_COMPLETED, TransactionKind, checked_credit, record_transaction,
    set_balance,
};
use super::credentials::normalize_email;

#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("Transfer amount must be greater than zero.")]
    NonPositiveAmount,
    #[error("Your selected account type does not exist.")]
    SenderAccountMissing,
    #[error("Insufficient funds in your account.")]
    InsufficientFunds,
    #[error("Recipient email not registered.")]
    UnknownRecipient,
    #[error("Recipient does not have a chequing account.")]
    RecipientAccountMissing,
    #[error("You cannot send money to the same account.")]
    SameAccount,
    #[error("Recipient account cannot hold this amount.")]
    RecipientBalanceLimit,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Outcome of a settled transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    pub transfer_id: i64,
    pub amount: Decimal,
    pub recipient_email: String,
    pub sender_balance: Decimal,
}

/// Funds check shared by the service and its tests.
pub fn ensure_sufficient(balance: Decimal, amount: Decimal) -> Result<(), TransferError> {
    if amount <= Decimal::ZERO {
        return Err(TransferError::NonPositiveAmount);
    }
    if balance < amount {
        return Err(TransferError::InsufficientFunds);
    }
    Ok(())
}

async fn recipient_chequing_id(
    tx: &mut Transaction<'_, Postgres>,
    recipient_email: &str,
) -> Result<i64, TransferError> {
    let customer_id: i64 = sqlx::query_scalar("SELECT id FROM customers WHERE email = $1")
        .bind(recipient_email)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(TransferError::UnknownRecipient)?;

    sqlx::query_scalar("SELECT id FROM accounts WHERE customer_id = $1 AND account_type = $2")
        .bind(customer_id)
        .bind(AccountType::Chequing.as_str())
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(TransferError::RecipientAccountMissing)
}

async fn lock_by_id(tx: &mut Transaction<'_, Postgres>, account_id: i64) -> Result<LockedAccount, sqlx::Error> {
    let row = sqlx::query("SELECT id, balance FROM accounts WHERE id = $1 FOR UPDATE")
        .bind(account_id)
        .fetch_one(&mut **tx)
        .await?;
    Ok(LockedAccount { id: row.get("id"), balance: row.get("balance") })
}

/// Send `amount` from the customer's `account_type` account to the chequing
/// account registered under `recipient_email`.
pub async fn send_money(
    pool: &PgPool,
    customer_id: i64,
    account_type: AccountType,
    recipient_email: &str,
    amount: Decimal,
) -> Result<TransferReceipt, TransferError> {
    if amount <= Decimal::ZERO {
        return Err(TransferError::NonPositiveAmount);
    }
    let recipient_email = normalize_email(recipient_email).ok_or(TransferError::UnknownRecipient)?;

    let mut tx = pool.begin().await?;

    let sender_id: i64 = sqlx::query_scalar("SELECT id FROM accounts WHERE customer_id = $1 AND account_type = $2")
        .bind(customer_id)
        .bind(account_type.as_str())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(TransferError::SenderAccountMissing)?;
    let receiver_id = recipient_chequing_id(&mut tx, &recipient_email).await?;
    if sender_id == receiver_id {
        return Err(TransferError::SameAccount);
    }

    // Lock in id order.
    let (sender, receiver) = if sender_id < receiver_id {
        let s = lock_by_id(&mut tx, sender_id).await?;
        let r = lock_by_id(&mut tx, receiver_id).await?;
        (s, r)
    } else {
        let r = lock_by_id(&mut tx, receiver_id).await?;
        let s = lock_by_id(&mut tx, sender_id).await?;
        (s, r)
    };

    ensure_sufficient(sender.balance, amount)?;
    let sender_balance = sender.balance - amount;
    let receiver_balance =
        checked_credit(receiver.balance, amount).ok_or(TransferError::RecipientBalanceLimit)?;

    set_balance(&mut tx, sender.id, sender_balance).await?;
    set_balance(&mut tx, receiver.id, receiver_balance).await?;
    record_transaction(&mut tx, sender.id, TransactionKind::ETransfer, -amount, sender_balance).await?;
    record_transaction(&mut tx, receiver.id, TransactionKind::ETransfer, amount, receiver_balance).await?;

    let transfer_id: i64 = sqlx::query_scalar(
        r"INSERT INTO fund_transfers (amount, status, sender_account_id, receiver_account_id)
          VALUES ($1, $2, $3, $4)
          RETURNING id",
    )
    .bind(amount)
    .bind(STATUS_COMPLETED)
    .bind(sender.id)
    .bind(receiver.id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(transfer_id, customer_id, %amount, recipient = %recipient_email, "e-transfer completed");
    Ok(TransferReceipt { transfer_id, amount, recipient_email, sender_balance })
}

#[cfg(test)]
#[path = "transfer_test.rs"]
mod tests;
