//! Account balances, deposits, and the transaction ledger.
//!
//! DESIGN
//! ======
//! Every balance change updates `accounts.balance` and appends a
//! `transactions` row carrying the resulting balance inside one database
//! transaction, with the account row locked `FOR UPDATE`. Amounts are
//! `rust_decimal::Decimal` end to end and stored as `NUMERIC(15, 2)`.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgPool, Postgres, Row, Transaction};

/// Largest amount a `NUMERIC(15, 2)` column can hold.
pub(crate) const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_319, 232_830, 0, false, 2);

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("Invalid amount format.")]
    InvalidAmount,
    #[error("Amount must be greater than zero.")]
    NonPositiveAmount,
    #[error("Select a valid account type.")]
    UnknownAccountType,
    #[error("{} account not found.", .0.as_str())]
    AccountNotFound(AccountType),
    /// A named account kind this bank does not offer, e.g. `Business`.
    #[error("{0} account not found.")]
    UnknownAccount(String),
    #[error("Deposit would exceed the maximum account balance.")]
    BalanceLimitExceeded,
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// The two account kinds every customer is opened with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccountType {
    Savings,
    Chequing,
}

impl AccountType {
    pub const ALL: [AccountType; 2] = [AccountType::Savings, AccountType::Chequing];

    /// Stored and displayed spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Savings => "Savings",
            AccountType::Chequing => "Chequing",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = AccountError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "savings" => Ok(AccountType::Savings),
            "chequing" | "checking" => Ok(AccountType::Chequing),
            _ => Err(AccountError::UnknownAccountType),
        }
    }
}

/// Capitalize the way account kinds are stored: first letter upper, rest lower.
fn capitalize(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Resolve a submitted account kind for a balance lookup. A blank value is a
/// form error; a named kind the bank does not offer is an account that
/// cannot be found.
pub fn lookup_account_type(raw: &str) -> Result<AccountType, AccountError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AccountError::UnknownAccountType);
    }
    trimmed
        .parse()
        .map_err(|_| AccountError::UnknownAccount(capitalize(trimmed)))
}

/// Ledger entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    ETransfer,
}

impl TransactionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "Deposit",
            TransactionKind::ETransfer => "E-Transfer",
        }
    }
}

/// Status written on ledger rows and transfers that have settled.
pub const STATUS_COMPLETED: &str = "Completed";

/// One row of a customer's transaction history.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRecord {
    pub id: i64,
    pub account_type: String,
    pub transaction_type: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: String,
    pub date: String,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub balance_after: Option<Decimal>,
}

/// Parse a user-entered amount: decimal text rounded to cents, strictly positive.
pub fn parse_amount(raw: &str) -> Result<Decimal, AccountError> {
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    let amount = Decimal::from_str(&cleaned)
        .map_err(|_| AccountError::InvalidAmount)?
        .round_dp(2);
    if amount > MAX_AMOUNT {
        return Err(AccountError::InvalidAmount);
    }
    if amount <= Decimal::ZERO {
        return Err(AccountError::NonPositiveAmount);
    }
    Ok(amount)
}

/// Balance after crediting `amount`, or `None` when the column could not
/// hold it.
pub(crate) fn checked_credit(balance: Decimal, amount: Decimal) -> Option<Decimal> {
    balance.checked_add(amount).filter(|total| *total <= MAX_AMOUNT)
}

/// Account id and balance, row-locked for the rest of the transaction.
pub(crate) struct LockedAccount {
    pub id: i64,
    pub balance: Decimal,
}

pub(crate) async fn lock_account(
    tx: &mut Transaction<'_, Postgres>,
    customer_id: i64,
    account_type: AccountType,
) -> Result<Option<LockedAccount>, sqlx::Error> {
    let row = sqlx::query(
        "SELECT id, balance FROM accounts WHERE customer_id = $1 AND account_type = $2 FOR UPDATE",
    )
    .bind(customer_id)
    .bind(account_type.as_str())
    .fetch_optional(&mut **tx)
    .await?;
    Ok(row.map(|r| LockedAccount { id: r.get("id"), balance: r.get("balance") }))
}

pub(crate) async fn set_balance(
    tx: &mut Transaction<'_, Postgres>,
    account_id: i64,
    balance: Decimal,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE accounts SET balance = $1 WHERE id = $2")
        .bind(balance)
        .bind(account_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

pub(crate) async fn record_transaction(
    tx: &mut Transaction<'_, Postgres>,
    account_id: i64,
    kind: TransactionKind,
    amount: Decimal,
    balance_after: Decimal,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r"INSERT INTO transactions (transaction_type, amount, status, account_id, balance_after)
          VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(kind.as_str())
    .bind(amount)
    .bind(STATUS_COMPLETED)
    .bind(account_id)
    .bind(balance_after)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Current balance of one of the customer's accounts.
pub async fn balance(pool: &PgPool, customer_id: i64, account_type: AccountType) -> Result<Decimal, AccountError> {
    sqlx::query_scalar("SELECT balance FROM accounts WHERE customer_id = $1 AND account_type = $2")
        .bind(customer_id)
        .bind(account_type.as_str())
        .fetch_optional(pool)
        .await?
        .ok_or(AccountError::AccountNotFound(account_type))
}

/// Credit an account and log the deposit. Returns the new balance.
pub async fn deposit(
    pool: &PgPool,
    customer_id: i64,
    account_type: AccountType,
    amount: Decimal,
) -> Result<Decimal, AccountError> {
    if amount <= Decimal::ZERO {
        return Err(AccountError::NonPositiveAmount);
    }

    let mut tx = pool.begin().await?;
    let account = lock_account(&mut tx, customer_id, account_type)
        .await?
        .ok_or(AccountError::AccountNotFound(account_type))?;
    let new_balance = checked_credit(account.balance, amount).ok_or(AccountError::BalanceLimitExceeded)?;

    set_balance(&mut tx, account.id, new_balance).await?;
    record_transaction(&mut tx, account.id, TransactionKind::Deposit, amount, new_balance).await?;
    tx.commit().await?;

    tracing::info!(customer_id, account_id = account.id, %amount, %new_balance, "deposit completed");
    Ok(new_balance)
}

/// All ledger rows across the customer's accounts, newest first.
pub async fn history(pool: &PgPool, customer_id: i64) -> Result<Vec<TransactionRecord>, AccountError> {
    let rows = sqlx::query(
        r"SELECT t.id,
                 a.account_type,
                 t.transaction_type,
                 t.amount,
                 t.status,
                 to_char(t.created_at, 'YYYY-MM-DD HH24:MI') AS date,
                 t.balance_after
          FROM transactions t
          JOIN accounts a ON a.id = t.account_id
          WHERE a.customer_id = $1
          ORDER BY t.created_at DESC, t.id DESC",
    )
    .bind(customer_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| TransactionRecord {
            id: r.get("id"),
            account_type: r.get("account_type"),
            transaction_type: r.get("transaction_type"),
            amount: r.get("amount"),
            status: r.get("status"),
            date: r.get("date"),
            balance_after: r.get("balance_after"),
        })
        .collect())
}

#[cfg(test)]
#[path = "account_test.rs"]
mod tests;
