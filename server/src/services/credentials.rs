//! Customer registration and password login.
//!
//! Creates a customer with its login and two empty accounts, and verifies
//! bcrypt password hashes for sign-in and for re-confirming sensitive actions
//! like balance checks and deposits.

use serde::Deserialize;
use sqlx::{PgPool, Row};

use super::account::AccountType;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("{0} is required.")]
    MissingField(&'static str),
    #[error("Enter a valid email address.")]
    InvalidEmail,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Email is already registered.")]
    EmailTaken,
    #[error("Username is already taken.")]
    UsernameTaken,
    #[error("Phone number is already registered.")]
    PhoneTaken,
    #[error("Username not found.")]
    UnknownUsername,
    #[error("Incorrect password.")]
    IncorrectPassword,
    #[error("Login not found.")]
    LoginNotFound,
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Registration form as submitted by the create-account page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCustomer {
    pub fullname: String,
    pub phone: String,
    pub email: String,
    #[serde(rename = "streetAddress", default)]
    pub street_address: String,
    #[serde(default)]
    pub address2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub zipcode: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration input after validation and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub username: String,
    pub password: String,
}

/// Ids of a successfully authenticated login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginIds {
    pub login_id: i64,
    pub customer_id: i64,
}

#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

/// Single-line postal address in the bank's display format.
#[must_use]
pub fn compose_address(form: &NewCustomer) -> String {
    format!(
        "{}, {}, {}, {} - {}",
        form.street_address.trim(),
        form.address2.trim(),
        form.city.trim(),
        form.province.trim(),
        form.zipcode.trim()
    )
}

fn required(value: &str, field: &'static str) -> Result<String, CredentialError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CredentialError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

/// Check a registration form without touching the database.
pub fn validate_registration(form: &NewCustomer) -> Result<ValidRegistration, CredentialError> {
    let full_name = required(&form.fullname, "Full name")?;
    let phone = required(&form.phone, "Phone")?;
    let username = required(&form.username, "Username")?;
    if form.password.is_empty() {
        return Err(CredentialError::MissingField("Password"));
    }
    if form.password != form.confirm_password {
        return Err(CredentialError::PasswordMismatch);
    }
    let email = normalize_email(&form.email).ok_or(CredentialError::InvalidEmail)?;

    Ok(ValidRegistration {
        full_name,
        phone,
        email,
        address: compose_address(form),
        username,
        password: form.password.clone(),
    })
}

/// Map a unique-constraint name to the user-facing conflict it represents.
#[must_use]
pub fn conflict_for_constraint(constraint: &str) -> Option<CredentialError> {
    match constraint {
        "customers_email_key" => Some(CredentialError::EmailTaken),
        "customers_phone_key" => Some(CredentialError::PhoneTaken),
        "logins_username_key" => Some(CredentialError::UsernameTaken),
        _ => None,
    }
}

fn map_insert_error(err: sqlx::Error) -> CredentialError {
    if let sqlx::Error::Database(db_err) = &err {
        if let Some(conflict) = db_err.constraint().and_then(conflict_for_constraint) {
            return conflict;
        }
    }
    CredentialError::Db(err)
}

async fn hash_password(password: String) -> Result<String, CredentialError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| CredentialError::Hash(e.to_string()))?
        .map_err(|e| CredentialError::Hash(e.to_string()))
}

async fn password_matches(password: String, hash: String) -> Result<bool, CredentialError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| CredentialError::Hash(e.to_string()))?
        .map_err(|e| CredentialError::Hash(e.to_string()))
}

/// Register a customer, its login, and one empty account per [`AccountType`].
/// Returns the new customer id.
pub async fn register(pool: &PgPool, form: &NewCustomer) -> Result<i64, CredentialError> {
    let valid = validate_registration(form)?;

    let email_taken: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM customers WHERE email = $1)")
        .bind(&valid.email)
        .fetch_one(pool)
        .await?;
    if email_taken {
        return Err(CredentialError::EmailTaken);
    }
    let username_taken: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM logins WHERE username = $1)")
        .bind(&valid.username)
        .fetch_one(pool)
        .await?;
    if username_taken {
        return Err(CredentialError::UsernameTaken);
    }

    let password_hash = hash_password(valid.password.clone()).await?;

    let mut tx = pool.begin().await?;
    let customer_id: i64 = sqlx::query_scalar(
        r"INSERT INTO customers (full_name, phone, email, address)
          VALUES ($1, $2, $3, $4)
          RETURNING id",
    )
    .bind(&valid.full_name)
    .bind(&valid.phone)
    .bind(&valid.email)
    .bind(&valid.address)
    .fetch_one(&mut *tx)
    .await
    .map_err(map_insert_error)?;

    sqlx::query("INSERT INTO logins (username, password_hash, customer_id) VALUES ($1, $2, $3)")
        .bind(&valid.username)
        .bind(&password_hash)
        .bind(customer_id)
        .execute(&mut *tx)
        .await
        .map_err(map_insert_error)?;

    for account_type in AccountType::ALL {
        sqlx::query("INSERT INTO accounts (account_type, balance, customer_id) VALUES ($1, 0.00, $2)")
            .bind(account_type.as_str())
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    tracing::info!(customer_id, username = %valid.username, "customer registered");
    Ok(customer_id)
}

/// Verify a username/password pair and stamp the login time.
pub async fn login(pool: &PgPool, username: &str, password: &str) -> Result<LoginIds, CredentialError> {
    let username = username.trim();
    let password = password.trim();

    let row = sqlx::query("SELECT id, password_hash, customer_id FROM logins WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?
        .ok_or(CredentialError::UnknownUsername)?;

    let ids = LoginIds { login_id: row.get("id"), customer_id: row.get("customer_id") };
    let hash: String = row.get("password_hash");
    if !password_matches(password.to_owned(), hash).await? {
        return Err(CredentialError::IncorrectPassword);
    }

    sqlx::query("UPDATE logins SET last_login = now() WHERE id = $1")
        .bind(ids.login_id)
        .execute(pool)
        .await?;

    Ok(ids)
}

/// Re-confirm the signed-in customer's password before a sensitive action.
/// Checked against the login the session was opened with.
pub async fn verify_customer_password(
    pool: &PgPool,
    customer_id: i64,
    login_id: i64,
    password: &str,
) -> Result<(), CredentialError> {
    let hash: String = sqlx::query_scalar("SELECT password_hash FROM logins WHERE id = $1 AND customer_id = $2")
        .bind(login_id)
        .bind(customer_id)
        .fetch_optional(pool)
        .await?
        .ok_or(CredentialError::LoginNotFound)?;

    if password_matches(password.to_owned(), hash).await? {
        Ok(())
    } else {
        Err(CredentialError::IncorrectPassword)
    }
}

#[cfg(test)]
#[path = "credentials_test.rs"]
mod tests;
