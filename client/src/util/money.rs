//! Currency display.

#[cfg(test)]
#[path = "money_test.rs"]
mod money_test;

/// Dollar-prefixed amount with exactly two decimals, e.g. `$1234.50`.
#[must_use]
pub fn format_balance(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${amount:.2}")
    }
}

/// Client-side pre-check of a typed amount; the server re-validates.
///
/// # Errors
///
/// Returns the same messages the server uses for malformed or
/// non-positive amounts.
pub fn validate_amount(raw: &str) -> Result<f64, &'static str> {
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    let amount: f64 = cleaned.parse().map_err(|_| "Invalid amount format.")?;
    if !amount.is_finite() {
        return Err("Invalid amount format.");
    }
    if amount <= 0.0 {
        return Err("Amount must be greater than zero.");
    }
    Ok(amount)
}
