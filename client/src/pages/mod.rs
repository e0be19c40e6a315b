//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod check_balance;
pub mod create_account;
pub mod deposit;
pub mod home;
pub mod login;
pub mod send_money;
pub mod transaction_history;

/// Inline style for a panel that is toggled rather than unmounted, so form
/// fields stay in the DOM while hidden.
#[must_use]
pub fn panel_style(visible: bool) -> &'static str {
    if visible { "" } else { "display: none;" }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
