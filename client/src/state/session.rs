//! Signed-in customer for the current browser session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as context by `App`; the home page greets the customer and the
//! navigation menu switches between sign-in and sign-out links.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::types::Customer;

/// Current customer and whether the lookup is still in flight.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub customer: Option<Customer>,
    pub loading: bool,
}

impl SessionState {
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.customer.is_some()
    }

    /// Home-page greeting, personalised once the customer is known.
    #[must_use]
    pub fn greeting(&self) -> String {
        match self.customer.as_ref().map(|c| c.first_name.trim()).filter(|n| !n.is_empty()) {
            Some(name) => format!("Welcome back, {name}!"),
            None => "Welcome to Rivanna Bank".to_owned(),
        }
    }
}
