//! Shared sign-in guard for the banking pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Balance, deposit, transfer, and history pages all send a signed-out
//! visitor to `/Login` once the session lookup has finished.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::SessionState;

pub const LOGIN_PATH: &str = "/Login";

/// True once the lookup has finished and nobody is signed in.
#[must_use]
pub fn should_redirect_unauth(state: &SessionState) -> bool {
    !state.loading && state.customer.is_none()
}

/// Redirect to `/Login` whenever the session has loaded and no customer is present.
pub fn install_unauth_redirect<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&session.get()) {
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });
}
