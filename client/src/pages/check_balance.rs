//! Balance check with an in-place answer.
//!
//! SYSTEM CONTEXT
//! ==============
//! The form posts `multipart/form-data` to `/Check-Balance` without leaving
//! the page. The request and response panels are both rendered and toggled
//! by [`BalanceCheckState`]; the form stays mounted so its fields can be read
//! after the request panel is hidden.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use super::panel_style;
use crate::components::nav_menu::NavMenu;
use crate::components::password_field::PasswordField;
use crate::net::api::CSRF_FIELD_NAME;
use crate::state::balance::{BALANCE_HEADING, BalanceCheckState, BalanceView, LOADING_TEXT};
use crate::state::session::SessionState;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn CheckBalancePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    install_unauth_redirect(session, use_navigate());

    let check = RwSignal::new(BalanceCheckState::default());
    let csrf_token = RwSignal::new(String::new());
    let form_ref = NodeRef::<leptos::html::Form>::new();

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        match crate::net::api::fetch_csrf_token().await {
            Ok(token) => csrf_token.set(token),
            Err(e) => log::warn!("csrf token fetch failed: {e}"),
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if check.get_untracked().is_loading() {
            return;
        }
        check.update(BalanceCheckState::begin_submit);

        #[cfg(feature = "hydrate")]
        {
            let Some(form) = form_ref.get_untracked() else {
                log::error!("balance form is not mounted");
                check.update(|s| s.finish(Err("form missing".to_owned())));
                return;
            };
            leptos::task::spawn_local(async move {
                let result = crate::net::api::check_balance(&form).await;
                if let Err(e) = &result {
                    log::error!("balance check failed: {e}");
                }
                check.update(|s| s.finish(result));
            });
        }
    };

    let response_body = move || match check.get().view {
        BalanceView::Empty => ().into_any(),
        BalanceView::Loading => view! { <p class="balance-loading">{LOADING_TEXT}</p> }.into_any(),
        BalanceView::Balance(_) => view! {
            <h2 class="balance-heading">{BALANCE_HEADING}</h2>
            <p class="balance-amount">{move || check.get().formatted_balance().unwrap_or_default()}</p>
            <div class="balance-actions">
                <a href="Check-Balance" rel="external" class="btn">
                    "Back"
                </a>
                <a href="/" class="btn btn--secondary">
                    "Go to home"
                </a>
            </div>
        }
        .into_any(),
    };

    view! {
        <NavMenu/>
        <main class="page check-balance-page">
            <section class="card request-section" style=move || panel_style(check.get().request_visible())>
                <h1>"Check Balance"</h1>
                <Show when=move || check.get().alert.is_some()>
                    <p class="alert alert--error" role="alert">
                        {move || check.get().alert.unwrap_or_default()}
                    </p>
                </Show>
                <form class="bank-form" method="post" action="/Check-Balance" node_ref=form_ref on:submit=on_submit>
                    <input type="hidden" name=CSRF_FIELD_NAME prop:value=move || csrf_token.get()/>
                    <label for="account_type">"Account"</label>
                    <select id="account_type" name="account_type">
                        <option value="savings">"Savings"</option>
                        <option value="chequing">"Chequing"</option>
                    </select>
                    <label for="password">"Password"</label>
                    <PasswordField id="password" name="password" placeholder="Confirm your password"/>
                    <button class="btn" type="submit">
                        "Check Balance"
                    </button>
                </form>
            </section>
            <section
                class="card response-section"
                aria-live="polite"
                style=move || panel_style(check.get().response_visible())
            >
                {response_body}
            </section>
        </main>
    }
}
