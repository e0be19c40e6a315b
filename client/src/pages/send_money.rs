//! E-transfer to another customer's chequing account by email.

#[cfg(test)]
#[path = "send_money_test.rs"]
mod send_money_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::nav_menu::NavMenu;
use crate::state::session::SessionState;
use crate::util::auth::install_unauth_redirect;
use crate::util::money::validate_amount;

/// Amount and recipient checks run before submitting.
pub(crate) fn validate_transfer(amount: &str, email: &str) -> Result<(), &'static str> {
    validate_amount(amount).map_err(|e| {
        if e.starts_with("Amount") { "Transfer amount must be greater than zero." } else { e }
    })?;
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err("Enter the recipient's email address.");
    }
    Ok(())
}

#[component]
pub fn SendMoneyPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    install_unauth_redirect(session, use_navigate());

    let amount = RwSignal::new(String::new());
    let account_type = RwSignal::new("chequing".to_owned());
    let email = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let amount_value = amount.get();
        let email_value = email.get().trim().to_owned();
        if let Err(message) = validate_transfer(&amount_value, &email_value) {
            info.set(message.to_owned());
            return;
        }
        busy.set(true);
        info.set("Sending...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let account_value = account_type.get();
            leptos::task::spawn_local(async move {
                match crate::net::api::send_money(&amount_value, &account_value, &email_value).await {
                    Ok(message) => {
                        info.set(message);
                        amount.set(String::new());
                        email.set(String::new());
                    }
                    Err(e) => info.set(e),
                }
                busy.set(false);
            });
        }
    };

    view! {
        <NavMenu/>
        <main class="page send-money-page">
            <section class="card">
                <h1>"Send Money"</h1>
                <form class="bank-form" on:submit=on_submit>
                    <label for="email">"Recipient email"</label>
                    <input
                        id="email"
                        name="email"
                        type="email"
                        placeholder="friend@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <label for="amount">"Amount"</label>
                    <input
                        id="amount"
                        name="amount"
                        type="text"
                        inputmode="decimal"
                        placeholder="0.00"
                        prop:value=move || amount.get()
                        on:input=move |ev| amount.set(event_target_value(&ev))
                    />
                    <label for="account_type">"From account"</label>
                    <select
                        id="account_type"
                        name="account_type"
                        prop:value=move || account_type.get()
                        on:change=move |ev| account_type.set(event_target_value(&ev))
                    >
                        <option value="chequing">"Chequing"</option>
                        <option value="savings">"Savings"</option>
                    </select>
                    <button class="btn" type="submit" disabled=move || busy.get()>
                        "Send"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="form-message">{move || info.get()}</p>
                </Show>
            </section>
        </main>
    }
}
