//! Deposit into savings or chequing.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::nav_menu::NavMenu;
use crate::components::password_field::PasswordField;
use crate::state::session::SessionState;
use crate::util::auth::install_unauth_redirect;
use crate::util::money::{format_balance, validate_amount};

#[component]
pub fn DepositPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    install_unauth_redirect(session, use_navigate());

    let amount = RwSignal::new(String::new());
    let account_type = RwSignal::new("savings".to_owned());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let new_balance = RwSignal::new(None::<f64>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let amount_value = amount.get();
        if let Err(message) = validate_amount(&amount_value) {
            info.set(message.to_owned());
            return;
        }
        if password.get().trim().is_empty() {
            info.set("Password is required.".to_owned());
            return;
        }
        busy.set(true);
        new_balance.set(None);
        info.set("Processing deposit...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let account_value = account_type.get();
            let password_value = password.get();
            leptos::task::spawn_local(async move {
                match crate::net::api::deposit(&amount_value, &password_value, &account_value).await {
                    Ok(receipt) => {
                        info.set(receipt.message);
                        new_balance.set(Some(receipt.balance));
                        amount.set(String::new());
                        password.set(String::new());
                    }
                    Err(e) => info.set(e),
                }
                busy.set(false);
            });
        }
    };

    view! {
        <NavMenu/>
        <main class="page deposit-page">
            <section class="card">
                <h1>"Deposit"</h1>
                <form class="bank-form" on:submit=on_submit>
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
                    <label for="account_type">"Account"</label>
                    <select
                        id="account_type"
                        name="account_type"
                        prop:value=move || account_type.get()
                        on:change=move |ev| account_type.set(event_target_value(&ev))
                    >
                        <option value="savings">"Savings"</option>
                        <option value="chequing">"Chequing"</option>
                    </select>
                    <label for="password">"Password"</label>
                    <PasswordField id="password" name="password" value=password/>
                    <button class="btn" type="submit" disabled=move || busy.get()>
                        "Deposit"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="form-message">{move || info.get()}</p>
                </Show>
                <Show when=move || new_balance.get().is_some()>
                    <p class="balance-amount">
                        "New balance: "
                        {move || new_balance.get().map(format_balance).unwrap_or_default()}
                    </p>
                </Show>
            </section>
        </main>
    }
}
