//! Top bar with the bank name and a collapsible navigation menu.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by every page. The menu panel starts hidden on each load and the
//! `.menu-btn` button flips it open and closed.

use leptos::prelude::*;

use crate::state::menu::MenuState;
use crate::state::session::SessionState;

/// Links shown to a signed-in customer, in menu order.
pub const BANKING_LINKS: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/Check-Balance", "Check Balance"),
    ("/Deposit", "Deposit"),
    ("/SendMoney", "Send Money"),
    ("/Transaction-History", "Transaction History"),
];

#[component]
pub fn NavMenu() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let menu = RwSignal::new(MenuState::default());

    let on_logout = move |_| {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                crate::net::api::logout().await;
                session.update(|s| s.customer = None);
                if let Some(w) = web_sys::window() {
                    let _ = w.location().set_href(crate::util::auth::LOGIN_PATH);
                }
            });
        }
    };

    view! {
        <header class="navbar">
            <a href="/" class="navbar__brand">
                "Rivanna Bank"
            </a>
            <button
                class="menu-btn"
                type="button"
                aria-label="Menu"
                aria-expanded=move || menu.get().open.to_string()
                on:click=move |_| menu.update(MenuState::toggle)
            >
                "☰"
            </button>
            <nav class=move || menu.get().options_class()>
                <Show
                    when=move || session.get().is_signed_in()
                    fallback=|| {
                        view! {
                            <a href="/Login">"Login"</a>
                            <a href="/Create-Account">"Open an Account"</a>
                        }
                    }
                >
                    {BANKING_LINKS
                        .iter()
                        .map(|(href, label)| view! { <a href=*href>{*label}</a> })
                        .collect_view()}
                    <button class="menu-options__logout" type="button" on:click=on_logout>
                        "Logout"
                    </button>
                </Show>
            </nav>
        </header>
    }
}
