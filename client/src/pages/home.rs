//! Landing page: greeting and shortcuts into the banking pages.

use leptos::prelude::*;

use crate::components::nav_menu::{BANKING_LINKS, NavMenu};
use crate::state::session::SessionState;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();

    view! {
        <NavMenu/>
        <main class="page home-page">
            <section class="card hero">
                <h1>{move || session.get().greeting()}</h1>
                <Show
                    when=move || session.get().is_signed_in()
                    fallback=|| {
                        view! {
                            <p>"Banking that stays out of your way."</p>
                            <div class="hero__actions">
                                <a href="/Login" class="btn">"Login"</a>
                                <a href="/Create-Account" class="btn btn--secondary">"Open an Account"</a>
                            </div>
                        }
                    }
                >
                    <ul class="shortcut-list">
                        {BANKING_LINKS
                            .iter()
                            .skip(1)
                            .map(|(href, label)| view! { <li><a href=*href class="shortcut">{*label}</a></li> })
                            .collect_view()}
                    </ul>
                </Show>
            </section>
        </main>
    }
}
