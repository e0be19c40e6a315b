//! Username + password sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::components::nav_menu::NavMenu;
use crate::components::password_field::PasswordField;

/// Trim and require both credentials before hitting the server.
pub(crate) fn validate_login(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    let password = password.trim();
    if username.is_empty() || password.is_empty() {
        return Err("Enter both username and password.");
    }
    Ok((username.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (user_value, pass_value) = match validate_login(&username.get(), &password.get()) {
            Ok(creds) => creds,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::login(&user_value, &pass_value).await {
                Ok(()) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/");
                    }
                }
                Err(e) => {
                    info.set(e);
                    busy.set(false);
                }
            }
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (user_value, pass_value);
    };

    view! {
        <NavMenu/>
        <main class="page login-page">
            <section class="card">
                <h1>"Login"</h1>
                <form class="bank-form" on:submit=on_submit>
                    <label for="username">"Username"</label>
                    <input
                        id="username"
                        name="username"
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <label for="password">"Password"</label>
                    <PasswordField id="password" name="password" value=password/>
                    <button class="btn" type="submit" disabled=move || busy.get()>
                        "Login"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="form-message">{move || info.get()}</p>
                </Show>
                <p class="form-footer">
                    "New to Rivanna? "
                    <a href="/Create-Account">"Open an account"</a>
                </p>
            </section>
        </main>
    }
}
