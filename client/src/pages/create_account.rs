//! New-customer registration form.
//!
//! The server opens a savings and a chequing account for every new customer;
//! this page only collects the profile and login details.

#[cfg(test)]
#[path = "create_account_test.rs"]
mod create_account_test;

use leptos::prelude::*;

use crate::components::nav_menu::NavMenu;
use crate::components::password_field::PasswordField;
use crate::net::types::Registration;

/// Required-field and password-match checks run before submitting.
pub(crate) fn validate_registration(form: &Registration) -> Result<(), String> {
    let required = [
        ("Full name", &form.fullname),
        ("Phone", &form.phone),
        ("Email", &form.email),
        ("Username", &form.username),
        ("Password", &form.password),
    ];
    if let Some((label, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(format!("{label} is required."));
    }
    if !form.email.contains('@') {
        return Err("Enter a valid email address.".to_owned());
    }
    if form.password != form.confirm_password {
        return Err("Passwords do not match.".to_owned());
    }
    Ok(())
}

/// Text input bound to one field of the registration form.
#[component]
fn FormInput(
    #[prop(into)] id: String,
    #[prop(into)] label: String,
    #[prop(into, optional)] input_type: Option<String>,
    value: RwSignal<String>,
) -> impl IntoView {
    let input_type = input_type.unwrap_or_else(|| "text".to_owned());
    view! {
        <label for=id.clone()>{label}</label>
        <input
            id=id.clone()
            name=id
            type=input_type
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}

#[component]
pub fn CreateAccountPage() -> impl IntoView {
    let fullname = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let street = RwSignal::new(String::new());
    let address2 = RwSignal::new(String::new());
    let city = RwSignal::new(String::new());
    let province = RwSignal::new(String::new());
    let zipcode = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let created = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let form = Registration {
            fullname: fullname.get(),
            phone: phone.get(),
            email: email.get(),
            street_address: street.get(),
            address2: address2.get(),
            city: city.get(),
            province: province.get(),
            zipcode: zipcode.get(),
            username: username.get(),
            password: password.get(),
            confirm_password: confirm.get(),
        };
        if let Err(message) = validate_registration(&form) {
            info.set(message);
            return;
        }
        busy.set(true);
        info.set("Creating your account...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::register(&form).await {
                Ok(message) => {
                    info.set(message);
                    created.set(true);
                }
                Err(e) => info.set(e),
            }
            busy.set(false);
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = form;
    };

    view! {
        <NavMenu/>
        <main class="page create-account-page">
            <section class="card">
                <h1>"Open an Account"</h1>
                <Show
                    when=move || created.get()
                    fallback=move || {
                        view! {
                            <form class="bank-form" on:submit=on_submit>
                                <FormInput id="fullname" label="Full name" value=fullname/>
                                <FormInput id="phone" label="Phone" input_type="tel" value=phone/>
                                <FormInput id="email" label="Email" input_type="email" value=email/>
                                <FormInput id="streetAddress" label="Street address" value=street/>
                                <FormInput id="address2" label="Address line 2" value=address2/>
                                <FormInput id="city" label="City" value=city/>
                                <FormInput id="province" label="Province" value=province/>
                                <FormInput id="zipcode" label="Postal code" value=zipcode/>
                                <FormInput id="username" label="Username" value=username/>
                                <label for="password">"Password"</label>
                                <PasswordField id="password" name="password" value=password/>
                                <label for="confirm_password">"Confirm password"</label>
                                <PasswordField id="confirm_password" name="confirm_password" value=confirm/>
                                <button class="btn" type="submit" disabled=move || busy.get()>
                                    "Create Account"
                                </button>
                            </form>
                        }
                    }
                >
                    <a href="/Login" class="btn">
                        "Continue to login"
                    </a>
                </Show>
                <Show when=move || !info.get().is_empty()>
                    <p class="form-message">{move || info.get()}</p>
                </Show>
            </section>
        </main>
    }
}
