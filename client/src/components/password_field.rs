//! Password input with a show/hide button.

use leptos::prelude::*;

use crate::state::password::PasswordVisibility;

/// Masked input plus a reveal button that flips the input type and glyph.
///
/// `value` is two-way bound when given; otherwise the input is left for a
/// surrounding `<form>` to read.
#[component]
pub fn PasswordField(
    #[prop(into)] id: String,
    #[prop(into)] name: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(optional)] value: Option<RwSignal<String>>,
) -> impl IntoView {
    let visibility = RwSignal::new(PasswordVisibility::default());

    view! {
        <div class="password-field">
            <input
                id=id.clone()
                name=name
                class="password-field__input"
                type=move || visibility.get().input_type()
                placeholder=placeholder
                required=true
                prop:value=move || value.map(|v| v.get()).unwrap_or_default()
                on:input=move |ev| {
                    if let Some(v) = value {
                        v.set(event_target_value(&ev));
                    }
                }
            />
            <button
                class="password-field__toggle"
                type="button"
                aria-controls=id
                aria-label=move || visibility.get().button_label()
                on:click=move |_| visibility.update(PasswordVisibility::toggle)
            >
                {move || visibility.get().glyph()}
            </button>
        </div>
    }
}
