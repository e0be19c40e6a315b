//! # client
//!
//! Leptos + WASM front end for Rivanna Bank. Pages are rendered on the server
//! and hydrated in the browser, where the navigation menu, password reveal
//! buttons, and the in-place balance check come alive.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: attach the client runtime to the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
