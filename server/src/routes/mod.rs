//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON API and the balance-check form endpoint, and
//! stitches them with Leptos SSR rendering under a single Axum router. Page
//! paths (`/Check-Balance`, `/Deposit`, ...) answer `GET` with the rendered
//! page; `POST /Check-Balance` shares its path with the page.

pub mod auth;
pub mod banking;
pub mod csrf;
pub mod error;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Balance-check form target; also the page path.
pub const CHECK_BALANCE_PATH: &str = "/Check-Balance";

/// API routes plus the balance-check form endpoint.
pub(crate) fn api_routes(state: AppState) -> Router {
    Router::new()
        .route(CHECK_BALANCE_PATH, post(banking::check_balance))
        .route("/api/csrf", get(csrf::issue_token))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/deposit", post(banking::deposit))
        .route("/api/send-money", post(banking::send_money))
        .route("/api/transactions", get(banking::transactions))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Leptos SSR frontend: API routes + rendered pages + hydration assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section).
pub fn app(state: AppState) -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
