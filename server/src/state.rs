//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool and the cookie/session settings resolved at
//! startup. Balances live only in Postgres; nothing is cached in memory.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;

/// Cookie and session settings handlers need per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub cookie_secure: bool,
    pub ttl_days: i64,
}

impl From<&ServerConfig> for SessionSettings {
    fn from(config: &ServerConfig) -> Self {
        Self { cookie_secure: config.cookie_secure, ttl_days: config.session_ttl_days }
    }
}

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub sessions: Arc<SessionSettings>,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, sessions: SessionSettings) -> Self {
        Self { pool, sessions: Arc::new(sessions) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
