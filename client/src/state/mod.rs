//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! Each interactive behavior keeps its state in a small plain type with pure
//! transitions. Components wrap them in `RwSignal`s, so the transitions can
//! be tested without a browser.

pub mod balance;
pub mod menu;
pub mod password;
pub mod session;
