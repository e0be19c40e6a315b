//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the chrome every page shares and read the signed-in
//! customer from Leptos context.

pub mod nav_menu;
pub mod password_field;
