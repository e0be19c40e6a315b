//! Browser-to-server networking: REST helpers and wire DTOs.

pub mod api;
pub mod types;
