//! HTTP API handlers for feddit-analyzer

pub mod classify;
pub mod extract;
pub mod health;

pub use classify::classify_routes;
pub use extract::ApiJson;
pub use health::{health_routes, version_routes};

/// Prefix of versioned API routes
pub const API_PREFIX: &str = "/api/v1";
