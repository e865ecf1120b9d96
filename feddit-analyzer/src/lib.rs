//! feddit-analyzer library interface
//!
//! Sentiment analysis of the most recent comments of a Feddit subfeddit.
//! Exposes the core services for the HTTP layer and integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod types;

pub use crate::error::{AnalyzerError, ApiError, ApiResult, ClientError};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::services::{CommentAnalyzer, TitleResolver};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Comment retrieval and scoring pipeline
    pub analyzer: Arc<CommentAnalyzer>,
    /// Title -> subfeddit ID lookup with its process-wide cache
    pub title_resolver: Arc<TitleResolver>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(analyzer: CommentAnalyzer, title_resolver: TitleResolver) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            title_resolver: Arc::new(title_resolver),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::version_routes())
        .merge(api::classify_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
