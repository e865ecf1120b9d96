//! Comment classification endpoints
//!
//! Both endpoints return sentiment for at most the 25 most recent comments
//! of a subfeddit, optionally restricted to a creation-time range (Unix
//! epoch seconds, inclusive) and optionally sorted by polarity.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::extract::ApiJson;
use crate::error::{ApiError, ApiResult};
use crate::types::{ScoredComment, TimeRange};
use crate::AppState;

/// POST /api/v1/classify_comments/subfeddit_id request
#[derive(Debug, Deserialize)]
pub struct ClassifyByIdRequest {
    pub subfeddit_id: i64,
    #[serde(default)]
    pub min_datetime: Option<i64>,
    #[serde(default)]
    pub max_datetime: Option<i64>,
    #[serde(default)]
    pub sort_by_polarity: bool,
}

/// POST /api/v1/classify_comments/subfeddit_title request
#[derive(Debug, Deserialize)]
pub struct ClassifyByTitleRequest {
    pub subfeddit_title: String,
    #[serde(default)]
    pub min_datetime: Option<i64>,
    #[serde(default)]
    pub max_datetime: Option<i64>,
    #[serde(default)]
    pub sort_by_polarity: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyByIdResponse {
    pub subfeddit_id: i64,
    pub comments: Vec<ScoredComment>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyByTitleResponse {
    pub subfeddit_id: i64,
    pub subfeddit_title: String,
    pub comments: Vec<ScoredComment>,
}

/// POST /api/v1/classify_comments/subfeddit_id
pub async fn classify_by_id(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ClassifyByIdRequest>,
) -> ApiResult<Json<ClassifyByIdResponse>> {
    info!(?request, "Processing request for sentiment analysis of comments");

    let comments = state
        .analyzer
        .get_scored_comments(
            request.subfeddit_id,
            request.min_datetime,
            request.max_datetime,
            request.sort_by_polarity,
        )
        .await?;

    Ok(Json(ClassifyByIdResponse {
        subfeddit_id: request.subfeddit_id,
        comments,
    }))
}

/// POST /api/v1/classify_comments/subfeddit_title
pub async fn classify_by_title(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ClassifyByTitleRequest>,
) -> ApiResult<Json<ClassifyByTitleResponse>> {
    info!(?request, "Processing request for sentiment analysis of comments");

    if request.subfeddit_title.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "subfeddit_title must not be empty".to_string(),
        ));
    }
    // Reject a bad range before paying for the title search
    TimeRange::new(request.min_datetime, request.max_datetime)?;

    let subfeddit_id = state
        .title_resolver
        .resolve_entity_id(&request.subfeddit_title)
        .await?;

    info!(
        subfeddit_id,
        "Processing request for sentiment analysis of comments from subfeddit"
    );
    let comments = state
        .analyzer
        .get_scored_comments(
            subfeddit_id,
            request.min_datetime,
            request.max_datetime,
            request.sort_by_polarity,
        )
        .await?;

    Ok(Json(ClassifyByTitleResponse {
        subfeddit_id,
        subfeddit_title: request.subfeddit_title,
        comments,
    }))
}

/// Build classification routes
pub fn classify_routes() -> Router<AppState> {
    let prefix = super::API_PREFIX;

    Router::new()
        .route(
            &format!("{}/classify_comments/subfeddit_id", prefix),
            post(classify_by_id),
        )
        .route(
            &format!("{}/classify_comments/subfeddit_title", prefix),
            post(classify_by_title),
        )
}
