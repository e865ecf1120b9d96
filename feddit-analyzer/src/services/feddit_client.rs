//! Feddit API client
//!
//! Thin reqwest wrapper over the Feddit REST API, implementing
//! [`CommentSource`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::ClientError;
use crate::services::api_response::{handle_response, transport_error};
use crate::types::{CommentSource, EntityInfo, EntitySummary, RawComment};

const API_PREFIX: &str = "/api/v1";
const USER_AGENT: &str = concat!("feddit-analyzer/", env!("CARGO_PKG_VERSION"));

/// Feddit API versions this client understands
pub const SUPPORTED_VERSIONS: &[&str] = &["0.1.0"];

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct SubfedditsResponse {
    subfeddits: Vec<EntitySummary>,
}

#[derive(Debug, Deserialize)]
struct CommentsResponse {
    comments: Vec<RawComment>,
}

/// Feddit API client
#[derive(Clone)]
pub struct FedditClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl FedditClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    /// Get the Feddit API version
    pub async fn get_version(&self) -> Result<String, ClientError> {
        tracing::debug!("Getting Feddit API version");

        let response = self
            .http_client
            .get(self.url("/version"))
            .send()
            .await
            .map_err(transport_error)?;

        let version: VersionResponse = handle_response(response).await?;
        Ok(version.version)
    }

    /// Fail with [`ClientError::UnsupportedVersion`] unless the API version is supported
    pub async fn check_version(&self) -> Result<String, ClientError> {
        let version = self.get_version().await?;
        if !SUPPORTED_VERSIONS.contains(&version.as_str()) {
            return Err(ClientError::UnsupportedVersion(version));
        }
        Ok(version)
    }
}

#[async_trait]
impl CommentSource for FedditClient {
    async fn fetch_comments(
        &self,
        entity_id: i64,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<RawComment>, ClientError> {
        tracing::info!(
            subfeddit_id = entity_id,
            skip,
            limit,
            "Getting comments for subfeddit"
        );

        let response = self
            .http_client
            .get(self.url("/comments/"))
            .query(&[
                ("subfeddit_id", entity_id.to_string()),
                ("skip", skip.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let page: CommentsResponse = handle_response(response).await?;
        Ok(page.comments)
    }

    async fn fetch_entities(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<EntitySummary>, ClientError> {
        tracing::info!(skip, limit, "Getting subfeddits");

        let response = self
            .http_client
            .get(self.url("/subfeddits/"))
            .query(&[("skip", skip), ("limit", limit)])
            .send()
            .await
            .map_err(transport_error)?;

        let page: SubfedditsResponse = handle_response(response).await?;
        Ok(page.subfeddits)
    }

    async fn resolve_entity(&self, entity_id: i64) -> Result<EntityInfo, ClientError> {
        tracing::info!(subfeddit_id = entity_id, "Getting subfeddit info");

        let response = self
            .http_client
            .get(self.url("/subfeddit/"))
            .query(&[("subfeddit_id", entity_id)])
            .send()
            .await
            .map_err(transport_error)?;

        handle_response(response).await
    }
}
