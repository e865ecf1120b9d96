//! Hosted sentiment model client
//!
//! Calls the Hugging Face inference API for
//! `cardiffnlp/twitter-roberta-base-sentiment-latest`, a RoBERTa model
//! trained on tweets that scores text as positive / neutral / negative.
//! All statements of a request are sent in one call; the API answers with
//! one list of label scores per statement, in input order.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ClientError;
use crate::services::api_response::{handle_response, transport_error};
use crate::types::{LabelScore, SentimentScorer};

/// Default inference endpoint
pub const DEFAULT_MODEL_API_URL: &str =
    "https://api-inference.huggingface.co/models/cardiffnlp/twitter-roberta-base-sentiment-latest";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a [String],
}

/// Sentiment model API client
#[derive(Clone)]
pub struct SentimentClient {
    http_client: reqwest::Client,
    api_url: String,
    api_key: String,
    default_timeout: Duration,
}

impl SentimentClient {
    pub fn new(api_key: String) -> Result<Self, ClientError> {
        Self::with_url(DEFAULT_MODEL_API_URL, api_key, DEFAULT_TIMEOUT)
    }

    pub fn with_url(
        api_url: impl Into<String>,
        api_key: String,
        default_timeout: Duration,
    ) -> Result<Self, ClientError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_url: api_url.into(),
            api_key,
            default_timeout,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl SentimentScorer for SentimentClient {
    async fn score(
        &self,
        texts: &[String],
        timeout: Option<Duration>,
    ) -> Result<Vec<Vec<LabelScore>>, ClientError> {
        tracing::info!("Generating sentiment analysis for {} statements", texts.len());

        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .timeout(timeout.unwrap_or(self.default_timeout))
            .json(&InferenceRequest { inputs: texts })
            .send()
            .await
            .map_err(transport_error)?;

        let outputs: Vec<Vec<LabelScore>> = handle_response(response).await?;
        tracing::info!("Sentiment analysis generated for {} statements", outputs.len());

        Ok(outputs)
    }
}
