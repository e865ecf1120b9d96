//! Core types and collaborator traits
//!
//! The analyzer talks to two external services:
//! - a **comment source** (the Feddit API) that pages through subfeddits
//!   and their comments
//! - a **sentiment scorer** (a hosted text-classification model) that
//!   returns positive / neutral / negative scores per statement
//!
//! Both are abstracted behind async traits so the aggregation logic can be
//! exercised with in-memory implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::{AnalyzerError, ClientError};

/// Maximum number of comments returned by a single analysis
pub const COMMENT_LIMIT: usize = 25;

// ============================================================================
// Feddit data
// ============================================================================

/// A comment as returned by the Feddit API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawComment {
    /// Comment ID
    pub id: i64,
    /// Comment body
    pub text: String,
    /// Creation time in Unix epoch seconds
    pub created_at: i64,
    /// User who posted the comment
    #[serde(rename = "username")]
    pub author: String,
}

/// Subfeddit entry from the paginated subfeddit listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub id: i64,
    pub title: String,
    pub username: String,
    pub description: String,
}

/// Detailed subfeddit information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityInfo {
    pub id: i64,
    pub title: String,
    pub username: String,
    pub description: String,
    /// First page of comments embedded by the Feddit API
    #[serde(default)]
    pub comments: Vec<RawComment>,
}

// ============================================================================
// Sentiment data
// ============================================================================

/// Sentiment label produced by the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Positive,
    Neutral,
    Negative,
}

impl Label {
    pub const ALL: [Label; 3] = [Label::Positive, Label::Neutral, Label::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "positive",
            Label::Neutral => "neutral",
            Label::Negative => "negative",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score of a single label (0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: Label,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: Label, score: f64) -> Self {
        Self { label, score }
    }
}

/// Binary sentiment classification derived from polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Positive,
    Negative,
}

/// Polarity of one analyzed statement
#[derive(Debug, Clone, PartialEq)]
pub struct PolarityResult {
    pub statement: String,
    /// Polarity in [-1, 1], positive is favorable
    pub polarity: f64,
    pub classification: Classification,
}

/// A comment with its sentiment, as returned to API callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredComment {
    pub comment_id: i64,
    #[serde(rename = "comment")]
    pub comment_text: String,
    pub polarity: f64,
    pub classification: Classification,
}

// ============================================================================
// Query parameters
// ============================================================================

/// Inclusive creation-time filter; an absent bound does not constrain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    min: Option<i64>,
    max: Option<i64>,
}

impl TimeRange {
    /// Build a range, rejecting `min > max`
    pub fn new(min: Option<i64>, max: Option<i64>) -> Result<Self, AnalyzerError> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(AnalyzerError::InvalidTimeRange { min, max });
            }
        }
        Ok(Self { min, max })
    }

    /// Range with no bounds
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn min(&self) -> Option<i64> {
        self.min
    }

    pub fn max(&self) -> Option<i64> {
        self.max
    }

    pub fn contains(&self, created_at: i64) -> bool {
        self.min.map_or(true, |min| created_at >= min)
            && self.max.map_or(true, |max| created_at <= max)
    }
}

// ============================================================================
// Collaborator traits
// ============================================================================

/// Paginated source of subfeddits and comments
///
/// Pagination contract: a page shorter than the requested `limit` means
/// the listing is exhausted.
#[async_trait]
pub trait CommentSource: Send + Sync {
    /// Fetch a page of comments of a subfeddit, in no particular order
    async fn fetch_comments(
        &self,
        entity_id: i64,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<RawComment>, ClientError>;

    /// Fetch a page of the subfeddit listing
    async fn fetch_entities(&self, skip: usize, limit: usize)
        -> Result<Vec<EntitySummary>, ClientError>;

    /// Look up a subfeddit by ID
    ///
    /// Fails with [`ClientError::NotFound`] if it does not exist.
    async fn resolve_entity(&self, entity_id: i64) -> Result<EntityInfo, ClientError>;
}

/// Text sentiment scorer
#[async_trait]
pub trait SentimentScorer: Send + Sync {
    /// Score all `texts` in one call
    ///
    /// The result is positionally aligned with `texts`; each entry holds
    /// one score per label. `timeout` overrides the scorer's default.
    async fn score(
        &self,
        texts: &[String],
        timeout: Option<Duration>,
    ) -> Result<Vec<Vec<LabelScore>>, ClientError>;
}
