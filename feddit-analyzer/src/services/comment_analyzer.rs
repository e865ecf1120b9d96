//! Comment sentiment aggregation
//!
//! Pipeline for one request:
//! 1. Page through all comments of a subfeddit, keeping the 25 most recent
//!    that fall in the requested time range ([`MergeWindow`])
//! 2. Score all surviving texts with a single sentiment scorer call
//! 3. Convert each label triple into a polarity and classification
//! 4. Optionally re-order by polarity, highest first
//!
//! Collaborator failures are returned as-is, wrapped only to record which
//! service failed. Nothing is retried here.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{AnalyzerError, AnalyzerResult};
use crate::services::merge_window::MergeWindow;
use crate::services::polarity::analyze_scores;
use crate::types::{
    CommentSource, RawComment, ScoredComment, SentimentScorer, TimeRange, COMMENT_LIMIT,
};

/// Default page size when walking the comment listing
pub const DEFAULT_COMMENT_PAGE_SIZE: usize = 5000;

/// Default timeout for the sentiment scorer call
pub const DEFAULT_MODEL_TIMEOUT: Duration = Duration::from_secs(60);

/// Scores the most recent comments of a subfeddit
pub struct CommentAnalyzer {
    source: Arc<dyn CommentSource>,
    scorer: Arc<dyn SentimentScorer>,
    page_size: usize,
    model_timeout: Option<Duration>,
}

impl CommentAnalyzer {
    pub fn new(source: Arc<dyn CommentSource>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self {
            source,
            scorer,
            page_size: DEFAULT_COMMENT_PAGE_SIZE,
            model_timeout: Some(DEFAULT_MODEL_TIMEOUT),
        }
    }

    /// Page size for comment retrieval (at least 1)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Timeout passed to the scorer; `None` uses the scorer's own default
    pub fn with_model_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.model_timeout = timeout;
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Most recent comments of a subfeddit within `range`, newest first
    ///
    /// Walks the whole listing: a page shorter than the page size ends it.
    pub async fn collect_recent_comments(
        &self,
        entity_id: i64,
        range: TimeRange,
    ) -> AnalyzerResult<Vec<RawComment>> {
        info!(subfeddit_id = entity_id, "Getting comments for subfeddit");

        let mut window = MergeWindow::new(COMMENT_LIMIT, range);
        let mut skip = 0;

        loop {
            let batch = self
                .source
                .fetch_comments(entity_id, skip, self.page_size)
                .await
                .map_err(AnalyzerError::Feddit)?;

            let exhausted = batch.len() < self.page_size;
            let received = batch.len();
            let accepted = window.merge(batch);

            debug!(
                subfeddit_id = entity_id,
                skip,
                received,
                accepted,
                window = window.len(),
                "Merged comment batch"
            );

            if exhausted {
                break;
            }
            skip += self.page_size;
        }

        Ok(window.into_items())
    }

    /// Score the most recent comments of a subfeddit
    ///
    /// Returns at most 25 comments, newest first, or highest polarity first
    /// when `sort_by_polarity` is set (ties keep recency order). No
    /// comments in range is an empty result, not an error.
    pub async fn get_scored_comments(
        &self,
        entity_id: i64,
        min_time: Option<i64>,
        max_time: Option<i64>,
        sort_by_polarity: bool,
    ) -> AnalyzerResult<Vec<ScoredComment>> {
        let range = TimeRange::new(min_time, max_time)?;

        info!("Extracting comments for sentiment analysis");
        let comments = self.collect_recent_comments(entity_id, range).await?;
        info!("Received {} comments for sentiment analysis", comments.len());

        if comments.is_empty() {
            warn!(subfeddit_id = entity_id, "No comments found");
            return Ok(Vec::new());
        }

        let texts: Vec<String> = comments.iter().map(|c| c.text.clone()).collect();

        info!("Analyzing sentiment of {} comments", texts.len());
        let scores = self
            .scorer
            .score(&texts, self.model_timeout)
            .await
            .map_err(AnalyzerError::Model)?;
        debug!("Sentiment scores: {:?}", scores);

        if scores.len() != comments.len() {
            return Err(AnalyzerError::ResponseMismatch {
                expected: comments.len(),
                received: scores.len(),
            });
        }

        let mut scored = comments
            .into_iter()
            .zip(scores)
            .map(|(comment, labels)| -> AnalyzerResult<ScoredComment> {
                let result = analyze_scores(&comment.text, &labels)?;
                Ok(ScoredComment {
                    comment_id: comment.id,
                    comment_text: comment.text,
                    polarity: result.polarity,
                    classification: result.classification,
                })
            })
            .collect::<AnalyzerResult<Vec<_>>>()?;

        if sort_by_polarity {
            info!("Sorting comments by polarity");
            scored.sort_by(|a, b| b.polarity.total_cmp(&a.polarity));
        }

        info!("Sentiment analysis of comments completed");
        Ok(scored)
    }
}
