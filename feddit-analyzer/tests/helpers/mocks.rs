//! In-memory collaborators
//!
//! `MockSource` serves comments and subfeddits from vectors, paging them
//! the way the Feddit API does. `MockScorer` answers from a per-text score
//! table. Both record their calls and can be told to fail.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use feddit_analyzer::types::{
    CommentSource, EntityInfo, EntitySummary, Label, LabelScore, RawComment, SentimentScorer,
};
use feddit_analyzer::ClientError;

/// Build a comment
pub fn comment(id: i64, text: &str, created_at: i64) -> RawComment {
    RawComment {
        id,
        text: text.to_string(),
        created_at,
        author: format!("user_{}", id),
    }
}

/// Build a subfeddit listing entry
pub fn entity(id: i64, title: &str) -> EntitySummary {
    EntitySummary {
        id,
        title: title.to_string(),
        username: "admin".to_string(),
        description: format!("{} description", title),
    }
}

/// Label triple in the order the model API returns it
pub fn scores(positive: f64, neutral: f64, negative: f64) -> Vec<LabelScore> {
    vec![
        LabelScore::new(Label::Positive, positive),
        LabelScore::new(Label::Neutral, neutral),
        LabelScore::new(Label::Negative, negative),
    ]
}

/// Paged in-memory comment source
#[derive(Default)]
pub struct MockSource {
    comments: Mutex<Vec<RawComment>>,
    entities: Mutex<Vec<EntitySummary>>,
    comments_error: Mutex<Option<ClientError>>,
    entities_error: Mutex<Option<ClientError>>,
    resolve_error: Mutex<Option<ClientError>>,
    comment_calls: Mutex<Vec<(i64, usize, usize)>>,
    entity_calls: Mutex<Vec<(usize, usize)>>,
    resolve_calls: Mutex<Vec<i64>>,
}

impl MockSource {
    pub fn with_comments(comments: Vec<RawComment>) -> Self {
        let source = Self::default();
        *source.comments.lock().unwrap() = comments;
        source
    }

    pub fn with_entities(entities: Vec<EntitySummary>) -> Self {
        let source = Self::default();
        *source.entities.lock().unwrap() = entities;
        source
    }

    pub fn set_entities(&self, entities: Vec<EntitySummary>) {
        *self.entities.lock().unwrap() = entities;
    }

    pub fn fail_comments(&self, err: ClientError) {
        *self.comments_error.lock().unwrap() = Some(err);
    }

    pub fn fail_entities(&self, err: ClientError) {
        *self.entities_error.lock().unwrap() = Some(err);
    }

    /// Make `resolve_entity` fail with `err` instead of a lookup
    pub fn fail_resolve(&self, err: ClientError) {
        *self.resolve_error.lock().unwrap() = Some(err);
    }

    /// `(subfeddit_id, skip, limit)` of every comment page request
    pub fn comment_calls(&self) -> Vec<(i64, usize, usize)> {
        self.comment_calls.lock().unwrap().clone()
    }

    /// `(skip, limit)` of every subfeddit page request
    pub fn entity_calls(&self) -> Vec<(usize, usize)> {
        self.entity_calls.lock().unwrap().clone()
    }

    pub fn resolve_calls(&self) -> Vec<i64> {
        self.resolve_calls.lock().unwrap().clone()
    }
}

fn page<T: Clone>(items: &[T], skip: usize, limit: usize) -> Vec<T> {
    items.iter().skip(skip).take(limit).cloned().collect()
}

#[async_trait]
impl CommentSource for MockSource {
    async fn fetch_comments(
        &self,
        entity_id: i64,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<RawComment>, ClientError> {
        self.comment_calls
            .lock()
            .unwrap()
            .push((entity_id, skip, limit));

        if let Some(err) = self.comments_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(page(&self.comments.lock().unwrap(), skip, limit))
    }

    async fn fetch_entities(
        &self,
        skip: usize,
        limit: usize,
    ) -> Result<Vec<EntitySummary>, ClientError> {
        self.entity_calls.lock().unwrap().push((skip, limit));

        if let Some(err) = self.entities_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(page(&self.entities.lock().unwrap(), skip, limit))
    }

    async fn resolve_entity(&self, entity_id: i64) -> Result<EntityInfo, ClientError> {
        self.resolve_calls.lock().unwrap().push(entity_id);

        if let Some(err) = self.resolve_error.lock().unwrap().clone() {
            return Err(err);
        }

        self.entities
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == entity_id)
            .map(|e| EntityInfo {
                id: e.id,
                title: e.title.clone(),
                username: e.username.clone(),
                description: e.description.clone(),
                comments: Vec::new(),
            })
            .ok_or_else(|| ClientError::NotFound(format!("Subfeddit {} not found", entity_id)))
    }
}

/// Scorer answering from a text -> label scores table
///
/// Texts missing from the table score as neutral (0.1, 0.8, 0.1).
#[derive(Default)]
pub struct MockScorer {
    table: HashMap<String, Vec<LabelScore>>,
    error: Mutex<Option<ClientError>>,
    drop_results: Mutex<usize>,
    calls: Mutex<Vec<(Vec<String>, Option<Duration>)>>,
}

impl MockScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(mut self, text: &str, labels: Vec<LabelScore>) -> Self {
        self.table.insert(text.to_string(), labels);
        self
    }

    pub fn fail(&self, err: ClientError) {
        *self.error.lock().unwrap() = Some(err);
    }

    /// Return `n` fewer results than texts received
    pub fn drop_results(&self, n: usize) {
        *self.drop_results.lock().unwrap() = n;
    }

    /// Texts and timeout of every call
    pub fn calls(&self) -> Vec<(Vec<String>, Option<Duration>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SentimentScorer for MockScorer {
    async fn score(
        &self,
        texts: &[String],
        timeout: Option<Duration>,
    ) -> Result<Vec<Vec<LabelScore>>, ClientError> {
        self.calls.lock().unwrap().push((texts.to_vec(), timeout));

        if let Some(err) = self.error.lock().unwrap().clone() {
            return Err(err);
        }

        let keep = texts.len().saturating_sub(*self.drop_results.lock().unwrap());
        Ok(texts
            .iter()
            .take(keep)
            .map(|text| {
                self.table
                    .get(text)
                    .cloned()
                    .unwrap_or_else(|| scores(0.1, 0.8, 0.1))
            })
            .collect())
    }
}
