//! Subfeddit title -> ID resolution
//!
//! The Feddit API has no search endpoint, so finding a subfeddit by title
//! means walking the whole listing. Every `(title, id)` pair seen during a
//! walk is cached so later lookups can skip it. A cached ID is confirmed
//! against the API before use: if the subfeddit is gone, the entry is
//! dropped and the listing is walked again.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use moka::policy::EvictionPolicy;
use tracing::{debug, info};

use crate::error::{AnalyzerError, AnalyzerResult, ClientError};
use crate::types::CommentSource;

/// Default maximum number of cached titles
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 1000;

/// Default cache entry lifetime
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Default page size when walking the subfeddit listing
pub const DEFAULT_SUBFEDDIT_PAGE_SIZE: usize = 5000;

/// Bounded, expiring title -> subfeddit ID map
///
/// Cloning is cheap and clones share the same entries, so one cache can be
/// created at startup and handed to every resolver.
#[derive(Clone)]
pub struct TitleCache {
    inner: Cache<String, i64>,
}

impl TitleCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .eviction_policy(EvictionPolicy::lru())
                .build(),
        }
    }

    pub async fn get(&self, title: &str) -> Option<i64> {
        self.inner.get(title).await
    }

    pub async fn insert(&self, title: String, id: i64) {
        self.inner.insert(title, id).await;
    }

    pub async fn remove(&self, title: &str) {
        self.inner.invalidate(title).await;
    }

    /// Number of live entries after pending evictions are applied
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }
}

impl Default for TitleCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL)
    }
}

/// Resolves subfeddit titles to IDs
pub struct TitleResolver {
    source: Arc<dyn CommentSource>,
    cache: TitleCache,
    page_size: usize,
}

impl TitleResolver {
    pub fn new(source: Arc<dyn CommentSource>, cache: TitleCache) -> Self {
        Self {
            source,
            cache,
            page_size: DEFAULT_SUBFEDDIT_PAGE_SIZE,
        }
    }

    /// Page size for the subfeddit listing (at least 1)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn cache(&self) -> &TitleCache {
        &self.cache
    }

    /// Find the ID of the subfeddit titled `title`
    pub async fn resolve_entity_id(&self, title: &str) -> AnalyzerResult<i64> {
        info!(title = %title, "Resolving subfeddit ID from title");

        if let Some(cached_id) = self.cache.get(title).await {
            debug!(title = %title, subfeddit_id = cached_id, "Validating cached subfeddit ID");

            match self.source.resolve_entity(cached_id).await {
                Ok(_) => {
                    info!(title = %title, subfeddit_id = cached_id, "Subfeddit found in cache");
                    return Ok(cached_id);
                }
                Err(ClientError::NotFound(_)) => {
                    info!(
                        title = %title,
                        subfeddit_id = cached_id,
                        "Cached subfeddit no longer exists, removing from cache"
                    );
                    self.cache.remove(title).await;
                }
                Err(e) => return Err(AnalyzerError::Feddit(e)),
            }
        }

        self.search(title).await
    }

    /// Walk the subfeddit listing until `title` is found
    async fn search(&self, title: &str) -> AnalyzerResult<i64> {
        let mut skip = 0;

        loop {
            let batch = self
                .source
                .fetch_entities(skip, self.page_size)
                .await
                .map_err(AnalyzerError::Feddit)?;

            debug!(skip, received = batch.len(), "Received subfeddit batch");
            let exhausted = batch.len() < self.page_size;

            for entity in batch {
                let matched = entity.title == title;
                let id = entity.id;
                self.cache.insert(entity.title, id).await;

                if matched {
                    info!(title = %title, subfeddit_id = id, "Subfeddit found");
                    return Ok(id);
                }
            }

            if exhausted {
                break;
            }
            skip += self.page_size;
        }

        Err(AnalyzerError::EntityNotFound(title.to_string()))
    }
}
