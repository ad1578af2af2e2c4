// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cached prompt list and prompt count.
//!
//! Both entries expire after a TTL and are invalidated after every successful
//! write, so aggregate counters are refetched on the next read.

use crate::db::SupabaseDb;
use crate::error::AppError;
use crate::models::Prompt;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Upper bound on the cache TTL.
const MAX_TTL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
struct Cached<T> {
    value: T,
    expires_at: DateTime<Utc>,
}

impl<T: Clone> Cached<T> {
    fn fresh(&self, now: DateTime<Utc>) -> Option<T> {
        (now < self.expires_at).then(|| self.value.clone())
    }
}

pub struct PromptCatalog {
    db: SupabaseDb,
    ttl: Duration,
    prompts: RwLock<Option<Cached<Arc<Vec<Prompt>>>>>,
    count: RwLock<Option<Cached<u64>>>,
    /// Serializes list refreshes so concurrent misses hit the backend once
    refresh_lock: Mutex<()>,
    /// Bumped by `invalidate`; a fetch started under an older generation is not stored
    generation: AtomicU64,
}

impl PromptCatalog {
    pub fn new(db: SupabaseDb, ttl_secs: u64) -> Self {
        Self {
            db,
            ttl: Duration::seconds(ttl_secs.min(MAX_TTL_SECS) as i64),
            prompts: RwLock::new(None),
            count: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// All prompts with stats, newest first.
    pub async fn list(&self) -> Result<Arc<Vec<Prompt>>, AppError> {
        if let Some(hit) = self.cached_list().await {
            return Ok(hit);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another request may have refreshed while we waited
        if let Some(hit) = self.cached_list().await {
            return Ok(hit);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let prompts = Arc::new(self.db.list_prompt_stats().await?);
        tracing::debug!(count = prompts.len(), "Prompt list refreshed");

        self.store(&self.prompts, prompts.clone(), generation).await;
        Ok(prompts)
    }

    /// Total number of prompts.
    pub async fn count(&self) -> Result<u64, AppError> {
        if let Some(hit) = self.count.read().await.as_ref().and_then(|c| c.fresh(Utc::now())) {
            return Ok(hit);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let total = self.db.count_prompts().await?;
        self.store(&self.count, total, generation).await;
        Ok(total)
    }

    /// Drop both cached entries.
    pub async fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        *self.prompts.write().await = None;
        *self.count.write().await = None;
        tracing::debug!("Prompt cache invalidated");
    }

    /// Cache `value` unless the catalog was invalidated since `generation`.
    /// Returns whether it was stored.
    async fn store<T>(
        &self,
        slot: &RwLock<Option<Cached<T>>>,
        value: T,
        generation: u64,
    ) -> bool {
        let mut slot = slot.write().await;
        if self.generation.load(Ordering::Acquire) != generation {
            tracing::debug!("Discarding prompt data fetched before invalidation");
            return false;
        }
        *slot = Some(Cached {
            value,
            expires_at: Utc::now() + self.ttl,
        });
        true
    }

    async fn cached_list(&self) -> Option<Arc<Vec<Prompt>>> {
        self.prompts
            .read()
            .await
            .as_ref()
            .and_then(|c| c.fresh(Utc::now()))
    }

    #[cfg(test)]
    async fn seed(&self, prompts: Vec<Prompt>, count: u64) {
        let expires_at = Utc::now() + self.ttl;
        *self.prompts.write().await = Some(Cached {
            value: Arc::new(prompts),
            expires_at,
        });
        *self.count.write().await = Some(Cached {
            value: count,
            expires_at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prompt(id: &str) -> Prompt {
        serde_json::from_value(json!({ "id": id, "category": "coding" })).unwrap()
    }

    #[tokio::test]
    async fn test_cached_values_served_without_backend() {
        let catalog = PromptCatalog::new(SupabaseDb::new_mock(), 60);
        catalog.seed(vec![prompt("a"), prompt("b")], 2).await;

        assert_eq!(catalog.list().await.unwrap().len(), 2);
        assert_eq!(catalog.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let catalog = PromptCatalog::new(SupabaseDb::new_mock(), 60);
        catalog.seed(vec![prompt("a")], 1).await;
        catalog.invalidate().await;

        // Offline backend: a refetch fails
        assert!(catalog.list().await.unwrap_err().is_backend());
        assert!(catalog.count().await.unwrap_err().is_backend());
    }

    #[tokio::test]
    async fn test_fetch_started_before_invalidate_is_not_cached() {
        let catalog = PromptCatalog::new(SupabaseDb::new_mock(), 60);
        let generation = catalog.generation.load(Ordering::Acquire);
        catalog.invalidate().await;

        let stale = Arc::new(vec![prompt("a")]);
        assert!(!catalog.store(&catalog.prompts, stale, generation).await);
        assert!(!catalog.store(&catalog.count, 1, generation).await);
        assert!(catalog.list().await.is_err());
        assert!(catalog.count().await.is_err());

        let current = catalog.generation.load(Ordering::Acquire);
        assert!(catalog.store(&catalog.count, 2, current).await);
        assert_eq!(catalog.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_expires_immediately() {
        let catalog = PromptCatalog::new(SupabaseDb::new_mock(), 0);
        catalog.seed(vec![prompt("a")], 1).await;
        assert!(catalog.list().await.is_err());
    }
}
