// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interaction dispatch (view, like, copy).
//!
//! Counters are owned by the backend. Callers get an optimistic flag back
//! immediately; a failed dispatch is logged and reported as a notice, and the
//! displayed counters catch up on the next list refresh.

use crate::db::SupabaseDb;
use crate::error::AppError;
use crate::models::{InteractionEvent, InteractionType, Notice};
use crate::services::catalog::PromptCatalog;
use crate::services::ledger::SessionLedger;
use futures_util::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Max concurrent view dispatches per listing.
const MAX_CONCURRENT_VIEWS: usize = 8;

/// Result of a like or copy request.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct InteractionOutcome {
    pub prompt_id: String,
    /// Optimistic flag (`liked` or `copied`), set even if the backend failed
    pub active: bool,
    /// Whether an event was sent to the backend for this request
    pub dispatched: bool,
    /// Whether the backend accepted the event
    pub acknowledged: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

pub struct InteractionService {
    db: SupabaseDb,
    catalog: Arc<PromptCatalog>,
    liked: SessionLedger,
    /// Cards already counted as viewed, so a card is counted once per session
    viewed: SessionLedger,
}

impl InteractionService {
    pub fn new(db: SupabaseDb, catalog: Arc<PromptCatalog>) -> Self {
        Self::with_ledgers(db, catalog, SessionLedger::default(), SessionLedger::default())
    }

    pub fn with_ledgers(
        db: SupabaseDb,
        catalog: Arc<PromptCatalog>,
        liked: SessionLedger,
        viewed: SessionLedger,
    ) -> Self {
        Self {
            db,
            catalog,
            liked,
            viewed,
        }
    }

    /// Send one event to the backend and invalidate cached counters on success.
    pub async fn record(
        &self,
        prompt_id: &str,
        interaction_type: InteractionType,
        session_id: &str,
    ) -> Result<(), AppError> {
        let event = InteractionEvent {
            prompt_id: prompt_id.to_string(),
            interaction_type,
            user_session: session_id.to_string(),
        };

        match self.db.increment_interaction(&event).await {
            Ok(()) => {
                self.catalog.invalidate().await;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    prompt_id = %prompt_id,
                    interaction = %interaction_type,
                    error = %e,
                    "Failed to record interaction"
                );
                Err(e)
            }
        }
    }

    /// Record a like unless this session already liked the prompt.
    pub async fn like(&self, prompt_id: &str, session_id: &str) -> InteractionOutcome {
        if !self.liked.insert(session_id, prompt_id) {
            tracing::debug!(prompt_id = %prompt_id, "Duplicate like ignored");
            return InteractionOutcome {
                prompt_id: prompt_id.to_string(),
                active: true,
                dispatched: false,
                acknowledged: false,
                notice: None,
            };
        }

        let result = self.record(prompt_id, InteractionType::Like, session_id).await;
        let notice = match &result {
            Ok(()) => Notice::info("Added to favorites", "Prompt added to your favorites"),
            Err(_) => Notice::error("Like not saved", "The like could not be recorded right now."),
        };

        InteractionOutcome {
            prompt_id: prompt_id.to_string(),
            active: true,
            dispatched: true,
            acknowledged: result.is_ok(),
            notice: Some(notice),
        }
    }

    /// Record a copy. Always dispatched.
    pub async fn copy(&self, prompt_id: &str, session_id: &str) -> InteractionOutcome {
        let result = self.record(prompt_id, InteractionType::Copy, session_id).await;
        let notice = match &result {
            Ok(()) => Notice::info(
                "Copied to clipboard!",
                "The prompt has been copied to your clipboard.",
            ),
            Err(_) => Notice::error(
                "Copy not counted",
                "The prompt was copied but the copy could not be recorded.",
            ),
        };

        InteractionOutcome {
            prompt_id: prompt_id.to_string(),
            active: true,
            dispatched: true,
            acknowledged: result.is_ok(),
            notice: Some(notice),
        }
    }

    pub fn has_liked(&self, session_id: &str, prompt_id: &str) -> bool {
        self.liked.contains(session_id, prompt_id)
    }

    #[cfg(test)]
    fn tracked_like_sessions(&self) -> usize {
        self.liked.len()
    }

    /// Keep only the cards this session has not been counted as viewing yet,
    /// marking them as viewed.
    pub fn unseen_views(&self, prompt_ids: Vec<String>, session_id: &str) -> Vec<String> {
        prompt_ids
            .into_iter()
            .filter(|id| self.viewed.insert(session_id, id))
            .collect()
    }

    /// Record a view for each card not yet seen by this session, in the background.
    pub fn dispatch_views(self: &Arc<Self>, prompt_ids: Vec<String>, session_id: String) {
        let prompt_ids = self.unseen_views(prompt_ids, &session_id);
        if prompt_ids.is_empty() {
            return;
        }

        let service = Arc::clone(self);
        tokio::spawn(async move {
            let total = prompt_ids.len();
            let failed = service.record_views(prompt_ids, &session_id).await;
            tracing::debug!(total, failed, "View dispatch finished");
        });
    }

    /// Record views with bounded concurrency. Returns the number that failed.
    pub async fn record_views(&self, prompt_ids: Vec<String>, session_id: &str) -> usize {
        stream::iter(prompt_ids)
            .map(|prompt_id| async move {
                self.record(&prompt_id, InteractionType::View, session_id)
                    .await
                    .is_err()
            })
            .buffer_unordered(MAX_CONCURRENT_VIEWS)
            .filter(|failed| futures_util::future::ready(*failed))
            .count()
            .await
    }
}
