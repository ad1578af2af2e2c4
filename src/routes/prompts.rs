// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt listing, creation and interaction routes.

use crate::error::{AppError, Result};
use crate::models::category::ALL;
use crate::models::{Notice, Prompt};
use crate::routes::client_context;
use crate::services::{filter_prompts, AccessMode, ClientContext, CookieStore, PromptDraft};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MAX_QUERY_LEN: usize = 200;
const MAX_CATEGORY_LEN: usize = 50;
const MAX_PROMPT_ID_LEN: usize = 64;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/prompts", get(browse_prompts).post(create_prompt))
        .route("/api/prompts/count", get(count_prompts))
        .route("/api/prompts/{id}/like", post(like_prompt))
        .route("/api/prompts/{id}/copy", post(copy_prompt))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Category id, `all` when absent
    category: Option<String>,
    /// Free-text search
    q: Option<String>,
}

/// Filtered, access-limited prompt list.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ListingResponse {
    pub category: String,
    pub query: String,
    pub access: AccessMode,
    pub can_create: bool,
    /// Present when the listing is trial-limited
    pub trial_limit: Option<usize>,
    pub prompts: Vec<Prompt>,
    pub total_matching: usize,
    pub shown: usize,
    pub locked: bool,
    /// Ids of shown prompts this session already liked
    pub liked: Vec<String>,
}

/// Filter, limit and count a view for each listed card.
pub(crate) async fn build_listing(
    state: &AppState,
    ctx: &mut ClientContext<CookieStore>,
    params: ListQuery,
    mode: AccessMode,
) -> Result<ListingResponse> {
    let category = params
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| ALL.to_string());
    let query = params.q.map(|q| q.trim().to_string()).unwrap_or_default();

    if category.len() > MAX_CATEGORY_LEN {
        return Err(AppError::BadRequest(format!(
            "Category too long (max {} chars)",
            MAX_CATEGORY_LEN
        )));
    }
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(AppError::BadRequest(format!(
            "Search query too long (max {} chars)",
            MAX_QUERY_LEN
        )));
    }

    let session_id = ctx.session_id();
    let all_prompts = state.catalog.list().await?;
    let gated = state
        .gate
        .apply(filter_prompts(&all_prompts, &category, &query), mode);

    let shown_ids: Vec<String> = gated.prompts.iter().map(|p| p.id.clone()).collect();
    let liked = shown_ids
        .iter()
        .filter(|id| state.interactions.has_liked(&session_id, id))
        .cloned()
        .collect();

    tracing::debug!(
        category = %category,
        shown = gated.shown,
        total = gated.total_matching,
        mode = ?mode,
        "Listing prompts"
    );
    state.interactions.dispatch_views(shown_ids, session_id);

    Ok(ListingResponse {
        category,
        query,
        access: mode,
        can_create: mode.can_create(),
        trial_limit: (mode == AccessMode::Trial).then(|| state.gate.trial_limit()),
        prompts: gated.prompts,
        total_matching: gated.total_matching,
        shown: gated.shown,
        locked: gated.locked,
        liked,
    })
}

/// Browse page listing, limited unless the session has unlocked access.
async fn browse_prompts(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<ListQuery>,
) -> Result<(CookieJar, Json<ListingResponse>)> {
    let mut ctx = client_context(&state, jar);
    let mode = ctx.access_mode();
    let listing = build_listing(&state, &mut ctx, params, mode).await?;
    Ok((ctx.into_jar(), Json(listing)))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CountResponse {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub count: u64,
}

async fn count_prompts(State(state): State<Arc<AppState>>) -> Result<Json<CountResponse>> {
    let count = state.catalog.count().await?;
    Ok(Json(CountResponse { count }))
}

// ─── Creation ────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreatePromptResponse {
    pub prompt: Prompt,
    pub notice: Notice,
}

/// Create a prompt. Requires unlocked access.
async fn create_prompt(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(draft): Json<PromptDraft>,
) -> Result<(StatusCode, CookieJar, Json<CreatePromptResponse>)> {
    let mut ctx = client_context(&state, jar);
    ctx.session_id();

    if !ctx.access_mode().can_create() {
        return Err(AppError::AccessLocked);
    }

    let email = ctx.email();
    let mut new_prompt = draft
        .validate(email.as_deref())
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if let Some(email) = &email {
        new_prompt.profile_id = state.profiles.profile_id(email).await;
    }

    let prompt = state.db.insert_prompt(&new_prompt).await?;
    state.catalog.invalidate().await;

    Ok((
        StatusCode::CREATED,
        ctx.into_jar(),
        Json(CreatePromptResponse {
            prompt,
            notice: Notice::info(">>> SUCCESS", "Prompt uploaded to database successfully"),
        }),
    ))
}

// ─── Interactions ────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LikeResponse {
    pub prompt_id: String,
    pub liked: bool,
    pub dispatched: bool,
    pub acknowledged: bool,
    pub notice: Option<Notice>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CopyResponse {
    pub prompt_id: String,
    pub copied: bool,
    /// Text to place on the clipboard
    pub content: String,
    pub acknowledged: bool,
    pub notice: Option<Notice>,
}

fn check_prompt_id(id: &str) -> Result<()> {
    if id.trim().is_empty() || id.len() > MAX_PROMPT_ID_LEN {
        return Err(AppError::BadRequest("Invalid prompt id".to_string()));
    }
    Ok(())
}

async fn like_prompt(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Result<(CookieJar, Json<LikeResponse>)> {
    check_prompt_id(&id)?;
    if !state.catalog.list().await?.iter().any(|p| p.id == id) {
        return Err(AppError::NotFound(format!("Prompt {} not found", id)));
    }

    let mut ctx = client_context(&state, jar);
    let session_id = ctx.session_id();

    let outcome = state.interactions.like(&id, &session_id).await;

    Ok((
        ctx.into_jar(),
        Json(LikeResponse {
            prompt_id: outcome.prompt_id,
            liked: outcome.active,
            dispatched: outcome.dispatched,
            acknowledged: outcome.acknowledged,
            notice: outcome.notice,
        }),
    ))
}

async fn copy_prompt(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Result<(CookieJar, Json<CopyResponse>)> {
    check_prompt_id(&id)?;
    let mut ctx = client_context(&state, jar);
    let session_id = ctx.session_id();

    let content = state
        .catalog
        .list()
        .await?
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.content.clone())
        .ok_or_else(|| AppError::NotFound(format!("Prompt {} not found", id)))?;

    let outcome = state.interactions.copy(&id, &session_id).await;

    Ok((
        ctx.into_jar(),
        Json(CopyResponse {
            prompt_id: outcome.prompt_id,
            copied: outcome.active,
            content,
            acknowledged: outcome.acknowledged,
            notice: outcome.notice,
        }),
    ))
}
