// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Landing, trial and reference-data routes.

use crate::config::Theme;
use crate::error::Result;
use crate::models::category::CATEGORIES;
use crate::models::{Category, FeaturedVideo};
use crate::routes::client_context;
use crate::routes::prompts::{build_listing, ListQuery, ListingResponse};
use crate::services::AccessMode;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/landing", get(landing))
        .route("/api/categories", get(categories))
        .route("/api/try", get(try_prompts))
        .route("/api/video", get(featured_video))
}

/// Featured video with its embed id.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VideoView {
    pub video: FeaturedVideo,
    /// YouTube id, `None` when the URL is not a recognizable YouTube link
    pub embed_id: Option<String>,
}

impl From<FeaturedVideo> for VideoView {
    fn from(video: FeaturedVideo) -> Self {
        Self {
            embed_id: video.video_id(),
            video,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LandingResponse {
    pub theme: Theme,
    /// `None` when the backend could not be reached
    #[cfg_attr(feature = "binding-generation", ts(type = "number | null"))]
    pub total_prompts: Option<u64>,
    pub video: Option<VideoView>,
    pub trial_limit: usize,
    pub unlocked: bool,
}

async fn landing(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<LandingResponse>) {
    let mut ctx = client_context(&state, jar);
    ctx.session_id();

    let (count, video) = tokio::join!(state.catalog.count(), load_video(&state));
    let total_prompts = count
        .map_err(|e| tracing::warn!(error = %e, "Prompt count unavailable"))
        .ok();

    let response = LandingResponse {
        theme: state.config.theme,
        total_prompts,
        video,
        trial_limit: state.gate.trial_limit(),
        unlocked: ctx.access_mode() == AccessMode::Full,
    };
    (ctx.into_jar(), Json(response))
}

async fn categories() -> Json<&'static [Category]> {
    Json(CATEGORIES)
}

/// Trial page listing. Always limited, regardless of the session's access.
async fn try_prompts(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<ListQuery>,
) -> Result<(CookieJar, Json<ListingResponse>)> {
    let mut ctx = client_context(&state, jar);
    let listing = build_listing(&state, &mut ctx, params, AccessMode::Trial).await?;
    Ok((ctx.into_jar(), Json(listing)))
}

async fn featured_video(State(state): State<Arc<AppState>>) -> Json<Option<VideoView>> {
    Json(load_video(&state).await)
}

/// Newest active video; backend failures degrade to no video.
async fn load_video(state: &AppState) -> Option<VideoView> {
    match state.db.get_active_video().await {
        Ok(video) => video.map(VideoView::from),
        Err(e) => {
            tracing::error!(error = %e, "Error fetching featured video");
            None
        }
    }
}
