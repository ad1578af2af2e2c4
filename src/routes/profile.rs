// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile dashboard route.

use crate::error::{AppError, Result};
use crate::routes::client_context;
use crate::services::Dashboard;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/profile", get(get_profile))
}

/// Own prompts and engagement totals for an unlocked session.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<Dashboard>)> {
    let mut ctx = client_context(&state, jar);
    ctx.session_id();

    let email = ctx.email().ok_or(AppError::AccessLocked)?;
    let dashboard = state.profiles.dashboard(&email).await;

    tracing::debug!(prompts = dashboard.prompts.len(), "Profile dashboard loaded");
    Ok((ctx.into_jar(), Json(dashboard)))
}
