// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Email access gate and newsletter subscription.

use crate::error::{AppError, Result};
use crate::models::{Notice, UserProfile};
use crate::routes::client_context;
use crate::services::gate::validate_email_format;
use crate::services::AccessMode;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/access",
            get(access_status).post(unlock_access).delete(leave),
        )
        .route("/api/subscribe", post(subscribe))
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    email: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AccessResponse {
    pub access: AccessMode,
    pub email: Option<String>,
    pub subscribed: bool,
    pub can_create: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// Current session's access state.
async fn access_status(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<AccessResponse>) {
    let mut ctx = client_context(&state, jar);
    ctx.session_id();
    let mode = ctx.access_mode();

    let response = AccessResponse {
        access: mode,
        email: ctx.email(),
        subscribed: ctx.is_subscribed(),
        can_create: mode.can_create(),
        profile: None,
        notice: None,
    };
    (ctx.into_jar(), Json(response))
}

/// Sign in / sign up: accept an email and lift the trial limit.
async fn unlock_access(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(request): Json<EmailRequest>,
) -> Result<(CookieJar, Json<AccessResponse>)> {
    let email = state
        .gate
        .validate_email(&request.email)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let mut ctx = client_context(&state, jar);
    ctx.session_id();
    ctx.unlock(&email);

    let entry = state.profiles.get_or_create(&email).await;
    tracing::info!(has_profile = entry.profile.is_some(), "Access unlocked");

    let response = AccessResponse {
        access: AccessMode::Full,
        email: Some(email),
        subscribed: true,
        can_create: true,
        profile: entry.profile,
        notice: Some(entry.notice),
    };
    Ok((ctx.into_jar(), Json(response)))
}

/// Forget the email; the session token is kept.
async fn leave(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
) -> (CookieJar, Json<AccessResponse>) {
    let mut ctx = client_context(&state, jar);
    ctx.lock();

    let response = AccessResponse {
        access: AccessMode::Trial,
        email: None,
        subscribed: false,
        can_create: false,
        profile: None,
        notice: None,
    };
    (ctx.into_jar(), Json(response))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SubscribeResponse {
    pub email: String,
    pub notice: Notice,
}

/// Newsletter signup. Open to any address; the access domain does not
/// apply. Duplicate emails get `409 conflict`.
async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EmailRequest>,
) -> Result<(StatusCode, Json<SubscribeResponse>)> {
    let email = validate_email_format(&request.email)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    match state.db.insert_subscriber(&email).await {
        Ok(subscriber) => {
            tracing::info!(subscriber_id = %subscriber.id, "Subscriber saved");
            Ok((
                StatusCode::CREATED,
                Json(SubscribeResponse {
                    email: subscriber.email,
                    notice: Notice::info("Subscribed", "You're on the list!"),
                }),
            ))
        }
        Err(AppError::Conflict(_)) => Err(AppError::Conflict(
            "This email is already subscribed".to_string(),
        )),
        Err(e) => Err(e),
    }
}
