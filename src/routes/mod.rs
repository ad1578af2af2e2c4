// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod access;
pub mod pages;
pub mod profile;
pub mod prompts;

use crate::error::AppError;
use crate::services::{ClientContext, CookieStore};
use crate::AppState;
use axum::extract::OriginalUri;
use axum::http::{header, Method};
use axum::response::IntoResponse;
use axum::{middleware, routing::get, Json, Router};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HealthResponse {
    pub status: String,
    pub build_id: String,
}

/// Health check response
async fn health_check() -> Json<HealthResponse> {
    let build_id = option_env!("BUILD_ID").unwrap_or("unknown").to_string();
    Json(HealthResponse {
        status: "ok".to_string(),
        build_id,
    })
}

/// Unknown paths get a JSON 404.
async fn not_found(OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    tracing::warn!(path = %uri.path(), "Request for non-existent route");
    AppError::NotFound(uri.path().to_string())
}

/// Client-local state for this request, backed by its cookies.
pub(crate) fn client_context(state: &AppState, jar: CookieJar) -> ClientContext<CookieStore> {
    ClientContext::from_cookies(jar, state.config.secure_cookies())
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS layer - allow requests from frontend URL and localhost (for dev)
    let frontend_url = state.config.frontend_url.clone();
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::AllowOrigin::predicate(
            move |origin: &axum::http::HeaderValue, _request_parts: &axum::http::request::Parts| {
                let origin_str = origin.to_str().unwrap_or("");
                origin_str == frontend_url
                    || origin_str.starts_with("http://localhost")
                    || origin_str.starts_with("http://127.0.0.1")
            },
        ))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health_check))
        .merge(pages::routes())
        .merge(prompts::routes())
        .merge(access::routes())
        .merge(profile::routes())
        .fallback(not_found)
        .layer(middleware::from_fn(
            crate::middleware::security::add_security_headers,
        ))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
