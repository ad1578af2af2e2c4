// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Response};
use prompthub::config::Config;
use prompthub::db::SupabaseDb;
use prompthub::routes::create_router;
use prompthub::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> SupabaseDb {
    SupabaseDb::new_mock()
}

/// Create a test app with an offline backend.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_default(), test_db_offline()));
    (create_router(state.clone()), state)
}

/// Create a test app whose backend is a wiremock server.
#[allow(dead_code)]
pub fn create_mock_app(server: &MockServer) -> (axum::Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.supabase_url = server.uri();

    let db = SupabaseDb::new(&config.supabase_url, &config.supabase_anon_key)
        .expect("Failed to create Supabase client");
    let state = Arc::new(AppState::new(config, db));
    (create_router(state.clone()), state)
}

/// A `prompt_stats` row.
#[allow(dead_code)]
pub fn prompt_row(id: &str, title: &str, category: &str, tags: &[&str]) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("Description of {}", title),
        "content": format!("Content of {}", title),
        "category": category,
        "tags": tags,
        "author": "Tester",
        "likes": 1,
        "views": 2,
        "copies": 3,
        "created_at": "2025-03-01T10:00:00+00:00",
        "updated_at": "2025-03-01T10:00:00+00:00",
        "user_email": null,
        "profile_id": null,
        "user_display_name": null
    })
}

/// `n` coding prompts with ids `p0..p{n-1}`.
#[allow(dead_code)]
pub fn prompt_rows(n: usize) -> Value {
    Value::Array(
        (0..n)
            .map(|i| prompt_row(&format!("p{}", i), &format!("Prompt {}", i), "coding", &[]))
            .collect(),
    )
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// `Set-Cookie` headers of a response.
#[allow(dead_code)]
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// Value of the `name` cookie set by a response, if any.
#[allow(dead_code)]
pub fn cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    set_cookies(response).into_iter().find_map(|c| {
        c.strip_prefix(&prefix)
            .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
    })
}

/// `Cookie` header value for an unlocked session.
#[allow(dead_code)]
pub fn unlocked_cookie(session: &str, email: &str) -> String {
    format!(
        "prompthub_session={}; prompthub_email={}; prompthub_subscribed=true",
        session,
        urlencoding::encode(email)
    )
}

/// Wait until the mock server has seen at least `n` requests to `path`.
/// Returns the number seen.
#[allow(dead_code)]
pub async fn wait_for_requests(server: &MockServer, path: &str, n: usize) -> usize {
    let mut seen = 0;
    for _ in 0..100 {
        seen = requests_to(server, path).await.len();
        if seen >= n {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    seen
}

/// Requests the mock server received for `path`.
#[allow(dead_code)]
pub async fn requests_to(server: &MockServer, path: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == path)
        .collect()
}
