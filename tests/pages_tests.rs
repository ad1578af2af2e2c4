// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Landing, video, categories, health and profile routes.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let (app, _state) = common::create_test_app();
    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_categories() {
    let (app, _state) = common::create_test_app();
    let response = app.oneshot(get("/api/categories")).await.unwrap();

    let body = common::body_json(response).await;
    let categories = body.as_array().unwrap();
    assert_eq!(categories.len(), 36);
    assert_eq!(categories[0]["id"], "all");
    assert!(categories.iter().any(|c| c["id"] == "ai-tools"));
}

#[tokio::test]
async fn test_landing_degrades_when_backend_is_down() {
    let (app, _state) = common::create_test_app();
    let response = app.oneshot(get("/api/landing")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(common::cookie_value(&response, "prompthub_session").is_some());

    let body = common::body_json(response).await;
    assert_eq!(body["theme"], "terminal");
    assert_eq!(body["total_prompts"], Value::Null);
    assert_eq!(body["video"], Value::Null);
    assert_eq!(body["trial_limit"], 8);
    assert_eq!(body["unlocked"], false);
}

#[tokio::test]
async fn test_landing_with_count_and_video() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/rest/v1/prompts"))
        .respond_with(ResponseTemplate::new(200).insert_header("Content-Range", "0-9/42"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/youtube_videos"))
        .and(query_param("is_active", "eq.true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "v1",
            "title": "Getting started",
            "url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "description": null,
            "is_active": true,
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }])))
        .mount(&server)
        .await;
    let (app, _state) = common::create_mock_app(&server);

    let response = app.clone().oneshot(get("/api/landing")).await.unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["total_prompts"], 42);
    assert_eq!(body["video"]["embed_id"], "dQw4w9WgXcQ");
    assert_eq!(body["video"]["video"]["title"], "Getting started");

    let response = app.oneshot(get("/api/video")).await.unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["embed_id"], "dQw4w9WgXcQ");
}

#[tokio::test]
async fn test_no_active_video_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/youtube_videos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let (app, _state) = common::create_mock_app(&server);

    let response = app.oneshot(get("/api/video")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await, Value::Null);
}

#[tokio::test]
async fn test_profile_requires_unlocked_session() {
    let (app, _state) = common::create_test_app();
    let response = app.oneshot(get("/api/profile")).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_dashboard_totals() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/user_profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "prof-1",
            "email": "ada@example.com",
            "subscription_status": true,
            "display_name": "ada"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/prompt_stats"))
        .and(query_param("user_email", "eq.ada@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            common::prompt_row("1", "First", "coding", &[]),
            common::prompt_row("2", "Second", "writing", &[]),
        ])))
        .mount(&server)
        .await;
    let (app, _state) = common::create_mock_app(&server);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profile")
                .header(header::COOKIE, common::unlocked_cookie("s1", "ada@example.com"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(body["profile"]["display_name"], "ada");
    assert_eq!(body["prompts"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_likes"], 2);
    assert_eq!(body["total_views"], 4);
    assert_eq!(body["total_copies"], 6);
}

#[tokio::test]
async fn test_profile_degrades_to_empty_list() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profile")
                .header(header::COOKIE, common::unlocked_cookie("s1", "ada@example.com"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["prompts"], json!([]));
    assert_eq!(body["profile"], Value::Null);
}
