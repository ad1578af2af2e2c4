// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Supabase PostgREST client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Prompts (stats listing, count, insert)
//! - Interactions (the `increment_interaction` RPC)
//! - User profiles (lookup, lazy creation, last-login updates)
//! - Subscribers and the featured video

use crate::db::tables;
use crate::error::AppError;
use crate::models::{
    FeaturedVideo, InteractionEvent, NewProfile, NewPrompt, NewSubscriber, Prompt, Subscriber,
    UserProfile,
};
use reqwest::{header, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const PREFER_REPRESENTATION: &str = "return=representation";
const PREFER_COUNT_EXACT: &str = "count=exact";

/// Supabase database client.
#[derive(Clone)]
pub struct SupabaseDb {
    client: Option<RestClient>,
}

#[derive(Clone)]
struct RestClient {
    http: reqwest::Client,
    /// `{project_url}/rest/v1`
    rest_url: String,
    api_key: String,
}

/// Error body returned by PostgREST.
#[derive(Debug, Default, Deserialize)]
struct ApiErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl SupabaseDb {
    /// Create a new client for a Supabase project.
    pub fn new(project_url: &str, api_key: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("prompthub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| anyhow::Error::new(e).context("Failed to build HTTP client"))?;

        let rest_url = format!("{}/rest/v1", project_url.trim_end_matches('/'));
        tracing::info!(url = %rest_url, "Configured Supabase REST client");

        Ok(Self {
            client: Some(RestClient {
                http,
                rest_url,
                api_key: api_key.to_string(),
            }),
        })
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&RestClient, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Backend("Database not connected (offline mode)".to_string()))
    }

    // ─── Prompt Operations ───────────────────────────────────────

    /// List all prompts with aggregated stats, newest first.
    pub async fn list_prompt_stats(&self) -> Result<Vec<Prompt>, AppError> {
        let client = self.get_client()?;
        let request = client
            .request(Method::GET, tables::PROMPT_STATS)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        client.fetch_json(request).await
    }

    /// List prompts submitted under an email, newest first.
    pub async fn list_prompt_stats_for_email(&self, email: &str) -> Result<Vec<Prompt>, AppError> {
        let client = self.get_client()?;
        let request = client.request(Method::GET, tables::PROMPT_STATS).query(&[
            ("select", "*".to_string()),
            ("user_email", format!("eq.{}", email)),
            ("order", "created_at.desc".to_string()),
        ]);
        client.fetch_json(request).await
    }

    /// Exact number of rows in `prompts`.
    pub async fn count_prompts(&self) -> Result<u64, AppError> {
        let client = self.get_client()?;
        let request = client
            .request(Method::HEAD, tables::PROMPTS)
            .query(&[("select", "*")])
            .header("Prefer", PREFER_COUNT_EXACT);

        let response = client.send(request).await?;
        let content_range = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Backend("Count response without Content-Range".to_string()))?;

        parse_content_range_total(content_range).ok_or_else(|| {
            AppError::Backend(format!("Unparseable Content-Range: {}", content_range))
        })
    }

    /// Insert a prompt and return the stored row.
    pub async fn insert_prompt(&self, prompt: &NewPrompt) -> Result<Prompt, AppError> {
        let client = self.get_client()?;
        let created: Prompt = client.insert_one(tables::PROMPTS, prompt).await?;

        tracing::info!(
            prompt_id = %created.id,
            category = %created.category,
            "Prompt created"
        );
        Ok(created)
    }

    // ─── Interaction Operations ──────────────────────────────────

    /// Call the `increment_interaction` RPC.
    pub async fn increment_interaction(&self, event: &InteractionEvent) -> Result<(), AppError> {
        let client = self.get_client()?;
        let request = client
            .request(
                Method::POST,
                &format!("rpc/{}", tables::INCREMENT_INTERACTION),
            )
            .json(event);

        client.send(request).await?;
        tracing::debug!(
            prompt_id = %event.prompt_id,
            interaction = %event.interaction_type,
            "Interaction recorded"
        );
        Ok(())
    }

    // ─── Profile Operations ──────────────────────────────────────

    /// Get a profile by email.
    pub async fn get_profile_by_email(&self, email: &str) -> Result<Option<UserProfile>, AppError> {
        let client = self.get_client()?;
        let request = client.request(Method::GET, tables::USER_PROFILES).query(&[
            ("select", "*".to_string()),
            ("email", format!("eq.{}", email)),
            ("limit", "1".to_string()),
        ]);
        let rows: Vec<UserProfile> = client.fetch_json(request).await?;
        Ok(rows.into_iter().next())
    }

    /// Create a profile and return the stored row.
    pub async fn create_profile(&self, profile: &NewProfile) -> Result<UserProfile, AppError> {
        let client = self.get_client()?;
        let created: UserProfile = client.insert_one(tables::USER_PROFILES, profile).await?;
        tracing::info!(profile_id = %created.id, "Profile created");
        Ok(created)
    }

    /// Set `last_login` on a profile and return the updated row.
    pub async fn touch_last_login(
        &self,
        profile_id: &str,
        last_login: &str,
    ) -> Result<Option<UserProfile>, AppError> {
        #[derive(Serialize)]
        struct LastLogin<'a> {
            last_login: &'a str,
        }

        let client = self.get_client()?;
        let request = client
            .request(Method::PATCH, tables::USER_PROFILES)
            .query(&[("id", format!("eq.{}", profile_id))])
            .header("Prefer", PREFER_REPRESENTATION)
            .json(&LastLogin { last_login });

        let rows: Vec<UserProfile> = client.fetch_json(request).await?;
        Ok(rows.into_iter().next())
    }

    // ─── Subscriber Operations ───────────────────────────────────

    /// Add a newsletter subscriber.
    ///
    /// Returns [`AppError::Conflict`] when the email is already subscribed.
    pub async fn insert_subscriber(&self, email: &str) -> Result<Subscriber, AppError> {
        let client = self.get_client()?;
        let subscriber = NewSubscriber {
            email: email.to_string(),
        };
        client.insert_one(tables::SUBSCRIBERS, &subscriber).await
    }

    // ─── Video Operations ────────────────────────────────────────

    /// Newest active featured video, if any.
    pub async fn get_active_video(&self) -> Result<Option<FeaturedVideo>, AppError> {
        let client = self.get_client()?;
        let request = client.request(Method::GET, tables::YOUTUBE_VIDEOS).query(&[
            ("select", "*"),
            ("is_active", "eq.true"),
            ("order", "created_at.desc"),
            ("limit", "1"),
        ]);
        let rows: Vec<FeaturedVideo> = client.fetch_json(request).await?;
        Ok(rows.into_iter().next())
    }
}

impl RestClient {
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.rest_url, path))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Backend(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, &body))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, AppError> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Backend(format!("Failed to decode response: {}", e)))
    }

    /// Insert a single row and return its stored representation.
    async fn insert_one<B, T>(&self, table: &str, row: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(Method::POST, table)
            .header("Prefer", PREFER_REPRESENTATION)
            .json(&[row]);

        let rows: Vec<T> = self.fetch_json(request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Backend(format!("Insert into {} returned no rows", table)))
    }
}

/// Map a non-success PostgREST response to an application error.
fn api_error(status: reqwest::StatusCode, body: &str) -> AppError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();

    if parsed.code.as_deref() == Some(AppError::UNIQUE_VIOLATION) {
        return AppError::Conflict(
            parsed
                .details
                .or(parsed.message)
                .unwrap_or_else(|| "duplicate key".to_string()),
        );
    }

    let mut parts = Vec::new();
    if let Some(code) = &parsed.code {
        parts.push(format!("code {}", code));
    }
    if let Some(message) = &parsed.message {
        parts.push(message.clone());
    }
    if let Some(hint) = &parsed.hint {
        parts.push(format!("hint: {}", hint));
    }
    if parts.is_empty() && !body.is_empty() {
        parts.push(body.chars().take(200).collect());
    }

    AppError::Backend(format!("{} {}", status, parts.join(", ")))
}

/// Total from a `Content-Range` header such as `0-24/573` or `*/0`.
fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}
