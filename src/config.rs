// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use serde::Serialize;
use std::env;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Number of prompt cards a locked session may see.
pub const DEFAULT_TRIAL_LIMIT: usize = 8;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Supabase project URL (e.g. `https://xyz.supabase.co`)
    pub supabase_url: String,
    /// Supabase anon key, sent as `apikey` and bearer token
    pub supabase_anon_key: String,
    /// Frontend URL (CORS origin, cookie `Secure` flag)
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Cards shown to a session that has not unlocked access
    pub trial_limit: usize,
    /// Restrict unlocking to addresses ending with this suffix (e.g. `@acme.com`)
    pub access_email_domain: Option<String>,
    /// How long the prompt list and count stay cached
    pub prompt_cache_ttl_secs: u64,
    /// Visual theme reported to the renderer
    pub theme: Theme,
}

/// Visual theme. Every page uses the same data; only styling differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Terminal,
    Light,
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terminal" => Ok(Theme::Terminal),
            "light" => Ok(Theme::Light),
            _ => Err(ConfigError::Invalid("THEME", s.to_string())),
        }
    }
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test_anon_key".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            trial_limit: DEFAULT_TRIAL_LIMIT,
            access_email_domain: None,
            prompt_cache_ttl_secs: 60,
            theme: Theme::Terminal,
        }
    }
}

impl Config {
    /// Config for tests. Points the backend at a local address that is never dialed
    /// unless a test overrides `supabase_url`.
    pub fn test_default() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let supabase_url = env::var("SUPABASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .map_err(|_| ConfigError::Missing("SUPABASE_URL"))?;

        let theme = match env::var("THEME") {
            Ok(raw) => raw.parse()?,
            Err(_) => Theme::Terminal,
        };

        Ok(Self {
            supabase_url,
            supabase_anon_key: env::var("SUPABASE_ANON_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: parse_or("PORT", 8080)?,
            trial_limit: parse_or("TRIAL_LIMIT", DEFAULT_TRIAL_LIMIT)?,
            access_email_domain: env::var("ACCESS_EMAIL_DOMAIN")
                .ok()
                .map(|v| v.trim().to_ascii_lowercase())
                .filter(|v| !v.is_empty()),
            prompt_cache_ttl_secs: parse_or("PROMPT_CACHE_TTL_SECS", 60)?,
            theme,
        })
    }

    /// Whether cookies should carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

fn parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
