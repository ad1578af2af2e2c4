// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! PromptHub: browse, search, create and share AI prompts
//!
//! This crate provides the HTTP backend for the PromptHub front end. Prompt
//! storage and interaction counting live in Supabase; this service owns the
//! browser-side state (session token, unlocked email) as cookies, filters and
//! trial-limits listings, and dispatches interaction events.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SupabaseDb;
use services::{AccessGate, InteractionService, ProfileService, PromptCatalog};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SupabaseDb,
    pub gate: AccessGate,
    pub catalog: Arc<PromptCatalog>,
    pub interactions: Arc<InteractionService>,
    pub profiles: ProfileService,
}

impl AppState {
    /// Wire the services around a database client.
    pub fn new(config: Config, db: SupabaseDb) -> Self {
        let catalog = Arc::new(PromptCatalog::new(db.clone(), config.prompt_cache_ttl_secs));
        let interactions = Arc::new(InteractionService::new(db.clone(), catalog.clone()));

        Self {
            gate: AccessGate::from_config(&config),
            profiles: ProfileService::new(db.clone()),
            config,
            db,
            catalog,
            interactions,
        }
    }
}
