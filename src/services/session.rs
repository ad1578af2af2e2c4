// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client-local state: session token, unlocked email and subscribed flag.
//!
//! Everything here lives on the client (cookies over HTTP). None of it is an
//! authentication credential: the session token only attributes anonymous
//! interactions, and the unlocked email only lifts the trial limit.

use crate::services::gate::AccessMode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::collections::HashMap;
use uuid::Uuid;

/// Storage keys (cookie names over HTTP).
pub mod keys {
    pub const SESSION: &str = "prompthub_session";
    pub const EMAIL: &str = "prompthub_email";
    pub const SUBSCRIBED: &str = "prompthub_subscribed";
}

/// How long persisted client state lives in the browser.
const CLIENT_STATE_MAX_AGE_DAYS: i64 = 365;

/// Key-value storage owned by the client.
pub trait ClientStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-process store, used by tests and tooling.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every key, as if the user cleared site data.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl ClientStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// Cookie-backed store. Writes accumulate in the jar, which the handler
/// returns so the changes reach the browser as `Set-Cookie` headers.
#[derive(Debug, Clone)]
pub struct CookieStore {
    jar: CookieJar,
    secure: bool,
}

impl CookieStore {
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self { jar, secure }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl ClientStore for CookieStore {
    fn get(&self, key: &str) -> Option<String> {
        self.jar.get(key).map(|cookie| {
            urlencoding::decode(cookie.value())
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| cookie.value().to_string())
        })
    }

    fn set(&mut self, key: &str, value: &str) {
        let cookie = Cookie::build((key.to_string(), urlencoding::encode(value).into_owned()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .max_age(time::Duration::days(CLIENT_STATE_MAX_AGE_DAYS));

        self.jar = self.jar.clone().add(cookie);
    }

    fn remove(&mut self, key: &str) {
        self.jar = self
            .jar
            .clone()
            .remove(Cookie::build((key.to_string(), "")).path("/"));
    }
}

/// Return the persisted session token, generating and storing one on first use.
pub fn get_session_id<S: ClientStore + ?Sized>(store: &mut S) -> String {
    if let Some(existing) = store.get(keys::SESSION).filter(|v| !v.trim().is_empty()) {
        return existing;
    }

    let session_id = Uuid::new_v4().to_string();
    store.set(keys::SESSION, &session_id);
    tracing::debug!(session = %session_id, "Generated new client session");
    session_id
}

/// Explicit view of the client's persisted state, passed to handlers.
#[derive(Debug, Clone)]
pub struct ClientContext<S> {
    store: S,
}

impl<S: ClientStore> ClientContext<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stable session token, created on first call.
    pub fn session_id(&mut self) -> String {
        get_session_id(&mut self.store)
    }

    /// Email that unlocked this session, if any.
    pub fn email(&self) -> Option<String> {
        self.store
            .get(keys::EMAIL)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub fn is_subscribed(&self) -> bool {
        self.store.get(keys::SUBSCRIBED).as_deref() == Some("true")
    }

    /// Remember an accepted email and lift the trial limit.
    pub fn unlock(&mut self, email: &str) {
        self.store.set(keys::EMAIL, email);
        self.store.set(keys::SUBSCRIBED, "true");
    }

    /// Forget the email. The session token stays.
    pub fn lock(&mut self) {
        self.store.remove(keys::EMAIL);
        self.store.remove(keys::SUBSCRIBED);
    }

    pub fn access_mode(&self) -> AccessMode {
        if self.email().is_some() {
            AccessMode::Full
        } else {
            AccessMode::Trial
        }
    }
}

impl ClientContext<CookieStore> {
    /// Build a context over the request's cookies.
    pub fn from_cookies(jar: CookieJar, secure: bool) -> Self {
        Self::new(CookieStore::new(jar, secure))
    }

    /// Cookie jar carrying every change made through this context.
    pub fn into_jar(self) -> CookieJar {
        self.store.into_jar()
    }
}
