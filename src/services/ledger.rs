// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-session sets of prompt ids (liked, viewed), kept in memory.
//!
//! Sessions are anonymous and minted on demand, so the ledger is bounded:
//! a session idle for longer than the TTL is forgotten, and once the ledger
//! is full the least recently seen sessions are dropped to make room.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::collections::HashSet;

/// Default idle time after which a session's entries are forgotten.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Default cap on tracked sessions.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug)]
struct SessionEntry {
    ids: HashSet<String>,
    last_seen: DateTime<Utc>,
}

impl SessionEntry {
    fn expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_seen >= ttl
    }
}

#[derive(Debug)]
pub struct SessionLedger {
    sessions: DashMap<String, SessionEntry>,
    ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionLedger {
    fn default() -> Self {
        Self::new(
            Duration::hours(DEFAULT_SESSION_TTL_HOURS),
            DEFAULT_MAX_SESSIONS,
        )
    }
}

impl SessionLedger {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Record `id` for `session`. Returns false if it was already recorded.
    pub fn insert(&self, session: &str, id: &str) -> bool {
        let now = Utc::now();
        if !self.sessions.contains_key(session) && self.sessions.len() >= self.max_sessions {
            self.evict(now);
        }

        let mut entry = self
            .sessions
            .entry(session.to_string())
            .or_insert_with(|| SessionEntry {
                ids: HashSet::new(),
                last_seen: now,
            });
        if entry.expired(now, self.ttl) {
            entry.ids.clear();
        }
        entry.last_seen = now;
        entry.ids.insert(id.to_string())
    }

    pub fn contains(&self, session: &str, id: &str) -> bool {
        let now = Utc::now();
        self.sessions
            .get(session)
            .is_some_and(|e| !e.expired(now, self.ttl) && e.ids.contains(id))
    }

    /// Number of tracked sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drop expired sessions, then the oldest tenth if still full.
    fn evict(&self, now: DateTime<Utc>) {
        let ttl = self.ttl;
        self.sessions.retain(|_, e| !e.expired(now, ttl));
        if self.sessions.len() < self.max_sessions {
            return;
        }

        let mut by_age: Vec<(DateTime<Utc>, String)> = self
            .sessions
            .iter()
            .map(|e| (e.last_seen, e.key().clone()))
            .collect();
        by_age.sort_unstable();

        let excess = self.sessions.len() + 1 - self.max_sessions;
        let drop = excess.max(self.max_sessions / 10);
        for (_, key) in by_age.into_iter().take(drop) {
            self.sessions.remove(&key);
        }
        tracing::debug!(dropped = drop, "Session ledger full, dropped oldest sessions");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_reports_first_time_only() {
        let ledger = SessionLedger::default();
        assert!(ledger.insert("s1", "p1"));
        assert!(!ledger.insert("s1", "p1"));
        assert!(ledger.insert("s1", "p2"));
        assert!(ledger.insert("s2", "p1"));

        assert!(ledger.contains("s1", "p2"));
        assert!(!ledger.contains("s3", "p1"));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_session_count_never_exceeds_cap() {
        let ledger = SessionLedger::new(Duration::hours(1), 50);
        for i in 0..1_000 {
            ledger.insert(&format!("session-{}", i), "p1");
            assert!(ledger.len() <= 50);
        }

        // Most recent session survives eviction
        assert!(ledger.contains("session-999", "p1"));
        assert!(!ledger.contains("session-0", "p1"));
    }

    #[test]
    fn test_expired_session_is_forgotten() {
        let ledger = SessionLedger::new(Duration::zero(), 10);
        assert!(ledger.insert("s1", "p1"));
        assert!(!ledger.contains("s1", "p1"));
        // Recorded again as new once expired
        assert!(ledger.insert("s1", "p1"));
    }

    #[test]
    fn test_full_ledger_evicts_expired_first() {
        let ledger = SessionLedger::new(Duration::zero(), 2);
        ledger.insert("s1", "p1");
        ledger.insert("s2", "p1");
        ledger.insert("s3", "p1");
        assert_eq!(ledger.len(), 1);
        assert!(!ledger.is_empty());
    }
}
