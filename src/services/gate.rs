// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Trial limiting and the email access gate.
//!
//! This is a UX gate, not a security boundary: the email is only checked for
//! shape (and optionally a domain suffix) and lives in a client cookie.

use crate::config::Config;
use crate::models::Prompt;
use serde::Serialize;
use validator::ValidateEmail;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Whether a session sees the trial slice or the full list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    Trial,
    Full,
}

impl AccessMode {
    /// Prompt creation is only offered once access is unlocked.
    pub fn can_create(&self) -> bool {
        matches!(self, AccessMode::Full)
    }
}

/// Why an email was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailRejection {
    #[error("Please enter your email address")]
    Empty,

    #[error("Please enter a valid email address")]
    Malformed,

    #[error("Only {0} addresses can unlock access")]
    WrongDomain(String),
}

/// Filtered list after applying the access mode.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GatedList {
    pub prompts: Vec<Prompt>,
    /// Number of prompts that matched before limiting
    pub total_matching: usize,
    pub shown: usize,
    /// True when matches were held back by the trial limit
    pub locked: bool,
}

/// Shape-only email check, used where the access domain does not apply.
pub fn validate_email_format(raw: &str) -> Result<String, EmailRejection> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(EmailRejection::Empty);
    }
    if !email.validate_email() {
        return Err(EmailRejection::Malformed);
    }
    Ok(email.to_string())
}

#[derive(Debug, Clone)]
pub struct AccessGate {
    trial_limit: usize,
    email_domain: Option<String>,
}

impl AccessGate {
    /// `email_domain` may be given as `acme.com` or `@acme.com`; matching is
    /// always against the whole part after the `@`.
    pub fn new(trial_limit: usize, email_domain: Option<String>) -> Self {
        let email_domain = email_domain
            .map(|d| d.trim().trim_start_matches('@').to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .map(|d| format!("@{}", d));

        Self {
            trial_limit,
            email_domain,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.trial_limit, config.access_email_domain.clone())
    }

    pub fn trial_limit(&self) -> usize {
        self.trial_limit
    }

    /// Check an email for unlocking access: shape plus the configured domain.
    /// Returns the trimmed address on success.
    pub fn validate_email(&self, raw: &str) -> Result<String, EmailRejection> {
        let email = validate_email_format(raw)?;
        if let Some(domain) = &self.email_domain {
            if !email.to_ascii_lowercase().ends_with(domain.as_str()) {
                return Err(EmailRejection::WrongDomain(domain.clone()));
            }
        }
        Ok(email)
    }

    /// Cut a filtered list down to what `mode` may see.
    pub fn apply(&self, mut prompts: Vec<Prompt>, mode: AccessMode) -> GatedList {
        let total_matching = prompts.len();
        if mode == AccessMode::Trial {
            prompts.truncate(self.trial_limit);
        }
        let shown = prompts.len();

        GatedList {
            prompts,
            total_matching,
            shown,
            locked: shown < total_matching,
        }
    }
}
