// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Prompt creation form state and validation.

use crate::models::{category, NewPrompt};
use serde::Deserialize;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Characters of the email local part used as a fallback author name.
const AUTHOR_FROM_EMAIL_LEN: usize = 15;
const ANONYMOUS: &str = "Anonymous";

/// A prompt being composed. Fields are free-form until [`PromptDraft::validate`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(default)]
pub struct PromptDraft {
    #[validate(length(max = 200))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: String,
    #[validate(length(max = 20000))]
    pub content: String,
    pub category: String,
    #[validate(length(max = 100))]
    pub author: Option<String>,
    #[validate(length(max = 20))]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Fields too long: {}", .0.join(", "))]
    TooLong(Vec<String>),
}

impl PromptDraft {
    /// Add a tag. Blank and duplicate tags are ignored; returns whether it was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Check the draft and produce the insert payload.
    ///
    /// `email` is the unlocked session email, used for attribution and as the
    /// author fallback. `profile_id` is left for the caller to attach.
    pub fn validate(&self, email: Option<&str>) -> Result<NewPrompt, DraftError> {
        let missing: Vec<&'static str> = [
            ("title", &self.title),
            ("description", &self.description),
            ("content", &self.content),
            ("category", &self.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if !missing.is_empty() {
            return Err(DraftError::MissingFields(missing));
        }

        let category = self.category.trim();
        if !category::is_assignable(category) {
            return Err(DraftError::UnknownCategory(category.to_string()));
        }

        if let Err(errors) = Validate::validate(self) {
            let mut fields: Vec<String> = errors
                .field_errors()
                .keys()
                .map(|k| k.to_string())
                .collect();
            fields.sort();
            return Err(DraftError::TooLong(fields));
        }

        let mut tags = PromptDraft::default();
        for tag in &self.tags {
            tags.add_tag(tag);
        }

        Ok(NewPrompt {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            content: self.content.trim().to_string(),
            category: category.to_string(),
            tags: tags.tags,
            author: derive_author(self.author.as_deref(), email),
            user_email: email.map(str::to_string),
            profile_id: None,
        })
    }
}

/// Given author, else the start of the email's local part, else "Anonymous".
pub fn derive_author(author: Option<&str>, email: Option<&str>) -> String {
    if let Some(author) = author.map(str::trim).filter(|a| !a.is_empty()) {
        return author.to_string();
    }

    email
        .and_then(|e| e.split('@').next())
        .map(str::trim)
        .filter(|local| !local.is_empty())
        .map(|local| local.chars().take(AUTHOR_FROM_EMAIL_LEN).collect())
        .unwrap_or_else(|| ANONYMOUS.to_string())
}
