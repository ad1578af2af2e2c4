// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lazily created user profiles and the profile dashboard.

use crate::db::SupabaseDb;
use crate::models::{NewProfile, Notice, Prompt, UserProfile};
use crate::time_utils::format_utc_rfc3339;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const DISPLAY_NAME_LEN: usize = 15;

/// Profile returned by the access gate along with the welcome notice.
#[derive(Debug, Clone)]
pub struct ProfileEntry {
    pub profile: Option<UserProfile>,
    pub notice: Notice,
}

/// A user's own prompts with summed engagement.
#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Dashboard {
    pub profile: Option<UserProfile>,
    pub prompts: Vec<Prompt>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_likes: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_views: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_copies: u64,
}

impl Dashboard {
    pub fn from_prompts(profile: Option<UserProfile>, prompts: Vec<Prompt>) -> Self {
        Self {
            total_likes: prompts.iter().map(|p| p.likes).sum(),
            total_views: prompts.iter().map(|p| p.views).sum(),
            total_copies: prompts.iter().map(|p| p.copies).sum(),
            profile,
            prompts,
        }
    }
}

#[derive(Clone)]
pub struct ProfileService {
    db: SupabaseDb,
}

impl ProfileService {
    pub fn new(db: SupabaseDb) -> Self {
        Self { db }
    }

    /// Find the profile for `email`, bumping `last_login`, or create it.
    ///
    /// Backend failures are logged and yield no profile; access is granted
    /// regardless.
    pub async fn get_or_create(&self, email: &str) -> ProfileEntry {
        let existing = match self.db.get_profile_by_email(email).await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!(error = %e, "Failed to look up profile");
                return ProfileEntry {
                    profile: None,
                    notice: welcome_notice(email),
                };
            }
        };

        if let Some(existing) = existing {
            let now = format_utc_rfc3339(chrono::Utc::now());
            let profile = match self.db.touch_last_login(&existing.id, &now).await {
                Ok(Some(updated)) => updated,
                Ok(None) => existing,
                Err(e) => {
                    tracing::warn!(profile_id = %existing.id, error = %e, "Failed to update last login");
                    existing
                }
            };

            return ProfileEntry {
                profile: Some(profile),
                notice: Notice::info(
                    ">>> WELCOME_BACK",
                    format!("Access granted to {}. All prompts unlocked.", email),
                ),
            };
        }

        let new_profile = NewProfile {
            email: email.to_string(),
            display_name: display_name_for(email),
            subscription_status: true,
        };

        match self.db.create_profile(&new_profile).await {
            Ok(created) => ProfileEntry {
                profile: Some(created),
                notice: Notice::info(
                    ">>> WELCOME_TO_SYSTEM",
                    format!("Profile created for {}. Full access granted.", email),
                ),
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to create profile");
                ProfileEntry {
                    profile: None,
                    notice: welcome_notice(email),
                }
            }
        }
    }

    /// Profile id for attributing new prompts, best effort.
    pub async fn profile_id(&self, email: &str) -> Option<String> {
        match self.db.get_profile_by_email(email).await {
            Ok(profile) => profile.map(|p| p.id),
            Err(e) => {
                tracing::warn!(error = %e, "Profile lookup failed; prompt will not be linked");
                None
            }
        }
    }

    /// Dashboard for `email`. A failed prompt fetch degrades to an empty list.
    pub async fn dashboard(&self, email: &str) -> Dashboard {
        let profile = self.db.get_profile_by_email(email).await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load profile for dashboard");
            None
        });

        let prompts = self
            .db
            .list_prompt_stats_for_email(email)
            .await
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Failed to load user prompts");
                Vec::new()
            });

        Dashboard::from_prompts(profile, prompts)
    }
}

/// First characters of the email's local part.
pub fn display_name_for(email: &str) -> String {
    email
        .split('@')
        .next()
        .unwrap_or_default()
        .chars()
        .take(DISPLAY_NAME_LEN)
        .collect()
}

fn welcome_notice(email: &str) -> Notice {
    Notice::info(
        "Welcome to PromptHub!",
        format!("Access granted to {}. You now have full access to all prompts!", email),
    )
}
