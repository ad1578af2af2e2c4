//! User profile and newsletter subscriber models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Profile stored in `user_profiles`, keyed by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub subscription_status: bool,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// When the user first unlocked access (ISO 8601)
    #[serde(default)]
    pub subscribed_at: Option<String>,
    /// Last time the user passed the access gate (ISO 8601)
    #[serde(default)]
    pub last_login: Option<String>,
}

/// Insert payload for `user_profiles`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProfile {
    pub email: String,
    pub display_name: String,
    pub subscription_status: bool,
}

/// Row in `subscribers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub subscribed_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Insert payload for `subscribers`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSubscriber {
    pub email: String,
}
