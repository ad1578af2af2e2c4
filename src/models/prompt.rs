//! Prompt records as read from `prompt_stats` and written to `prompts`.

use super::null_as_default;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A prompt with its aggregated engagement counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Prompt {
    /// Server-assigned UUID
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// The text a user copies
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Category id (never `"all"`)
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub views: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub copies: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub user_display_name: Option<String>,
}

impl Prompt {
    /// Case-insensitive substring match against title, description and tags.
    ///
    /// `needle` must already be lowercased.
    pub fn matches_query(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
    }
}

/// Insert payload for the `prompts` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPrompt {
    pub title: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub user_email: Option<String>,
    pub profile_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_nullable_stats_row() {
        let row = json!({
            "id": "5b0c",
            "title": "Code Review Expert",
            "description": null,
            "content": "Act as a senior engineer",
            "category": "coding",
            "tags": null,
            "author": "Alex",
            "likes": 3,
            "views": null,
            "copies": 1,
            "created_at": "2025-03-01T10:00:00+00:00",
            "updated_at": null,
            "user_email": null,
            "profile_id": null,
            "user_display_name": null
        });

        let prompt: Prompt = serde_json::from_value(row).unwrap();
        assert_eq!(prompt.description, "");
        assert!(prompt.tags.is_empty());
        assert_eq!(prompt.likes, 3);
        assert_eq!(prompt.views, 0);
        assert_eq!(prompt.copies, 1);
    }

    #[test]
    fn test_matches_query_checks_tags() {
        let prompt: Prompt = serde_json::from_value(json!({
            "id": "1",
            "title": "Marketing Copy",
            "description": "Persuasive content",
            "tags": ["Sales", "conversion"]
        }))
        .unwrap();

        assert!(prompt.matches_query("sales"));
        assert!(prompt.matches_query("persuasive"));
        assert!(!prompt.matches_query("zzz"));
    }
}
