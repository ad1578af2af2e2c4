// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Featured tutorial video.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Length of a YouTube video id.
const VIDEO_ID_LEN: usize = 11;

/// Row in `youtube_videos`. The newest active row is featured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FeaturedVideo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl FeaturedVideo {
    /// Embed id of this video, if the URL is a recognizable YouTube link.
    pub fn video_id(&self) -> Option<String> {
        youtube_video_id(&self.url)
    }
}

/// Extract the 11-character video id from a YouTube URL.
///
/// Accepts `youtu.be/<id>`, `youtube.com/watch?v=<id>`, `youtube.com/embed/<id>`,
/// `youtube.com/v/<id>`, `youtube.com/e/<id>` and `youtube.com/<a>/<b>/<id>`.
pub fn youtube_video_id(url: &str) -> Option<String> {
    let candidate = if let Some(idx) = url.find("youtu.be/") {
        &url[idx + "youtu.be/".len()..]
    } else {
        let idx = url.find("youtube.com/")?;
        let rest = &url[idx + "youtube.com/".len()..];

        if let Some(after) = ["v/", "e/", "embed/"]
            .iter()
            .find_map(|prefix| rest.strip_prefix(prefix))
        {
            after
        } else if let Some(pos) = rest.rfind("?v=").or_else(|| rest.rfind("&v=")) {
            &rest[pos + 3..]
        } else {
            // `<segment>/<anything>/<id>`
            let first_slash = rest.find('/')?;
            let last_slash = rest.rfind('/')?;
            if last_slash <= first_slash + 1 {
                return None;
            }
            &rest[last_slash + 1..]
        }
    };

    let id: String = candidate
        .chars()
        .take_while(|c| !matches!(c, '"' | '&' | '?' | '/') && !c.is_whitespace())
        .take(VIDEO_ID_LEN)
        .collect();

    (id.chars().count() == VIDEO_ID_LEN).then_some(id)
}
