// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static category taxonomy.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Sentinel category id meaning "no filter".
pub const ALL: &str = "all";

/// A prompt category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

const fn category(id: &'static str, name: &'static str, icon: &'static str) -> Category {
    Category { id, name, icon }
}

/// All categories in display order, starting with the `all` sentinel.
pub static CATEGORIES: &[Category] = &[
    category(ALL, "All Prompts", "🎯"),
    category("writing", "Writing", "✍️"),
    category("coding", "Coding", "💻"),
    category("marketing", "Marketing", "📈"),
    category("design", "Design", "🎨"),
    category("business", "Business", "💼"),
    category("education", "Education", "📚"),
    category("science", "Science & Innovation", "🧪"),
    category("finance", "Finance & Economy", "📊"),
    category("career", "Career & Jobs", "🎓"),
    category("lifestyle", "Lifestyle & Home", "🏠"),
    category("food", "Food & Recipes", "🍳"),
    category("pets", "Pets & Animals", "🐾"),
    category("entertainment", "Arts & Entertainment", "🎵"),
    category("history", "History & Culture", "🗺️"),
    category("apps", "Apps & Tools", "📱"),
    category("mindfulness", "Mindfulness & Spirituality", "🧘"),
    category("technology", "Technology & AI", "🌐"),
    category("games", "Games & Fun", "🎮"),
    category("psychology", "Psychology & Self-help", "🧠"),
    category("health", "Health & Fitness", "🩺"),
    category("graphics", "Image & Graphics", "🖼️"),
    category("video", "Video & Animation", "🎬"),
    category("audio", "Audio & Podcasting", "🎙️"),
    category("content", "Content Creation", "✨"),
    category("photography", "Photography", "📷"),
    category("videography", "Videography", "📹"),
    category("script", "Script & Storyboarding", "📄"),
    category("voice", "Voice & Dubbing", "🎭"),
    category("digital-art", "Digital Art", "🎨"),
    category("tools", "Creator Tools & Resources", "🧰"),
    category("ai-tools", "AI Tools for Creators", "🤖"),
    category("publishing", "Publishing & Distribution", "📤"),
    category("copywriting", "Copywriting for Creators", "📝"),
    category("analytics", "Analytics & Monetization", "📈"),
    category("targeting", "Niche Audience Targeting", "🎯"),
];

/// Look up a category by id.
pub fn find(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

/// Whether a prompt may be filed under `id`. The `all` sentinel is not assignable.
pub fn is_assignable(id: &str) -> bool {
    id != ALL && find(id).is_some()
}

/// Categories a new prompt can be filed under.
pub fn assignable() -> impl Iterator<Item = &'static Category> {
    CATEGORIES.iter().filter(|c| c.id != ALL)
}
