// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod category;
pub mod interaction;
pub mod notice;
pub mod profile;
pub mod prompt;
pub mod video;

pub use category::Category;
pub use interaction::{InteractionEvent, InteractionType};
pub use notice::Notice;
pub use profile::{NewProfile, NewSubscriber, Subscriber, UserProfile};
pub use prompt::{NewPrompt, Prompt};
pub use video::FeaturedVideo;

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable column into the type's default value.
///
/// The `prompt_stats` view exposes every column as nullable.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
