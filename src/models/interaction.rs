// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interaction events sent to the `increment_interaction` RPC.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of engagement being counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    View,
    Like,
    Copy,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::View => "view",
            InteractionType::Like => "like",
            InteractionType::Copy => "copy",
        }
    }
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write-only event attributed to an anonymous session.
///
/// Serializes to the RPC's parameter names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InteractionEvent {
    #[serde(rename = "prompt_id_param")]
    pub prompt_id: String,
    #[serde(rename = "interaction_type_param")]
    pub interaction_type: InteractionType,
    #[serde(rename = "user_session_param")]
    pub user_session: String,
}
