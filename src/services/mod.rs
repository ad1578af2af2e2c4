// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod draft;
pub mod filter;
pub mod gate;
pub mod interactions;
pub mod ledger;
pub mod profile;
pub mod session;

pub use catalog::PromptCatalog;
pub use draft::{DraftError, PromptDraft};
pub use filter::filter_prompts;
pub use gate::{AccessGate, AccessMode, GatedList};
pub use interactions::{InteractionOutcome, InteractionService};
pub use profile::{Dashboard, ProfileService};
pub use session::{ClientContext, ClientStore, CookieStore, MemoryStore};
