//! Database layer (Supabase PostgREST).

pub mod supabase;

pub use supabase::SupabaseDb;

/// Table, view and function names as constants.
pub mod tables {
    pub const PROMPTS: &str = "prompts";
    /// Prompts joined with their interaction aggregates
    pub const PROMPT_STATS: &str = "prompt_stats";
    pub const USER_PROFILES: &str = "user_profiles";
    pub const SUBSCRIBERS: &str = "subscribers";
    pub const YOUTUBE_VIDEOS: &str = "youtube_videos";
    /// RPC that records an interaction and bumps the counters
    pub const INCREMENT_INTERACTION: &str = "increment_interaction";
}
