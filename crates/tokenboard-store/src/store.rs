//! Storage collaborator contract
//!
//! The trait the upload service and CLI program against. Implementations own
//! all persistence concerns, including any concurrency control over
//! per-user writes; the ingestion engine stays stateless.

use crate::records::{
    LeaderboardEntry, LeaderboardQuery, ModelStatsRecord, NewUserStats, UploadRecord,
    UploadStatus, UserRecord,
};
use tokenboard_core::{ModelBreakdown, Result};

/// Operations the leaderboard service needs from its storage backend
pub trait LeaderboardStore {
    /// Whether an upload with this content fingerprint was recorded before
    fn fingerprint_exists(&self, fingerprint: &str) -> Result<bool>;

    /// Insert or update a user's stats, keyed by display name
    ///
    /// Updates replace the stats columns and refresh `updated_at` while
    /// preserving `id`, `slug`, `source_tool`, and `created_at`.
    fn upsert_user(&self, stats: NewUserStats) -> Result<UserRecord>;

    /// Append an upload audit record
    fn record_upload(
        &self,
        user_id: u64,
        filename: &str,
        fingerprint: &str,
        row_count: usize,
        status: UploadStatus,
        error_message: Option<&str>,
    ) -> Result<UploadRecord>;

    /// Fold one upload's model breakdown into the global per-model totals
    ///
    /// Each named model gains one user count plus the upload's request and
    /// token counts. Blank names and the "auto" placeholder are not real
    /// models and are skipped.
    fn update_model_stats(&self, breakdown: &ModelBreakdown) -> Result<()>;

    /// Ranked, filtered, paged leaderboard (private users excluded)
    fn leaderboard(&self, query: &LeaderboardQuery) -> Result<Vec<LeaderboardEntry>>;

    /// Number of users matching the query's filters (paging ignored)
    fn leaderboard_count(&self, query: &LeaderboardQuery) -> Result<u64>;

    /// Look up one user by slug
    fn user_by_slug(&self, slug: &str) -> Result<Option<UserRecord>>;

    /// Global per-model totals, highest token count first
    fn model_leaderboard(&self, limit: usize) -> Result<Vec<ModelStatsRecord>>;

    /// Distinct headline models across all users, sorted ascending
    fn distinct_models(&self) -> Result<Vec<String>>;

    /// Sum of XP across all non-private users
    fn total_xp(&self) -> Result<u64>;
}
