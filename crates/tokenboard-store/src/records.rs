//! Storage record types
//!
//! Rows exchanged with the leaderboard store, mirroring the persisted
//! schema: user stats keyed by display name, upload audit records keyed by
//! fingerprint, and global per-model totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokenboard_core::{SourceTool, Visibility};

/// One user's leaderboard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Store-assigned id
    pub id: u64,
    /// Unique display name (the upsert key)
    pub display_name: String,
    /// URL-safe slug derived from the display name
    pub slug: String,
    /// Which assistant the stats came from
    pub source_tool: SourceTool,
    /// Headline model from the latest upload
    pub most_used_model: String,
    /// JSON object of the latest model breakdown
    pub top_models_json: String,
    /// Totals from the latest upload
    pub total_requests: u64,
    /// Total tokens from the latest upload
    pub total_tokens: u64,
    /// Total cost in USD from the latest upload
    pub total_cost_usd: f64,
    /// Derived XP score
    pub total_xp: u64,
    /// How much of this row public listings may show
    pub visibility: Visibility,
    /// Optional X handle, stored without the leading `@`
    pub x_handle: Option<String>,
    /// First time this user appeared
    pub created_at: DateTime<Utc>,
    /// Last upsert time
    pub updated_at: DateTime<Utc>,
}

/// Stats written on upsert; the store fills in ids and timestamps
#[derive(Debug, Clone)]
pub struct NewUserStats {
    /// Unique display name (the upsert key)
    pub display_name: String,
    /// URL-safe slug derived from the display name
    pub slug: String,
    /// Which assistant the stats came from
    pub source_tool: SourceTool,
    /// Headline model
    pub most_used_model: String,
    /// JSON object of the model breakdown
    pub top_models_json: String,
    /// Total requests
    pub total_requests: u64,
    /// Total tokens
    pub total_tokens: u64,
    /// Total cost in USD
    pub total_cost_usd: f64,
    /// Derived XP score
    pub total_xp: u64,
    /// Listing visibility
    pub visibility: Visibility,
    /// Optional X handle
    pub x_handle: Option<String>,
}

/// A leaderboard row with its 1-based rank over the filtered ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position over the whole filtered set (offset included)
    pub rank: usize,
    /// The user row
    #[serde(flatten)]
    pub user: UserRecord,
}

/// Outcome recorded for one upload attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    /// The file parsed and the stats were stored
    Parsed,
    /// The file was rejected
    Failed,
}

impl UploadStatus {
    /// Stable string form
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Parsed => "parsed",
            UploadStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit record of one upload attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadRecord {
    /// Store-assigned id
    pub id: u64,
    /// The user the upload belonged to
    pub user_id: u64,
    /// Original filename as uploaded
    pub original_filename: String,
    /// Content fingerprint used for duplicate detection
    pub fingerprint: String,
    /// Rows that contributed to the stored aggregate
    pub row_count: usize,
    /// Whether the upload parsed or failed
    pub status: UploadStatus,
    /// Failure message, when status is failed
    pub error_message: Option<String>,
    /// When the upload happened
    pub created_at: DateTime<Utc>,
}

/// Global per-model totals across all users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStatsRecord {
    /// Model name (unique)
    pub model_name: String,
    /// How many uploads have included this model
    pub total_users: u64,
    /// Requests accumulated across uploads
    pub total_requests: u64,
    /// Tokens accumulated across uploads
    pub total_tokens: u64,
    /// Last time this model appeared in an upload
    pub updated_at: DateTime<Utc>,
}

/// Sort key for leaderboard listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardSort {
    /// By total tokens, descending (the default)
    #[default]
    Tokens,
    /// By total requests, descending
    Requests,
    /// By total cost, descending
    Cost,
    /// By most recent update
    Recent,
    /// By XP, descending
    Xp,
}

/// Filters and paging for leaderboard listings
///
/// Private users are always excluded; the remaining filters narrow the set
/// further before sorting and paging.
#[derive(Debug, Clone)]
pub struct LeaderboardQuery {
    /// Only users from this source tool
    pub tool: Option<SourceTool>,
    /// Only users whose headline model equals this name
    pub model: Option<String>,
    /// Only users whose display name contains this text (case-insensitive)
    pub search: Option<String>,
    /// Sort key
    pub sort: LeaderboardSort,
    /// Page size
    pub limit: usize,
    /// Page offset
    pub offset: usize,
}

impl Default for LeaderboardQuery {
    fn default() -> Self {
        Self {
            tool: None,
            model: None,
            search: None,
            sort: LeaderboardSort::default(),
            limit: 50,
            offset: 0,
        }
    }
}

impl LeaderboardQuery {
    /// Restrict to one source tool
    #[must_use]
    pub fn with_tool(mut self, tool: SourceTool) -> Self {
        self.tool = Some(tool);
        self
    }

    /// Restrict to users whose headline model equals `model`
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Restrict to display names containing `search`
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Change the sort key
    #[must_use]
    pub fn with_sort(mut self, sort: LeaderboardSort) -> Self {
        self.sort = sort;
        self
    }

    /// Change the page size
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Change the page offset
    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}
