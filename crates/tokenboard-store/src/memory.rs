//! In-memory store with JSON snapshot persistence
//!
//! Reference implementation of [`LeaderboardStore`]: state lives behind a
//! `Mutex`, and the CLI persists it by snapshotting to a JSON file between
//! runs. Suitable for a single-process deployment and for tests; a SQL
//! backend would implement the same trait.

use crate::records::{
    LeaderboardEntry, LeaderboardQuery, LeaderboardSort, ModelStatsRecord, NewUserStats,
    UploadRecord, UploadStatus, UserRecord,
};
use crate::store::LeaderboardStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tokenboard_core::{ModelBreakdown, Result, Visibility};
use tracing::{debug, info};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    users: Vec<UserRecord>,
    uploads: Vec<UploadRecord>,
    model_stats: Vec<ModelStatsRecord>,
    next_user_id: u64,
    next_upload_id: u64,
}

/// `Mutex`-protected in-memory [`LeaderboardStore`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON snapshot; a missing file starts empty
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no snapshot found, starting empty");
            return Ok(Self::new());
        }
        let content = fs::read_to_string(path)?;
        let state: StoreState = serde_json::from_str(&content)?;
        info!(
            path = %path.display(),
            users = state.users.len(),
            "loaded leaderboard snapshot"
        );
        Ok(Self {
            state: Mutex::new(state),
        })
    }

    /// Write the current state to a JSON snapshot
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let state = self.state.lock().expect("store mutex poisoned");
        let content = serde_json::to_string_pretty(&*state)?;
        fs::write(path, content)?;
        debug!(path = %path.display(), "saved leaderboard snapshot");
        Ok(())
    }

    fn matches(user: &UserRecord, query: &LeaderboardQuery) -> bool {
        if user.visibility == Visibility::Private {
            return false;
        }
        if let Some(tool) = query.tool {
            if user.source_tool != tool {
                return false;
            }
        }
        if let Some(model) = &query.model {
            if &user.most_used_model != model {
                return false;
            }
        }
        if let Some(search) = &query.search {
            if !user
                .display_name
                .to_lowercase()
                .contains(&search.to_lowercase())
            {
                return false;
            }
        }
        true
    }

    fn sort_users(users: &mut [UserRecord], sort: LeaderboardSort) {
        match sort {
            LeaderboardSort::Tokens => {
                users.sort_by(|a, b| b.total_tokens.cmp(&a.total_tokens));
            }
            LeaderboardSort::Requests => {
                users.sort_by(|a, b| b.total_requests.cmp(&a.total_requests));
            }
            LeaderboardSort::Cost => {
                users.sort_by(|a, b| {
                    b.total_cost_usd
                        .partial_cmp(&a.total_cost_usd)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
            }
            LeaderboardSort::Recent => {
                users.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            }
            LeaderboardSort::Xp => {
                users.sort_by(|a, b| b.total_xp.cmp(&a.total_xp));
            }
        }
    }
}

impl LeaderboardStore for MemoryStore {
    fn fingerprint_exists(&self, fingerprint: &str) -> Result<bool> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state
            .uploads
            .iter()
            .any(|upload| upload.fingerprint == fingerprint))
    }

    fn upsert_user(&self, stats: NewUserStats) -> Result<UserRecord> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        let now = Utc::now();

        if let Some(user) = state
            .users
            .iter_mut()
            .find(|user| user.display_name == stats.display_name)
        {
            user.most_used_model = stats.most_used_model;
            user.top_models_json = stats.top_models_json;
            user.total_requests = stats.total_requests;
            user.total_tokens = stats.total_tokens;
            user.total_cost_usd = stats.total_cost_usd;
            user.total_xp = stats.total_xp;
            user.visibility = stats.visibility;
            user.x_handle = stats.x_handle;
            user.updated_at = now;
            return Ok(user.clone());
        }

        state.next_user_id += 1;
        let user = UserRecord {
            id: state.next_user_id,
            display_name: stats.display_name,
            slug: stats.slug,
            source_tool: stats.source_tool,
            most_used_model: stats.most_used_model,
            top_models_json: stats.top_models_json,
            total_requests: stats.total_requests,
            total_tokens: stats.total_tokens,
            total_cost_usd: stats.total_cost_usd,
            total_xp: stats.total_xp,
            visibility: stats.visibility,
            x_handle: stats.x_handle,
            created_at: now,
            updated_at: now,
        };
        state.users.push(user.clone());
        debug!(user = %user.display_name, id = user.id, "created leaderboard user");
        Ok(user)
    }

    fn record_upload(
        &self,
        user_id: u64,
        filename: &str,
        fingerprint: &str,
        row_count: usize,
        status: UploadStatus,
        error_message: Option<&str>,
    ) -> Result<UploadRecord> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        state.next_upload_id += 1;
        let upload = UploadRecord {
            id: state.next_upload_id,
            user_id,
            original_filename: filename.to_string(),
            fingerprint: fingerprint.to_string(),
            row_count,
            status,
            error_message: error_message.map(str::to_owned),
            created_at: Utc::now(),
        };
        state.uploads.push(upload.clone());
        Ok(upload)
    }

    fn update_model_stats(&self, breakdown: &ModelBreakdown) -> Result<()> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        let now = Utc::now();

        for (name, usage) in breakdown.iter() {
            // "auto" is a routing placeholder, not a model anyone used
            if name.as_str().is_empty() || name.as_str() == "auto" {
                continue;
            }
            match state
                .model_stats
                .iter_mut()
                .find(|record| record.model_name == name.as_str())
            {
                Some(record) => {
                    record.total_users += 1;
                    record.total_requests += usage.requests;
                    record.total_tokens += usage.tokens;
                    record.updated_at = now;
                }
                None => {
                    state.model_stats.push(ModelStatsRecord {
                        model_name: name.to_string(),
                        total_users: 1,
                        total_requests: usage.requests,
                        total_tokens: usage.tokens,
                        updated_at: now,
                    });
                }
            }
        }
        Ok(())
    }

    fn leaderboard(&self, query: &LeaderboardQuery) -> Result<Vec<LeaderboardEntry>> {
        let state = self.state.lock().expect("store mutex poisoned");
        let mut users: Vec<UserRecord> = state
            .users
            .iter()
            .filter(|user| Self::matches(user, query))
            .cloned()
            .collect();
        Self::sort_users(&mut users, query.sort);

        Ok(users
            .into_iter()
            .enumerate()
            .skip(query.offset)
            .take(query.limit)
            .map(|(idx, user)| LeaderboardEntry {
                rank: idx + 1,
                user,
            })
            .collect())
    }

    fn leaderboard_count(&self, query: &LeaderboardQuery) -> Result<u64> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state
            .users
            .iter()
            .filter(|user| Self::matches(user, query))
            .count() as u64)
    }

    fn user_by_slug(&self, slug: &str) -> Result<Option<UserRecord>> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state
            .users
            .iter()
            .find(|user| user.slug == slug)
            .cloned())
    }

    fn model_leaderboard(&self, limit: usize) -> Result<Vec<ModelStatsRecord>> {
        let state = self.state.lock().expect("store mutex poisoned");
        let mut stats = state.model_stats.clone();
        stats.sort_by(|a, b| b.total_tokens.cmp(&a.total_tokens));
        stats.truncate(limit);
        Ok(stats)
    }

    fn distinct_models(&self) -> Result<Vec<String>> {
        let state = self.state.lock().expect("store mutex poisoned");
        let mut models: Vec<String> = state
            .users
            .iter()
            .filter(|user| !user.most_used_model.is_empty())
            .map(|user| user.most_used_model.clone())
            .collect();
        models.sort();
        models.dedup();
        Ok(models)
    }

    fn total_xp(&self) -> Result<u64> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state
            .users
            .iter()
            .filter(|user| user.visibility != Visibility::Private)
            .map(|user| user.total_xp)
            .sum())
    }
}
