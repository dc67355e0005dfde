//! Upload service
//!
//! Orchestrates one upload end to end: rate limit, request validation,
//! duplicate detection, parsing, scoring, and persistence. The parsing
//! engine itself stays pure; everything stateful happens here against the
//! store.

use crate::slug::{sanitize_display_name, slugify};
use tokenboard_core::limits::IngestLimits;
use tokenboard_core::{
    RankedModel, Result, SourceTool, TokenboardError, UsageReport, Visibility,
    content_fingerprint, xp_score,
};
use tokenboard_ingest::{parse_report, top_models};
use tokenboard_store::rate_limit::{RateLimitConfig, UploadRateLimiter};
use tokenboard_store::{LeaderboardStore, NewUserStats, UploadStatus, UserRecord};
use tracing::info;

/// One upload as received from a client
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// Client identity for rate limiting (IP, session, ...)
    pub client_key: String,
    /// Original filename; must end in `.csv`
    pub filename: String,
    /// Raw file content
    pub content: String,
    /// Byte size declared by the uploader, if any
    pub declared_size: Option<u64>,
    /// Requested display name
    pub display_name: String,
    /// Requested listing visibility
    pub visibility: Visibility,
    /// Which assistant produced the report
    pub source_tool: SourceTool,
    /// Optional X handle; a leading `@` is stripped
    pub x_handle: Option<String>,
}

/// Result of a successful upload
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    /// The persisted user row
    pub user: UserRecord,
    /// Rows that contributed to the aggregate
    pub row_count: usize,
    /// Top models from this upload
    pub top_models: Vec<RankedModel>,
}

/// Result of parsing without persisting
#[derive(Debug, Clone)]
pub struct ReportPreview {
    /// The parsed aggregate
    pub report: UsageReport,
    /// Top models from the aggregate
    pub top_models: Vec<RankedModel>,
}

/// The upload pipeline bound to a storage backend
pub struct UploadService<S> {
    store: S,
    limiter: UploadRateLimiter,
    limits: IngestLimits,
}

impl<S: LeaderboardStore> UploadService<S> {
    /// Create a service with default limits and rate limiting
    pub fn new(store: S) -> Self {
        Self {
            store,
            limiter: UploadRateLimiter::new(RateLimitConfig::default()),
            limits: IngestLimits::default(),
        }
    }

    /// Override the ingestion limits
    #[must_use]
    pub fn with_limits(mut self, limits: IngestLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Override the rate-limit configuration
    #[must_use]
    pub fn with_rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.limiter = UploadRateLimiter::new(config);
        self
    }

    /// The storage backend this service writes to
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one upload end to end
    pub fn handle_upload(&self, request: UploadRequest) -> Result<UploadOutcome> {
        if !self.limiter.acquire(&request.client_key) {
            return Err(TokenboardError::RateLimited);
        }

        if !request.filename.ends_with(".csv") {
            return Err(TokenboardError::InvalidRequest(
                "File must be a CSV".to_string(),
            ));
        }
        if request.display_name.trim().is_empty() {
            return Err(TokenboardError::InvalidRequest(
                "Display name is required".to_string(),
            ));
        }

        let fingerprint = content_fingerprint(&request.content);
        if self.store.fingerprint_exists(&fingerprint)? {
            return Err(TokenboardError::DuplicateUpload);
        }

        let report = parse_report(&request.content, request.declared_size, &self.limits)?;

        let display_name = sanitize_display_name(&request.display_name);
        if display_name.chars().count() < 2 {
            return Err(TokenboardError::InvalidRequest(
                "Display name must be at least 2 characters".to_string(),
            ));
        }
        let slug = slugify(&display_name);

        let total_xp = xp_score(report.total_tokens, report.total_requests);
        let x_handle = request
            .x_handle
            .as_deref()
            .map(|handle| handle.trim().trim_start_matches('@').to_string())
            .filter(|handle| !handle.is_empty());

        let user = self.store.upsert_user(NewUserStats {
            display_name,
            slug,
            source_tool: request.source_tool,
            most_used_model: report.most_used_model.clone(),
            top_models_json: serde_json::to_string(&report.model_breakdown)?,
            total_requests: report.total_requests,
            total_tokens: report.total_tokens,
            total_cost_usd: report.total_cost,
            total_xp,
            visibility: request.visibility,
            x_handle,
        })?;

        self.store.record_upload(
            user.id,
            &request.filename,
            &fingerprint,
            report.row_count,
            UploadStatus::Parsed,
            None,
        )?;
        self.store.update_model_stats(&report.model_breakdown)?;

        info!(
            user = %user.display_name,
            rows = report.row_count,
            tokens = report.total_tokens,
            xp = total_xp,
            "recorded upload"
        );

        Ok(UploadOutcome {
            user,
            row_count: report.row_count,
            top_models: top_models(&report.model_breakdown, self.limits.top_models_limit),
        })
    }

    /// Parse a report without touching the store
    pub fn preview(&self, content: &str, declared_size: Option<u64>) -> Result<ReportPreview> {
        let report = parse_report(content, declared_size, &self.limits)?;
        let top_models = top_models(&report.model_breakdown, self.limits.top_models_limit);
        Ok(ReportPreview { report, top_models })
    }
}
