//! Core types, errors, and scoring for tokenboard
//!
//! This crate provides the foundational pieces shared by the ingestion
//! engine, the storage layer, and the CLI: domain types for per-model
//! usage aggregates, the error taxonomy, ingestion limits, the upload
//! fingerprint, and the XP score formula.

pub mod error;
pub mod fingerprint;
pub mod limits;
pub mod score;
pub mod types;

// Re-export commonly used types
pub use error::{ErrorKind, Result, TokenboardError};
pub use fingerprint::content_fingerprint;
pub use limits::IngestLimits;
pub use score::xp_score;
pub use types::{
    ModelBreakdown, ModelName, ModelUsage, RankedModel, SourceTool, UsageReport, Visibility,
};
