//! tokenboard - Ingest AI coding assistant usage reports and rank users
//!
//! This library wires the tokenboard crates into a working service:
//! - Parse usage-report CSV exports (Cursor format or generic tabular)
//! - Deduplicate uploads by content fingerprint and enforce rate limits
//! - Persist per-user aggregates and global model stats to a leaderboard
//!   store
//! - Render ranked leaderboards in table and JSON formats
//!
//! # Examples
//!
//! ```
//! use tokenboard::service::{UploadRequest, UploadService};
//! use tokenboard_store::MemoryStore;
//!
//! let service = UploadService::new(MemoryStore::new());
//! let outcome = service.handle_upload(UploadRequest {
//!     client_key: "203.0.113.7".into(),
//!     filename: "usage.csv".into(),
//!     content: "model,tokens\ngpt-4,1200\n".into(),
//!     declared_size: None,
//!     display_name: "Ada".into(),
//!     ..UploadRequest::default()
//! }).unwrap();
//! assert_eq!(outcome.user.slug, "ada");
//! ```

pub mod cli;
pub mod output;
pub mod service;
pub mod slug;

// Re-export commonly used types
pub use tokenboard_core::{
    ErrorKind, IngestLimits, Result, TokenboardError, UsageReport, content_fingerprint, xp_score,
};
pub use tokenboard_ingest::{parse_report, top_models};
pub use tokenboard_store::{LeaderboardStore, MemoryStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
