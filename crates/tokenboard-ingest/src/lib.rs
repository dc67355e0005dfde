//! CSV usage-report ingestion for tokenboard
//!
//! This crate turns raw usage-report exports from AI coding assistants into
//! normalized per-model aggregates. The pipeline:
//!
//! ```text
//! raw text ──▶ decoder ──▶ classifier ──▶ aggregator ──▶ summary
//!             (rows)      (pick format)  (totals)       (most-used model)
//! ```
//!
//! Two tabular shapes are recognized: the Cursor usage export (detected from
//! its characteristic headers) and a generic fallback for any CSV with an
//! identifiable model column. The decision is made once per upload from the
//! header row alone; row content never changes the chosen strategy.
//!
//! The whole pipeline is synchronous, stateless, and side-effect free; the
//! byte and row caps in [`IngestLimits`] bound its worst-case work.
//!
//! # Examples
//!
//! ```
//! use tokenboard_core::limits::IngestLimits;
//! use tokenboard_ingest::{parse_report, top_models};
//!
//! let csv = "\
//! Date,Kind,Model,Total Tokens,Cost
//! 2025-06-01,Included,claude-sonnet-4,1200,0.04
//! 2025-06-01,Errored,claude-sonnet-4,900,0.00
//! 2025-06-02,Included,gpt-4,400,0.02
//! ";
//!
//! let report = parse_report(csv, None, &IngestLimits::default()).unwrap();
//! assert_eq!(report.row_count, 2);
//! assert_eq!(report.total_tokens, 1600);
//! assert_eq!(report.most_used_model, "claude-sonnet-4");
//!
//! let ranking = top_models(&report.model_breakdown, 5);
//! assert_eq!(ranking[0].model, "claude-sonnet-4");
//! ```

pub mod aggregate;
pub mod classifier;
pub mod decoder;
pub mod summary;

pub use classifier::{CursorColumns, GenericColumns, ReportFormat, classify};
pub use decoder::{RawTable, decode_rows};
pub use summary::top_models;

use tokenboard_core::limits::IngestLimits;
use tokenboard_core::{Result, UsageReport};
use tracing::debug;

/// Parse one uploaded usage report into an aggregate [`UsageReport`]
///
/// `declared_size` is the byte size reported by the uploader, checked against
/// the cap before any decoding; when absent the content length stands in for
/// it. Every failure maps onto one of the wire-level error kinds and carries
/// a message fit to show the end user verbatim.
pub fn parse_report(
    content: &str,
    declared_size: Option<u64>,
    limits: &IngestLimits,
) -> Result<UsageReport> {
    let table = decode_rows(content, declared_size, limits)?;
    let format = classify(table.headers())?;

    let (accumulated, most_used_model) = match &format {
        ReportFormat::Cursor(columns) => {
            let acc = aggregate::aggregate_cursor(&table, columns)?;
            let most_used = summary::most_used_model_excluding_auto(&acc.breakdown);
            (acc, most_used)
        }
        ReportFormat::Generic(columns) => {
            let acc = aggregate::aggregate_generic(&table, columns);
            let most_used = summary::most_used_model_by_volume(&acc.breakdown);
            (acc, most_used)
        }
    };

    debug!(
        rows = accumulated.row_count,
        models = accumulated.breakdown.len(),
        most_used = %most_used_model,
        "aggregated usage report"
    );

    Ok(UsageReport {
        total_requests: accumulated.total_requests,
        total_tokens: accumulated.total_tokens,
        total_cost: accumulated.total_cost,
        model_breakdown: accumulated.breakdown,
        most_used_model,
        row_count: accumulated.row_count,
    })
}
