//! Output formatting for the tokenboard CLI
//!
//! Table formatting for human-readable terminal output; JSON output is
//! handled at the call sites with `serde_json` directly.

use crate::service::{ReportPreview, UploadOutcome};
use colored::Colorize;
use prettytable::{Table, format, row};
use tokenboard_core::RankedModel;
use tokenboard_store::{LeaderboardEntry, ModelStatsRecord, UserRecord};

fn base_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BOX_CHARS);
    table
}

fn format_tokens(tokens: u64) -> String {
    if tokens >= 1_000_000_000 {
        format!("{:.1}B", tokens as f64 / 1e9)
    } else if tokens >= 1_000_000 {
        format!("{:.1}M", tokens as f64 / 1e6)
    } else if tokens >= 1_000 {
        format!("{:.1}K", tokens as f64 / 1e3)
    } else {
        tokens.to_string()
    }
}

/// Render the ranked leaderboard
pub fn format_leaderboard(entries: &[LeaderboardEntry]) -> String {
    let mut table = base_table();
    table.set_titles(row!["Rank", "Name", "Model", "Tokens", "Requests", "XP"]);
    for entry in entries {
        table.add_row(row![
            entry.rank,
            entry.user.display_name,
            entry.user.most_used_model,
            r->format_tokens(entry.user.total_tokens),
            r->entry.user.total_requests,
            r->entry.user.total_xp
        ]);
    }
    table.to_string()
}

/// Render the global per-model stats
pub fn format_model_stats(stats: &[ModelStatsRecord]) -> String {
    let mut table = base_table();
    table.set_titles(row!["Model", "Users", "Requests", "Tokens"]);
    for record in stats {
        table.add_row(row![
            record.model_name,
            r->record.total_users,
            r->record.total_requests,
            r->format_tokens(record.total_tokens)
        ]);
    }
    table.to_string()
}

fn format_top_models(top_models: &[RankedModel]) -> String {
    let mut table = base_table();
    table.set_titles(row!["Model", "Tokens", "Requests", "Cost"]);
    for ranked in top_models {
        table.add_row(row![
            ranked.model,
            r->format_tokens(ranked.tokens),
            r->ranked.requests,
            r->format!("${:.2}", ranked.cost)
        ]);
    }
    table.to_string()
}

/// Render a parse preview
pub fn format_preview(preview: &ReportPreview) -> String {
    let report = &preview.report;
    format!(
        "{}\n  rows: {}  requests: {}  tokens: {}  cost: ${:.2}\n  most used model: {}\n\n{}",
        "Report summary".bold(),
        report.row_count,
        report.total_requests,
        format_tokens(report.total_tokens),
        report.total_cost,
        report.most_used_model.cyan(),
        format_top_models(&preview.top_models),
    )
}

/// Render the result of a recorded upload
pub fn format_upload_outcome(outcome: &UploadOutcome) -> String {
    let user = &outcome.user;
    format!(
        "{} {} ({})\n  rows: {}  requests: {}  tokens: {}  xp: {}\n  most used model: {}\n\n{}",
        "Recorded".green().bold(),
        user.display_name.bold(),
        user.slug,
        outcome.row_count,
        user.total_requests,
        format_tokens(user.total_tokens),
        user.total_xp,
        user.most_used_model.cyan(),
        format_top_models(&outcome.top_models),
    )
}

/// Render one user's stats
pub fn format_user(user: &UserRecord) -> String {
    format!(
        "{} ({})\n  tool: {}  visibility: {}\n  requests: {}  tokens: {}  xp: {}\n  most used model: {}\n  updated: {}",
        user.display_name.bold(),
        user.slug,
        user.source_tool,
        user.visibility,
        user.total_requests,
        format_tokens(user.total_tokens),
        user.total_xp,
        user.most_used_model.cyan(),
        user.updated_at.format("%Y-%m-%d %H:%M UTC"),
    )
}
