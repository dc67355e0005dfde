//! Summary builder
//!
//! Derives the headline "most used model" and the top-N ranking from an
//! accumulated breakdown. The headline should surface the model the user
//! actually relies on, which is why the Cursor rule refuses to crown the
//! "auto" routing placeholder while anything real has tokens.

use tokenboard_core::{ModelBreakdown, ModelName, RankedModel};

/// The Cursor routing placeholder, never the headline while a real model
/// has token volume
const AUTO_MODEL: &str = "auto";

/// Headline model for Cursor exports: most tokens, "auto" excluded
///
/// Falls back to "auto" only when no other model has tokens, and to
/// "unknown" when there is no "auto" entry either. Ties go to the model
/// seen first in the input.
pub fn most_used_model_excluding_auto(breakdown: &ModelBreakdown) -> String {
    let mut best: Option<&ModelName> = None;
    let mut max_tokens = 0u64;

    for (name, usage) in breakdown.iter() {
        if name.as_str() == AUTO_MODEL {
            continue;
        }
        if usage.tokens > max_tokens {
            max_tokens = usage.tokens;
            best = Some(name);
        }
    }

    match best {
        Some(name) => name.to_string(),
        None if breakdown.get(AUTO_MODEL).is_some() => AUTO_MODEL.to_string(),
        None => "unknown".to_string(),
    }
}

/// Headline model for generic files: most tokens, else most requests
///
/// When no token column existed (or every count was zero) the token scan is
/// meaningless, so the scan re-runs on request counts. Ties go to the model
/// seen first in the input.
pub fn most_used_model_by_volume(breakdown: &ModelBreakdown) -> String {
    let mut best: Option<&ModelName> = None;
    let mut max_tokens = 0u64;

    for (name, usage) in breakdown.iter() {
        if usage.tokens > max_tokens {
            max_tokens = usage.tokens;
            best = Some(name);
        }
    }

    if let Some(name) = best {
        return name.to_string();
    }

    let mut best: Option<&ModelName> = None;
    let mut max_requests = 0u64;
    for (name, usage) in breakdown.iter() {
        if usage.requests > max_requests {
            max_requests = usage.requests;
            best = Some(name);
        }
    }

    best.map(ToString::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Top `limit` models by token count
///
/// The sort is stable, so models with equal token counts keep their
/// first-seen order.
pub fn top_models(breakdown: &ModelBreakdown, limit: usize) -> Vec<RankedModel> {
    let mut ranking: Vec<RankedModel> = breakdown
        .iter()
        .map(|(name, usage)| RankedModel {
            model: name.to_string(),
            tokens: usage.tokens,
            requests: usage.requests,
            cost: usage.cost,
        })
        .collect();
    ranking.sort_by(|a, b| b.tokens.cmp(&a.tokens));
    ranking.truncate(limit);
    ranking
}
