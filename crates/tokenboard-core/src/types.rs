//! Core domain types for tokenboard
//!
//! This module contains the fundamental types used throughout the tokenboard
//! crates: strongly-typed model names, per-model usage accumulators, the
//! insertion-ordered model breakdown, and the aggregate report produced by
//! one upload.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};

/// Strongly-typed model name wrapper
///
/// Model names are case-sensitive and stored trimmed. Using a newtype keeps
/// them from being confused with other strings (display names, slugs) at API
/// boundaries.
///
/// # Examples
/// ```
/// use tokenboard_core::types::ModelName;
///
/// let model = ModelName::new("claude-sonnet-4");
/// assert_eq!(model.as_str(), "claude-sonnet-4");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelName(String);

impl ModelName {
    /// Create a new ModelName from any string-like type
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ModelName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Running usage totals for a single model
///
/// Accumulated row by row during ingestion. All counters start at zero and
/// only grow.
///
/// # Examples
/// ```
/// use tokenboard_core::types::ModelUsage;
///
/// let mut usage = ModelUsage::default();
/// usage.add_row(1_500, 0.03);
/// usage.add_row(500, 0.01);
/// assert_eq!(usage.tokens, 2_000);
/// assert_eq!(usage.requests, 2);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelUsage {
    /// Total tokens attributed to this model
    pub tokens: u64,
    /// Number of requests attributed to this model
    pub requests: u64,
    /// Total cost in USD attributed to this model
    pub cost: f64,
}

impl ModelUsage {
    /// Create new ModelUsage totals
    pub fn new(tokens: u64, requests: u64, cost: f64) -> Self {
        Self {
            tokens,
            requests,
            cost,
        }
    }

    /// Fold one report row into the totals
    pub fn add_row(&mut self, tokens: u64, cost: f64) {
        self.tokens += tokens;
        self.requests += 1;
        self.cost += cost;
    }
}

impl Add for ModelUsage {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            tokens: self.tokens + other.tokens,
            requests: self.requests + other.requests,
            cost: self.cost + other.cost,
        }
    }
}

impl AddAssign for ModelUsage {
    fn add_assign(&mut self, other: Self) {
        self.tokens += other.tokens;
        self.requests += other.requests;
        self.cost += other.cost;
    }
}

/// Insertion-ordered map from model name to usage totals
///
/// Iteration yields entries in the order their models were first observed in
/// the input, which is what makes tie-breaking in the summary rules stable.
/// Keys are unique; `entry` returns the existing accumulator when a model
/// repeats.
///
/// Serializes as a JSON object whose keys keep first-seen order.
///
/// # Examples
/// ```
/// use tokenboard_core::types::ModelBreakdown;
///
/// let mut breakdown = ModelBreakdown::new();
/// breakdown.entry("gpt-4").add_row(100, 0.02);
/// breakdown.entry("claude-sonnet-4").add_row(250, 0.01);
/// breakdown.entry("gpt-4").add_row(50, 0.01);
///
/// assert_eq!(breakdown.len(), 2);
/// let first = breakdown.iter().next().unwrap();
/// assert_eq!(first.0.as_str(), "gpt-4");
/// assert_eq!(first.1.requests, 2);
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ModelBreakdown {
    entries: Vec<(ModelName, ModelUsage)>,
}

impl ModelBreakdown {
    /// Create an empty breakdown
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct models observed
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no model has been observed
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the accumulator for `model`, inserting a zeroed entry if absent
    pub fn entry(&mut self, model: &str) -> &mut ModelUsage {
        // Linear scan: uploads see a few dozen distinct models at most.
        if let Some(idx) = self.entries.iter().position(|(name, _)| name.as_str() == model) {
            return &mut self.entries[idx].1;
        }
        self.entries
            .push((ModelName::new(model), ModelUsage::default()));
        &mut self.entries.last_mut().expect("just pushed").1
    }

    /// Look up a model's totals
    pub fn get(&self, model: &str) -> Option<&ModelUsage> {
        self.entries
            .iter()
            .find(|(name, _)| name.as_str() == model)
            .map(|(_, usage)| usage)
    }

    /// Iterate entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&ModelName, &ModelUsage)> {
        self.entries.iter().map(|(name, usage)| (name, usage))
    }
}

impl FromIterator<(String, ModelUsage)> for ModelBreakdown {
    fn from_iter<I: IntoIterator<Item = (String, ModelUsage)>>(iter: I) -> Self {
        let mut breakdown = Self::new();
        for (model, usage) in iter {
            *breakdown.entry(&model) = usage;
        }
        breakdown
    }
}

impl Serialize for ModelBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, usage) in &self.entries {
            map.serialize_entry(name.as_str(), usage)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ModelBreakdown {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct BreakdownVisitor;

        impl<'de> Visitor<'de> for BreakdownVisitor {
            type Value = ModelBreakdown;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of model name to usage totals")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut breakdown = ModelBreakdown::new();
                while let Some((model, usage)) = access.next_entry::<String, ModelUsage>()? {
                    *breakdown.entry(&model) = usage;
                }
                Ok(breakdown)
            }
        }

        deserializer.deserialize_map(BreakdownVisitor)
    }
}

/// Aggregate result of parsing one usage report
///
/// Constructed once per upload by the ingestion engine and handed to the
/// storage layer; the engine does not retain it.
///
/// Invariants: `total_tokens` and `total_requests` equal the sums of the
/// per-model entries, and `row_count` is the number of rows that contributed
/// to the totals (never more than the decoded row count).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageReport {
    /// Total requests across all models
    pub total_requests: u64,
    /// Total tokens across all models
    pub total_tokens: u64,
    /// Total cost in USD across all models
    pub total_cost: f64,
    /// Per-model totals in first-seen order
    pub model_breakdown: ModelBreakdown,
    /// The model the user actually relies on (see summary rules)
    pub most_used_model: String,
    /// Rows that contributed to the totals
    pub row_count: usize,
}

/// One entry of the top-N model ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedModel {
    /// Model name
    pub model: String,
    /// Total tokens for this model
    pub tokens: u64,
    /// Total requests for this model
    pub requests: u64,
    /// Total cost in USD for this model
    pub cost: f64,
}

/// Which assistant produced the uploaded report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceTool {
    /// Cursor editor usage export
    #[default]
    Cursor,
    /// Claude Code usage export
    Claude,
    /// Codex CLI usage export
    Codex,
    /// Anything else with a recognizable tabular shape
    Other,
}

impl SourceTool {
    /// Stable string form used in storage and query filters
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTool::Cursor => "cursor",
            SourceTool::Claude => "claude",
            SourceTool::Codex => "codex",
            SourceTool::Other => "other",
        }
    }
}

impl fmt::Display for SourceTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much of a user's stats the leaderboard may show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Listed with totals but without cost
    #[default]
    PublicMinimal,
    /// Listed with cost included
    PublicExtended,
    /// Excluded from public listings
    Private,
}

impl Visibility {
    /// Stable string form used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::PublicMinimal => "public_minimal",
            Visibility::PublicExtended => "public_extended",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_preserves_insertion_order() {
        let mut breakdown = ModelBreakdown::new();
        breakdown.entry("zeta").add_row(10, 0.0);
        breakdown.entry("alpha").add_row(20, 0.0);
        breakdown.entry("zeta").add_row(5, 0.0);

        let order: Vec<&str> = breakdown.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(order, vec!["zeta", "alpha"]);
        assert_eq!(breakdown.get("zeta").unwrap().tokens, 15);
        assert_eq!(breakdown.get("zeta").unwrap().requests, 2);
    }

    #[test]
    fn breakdown_keys_are_case_sensitive() {
        let mut breakdown = ModelBreakdown::new();
        breakdown.entry("GPT-4").add_row(1, 0.0);
        breakdown.entry("gpt-4").add_row(1, 0.0);
        assert_eq!(breakdown.len(), 2);
    }

    #[test]
    fn breakdown_serializes_as_ordered_object() {
        let mut breakdown = ModelBreakdown::new();
        breakdown.entry("b-model").add_row(2, 0.5);
        breakdown.entry("a-model").add_row(1, 0.25);

        let json = serde_json::to_string(&breakdown).unwrap();
        assert!(json.find("b-model").unwrap() < json.find("a-model").unwrap());

        let back: ModelBreakdown = serde_json::from_str(&json).unwrap();
        assert_eq!(back, breakdown);
    }

    #[test]
    fn model_usage_accumulates() {
        let mut usage = ModelUsage::default();
        usage.add_row(100, 0.1);
        usage.add_row(0, 0.0);
        assert_eq!(usage.tokens, 100);
        assert_eq!(usage.requests, 2);

        let combined = usage + ModelUsage::new(50, 1, 0.4);
        assert_eq!(combined.tokens, 150);
        assert_eq!(combined.requests, 3);
    }

    #[test]
    fn enums_round_trip_through_serde() {
        let json = serde_json::to_string(&SourceTool::Claude).unwrap();
        assert_eq!(json, "\"claude\"");
        let json = serde_json::to_string(&Visibility::PublicExtended).unwrap();
        assert_eq!(json, "\"public_extended\"");
        let vis: Visibility = serde_json::from_str("\"private\"").unwrap();
        assert_eq!(vis, Visibility::Private);
    }
}
