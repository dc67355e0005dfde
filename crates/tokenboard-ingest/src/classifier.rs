//! Format classifier
//!
//! Decides, from header names alone, which parse strategy applies to an
//! uploaded report: the Cursor usage export or the generic fallback. The
//! decision is a tagged variant chosen once per upload; the matched column
//! indices travel with it so aggregation reads exactly the columns the
//! classifier found.

use tokenboard_core::{Result, TokenboardError};
use tracing::debug;

/// Header phrases identifying the Cursor export, matched as lowercase
/// substrings ("Total Tokens (est.)" matches "total tokens")
pub const CURSOR_HEADER_HINTS: [&str; 5] = ["date", "kind", "model", "total tokens", "cost"];

/// Aliases accepted for the generic model column (exact, case-insensitive)
pub const MODEL_COLUMN_ALIASES: [&str; 3] = ["model", "model_name", "llm_model"];

/// Aliases accepted for the generic token column (exact, case-insensitive)
pub const TOKEN_COLUMN_ALIASES: [&str; 3] = ["tokens", "total_tokens", "token_count"];

/// Aliases accepted for the generic cost column (exact, case-insensitive)
pub const COST_COLUMN_ALIASES: [&str; 4] = ["cost", "cost_usd", "usd", "price"];

/// Column indices resolved for the Cursor export
///
/// The date column participates in detection but not in aggregation, so only
/// the columns aggregation reads are carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorColumns {
    /// The "kind" column driving the skip rule
    pub kind: usize,
    /// The model name column
    pub model: usize,
    /// The total-tokens column
    pub tokens: usize,
    /// The cost column
    pub cost: usize,
}

/// Column indices resolved for the generic fallback
///
/// Token and cost columns are optional; when absent, every row aggregates
/// with zero for that quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenericColumns {
    /// The model-identifying column (required)
    pub model: usize,
    /// The token column, if any alias matched
    pub tokens: Option<usize>,
    /// The cost column, if any alias matched
    pub cost: Option<usize>,
}

/// The parse strategy chosen for one upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Cursor usage export
    Cursor(CursorColumns),
    /// Any other tabular file with an identifiable model column
    Generic(GenericColumns),
}

/// Choose the parse strategy from the header row
///
/// The only failure here is a generic-format file without a model column;
/// everything else falls through to one of the two strategies.
pub fn classify(headers: &[String]) -> Result<ReportFormat> {
    if let Some(columns) = match_cursor_headers(headers) {
        debug!("classified report as cursor export");
        return Ok(ReportFormat::Cursor(columns));
    }

    let model = find_exact(headers, &MODEL_COLUMN_ALIASES)
        .ok_or(TokenboardError::MissingModelColumn)?;
    let columns = GenericColumns {
        model,
        tokens: find_exact(headers, &TOKEN_COLUMN_ALIASES),
        cost: find_exact(headers, &COST_COLUMN_ALIASES),
    };
    debug!(?columns, "classified report as generic tabular");
    Ok(ReportFormat::Generic(columns))
}

/// First header containing `hint` as a lowercase substring
fn find_substring(headers: &[String], hint: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.to_lowercase().contains(hint))
}

/// First header equal (case-insensitively) to any of `aliases`
fn find_exact(headers: &[String], aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| aliases.contains(&header.to_lowercase().as_str()))
}

fn match_cursor_headers(headers: &[String]) -> Option<CursorColumns> {
    // All five hints must land somewhere; the date column is only a
    // detection signal.
    let _date = find_substring(headers, "date")?;
    Some(CursorColumns {
        kind: find_substring(headers, "kind")?,
        model: find_substring(headers, "model")?,
        tokens: find_substring(headers, "total tokens")?,
        cost: find_substring(headers, "cost")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn detects_cursor_export() {
        let format = classify(&headers(&[
            "Date",
            "Kind",
            "Model",
            "Max Mode",
            "Total Tokens",
            "Cost",
        ]))
        .unwrap();
        assert_eq!(
            format,
            ReportFormat::Cursor(CursorColumns {
                kind: 1,
                model: 2,
                tokens: 4,
                cost: 5,
            })
        );
    }

    #[test]
    fn cursor_match_is_substring_based() {
        // Decorated headers still count, and aggregation gets their indices
        let format = classify(&headers(&[
            "Usage Date",
            "Request Kind",
            "Model Name",
            "Total Tokens (est.)",
            "Cost ($)",
        ]))
        .unwrap();
        let ReportFormat::Cursor(columns) = format else {
            panic!("expected cursor format");
        };
        assert_eq!(columns.tokens, 3);
        assert_eq!(columns.cost, 4);
    }

    #[test]
    fn missing_cursor_header_falls_back_to_generic() {
        // No "kind" column, but "Model" matches a generic alias exactly
        let format = classify(&headers(&["Date", "Model", "Total Tokens", "Cost"])).unwrap();
        let ReportFormat::Generic(columns) = format else {
            panic!("expected generic format");
        };
        assert_eq!(columns.model, 1);
        assert_eq!(columns.cost, Some(3));
        // "Total Tokens" is not an exact token alias
        assert_eq!(columns.tokens, None);
    }

    #[test]
    fn generic_aliases_are_exact_and_case_insensitive() {
        let format = classify(&headers(&["LLM_MODEL", "Token_Count", "Price"])).unwrap();
        assert_eq!(
            format,
            ReportFormat::Generic(GenericColumns {
                model: 0,
                tokens: Some(1),
                cost: Some(2),
            })
        );
    }

    #[test]
    fn generic_without_model_column_fails() {
        let err = classify(&headers(&["timestamp", "tokens", "cost"])).unwrap_err();
        assert!(matches!(err, TokenboardError::MissingModelColumn));
    }

    #[test]
    fn decision_ignores_everything_but_headers() {
        // Same headers, different casing and order still classify the same
        let a = classify(&headers(&["date", "kind", "model", "total tokens", "cost"])).unwrap();
        let b = classify(&headers(&["DATE", "KIND", "MODEL", "TOTAL TOKENS", "COST"])).unwrap();
        assert!(matches!(a, ReportFormat::Cursor(_)));
        assert!(matches!(b, ReportFormat::Cursor(_)));
    }
}
