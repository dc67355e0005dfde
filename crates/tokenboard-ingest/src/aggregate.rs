//! Row aggregation
//!
//! Folds classified rows into per-model and overall totals. The Cursor
//! strategy drops errored and no-charge rows so free requests never inflate
//! usage stats; the generic strategy has no such concept and counts every
//! row.

use crate::classifier::{CursorColumns, GenericColumns};
use crate::decoder::RawTable;
use tokenboard_core::{ModelBreakdown, Result, TokenboardError};
use tracing::debug;

/// Substrings of a lowercased kind value that exclude a row from billing
const NON_BILLABLE_KIND_HINTS: [&str; 2] = ["error", "no charge"];

/// Fallback model name for rows with a blank model cell
const UNKNOWN_MODEL: &str = "unknown";

/// Totals accumulated over the counted rows of one report
#[derive(Debug, Default)]
pub struct Accumulated {
    /// Per-model totals in first-seen order
    pub breakdown: ModelBreakdown,
    /// Requests across all counted rows
    pub total_requests: u64,
    /// Tokens across all counted rows
    pub total_tokens: u64,
    /// Cost in USD across all counted rows
    pub total_cost: f64,
    /// Number of rows that contributed to the totals
    pub row_count: usize,
}

impl Accumulated {
    fn add_row(&mut self, model: &str, tokens: u64, cost: f64) {
        self.breakdown.entry(model).add_row(tokens, cost);
        self.total_requests += 1;
        self.total_tokens += tokens;
        self.total_cost += cost;
        self.row_count += 1;
    }
}

/// Aggregate a Cursor export, skipping errored and no-charge rows
///
/// Fails with the no-data error when every row was skipped, which is
/// distinct from the decoder's empty-input case: here there were rows, just
/// none that bill.
pub fn aggregate_cursor(table: &RawTable, columns: &CursorColumns) -> Result<Accumulated> {
    let mut acc = Accumulated::default();
    let mut skipped = 0usize;

    for row in table.rows() {
        let kind = table.field(row, columns.kind).to_lowercase();
        if NON_BILLABLE_KIND_HINTS.iter().any(|hint| kind.contains(hint)) {
            skipped += 1;
            continue;
        }

        let model = non_blank_model(table.field(row, columns.model));
        let tokens = parse_token_count(table.field(row, columns.tokens));
        let cost = parse_cost(table.field(row, columns.cost));
        acc.add_row(model, tokens, cost);
    }

    if skipped > 0 {
        debug!(skipped, counted = acc.row_count, "skipped non-billable rows");
    }

    if acc.row_count == 0 {
        return Err(TokenboardError::NoUsableRows);
    }
    Ok(acc)
}

/// Aggregate a generic tabular file; every row counts
///
/// Cannot fail: the decoder guarantees at least one row and there is no skip
/// rule. Absent token or cost columns aggregate as zero.
pub fn aggregate_generic(table: &RawTable, columns: &GenericColumns) -> Accumulated {
    let mut acc = Accumulated::default();

    for row in table.rows() {
        let model = non_blank_model(table.field(row, columns.model));
        let tokens = columns
            .tokens
            .map(|col| parse_token_count(table.field(row, col)))
            .unwrap_or(0);
        let cost = columns
            .cost
            .map(|col| parse_cost(table.field(row, col)))
            .unwrap_or(0.0);
        acc.add_row(model, tokens, cost);
    }

    acc
}

fn non_blank_model(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNKNOWN_MODEL
    } else {
        trimmed
    }
}

/// Lenient token parse: the leading digit run of the trimmed value
///
/// "1234 tokens" reads as 1234; a missing, negative, or non-numeric value
/// reads as 0 so one odd cell never sinks the upload.
fn parse_token_count(raw: &str) -> u64 {
    let trimmed = raw.trim();
    let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Lenient cost parse: the leading float prefix of the trimmed value
///
/// "1.25 USD" reads as 1.25. Costs are totals of money spent, so a negative
/// or non-numeric value reads as 0.
fn parse_cost(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let mut end = 0;
    let bytes = trimmed.as_bytes();
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => end += 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                end += 1;
            }
            _ => break,
        }
    }
    trimmed[..end].parse::<f64>().unwrap_or(0.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{ReportFormat, classify};
    use crate::decoder::decode_rows;
    use tokenboard_core::limits::IngestLimits;

    fn cursor_table(csv: &str) -> (RawTable, CursorColumns) {
        let table = decode_rows(csv, None, &IngestLimits::default()).unwrap();
        let ReportFormat::Cursor(columns) = classify(table.headers()).unwrap() else {
            panic!("expected cursor format");
        };
        (table, columns)
    }

    fn generic_table(csv: &str) -> (RawTable, GenericColumns) {
        let table = decode_rows(csv, None, &IngestLimits::default()).unwrap();
        let ReportFormat::Generic(columns) = classify(table.headers()).unwrap() else {
            panic!("expected generic format");
        };
        (table, columns)
    }

    #[test]
    fn errored_and_no_charge_rows_are_invisible() {
        let (table, columns) = cursor_table(
            "Date,Kind,Model,Total Tokens,Cost\n\
             2025-06-01,Errored,gpt-4,500,0.10\n\
             2025-06-01,\"No Charge, credits used\",gpt-4,700,0.00\n\
             2025-06-01,Included,gpt-4,100,0.01\n",
        );
        let acc = aggregate_cursor(&table, &columns).unwrap();
        assert_eq!(acc.row_count, 1);
        assert_eq!(acc.total_tokens, 100);
        assert_eq!(acc.total_requests, 1);
        assert_eq!(acc.breakdown.get("gpt-4").unwrap().requests, 1);
    }

    #[test]
    fn kind_matching_is_case_insensitive_substring() {
        let (table, columns) = cursor_table(
            "Date,Kind,Model,Total Tokens,Cost\n\
             2025-06-01,USAGE-BASED ERROR,gpt-4,500,0.10\n\
             2025-06-01,Included,gpt-4,100,0.01\n",
        );
        let acc = aggregate_cursor(&table, &columns).unwrap();
        assert_eq!(acc.row_count, 1);
    }

    #[test]
    fn all_rows_skipped_is_no_usable_rows() {
        let (table, columns) = cursor_table(
            "Date,Kind,Model,Total Tokens,Cost\n\
             2025-06-01,Errored,gpt-4,500,0.10\n",
        );
        let err = aggregate_cursor(&table, &columns).unwrap_err();
        assert!(matches!(err, TokenboardError::NoUsableRows));
    }

    #[test]
    fn blank_model_becomes_unknown() {
        let (table, columns) = cursor_table(
            "Date,Kind,Model,Total Tokens,Cost\n\
             2025-06-01,Included,  ,100,0.01\n",
        );
        let acc = aggregate_cursor(&table, &columns).unwrap();
        assert_eq!(acc.breakdown.get("unknown").unwrap().tokens, 100);
    }

    #[test]
    fn model_names_are_trimmed_before_keying() {
        let (table, columns) = cursor_table(
            "Date,Kind,Model,Total Tokens,Cost\n\
             2025-06-01,Included, gpt-4 ,100,0.01\n\
             2025-06-01,Included,gpt-4,50,0.01\n",
        );
        let acc = aggregate_cursor(&table, &columns).unwrap();
        assert_eq!(acc.breakdown.len(), 1);
        assert_eq!(acc.breakdown.get("gpt-4").unwrap().tokens, 150);
    }

    #[test]
    fn generic_counts_every_row() {
        let (table, columns) = generic_table(
            "model,tokens\n\
             gpt-4,100\n\
             gpt-4,not-a-number\n",
        );
        let acc = aggregate_generic(&table, &columns);
        assert_eq!(acc.row_count, 2);
        assert_eq!(acc.total_tokens, 100);
        assert_eq!(acc.total_requests, 2);
    }

    #[test]
    fn generic_without_token_or_cost_columns_aggregates_zeros() {
        let (table, columns) = generic_table("model_name,calls\ngpt-4,12\n");
        assert_eq!(columns.tokens, None);
        assert_eq!(columns.cost, None);
        let acc = aggregate_generic(&table, &columns);
        assert_eq!(acc.total_tokens, 0);
        assert_eq!(acc.total_cost, 0.0);
        assert_eq!(acc.total_requests, 1);
    }

    #[test]
    fn token_parse_takes_leading_digits() {
        assert_eq!(parse_token_count("1234"), 1234);
        assert_eq!(parse_token_count(" 1234 "), 1234);
        assert_eq!(parse_token_count("1234 tokens"), 1234);
        assert_eq!(parse_token_count("12.9"), 12);
        assert_eq!(parse_token_count(""), 0);
        assert_eq!(parse_token_count("n/a"), 0);
        assert_eq!(parse_token_count("-50"), 0);
    }

    #[test]
    fn cost_parse_takes_leading_float() {
        assert_eq!(parse_cost("0.25"), 0.25);
        assert_eq!(parse_cost("1.25 USD"), 1.25);
        assert_eq!(parse_cost("3"), 3.0);
        assert_eq!(parse_cost(""), 0.0);
        assert_eq!(parse_cost("$2.00"), 0.0);
        assert_eq!(parse_cost("-4.5"), 0.0);
    }
}
