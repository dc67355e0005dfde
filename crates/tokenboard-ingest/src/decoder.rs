//! Tabular decoder
//!
//! Turns raw file content into an ordered table of header names and data
//! rows. Decoding favors availability over strictness: rows that fail to
//! parse are dropped with a log line while the rest of the file is used, and
//! only a file where nothing could be recovered is rejected outright.

use csv::{ReaderBuilder, StringRecord, Trim};
use tokenboard_core::limits::IngestLimits;
use tokenboard_core::{Result, TokenboardError};
use tracing::{debug, warn};

/// Decoded tabular content: trimmed headers plus the data rows
///
/// Header order follows the original column order. Rows may be shorter than
/// the header row; missing trailing fields read as empty strings.
#[derive(Debug, Clone)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<StringRecord>,
}

impl RawTable {
    /// Header names, trimmed, in original column order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Decoded data rows in input order
    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    /// Number of decoded data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Read one field by column index; absent fields read as empty
    pub fn field<'a>(&self, row: &'a StringRecord, column: usize) -> &'a str {
        row.get(column).unwrap_or("")
    }
}

/// Decode raw text content into a [`RawTable`]
///
/// `declared_size` is checked against the byte cap before decoding; when the
/// uploader did not declare one, the content length is used. The row cap is
/// checked after decoding. Structural errors are tolerated as long as at
/// least one row was recovered.
pub fn decode_rows(
    content: &str,
    declared_size: Option<u64>,
    limits: &IngestLimits,
) -> Result<RawTable> {
    let input_bytes = declared_size.unwrap_or(content.len() as u64);
    if input_bytes > limits.max_file_bytes {
        return Err(TokenboardError::FileTooLarge {
            max_mib: limits.max_file_mib(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(record) => record.iter().map(str::to_owned).collect(),
        // No usable header row means nothing was recovered at all
        Err(e) => return Err(TokenboardError::Format(e.to_string())),
    };

    let mut rows = Vec::new();
    let mut first_error: Option<csv::Error> = None;
    let mut dropped = 0usize;

    for record in reader.records() {
        match record {
            Ok(row) => {
                // The reader already skips blank lines; this also drops rows
                // where every field is whitespace.
                if row.iter().all(|field| field.trim().is_empty()) {
                    continue;
                }
                rows.push(row);
            }
            Err(e) => {
                dropped += 1;
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    if dropped > 0 {
        warn!(dropped, recovered = rows.len(), "dropped malformed rows");
    }

    if rows.is_empty() {
        if let Some(e) = first_error {
            return Err(TokenboardError::Format(e.to_string()));
        }
        return Err(TokenboardError::EmptyInput);
    }

    if rows.len() > limits.max_rows {
        return Err(TokenboardError::TooManyRows {
            max_rows: limits.max_rows,
        });
    }

    debug!(rows = rows.len(), columns = headers.len(), "decoded table");

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokenboard_core::ErrorKind;

    #[test]
    fn decodes_headers_and_rows() {
        let table = decode_rows(
            " Model , Tokens \na,1\nb,2\n",
            None,
            &IngestLimits::default(),
        )
        .unwrap();
        assert_eq!(table.headers(), &["Model".to_string(), "Tokens".to_string()]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.field(&table.rows()[1], 0), "b");
    }

    #[test]
    fn skips_blank_lines() {
        let table = decode_rows("model,tokens\na,1\n\n\nb,2\n", None, &IngestLimits::default())
            .unwrap();
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn short_rows_read_missing_fields_as_empty() {
        let table = decode_rows("model,tokens,cost\na\n", None, &IngestLimits::default()).unwrap();
        let row = &table.rows()[0];
        assert_eq!(table.field(row, 0), "a");
        assert_eq!(table.field(row, 1), "");
        assert_eq!(table.field(row, 2), "");
    }

    #[test]
    fn empty_file_is_no_data() {
        let err = decode_rows("", None, &IngestLimits::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoData);
    }

    #[test]
    fn header_only_is_no_data() {
        let err = decode_rows("model,tokens\n", None, &IngestLimits::default()).unwrap_err();
        assert!(matches!(err, TokenboardError::EmptyInput));
    }

    #[test]
    fn declared_size_over_cap_is_rejected() {
        let limits = IngestLimits::default();
        let err = decode_rows("model\na\n", Some(limits.max_file_bytes + 1), &limits).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Size);
    }

    #[test]
    fn oversized_content_is_rejected_without_declared_size() {
        let limits = IngestLimits::default().with_max_file_bytes(16);
        let err = decode_rows("model,tokens\na,1\nb,2\n", None, &limits).unwrap_err();
        assert!(matches!(err, TokenboardError::FileTooLarge { .. }));
    }

    #[test]
    fn row_cap_is_checked_after_decoding() {
        let limits = IngestLimits::default().with_max_rows(2);
        let err = decode_rows("model\na\nb\nc\n", None, &limits).unwrap_err();
        assert!(matches!(err, TokenboardError::TooManyRows { max_rows: 2 }));
    }

    #[test]
    fn quoted_fields_with_commas_stay_one_field() {
        let table = decode_rows(
            "kind,model\n\"No Charge, credits used\",auto\n",
            None,
            &IngestLimits::default(),
        )
        .unwrap();
        assert_eq!(table.field(&table.rows()[0], 0), "No Charge, credits used");
    }
}
