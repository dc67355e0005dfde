//! Ingestion limits
//!
//! Size caps exist to bound worst-case latency and memory for a single
//! upload, since the whole file is parsed in memory.

/// Default maximum upload size in bytes (5 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Default maximum number of decoded data rows
pub const DEFAULT_MAX_ROWS: usize = 200_000;

/// Default length of the top-models ranking
pub const DEFAULT_TOP_MODELS_LIMIT: usize = 5;

/// Tunable caps applied while ingesting one report
///
/// # Examples
/// ```
/// use tokenboard_core::limits::IngestLimits;
///
/// let limits = IngestLimits::default().with_max_rows(1_000);
/// assert_eq!(limits.max_rows, 1_000);
/// assert_eq!(limits.max_file_bytes, 5 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IngestLimits {
    /// Maximum accepted input size in bytes
    pub max_file_bytes: u64,
    /// Maximum accepted number of decoded data rows
    pub max_rows: usize,
    /// How many entries the top-models ranking keeps
    pub top_models_limit: usize,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_rows: DEFAULT_MAX_ROWS,
            top_models_limit: DEFAULT_TOP_MODELS_LIMIT,
        }
    }
}

impl IngestLimits {
    /// Override the byte-size cap
    #[must_use]
    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }

    /// Override the row-count cap
    #[must_use]
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    /// Override the top-models limit
    #[must_use]
    pub fn with_top_models_limit(mut self, top_models_limit: usize) -> Self {
        self.top_models_limit = top_models_limit;
        self
    }

    /// The byte cap expressed in whole MiB, for user-facing messages
    pub fn max_file_mib(&self) -> u64 {
        self.max_file_bytes / 1024 / 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_caps() {
        let limits = IngestLimits::default();
        assert_eq!(limits.max_file_bytes, 5_242_880);
        assert_eq!(limits.max_rows, 200_000);
        assert_eq!(limits.top_models_limit, 5);
        assert_eq!(limits.max_file_mib(), 5);
    }
}
