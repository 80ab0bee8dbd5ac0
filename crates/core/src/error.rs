//! Unified error types for psyfind.
//!
//! Fetch and parse failures are caught at the smallest possible scope
//! (per page, per field, per detail fetch) and degraded to fallback
//! values; none of these variants should abort a pipeline run.

/// Unified error types shared across the psyfind crates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., unknown source name).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Network failure or non-2xx HTTP response.
    #[error("HTTP_ERROR: {0}")]
    HttpError(String),

    /// Request exceeded its fixed timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// URL could not be parsed or resolved.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Selector or attribute extraction failure.
    #[error("PARSE_FAILED: {0}")]
    ParseFailed(String),

    /// Neither the allow-list nor the deny-list matched.
    #[error("CLASSIFICATION_AMBIGUOUS: {0}")]
    ClassificationAmbiguous(String),

    /// No valid cache entry for the given key. A normal miss, not a fault.
    #[error("CACHE_MISS: {0}")]
    CacheMiss(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CacheMiss("clubberia_events".to_string());
        assert!(err.to_string().contains("CACHE_MISS"));
        assert!(err.to_string().contains("clubberia_events"));
    }

    #[test]
    fn test_http_error_display() {
        let err = Error::HttpError("status 503".to_string());
        assert!(err.to_string().contains("HTTP_ERROR"));
    }
}
