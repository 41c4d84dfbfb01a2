use thiserror::Error;

/// Classified outcome of a failed backend call
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search timed out")]
    Timeout,

    #[error("no matching records")]
    NotFound,

    /// Network failure, non-2xx status, malformed body. Callers treat all of these alike.
    #[error("search request failed: {0}")]
    Other(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else {
            SearchError::Other(err.to_string())
        }
    }
}
