use std::time::Duration;

/// Backend the CLI talks to when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Client-side deadline for a single search, measured from request start
pub const DEFAULT_TIMEOUT_MS: u64 = 7000;

/// Connection settings for the search backend
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_millis(7000));
    }

    #[test]
    fn test_trailing_slashes_are_stripped() {
        let config = ClientConfig::new("http://records.local/api//");
        assert_eq!(config.base_url, "http://records.local/api");
    }
}
