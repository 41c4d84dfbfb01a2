use crate::models::SearchResponse;
use crate::search::error::SearchError;
use crate::search::types::SearchQuery;
use async_trait::async_trait;

/// Anything that can answer a property search.
/// The form controller only sees this trait, so tests can swap the HTTP client out.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run a single property search
    async fn search_properties(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResponse, SearchError>;

    /// Name used in log output
    fn backend_name(&self) -> &'static str;
}
