use crate::models::{CompareResponse, SearchRequest, SearchResponse};
use crate::search::errors::SearchError;
use async_trait::async_trait;

/// Backend that answers natural-language property searches.
/// The HTTP client implements it; tests substitute in-memory fakes.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Run one search
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;

    /// Cities the backend has listings for
    async fn cities(&self) -> Result<Vec<String>, SearchError>;

    /// Fetch full records for 2 to 5 properties
    async fn compare(&self, property_ids: &[String]) -> Result<CompareResponse, SearchError>;

    /// Name used in logs
    fn backend_name(&self) -> &'static str;
}
