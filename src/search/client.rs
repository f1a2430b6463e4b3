use crate::config::AppConfig;
use crate::models::{CitiesResponse, CompareRequest, CompareResponse, SearchRequest, SearchResponse};
use crate::search::errors::{SearchError, COMPARE_TOO_FEW, COMPARE_TOO_MANY};
use crate::search::traits::SearchBackend;
use crate::store::MAX_COMPARE;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// reqwest client for the `/api/v1` endpoints
pub struct HttpSearchBackend {
    client: Client,
    base_url: String,
}

impl HttpSearchBackend {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("cribinfo-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// Decode a 2xx body, or turn anything else into a status error.
    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, SearchError> {
        let status = response.status();
        if !status.is_success() {
            warn!("Backend returned status: {}", status);
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::from_response(status.as_u16(), &body));
        }
        let body = response.text().await?;
        debug!("Received {} bytes", body.len());
        serde_json::from_str(&body).map_err(|e| SearchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let url = self.url("/search");
        debug!("POST {} query={:?} city={:?}", url, request.query, request.city);

        let response = self.client.post(&url).json(request).send().await?;
        let data: SearchResponse = Self::read(response).await?;

        info!(
            "Search returned {} properties ({:?})",
            data.results.len(),
            data.match_type
        );
        Ok(data)
    }

    async fn cities(&self) -> Result<Vec<String>, SearchError> {
        let url = self.url("/cities");
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let data: CitiesResponse = Self::read(response).await?;
        Ok(data.cities)
    }

    async fn compare(&self, property_ids: &[String]) -> Result<CompareResponse, SearchError> {
        if property_ids.len() < 2 {
            return Err(SearchError::Rejected(COMPARE_TOO_FEW));
        }
        if property_ids.len() > MAX_COMPARE {
            return Err(SearchError::Rejected(COMPARE_TOO_MANY));
        }

        let url = self.url("/compare");
        debug!("POST {} ids={:?}", url, property_ids);

        let request = CompareRequest {
            property_ids: property_ids.to_vec(),
        };
        let response = self.client.post(&url).json(&request).send().await?;
        Self::read(response).await
    }

    fn backend_name(&self) -> &'static str {
        "HTTP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_base_and_version() {
        let config = AppConfig {
            api_url: "https://api.example.com".to_string(),
            ..Default::default()
        };
        let backend = HttpSearchBackend::new(&config).unwrap();
        assert_eq!(backend.url("/search"), "https://api.example.com/api/v1/search");
    }

    #[tokio::test]
    async fn test_compare_bounds_checked_before_request() {
        let config = AppConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let backend = HttpSearchBackend::new(&config).unwrap();

        let one = vec!["a".to_string()];
        let err = backend.compare(&one).await.unwrap_err();
        assert_eq!(err.user_message(), COMPARE_TOO_FEW);

        let six: Vec<String> = (0..6).map(|i| i.to_string()).collect();
        let err = backend.compare(&six).await.unwrap_err();
        assert_eq!(err.user_message(), COMPARE_TOO_MANY);
    }
}
