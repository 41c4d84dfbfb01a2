use crate::config::ClientConfig;
use crate::models::{HealthStatus, SearchResponse, SurveyResponse};
use crate::search::error::SearchError;
use crate::search::traits::SearchBackend;
use crate::search::types::SearchQuery;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const PROPERTY_SEARCH_PATH: &str = "/properties/search";
const SURVEY_SEARCH_PATH: &str = "/surveys/search";
const HEALTH_PATH: &str = "/health";

/// HTTP client for the land-records search API
pub struct PropertySearchClient {
    client: Client,
    base_url: String,
}

impl PropertySearchClient {
    /// Create a client with an explicit base URL and timeout
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("parcel-lookup/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search properties by district, mandal, village and survey number.
    /// `survey_no` is sent as given; trimming is the caller's job.
    pub async fn search_by_ids(
        &self,
        district: &str,
        mandal: &str,
        village: &str,
        survey_no: &str,
    ) -> Result<SearchResponse, SearchError> {
        let params = [
            ("district", district),
            ("mandal", mandal),
            ("village", village),
            ("survey_no", survey_no),
        ];
        self.get_json(PROPERTY_SEARCH_PATH, &params).await
    }

    /// List the survey numbers recorded for a village
    pub async fn search_surveys(
        &self,
        district: &str,
        mandal: &str,
        village: &str,
    ) -> Result<SurveyResponse, SearchError> {
        let params = [("district", district), ("mandal", mandal), ("village", village)];
        self.get_json(SURVEY_SEARCH_PATH, &params).await
    }

    pub async fn health(&self) -> Result<HealthStatus, SearchError> {
        self.get_json(HEALTH_PATH, &[]).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, SearchError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|err| {
                warn!("Request to {} failed: {}", url, err);
                SearchError::from(err)
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("{} returned 404", url);
            return Err(SearchError::NotFound);
        }
        if !status.is_success() {
            warn!("{} returned status: {}", url, status);
            return Err(SearchError::Other(format!("backend returned status {}", status)));
        }

        response.json::<T>().await.map_err(|err| {
            warn!("Failed to read response from {}: {}", url, err);
            SearchError::from(err)
        })
    }
}

#[async_trait]
impl SearchBackend for PropertySearchClient {
    async fn search_properties(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResponse, SearchError> {
        self.search_by_ids(
            &query.district,
            &query.mandal,
            &query.village,
            &query.survey_no,
        )
        .await
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
