use serde::Deserialize;

use super::{ApiError, City, CityLookup, LookupFuture, LookupOutcome};
use crate::config::ApiConfig;

const CITIES_PATH: &str = "/v1/geo/cities";

/// Envelope of the GeoDB `/v1/geo/cities` response
#[derive(Debug, Deserialize)]
struct CitiesResponse {
    data: Vec<City>,
}

/// HTTP client for the RapidAPI-hosted GeoDB cities endpoint
#[derive(Debug, Clone)]
pub struct GeoDbClient {
    http: reqwest::Client,
    base_url: String,
    key: String,
    host: String,
    limit: u32,
}

impl GeoDbClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url(),
            key: config.key.clone(),
            host: config.host.clone(),
            limit: config.limit,
        }
    }

    /// Point the client at a different origin (e.g. a local stub server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), CITIES_PATH)
    }

    /// Fetch cities for `query`, collapsing every failure into an empty list.
    pub async fn fetch_cities(&self, query: &str) -> Vec<City> {
        self.lookup_cities(query).await.into_cities()
    }

    /// Fetch cities for `query`, logging and reporting failures as data.
    pub async fn lookup_cities(&self, query: &str) -> LookupOutcome {
        match self.request(query).await {
            Ok(cities) => {
                tracing::debug!("Fetched {} cities for {:?}", cities.len(), query);
                LookupOutcome::Found(cities)
            }
            Err(e) => {
                tracing::error!("Failed to fetch cities for {:?}: {}", query, e);
                LookupOutcome::Failed(e)
            }
        }
    }

    async fn request(&self, query: &str) -> Result<Vec<City>, ApiError> {
        let response = self
            .http
            .get(self.endpoint())
            .query(&[("namePrefix", query.to_string()), ("limit", self.limit.to_string())])
            .header("X-RapidAPI-Key", &self.key)
            .header("X-RapidAPI-Host", &self.host)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_cities(&body)
    }
}

impl CityLookup for GeoDbClient {
    fn lookup(&self, query: String) -> LookupFuture {
        let client = self.clone();
        Box::pin(async move { client.lookup_cities(&query).await })
    }
}

/// Decode a cities response body into city records.
pub fn parse_cities(body: &[u8]) -> Result<Vec<City>, ApiError> {
    let response: CitiesResponse = serde_json::from_slice(body)?;
    Ok(response.data)
}
