use crate::domain::model::{LookupKey, Resolution};
use crate::domain::ports::{ConfigProvider, RemoteResolver};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Client for the quaero-style search endpoint of the name resolution
/// service.
pub struct QuaeroClient {
    client: Client,
    endpoint: String,
    retry_attempts: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchRecord>,
}

#[derive(Debug, Deserialize)]
struct SearchRecord {
    id: String,
    name: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    aliases: Vec<String>,
}

impl SearchRecord {
    fn into_resolution(self) -> Resolution {
        // The body number travels as a numeric alias.
        let number = self.aliases.iter().find_map(|alias| alias.parse().ok());
        Resolution {
            name: Some(self.name),
            number,
            id: Some(self.id),
        }
    }
}

impl QuaeroClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            retry_attempts: 0,
        }
    }

    pub fn from_config(config: &impl ConfigProvider) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.service_endpoint().to_string(),
            retry_attempts: config.retry_attempts(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.endpoint.trim_end_matches('/'))
    }

    async fn get_with_retry(&self, url: &str, query: Option<&str>) -> Result<reqwest::Response> {
        let mut attempt = 0;
        loop {
            let mut request = self.client.get(url);
            if let Some(q) = query {
                request = request.query(&[("q", q)]);
            }

            match request.send().await {
                Ok(response) => return Ok(response.error_for_status()?),
                Err(e) if attempt < self.retry_attempts => {
                    attempt += 1;
                    tracing::debug!(
                        "request to {} failed ({}), retry {}/{}",
                        url,
                        e,
                        attempt,
                        self.retry_attempts
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Download the full index document, e.g. for `rocks-id update`.
    pub async fn fetch_index(&self, index_url: &str) -> Result<Vec<u8>> {
        tracing::debug!("downloading index from {}", index_url);
        let response = self.get_with_retry(index_url, None).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl RemoteResolver for QuaeroClient {
    async fn resolve(&self, key: &LookupKey) -> Result<Option<Resolution>> {
        let query = key.query();
        tracing::debug!("querying remote service for '{}'", query);

        let response = self.get_with_retry(&self.search_url(), Some(&query)).await?;
        let body: SearchResponse = response.json().await?;

        // Untyped records are accepted, other body types are not.
        Ok(body
            .data
            .into_iter()
            .find(|record| record.kind.as_deref().map_or(true, |kind| kind == "Asteroid"))
            .map(SearchRecord::into_resolution))
    }
}
