pub mod error;
pub mod types;

pub use error::{MetError, Result};
pub use types::{Artwork, IncompleteObject, MetObject, SearchQuery, SearchResponse, Tag};

use std::time::Duration;

use serde::de::DeserializeOwned;

pub const DEFAULT_BASE_URL: &str = "https://collectionapi.metmuseum.org/public/collection/v1";

const USER_AGENT: &str = concat!("met-client/", env!("CARGO_PKG_VERSION"));

/// Client for the Metropolitan Museum of Art Open Access collection API.
pub struct MetClient {
    client: reqwest::Client,
    base_url: String,
}

impl MetClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Run a collection search. Returns the total hit count and matching object IDs.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(%url, department_id = query.department_id, q = %query.q, "Searching collection");

        let resp = self.client.get(&url).query(query).send().await?;
        Self::decode("search", resp).await
    }

    /// Fetch the full record for one object.
    pub async fn object(&self, object_id: u64) -> Result<MetObject> {
        let url = format!("{}/objects/{}", self.base_url, object_id);
        tracing::debug!(%url, object_id, "Fetching object");

        let resp = self.client.get(&url).send().await?;
        Self::decode(&format!("objects/{object_id}"), resp).await
    }

    async fn decode<T: DeserializeOwned>(endpoint: &str, resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MetError::Api {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| MetError::Parse {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}
