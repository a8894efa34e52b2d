// Test mocks for the enrichment pipeline.
//
// MockSource (ArtworkSource) answers searches and object lookups from
// in-memory maps and records which object IDs were requested.
//
// Plus fixture helpers for Met object payloads and a config that points
// at a scratch directory with pacing disabled.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use met_client::{MetError, MetObject, SearchQuery, SearchResponse};
use serde_json::{json, Value};

use crate::config::EnrichConfig;
use crate::traits::ArtworkSource;

// ---------------------------------------------------------------------------
// MockSource
// ---------------------------------------------------------------------------

/// Map-based artwork source. Unregistered objects answer with a 404.
/// Builder pattern: `.with_ids()`, `.on_object()`, `.failing_search()`.
pub struct MockSource {
    search: Result<SearchResponse, u16>,
    objects: HashMap<u64, MetObject>,
    searches: Mutex<Vec<SearchQuery>>,
    requested: Mutex<Vec<u64>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            search: Ok(SearchResponse {
                total: 0,
                object_ids: None,
            }),
            objects: HashMap::new(),
            searches: Mutex::new(Vec::new()),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Search answers with these IDs (and `total` equal to their count).
    pub fn with_ids(mut self, ids: &[u64]) -> Self {
        self.search = Ok(SearchResponse {
            total: ids.len() as u64,
            object_ids: Some(ids.to_vec()),
        });
        self
    }

    /// Search answers with the given HTTP status instead of results.
    pub fn failing_search(mut self, status: u16) -> Self {
        self.search = Err(status);
        self
    }

    /// Register a raw object payload, as the API would send it.
    pub fn on_object(mut self, payload: Value) -> Self {
        let object: MetObject =
            serde_json::from_value(payload).expect("MockSource: payload is not a Met object");
        self.objects.insert(object.object_id, object);
        self
    }

    /// Object IDs requested so far, in order.
    pub fn requested(&self) -> Vec<u64> {
        self.requested.lock().unwrap().clone()
    }

    /// Search queries issued so far.
    pub fn searches(&self) -> Vec<SearchQuery> {
        self.searches.lock().unwrap().clone()
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArtworkSource for MockSource {
    async fn search(&self, query: &SearchQuery) -> met_client::Result<SearchResponse> {
        self.searches.lock().unwrap().push(query.clone());
        match &self.search {
            Ok(resp) => Ok(resp.clone()),
            Err(status) => Err(MetError::Api {
                endpoint: "search".to_string(),
                status: *status,
                message: "MockSource: search failure".to_string(),
            }),
        }
    }

    async fn object(&self, object_id: u64) -> met_client::Result<MetObject> {
        self.requested.lock().unwrap().push(object_id);
        self.objects.get(&object_id).cloned().ok_or_else(|| MetError::Api {
            endpoint: format!("objects/{object_id}"),
            status: 404,
            message: format!("MockSource: no object registered for {object_id}"),
        })
    }
}

#[async_trait]
impl<T: ArtworkSource + ?Sized> ArtworkSource for std::sync::Arc<T> {
    async fn search(&self, query: &SearchQuery) -> met_client::Result<SearchResponse> {
        (**self).search(query).await
    }

    async fn object(&self, object_id: u64) -> met_client::Result<MetObject> {
        (**self).object(object_id).await
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A complete object payload with an oil-on-canvas medium and an 1880s date.
pub fn met_object(object_id: u64, title: &str, artist: &str) -> Value {
    json!({
        "objectID": object_id,
        "isHighlight": true,
        "isPublicDomain": true,
        "primaryImage": format!("https://images.metmuseum.org/CRDImages/ep/original/{object_id}.jpg"),
        "department": "European Paintings",
        "title": title,
        "artistDisplayName": artist,
        "objectDate": "1884",
        "objectBeginDate": 1884,
        "objectEndDate": 1884,
        "medium": "Oil on canvas",
        "tags": [
            {"term": "Landscapes"},
            {"term": "Boats"},
            {"term": "Rivers"},
            {"term": "Trees"}
        ]
    })
}

/// An object payload without an image, as the API returns for restricted works.
pub fn imageless_object(object_id: u64, title: &str, artist: &str) -> Value {
    let mut payload = met_object(object_id, title, artist);
    payload["primaryImage"] = json!("");
    payload
}

/// Config rooted in `dir`, with no pacing delay.
pub fn test_config(dir: &Path) -> EnrichConfig {
    EnrichConfig {
        api_base_url: "http://met.invalid".to_string(),
        pacing: Duration::ZERO,
        input_path: dir.join("paintings.js"),
        output_path: dir.join("paintings-enhanced.js"),
        ..EnrichConfig::default()
    }
}
