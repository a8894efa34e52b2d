// ArtworkSource — the two remote calls the job makes, behind one trait.
//
// MetClient is the production implementation. Tests use MockSource from
// `testing`, which answers from in-memory maps: no network.

use async_trait::async_trait;
use met_client::{MetClient, MetObject, SearchQuery, SearchResponse};

#[async_trait]
pub trait ArtworkSource: Send + Sync {
    /// Run a collection search.
    async fn search(&self, query: &SearchQuery) -> met_client::Result<SearchResponse>;

    /// Fetch one object's full record.
    async fn object(&self, object_id: u64) -> met_client::Result<MetObject>;
}

#[async_trait]
impl ArtworkSource for MetClient {
    async fn search(&self, query: &SearchQuery) -> met_client::Result<SearchResponse> {
        MetClient::search(self, query).await
    }

    async fn object(&self, object_id: u64) -> met_client::Result<MetObject> {
        MetClient::object(self, object_id).await
    }
}
