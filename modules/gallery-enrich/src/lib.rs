pub mod config;
pub mod dedup;
pub mod pipeline;
pub mod record;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod traits;
pub mod transform;

pub use config::EnrichConfig;
pub use pipeline::{DetailOutcome, EnrichStats, Enricher, RunOutcome};
pub use record::{LocalPaintingRecord, PaintingMetadata};
