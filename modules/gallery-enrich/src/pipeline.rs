use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use met_client::{Artwork, MetClient, SearchQuery};
use tracing::{debug, info, warn};

use crate::config::EnrichConfig;
use crate::dedup;
use crate::record::LocalPaintingRecord;
use crate::store;
use crate::traits::ArtworkSource;
use crate::transform;

/// Stats from an enrichment run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnrichStats {
    pub existing_records: usize,
    pub ids_found: usize,
    pub ids_repeated: usize,
    pub fetch_failed: usize,
    pub incomplete: usize,
    pub duplicates_skipped: usize,
    pub added: usize,
    pub total_records: usize,
}

impl std::fmt::Display for EnrichStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Enrichment Run Complete ===")?;
        writeln!(f, "Existing records:   {}", self.existing_records)?;
        writeln!(f, "Object IDs found:   {}", self.ids_found)?;
        writeln!(f, "Repeated IDs:       {}", self.ids_repeated)?;
        writeln!(f, "Fetch failures:     {}", self.fetch_failed)?;
        writeln!(f, "Incomplete records: {}", self.incomplete)?;
        writeln!(f, "Duplicates skipped: {}", self.duplicates_skipped)?;
        writeln!(f, "New items:          {}", self.added)?;
        write!(f, "Total records:      {}", self.total_records)
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The search produced no identifiers; nothing was fetched or written.
    NoIdentifiers,
    /// Every fetched item was a duplicate or unusable; nothing was written.
    UpToDate(EnrichStats),
    /// New items were appended and the artifact was written.
    Written {
        stats: EnrichStats,
        output_path: PathBuf,
    },
}

impl RunOutcome {
    pub fn stats(&self) -> Option<&EnrichStats> {
        match self {
            RunOutcome::NoIdentifiers => None,
            RunOutcome::UpToDate(stats) | RunOutcome::Written { stats, .. } => Some(stats),
        }
    }
}

/// Result of fetching one object's detail record.
#[derive(Debug)]
pub enum DetailOutcome {
    Found(Artwork),
    /// Transport failure, non-2xx status or undecodable body.
    Failed,
    /// Decoded, but image, title or artist is missing.
    Incomplete,
}

impl DetailOutcome {
    pub fn artwork(self) -> Option<Artwork> {
        match self {
            DetailOutcome::Found(artwork) => Some(artwork),
            DetailOutcome::Failed | DetailOutcome::Incomplete => None,
        }
    }
}

/// Everything one run accumulates. Created in `run`, dropped when it returns.
struct RunState {
    existing: Vec<LocalPaintingRecord>,
    added: Vec<LocalPaintingRecord>,
    processed_ids: HashSet<u64>,
    stats: EnrichStats,
}

impl RunState {
    fn new(existing: Vec<LocalPaintingRecord>) -> Self {
        let stats = EnrichStats {
            existing_records: existing.len(),
            ..Default::default()
        };
        Self {
            existing,
            added: Vec::new(),
            processed_ids: HashSet::new(),
            stats,
        }
    }

    fn is_duplicate(&self, candidate: &LocalPaintingRecord) -> bool {
        dedup::is_duplicate(candidate, self.existing.iter().chain(&self.added))
    }

    /// Existing records first, then new ones in processing order.
    fn into_collection(self) -> (Vec<LocalPaintingRecord>, EnrichStats) {
        let mut collection = self.existing;
        collection.extend(self.added);
        (collection, self.stats)
    }
}

pub struct Enricher {
    source: Box<dyn ArtworkSource>,
    config: EnrichConfig,
}

impl Enricher {
    pub fn new(source: Box<dyn ArtworkSource>, config: EnrichConfig) -> Self {
        Self { source, config }
    }

    /// Build an enricher backed by the live Met API.
    pub fn from_config(config: EnrichConfig) -> Result<Self> {
        let client = MetClient::new(&config.api_base_url, config.request_timeout)
            .context("Failed to build Met API client")?;
        Ok(Self::new(Box::new(client), config))
    }

    /// Run one enrichment pass: load, search, process each item, persist.
    pub async fn run(&self) -> Result<RunOutcome> {
        info!("Starting paintings enrichment run");

        let mut state = RunState::new(self.load_existing());

        let object_ids = self.fetch_object_ids().await;
        if object_ids.is_empty() {
            info!("No object IDs found, nothing to process");
            return Ok(RunOutcome::NoIdentifiers);
        }
        state.stats.ids_found = object_ids.len();

        for (index, &object_id) in object_ids.iter().enumerate() {
            if index > 0 && !self.config.pacing.is_zero() {
                tokio::time::sleep(self.config.pacing).await;
            }
            info!(object_id, item = index + 1, of = object_ids.len(), "Processing object");
            self.process_object(&mut state, object_id).await;
        }

        state.stats.added = state.added.len();
        if state.added.is_empty() {
            state.stats.total_records = state.existing.len();
            info!("No new paintings, collection is already up to date");
            info!("{}", state.stats);
            return Ok(RunOutcome::UpToDate(state.stats));
        }

        let (collection, mut stats) = state.into_collection();
        stats.total_records = collection.len();

        let output_path = self.config.output_path.clone();
        self.persist(&collection)?;

        info!(
            added = stats.added,
            total = stats.total_records,
            path = %output_path.display(),
            "Collection written"
        );
        info!("{stats}");

        Ok(RunOutcome::Written { stats, output_path })
    }

    async fn process_object(&self, state: &mut RunState, object_id: u64) {
        if !state.processed_ids.insert(object_id) {
            debug!(object_id, "Object already processed in this run, skipping");
            state.stats.ids_repeated += 1;
            return;
        }

        let artwork = match self.fetch_artwork(object_id).await {
            DetailOutcome::Found(artwork) => artwork,
            DetailOutcome::Failed => {
                state.stats.fetch_failed += 1;
                return;
            }
            DetailOutcome::Incomplete => {
                state.stats.incomplete += 1;
                return;
            }
        };

        let record = transform::to_local_record(&artwork);
        if state.is_duplicate(&record) {
            info!(object_id, title = %record.title, artist = %record.artist, "Skipping duplicate painting");
            state.stats.duplicates_skipped += 1;
            return;
        }

        info!(object_id, title = %record.title, artist = %record.artist, style = %record.style, "Added painting");
        state.added.push(record);
    }

    /// Search for candidate object IDs, capped at the configured limit.
    ///
    /// Any failure is logged and yields an empty list; the caller ends the
    /// run early instead of erroring.
    pub async fn fetch_object_ids(&self) -> Vec<u64> {
        let query = SearchQuery::highlights(self.config.department_id, &self.config.keyword);

        match self.source.search(&query).await {
            Ok(resp) => {
                let ids: Vec<u64> = resp.ids().iter().copied().take(self.config.limit).collect();
                info!(
                    total = resp.total,
                    taking = ids.len(),
                    department_id = query.department_id,
                    q = %query.q,
                    "Collection search complete"
                );
                ids
            }
            Err(e) => {
                warn!(error = %e, "Collection search failed");
                Vec::new()
            }
        }
    }

    /// Fetch and validate one object. Never errors; failures are logged
    /// and reported as a non-`Found` outcome so the batch can continue.
    pub async fn fetch_artwork(&self, object_id: u64) -> DetailOutcome {
        let object = match self.source.object(object_id).await {
            Ok(object) => object,
            Err(e) => {
                warn!(object_id, status = ?e.status(), error = %e, "Failed to fetch object");
                return DetailOutcome::Failed;
            }
        };

        match object.validate() {
            Ok(artwork) => DetailOutcome::Found(artwork),
            Err(incomplete) => {
                warn!(object_id, missing = ?incomplete.missing, "Object record incomplete, skipping");
                DetailOutcome::Incomplete
            }
        }
    }

    /// Load the prior collection. A missing or unreadable file means an
    /// empty starting collection, never a failed run.
    fn load_existing(&self) -> Vec<LocalPaintingRecord> {
        let path = &self.config.input_path;
        match store::load_existing(path) {
            Ok(Some(records)) => {
                info!(count = records.len(), path = %path.display(), "Loaded existing collection");
                records
            }
            Ok(None) => {
                info!(path = %path.display(), "No existing collection found, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Could not load existing collection, starting empty");
                Vec::new()
            }
        }
    }

    fn persist(&self, collection: &[LocalPaintingRecord]) -> Result<()> {
        let path = &self.config.output_path;
        let contents = store::render_artifact(collection, Utc::now())?;
        store::write_artifact(path, &contents)
            .with_context(|| format!("Failed to persist collection to {}", path.display()))?;
        Ok(())
    }
}
