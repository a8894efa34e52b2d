use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gallery_enrich::{EnrichConfig, Enricher, RunOutcome};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("gallery_enrich=info,met_client=info")),
        )
        .init();

    // Every failure ends here as a log line; the process itself always exits cleanly.
    if let Err(e) = run().await {
        error!("Enrichment run failed: {e:#}");
    }
}

async fn run() -> Result<()> {
    info!("Paintings enrichment starting...");

    let config = EnrichConfig::from_env()?;
    config.log_summary();

    let enricher = Enricher::from_config(config)?;
    match enricher.run().await? {
        RunOutcome::NoIdentifiers => info!("No identifiers found, nothing to do"),
        RunOutcome::UpToDate(stats) => {
            info!(checked = stats.ids_found, "Nothing to do, no new paintings")
        }
        RunOutcome::Written { stats, output_path } => info!(
            added = stats.added,
            total = stats.total_records,
            path = %output_path.display(),
            "{} new item{}",
            stats.added,
            if stats.added == 1 { "" } else { "s" }
        ),
    }

    Ok(())
}
