// src/pipeline/sync.rs

//! Catalog sync pipeline.

use std::sync::Arc;

use chrono::Utc;

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::aggregate::TagAggregator;
use crate::pipeline::merge::{MergeStats, merge_catalog};
use crate::storage::CatalogStorage;
use crate::utils::http;

/// Run the full mining pipeline: load the catalog, aggregate board tags,
/// merge, and write the updated catalog.
///
/// The output file is written exactly once, only after the entire
/// aggregation and merge complete. A missing or malformed catalog, or a
/// connection-level fault, aborts the run with nothing written.
pub async fn run_sync(config: Arc<Config>, storage: &dyn CatalogStorage) -> Result<MergeStats> {
    let started = Utc::now();
    log::info!("Artist tag sync starting...");

    let catalog = storage.load_catalog().await?;
    log::info!("Loaded {} catalog artists", catalog.len());

    let client = http::create_async_client(&config.crawler)?;
    let aggregator = TagAggregator::new(Arc::clone(&config), client);

    log::info!(
        "Mining {} target tags (up to {} pages each)...",
        config.tags.target_tags.len(),
        config.crawler.max_pages
    );
    let aggregation = aggregator.aggregate().await?;

    let (updated, stats) = merge_catalog(catalog, aggregation, &config.rating);
    storage.write_catalog(&updated).await?;

    let elapsed = Utc::now() - started;
    log::info!(
        "Artists processed: {}, matched existing: {}",
        stats.aggregated,
        stats.matched
    );
    log::info!(
        "Done in {}s. Updated {} existing artists, added {} new ones. Total: {}",
        elapsed.num_seconds(),
        stats.existing,
        stats.added,
        stats.total
    );

    Ok(stats)
}
