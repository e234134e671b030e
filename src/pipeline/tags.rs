// src/pipeline/tags.rs

//! Kink-tag list refresh pipeline.
//!
//! Rebuilds the flat tag list the gallery front-end filters by: the union
//! of tags across core-tagged catalog artists, plus any configured extra
//! candidates that exist on the board.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{ArtistRecord, Config};
use crate::services::TagVerifier;
use crate::storage::CatalogStorage;
use crate::utils::http;

/// Union the tags of every catalog artist whose tag set carries at least
/// one core tag.
fn collect_core_gated_tags(catalog: &[ArtistRecord], core_tags: &[String]) -> BTreeSet<String> {
    let mut tags = BTreeSet::new();
    for artist in catalog {
        if !core_tags.iter().any(|t| artist.kink_tags.contains(t)) {
            continue;
        }
        tags.extend(artist.kink_tags.iter().cloned());
    }
    tags
}

/// Rebuild the published kink-tag list from the catalog and the configured
/// extra candidates.
pub async fn run_tag_refresh(config: Arc<Config>, storage: &dyn CatalogStorage) -> Result<()> {
    let catalog = storage.load_catalog().await?;
    let mut tags = collect_core_gated_tags(&catalog, &config.tags.core_tags);

    let client = http::create_async_client(&config.crawler)?;
    let verifier = TagVerifier::new(Arc::clone(&config), client);

    for tag in &config.tags.extra_tags {
        if verifier.exists(tag).await {
            tags.insert(tag.clone());
        } else {
            log::warn!("Skipped invalid board tag: {tag}");
        }
    }

    let tags: Vec<String> = tags.into_iter().collect();
    storage.write_tag_list(&tags).await?;
    log::info!("Tag list updated with {} tags", tags.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::models::NsfwLevel;

    use super::*;

    fn artist(name: &str, tags: &[&str]) -> ArtistRecord {
        ArtistRecord {
            artist_name: name.to_string(),
            nsfw_level: NsfwLevel::Hentai,
            art_style: "Unknown".to_string(),
            kink_tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_core_gate_on_catalog_entries() {
        let catalog = vec![
            artist("a", &["femdom", "bondage"]),
            artist("b", &["cum", "solo"]),
        ];
        let cores = vec!["femdom".to_string()];

        let tags = collect_core_gated_tags(&catalog, &cores);

        // Only the core-tagged artist contributes
        let got: Vec<&str> = tags.iter().map(String::as_str).collect();
        assert_eq!(got, vec!["bondage", "femdom"]);
    }

    #[test]
    fn test_union_is_sorted_and_deduplicated() {
        let catalog = vec![
            artist("a", &["femdom", "leash"]),
            artist("b", &["femdom", "bdsm"]),
        ];
        let cores = vec!["femdom".to_string()];

        let tags = collect_core_gated_tags(&catalog, &cores);
        let got: Vec<&str> = tags.iter().map(String::as_str).collect();
        assert_eq!(got, vec!["bdsm", "femdom", "leash"]);
    }

    #[test]
    fn test_empty_catalog_yields_no_tags() {
        assert!(collect_core_gated_tags(&[], &["femdom".to_string()]).is_empty());
    }
}
