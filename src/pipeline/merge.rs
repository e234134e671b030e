//! Catalog merge engine.
//!
//! Reconciles a freshly aggregated artist-tag map against the loaded
//! catalog: known artists get their tag sets unioned (and a rating filled
//! in when none was ever set), unknown artists are staged as new records
//! and appended after the originals.

use std::collections::HashMap;

use crate::models::{ArtistRecord, RatingRules};
use crate::pipeline::aggregate::ArtistTagMap;
use crate::pipeline::classify::classify;
use crate::utils::normalize;

/// Counters reported after a merge.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeStats {
    /// Distinct artists in the aggregation
    pub aggregated: usize,
    /// Aggregated artists matched to an existing record
    pub matched: usize,
    /// Catalog records before the merge
    pub existing: usize,
    /// New records appended
    pub added: usize,
    /// Final catalog size
    pub total: usize,
}

/// Merge aggregated tags into the catalog.
///
/// Existing records keep their identity — name, style, and any explicitly
/// set rating survive untouched; only `kink_tags` grows and an `Unset`
/// rating may be filled in. Unmatched credits become new records rated
/// `Hentai` unconditionally, appended in credit order after the originals.
pub fn merge_catalog(
    mut catalog: Vec<ArtistRecord>,
    aggregation: ArtistTagMap,
    rules: &RatingRules,
) -> (Vec<ArtistRecord>, MergeStats) {
    let mut stats = MergeStats {
        aggregated: aggregation.len(),
        existing: catalog.len(),
        ..MergeStats::default()
    };

    // Normalized name -> record position. Later records win duplicate keys,
    // matching the front-end's lookup behavior.
    let mut index: HashMap<String, usize> = HashMap::new();
    for (pos, record) in catalog.iter().enumerate() {
        index.insert(normalize(&record.artist_name), pos);
    }

    let mut staged: Vec<ArtistRecord> = Vec::new();
    let mut staged_index: HashMap<String, usize> = HashMap::new();

    for (credit, tags) in aggregation {
        let key = normalize(&credit);

        if let Some(&pos) = index.get(&key) {
            let record = &mut catalog[pos];
            record.merge_tags(tags);
            if record.nsfw_level.is_unset() {
                record.nsfw_level = classify(&record.kink_tags, rules);
            }
            stats.matched += 1;
        } else if let Some(&pos) = staged_index.get(&key) {
            staged[pos].merge_tags(tags);
        } else {
            // The first credit seen for a key fixes the display name
            staged_index.insert(key, staged.len());
            staged.push(ArtistRecord::new_mined(credit, tags));
        }
    }

    stats.added = staged.len();
    catalog.extend(staged);
    stats.total = catalog.len();

    (catalog, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NsfwLevel;

    fn make_artist(name: &str, level: NsfwLevel, tags: &[&str]) -> ArtistRecord {
        ArtistRecord {
            artist_name: name.to_string(),
            nsfw_level: level,
            art_style: "Unknown".to_string(),
            kink_tags: tags.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn aggregation(entries: &[(&str, &[&str])]) -> ArtistTagMap {
        let mut map = ArtistTagMap::new();
        for (artist, tags) in entries {
            map.record(artist, tags.iter().map(|s| s.to_string()));
        }
        map
    }

    #[test]
    fn test_matched_artist_gains_tags_and_rating() {
        let catalog = vec![make_artist("Foo_Bar", NsfwLevel::Unset, &[])];
        let agg = aggregation(&[("foo bar", &["femdom", "trap"])]);

        let (merged, stats) = merge_catalog(catalog, agg, &RatingRules::default());

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].artist_name, "Foo_Bar");
        let tags: Vec<&str> = merged[0].kink_tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["femdom", "trap"]);
        assert_eq!(merged[0].nsfw_level, NsfwLevel::Ecchi);
        assert_eq!(stats.matched, 1);
        assert_eq!(stats.added, 0);
    }

    #[test]
    fn test_explicit_rating_never_overwritten() {
        let catalog = vec![make_artist("Alice", NsfwLevel::Ecchi, &[])];
        let agg = aggregation(&[("alice", &["extreme_insertion"])]);

        let (merged, _) = merge_catalog(catalog, agg, &RatingRules::default());

        // Extreme tags were merged in, the explicit rating survives
        assert!(merged[0].kink_tags.contains("extreme_insertion"));
        assert_eq!(merged[0].nsfw_level, NsfwLevel::Ecchi);
    }

    #[test]
    fn test_unseen_artist_appended_with_hentai_default() {
        let catalog = vec![make_artist("Alice", NsfwLevel::Ecchi, &["femdom"])];
        let agg = aggregation(&[("newbie", &["bondage"])]);

        let (merged, stats) = merge_catalog(catalog, agg, &RatingRules::default());

        assert_eq!(merged.len(), 2);
        let new = &merged[1];
        assert_eq!(new.artist_name, "newbie");
        assert_eq!(new.nsfw_level, NsfwLevel::Hentai);
        assert_eq!(new.art_style, "Unknown");
        let tags: Vec<&str> = new.kink_tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["bondage"]);
        assert_eq!(stats.added, 1);
        assert_eq!(stats.matched, 0);
    }

    #[test]
    fn test_merge_conservation() {
        let catalog = vec![
            make_artist("A", NsfwLevel::Unset, &[]),
            make_artist("B", NsfwLevel::Hentai, &["cum"]),
        ];
        let agg = aggregation(&[
            ("a", &["femdom"]),
            ("new_one", &["trap"]),
            ("new_two", &["pegging"]),
        ]);

        let (merged, stats) = merge_catalog(catalog, agg, &RatingRules::default());

        assert_eq!(merged.len(), stats.existing + stats.added);
        assert_eq!(stats.existing, 2);
        assert_eq!(stats.added, 2);
        assert_eq!(stats.total, 4);
        // Untouched record survives unchanged
        assert_eq!(merged[1], make_artist("B", NsfwLevel::Hentai, &["cum"]));
    }

    #[test]
    fn test_staged_credits_union_across_spellings() {
        // Two raw credits normalize to the same unseen artist
        let agg = aggregation(&[("New_Guy", &["femdom"]), ("new guy", &["bondage"])]);

        let (merged, stats) = merge_catalog(Vec::new(), agg, &RatingRules::default());

        assert_eq!(merged.len(), 1);
        assert_eq!(stats.added, 1);
        // First credit seen (credit order) fixes the display name
        assert_eq!(merged[0].artist_name, "New_Guy");
        let tags: Vec<&str> = merged[0].kink_tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["bondage", "femdom"]);
    }

    #[test]
    fn test_classification_runs_on_unioned_set() {
        // Existing tags alone would rate Ecchi; merged tags push it to Extreme
        let catalog = vec![make_artist("Alice", NsfwLevel::Unset, &["femdom"])];
        let agg = aggregation(&[("alice", &["huge_dildo"])]);

        let (merged, _) = merge_catalog(catalog, agg, &RatingRules::default());
        assert_eq!(merged[0].nsfw_level, NsfwLevel::Extreme);
    }

    #[test]
    fn test_duplicate_catalog_keys_resolve_to_later_record() {
        let catalog = vec![
            make_artist("Same_Name", NsfwLevel::Hentai, &[]),
            make_artist("same name", NsfwLevel::Unset, &[]),
        ];
        let agg = aggregation(&[("same_name", &["femdom"])]);

        let (merged, stats) = merge_catalog(catalog, agg, &RatingRules::default());

        // Both originals survive; only the later one was updated
        assert_eq!(merged.len(), 2);
        assert!(merged[0].kink_tags.is_empty());
        assert!(merged[1].kink_tags.contains("femdom"));
        assert_eq!(stats.matched, 1);
    }
}
