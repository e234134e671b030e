//! Artist-tag aggregation across tag searches.
//!
//! Drives the post fetcher over every target tag and accumulates the set
//! of observed target/core tags per credited artist. Posts only count when
//! they carry at least one core tag; once a post qualifies, every matching
//! tag on it is attributed to every artist credited on it.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use reqwest::Client;

use crate::error::Result;
use crate::models::{Config, Post, TagConfig};
use crate::services::PostFetcher;

/// Mapping from raw artist-credit string to the set of tags observed on
/// that artist's qualifying posts.
///
/// Owned container built fresh per run and consumed by the merge engine.
/// Iteration is ordered by credit string, so a given input always produces
/// the same output catalog.
#[derive(Debug, Clone, Default)]
pub struct ArtistTagMap {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl ArtistTagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct artists seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Union tags into an artist's entry, creating the entry when the
    /// artist is first seen.
    pub fn record<I>(&mut self, artist: &str, tags: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.entries
            .entry(artist.to_string())
            .or_default()
            .extend(tags);
    }

    /// Tags observed for one artist, if any.
    pub fn get(&self, artist: &str) -> Option<&BTreeSet<String>> {
        self.entries.get(artist)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.entries.iter()
    }
}

impl IntoIterator for ArtistTagMap {
    type Item = (String, BTreeSet<String>);
    type IntoIter = std::collections::btree_map::IntoIter<String, BTreeSet<String>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Fold one post into the aggregation.
///
/// A post without a core tag contributes nothing, no matter how many
/// target tags it carries.
fn accumulate_post(map: &mut ArtistTagMap, post: &Post, tags: &TagConfig) {
    let post_tags = post.tag_set();
    if !tags.has_core_tag(&post_tags) {
        return;
    }

    let observed: Vec<String> = tags
        .attributable_tags()
        .filter(|t| post_tags.contains(t))
        .map(String::from)
        .collect();

    for artist in post.artists() {
        map.record(artist, observed.iter().cloned());
    }
}

/// Service driving per-tag fetches into an aggregated artist-tag map.
pub struct TagAggregator {
    config: Arc<Config>,
    fetcher: PostFetcher,
}

impl TagAggregator {
    /// Create an aggregator sharing an already-built HTTP client.
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        let fetcher = PostFetcher::new(Arc::clone(&config), client);
        Self { config, fetcher }
    }

    /// Aggregate observed tags per artist across every target tag search.
    ///
    /// Tags are fetched strictly one at a time, each tag's pagination
    /// completing before the next begins, so the map is never shared.
    pub async fn aggregate(&self) -> Result<ArtistTagMap> {
        let mut map = ArtistTagMap::new();

        for tag in &self.config.tags.target_tags {
            let posts = self.fetcher.fetch_all_for_tag(tag).await?;
            log::debug!("{}: {} posts fetched", tag, posts.len());

            for post in &posts {
                accumulate_post(&mut map, post, &self.config.tags);
            }
        }

        Ok(map)
    }
}
