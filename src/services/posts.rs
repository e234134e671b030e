// src/services/posts.rs

//! Paginated post fetching service.
//!
//! Pulls every search result for a tag, one page at a time, until the
//! configured page cap, a failed page, or an empty page ends the tag.

use std::sync::Arc;

use reqwest::Client;

use crate::error::Result;
use crate::models::{Config, Post};

/// What a single search page means for the pagination loop.
#[derive(Debug)]
pub enum PageOutcome {
    /// Page returned posts; collect them and request the next page
    Batch(Vec<Post>),
    /// Page returned no posts; the tag's results are exhausted
    Empty,
    /// Non-success status; keep what was collected so far and stop this tag
    Failed(u16),
}

/// Fold one page outcome into the running collection.
///
/// Returns `true` when pagination should advance to the next page. A failed
/// page is logged but never surfaced to the caller; partial results for the
/// tag are kept.
fn collect_page(tag: &str, page: u32, outcome: PageOutcome, collected: &mut Vec<Post>) -> bool {
    match outcome {
        PageOutcome::Batch(batch) => {
            collected.extend(batch);
            true
        }
        PageOutcome::Empty => false,
        PageOutcome::Failed(status) => {
            log::warn!("Failed to fetch page {page} for tag {tag} (status {status})");
            false
        }
    }
}

/// Service for fetching search results from the board API.
pub struct PostFetcher {
    config: Arc<Config>,
    client: Client,
}

impl PostFetcher {
    /// Create a fetcher sharing an already-built HTTP client.
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self { config, client }
    }

    /// Fetch all posts for a single tag across sequential pages.
    ///
    /// Connection-level failures propagate and abort the run; a non-success
    /// page only ends this tag's pagination.
    pub async fn fetch_all_for_tag(&self, tag: &str) -> Result<Vec<Post>> {
        let mut collected = Vec::new();
        for page in 1..=self.config.crawler.max_pages {
            let outcome = self.fetch_page(tag, page).await?;
            if !collect_page(tag, page, outcome, &mut collected) {
                break;
            }
        }
        Ok(collected)
    }

    /// Request one search page and classify the response.
    async fn fetch_page(&self, tag: &str, page: u32) -> Result<PageOutcome> {
        let limit = self.config.crawler.page_limit.to_string();
        let page_param = page.to_string();

        let response = self
            .client
            .get(&self.config.crawler.posts_url)
            .query(&[
                ("tags", tag),
                ("limit", limit.as_str()),
                ("page", page_param.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(PageOutcome::Failed(status.as_u16()));
        }

        let body = response.text().await?;
        let batch: Vec<Post> = serde_json::from_str(&body)?;
        Ok(if batch.is_empty() {
            PageOutcome::Empty
        } else {
            PageOutcome::Batch(batch)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(tags: &str) -> Post {
        Post {
            tag_string: tags.to_string(),
            tag_string_artist: String::new(),
        }
    }

    #[test]
    fn test_batch_extends_and_continues() {
        let mut collected = vec![post("a")];
        let keep_going = collect_page(
            "femdom",
            2,
            PageOutcome::Batch(vec![post("b"), post("c")]),
            &mut collected,
        );
        assert!(keep_going);
        assert_eq!(collected.len(), 3);
    }

    #[test]
    fn test_empty_page_stops() {
        let mut collected = vec![post("a")];
        assert!(!collect_page("femdom", 2, PageOutcome::Empty, &mut collected));
        assert_eq!(collected.len(), 1);
    }

    #[test]
    fn test_failed_page_stops_keeping_partial_results() {
        let mut collected = vec![post("a"), post("b")];
        assert!(!collect_page(
            "gokkun",
            3,
            PageOutcome::Failed(500),
            &mut collected
        ));
        assert_eq!(collected.len(), 2);
    }
}
