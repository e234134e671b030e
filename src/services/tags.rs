// src/services/tags.rs

//! Tag existence verification service.
//!
//! Candidate tags are checked against the board's tag search before they
//! are added to the published kink-tag list.

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;

use crate::error::Result;
use crate::models::Config;

/// One row of a tag search response.
#[derive(Debug, Deserialize)]
struct TagEntry {
    #[serde(default)]
    name: String,
}

/// An exact match requires the first row to carry the queried name; the
/// search endpoint also returns prefix matches.
fn first_row_matches(rows: &[TagEntry], tag: &str) -> bool {
    rows.first().is_some_and(|row| row.name == tag)
}

/// Service for verifying that tags exist on the board.
pub struct TagVerifier {
    config: Arc<Config>,
    client: Client,
}

impl TagVerifier {
    /// Create a verifier sharing an already-built HTTP client.
    pub fn new(config: Arc<Config>, client: Client) -> Self {
        Self { config, client }
    }

    /// Check whether a tag exists on the board.
    ///
    /// A verification failure is logged and the tag is treated as valid so
    /// the refresh can still proceed.
    pub async fn exists(&self, tag: &str) -> bool {
        match self.lookup(tag).await {
            Ok(found) => found,
            Err(e) => {
                log::warn!("Could not verify {tag} on the board: {e}");
                true
            }
        }
    }

    async fn lookup(&self, tag: &str) -> Result<bool> {
        let response = self
            .client
            .get(&self.config.crawler.tags_url)
            .query(&[("search[name]", tag), ("limit", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let rows: Vec<TagEntry> = serde_json::from_str(&response.text().await?)?;
        Ok(first_row_matches(&rows, tag))
    }
}
