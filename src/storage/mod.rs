//! Storage abstractions for catalog persistence.
//!
//! The catalog lives in flat JSON files next to the tool:
//!
//! ```text
//! data/
//! ├── config.toml           # Optional configuration overrides
//! ├── artists.json          # Input catalog (never mutated)
//! ├── updated_artists.json  # Output catalog, written once per sync
//! └── kink-tags.json        # Published tag list for the front-end
//! ```
//!
//! The input file is read once at the start of a run; the output is
//! written exactly once after the merge completes, atomically.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ArtistRecord;

// Re-export for convenience
pub use local::LocalStorage;

/// Backend for loading and persisting the artist catalog.
#[async_trait]
pub trait CatalogStorage: Send + Sync {
    /// Load the input catalog. A missing or malformed file is an error —
    /// there is nothing to merge against.
    async fn load_catalog(&self) -> Result<Vec<ArtistRecord>>;

    /// Write the merged catalog to the output file.
    async fn write_catalog(&self, records: &[ArtistRecord]) -> Result<()>;

    /// Write the refreshed kink-tag list.
    async fn write_tag_list(&self, tags: &[String]) -> Result<()>;
}
