//! Pipeline entry points for mining operations.
//!
//! - `run_sync`: Aggregate board tags and merge them into the catalog
//! - `run_tag_refresh`: Rebuild the published kink-tag list

pub mod aggregate;
pub mod classify;
pub mod merge;
pub mod sync;
pub mod tags;

pub use aggregate::{ArtistTagMap, TagAggregator};
pub use classify::classify;
pub use merge::{MergeStats, merge_catalog};
pub use sync::run_sync;
pub use tags::run_tag_refresh;
