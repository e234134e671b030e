//! Application configuration structures.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and pagination behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Target and core tag lists driving aggregation
    #[serde(default)]
    pub tags: TagConfig,

    /// Rating bucket rules for the classifier
    #[serde(default)]
    pub rating: RatingRules,

    /// Catalog file locations
    #[serde(default)]
    pub paths: PathsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.page_limit == 0 {
            return Err(AppError::validation("crawler.page_limit must be > 0"));
        }
        if self.crawler.max_pages == 0 {
            return Err(AppError::validation("crawler.max_pages must be > 0"));
        }
        if self.tags.target_tags.is_empty() {
            return Err(AppError::validation("No target tags defined"));
        }
        if self.tags.core_tags.is_empty() {
            return Err(AppError::validation("No core tags defined"));
        }
        if self.paths.catalog_file == self.paths.output_file {
            return Err(AppError::validation(
                "paths.output_file must differ from paths.catalog_file",
            ));
        }
        Ok(())
    }
}

/// HTTP client and pagination behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Post search endpoint URL
    #[serde(default = "defaults::posts_url")]
    pub posts_url: String,

    /// Tag search endpoint URL
    #[serde(default = "defaults::tags_url")]
    pub tags_url: String,

    /// Results requested per page
    #[serde(default = "defaults::page_limit")]
    pub page_limit: u32,

    /// Maximum pages fetched per tag
    #[serde(default = "defaults::max_pages")]
    pub max_pages: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            posts_url: defaults::posts_url(),
            tags_url: defaults::tags_url(),
            page_limit: defaults::page_limit(),
            max_pages: defaults::max_pages(),
        }
    }
}

/// Tag lists driving aggregation and the tag-list refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagConfig {
    /// Tags searched for and recorded against artists
    #[serde(default = "defaults::target_tags")]
    pub target_tags: Vec<String>,

    /// Tags a post must carry before it counts at all
    #[serde(default = "defaults::core_tags")]
    pub core_tags: Vec<String>,

    /// Candidate tags added to the tag list after board verification
    #[serde(default = "defaults::extra_tags")]
    pub extra_tags: Vec<String>,
}

impl TagConfig {
    /// All tags that may be attributed to an artist on a qualifying post.
    pub fn attributable_tags(&self) -> impl Iterator<Item = &str> {
        self.target_tags
            .iter()
            .chain(self.core_tags.iter())
            .map(String::as_str)
    }

    /// Check whether a post tag set carries at least one core tag.
    pub fn has_core_tag(&self, post_tags: &HashSet<&str>) -> bool {
        self.core_tags.iter().any(|t| post_tags.contains(t.as_str()))
    }
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            target_tags: defaults::target_tags(),
            core_tags: defaults::core_tags(),
            extra_tags: defaults::extra_tags(),
        }
    }
}

/// Ordered rating buckets checked by the classifier.
///
/// Buckets are checked in field order: extreme, hentai, ecchi. The order is
/// part of the product behavior and does not follow severity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingRules {
    #[serde(default = "defaults::extreme_tags")]
    pub extreme_tags: Vec<String>,

    #[serde(default = "defaults::hentai_tags")]
    pub hentai_tags: Vec<String>,

    #[serde(default = "defaults::ecchi_tags")]
    pub ecchi_tags: Vec<String>,
}

impl Default for RatingRules {
    fn default() -> Self {
        Self {
            extreme_tags: defaults::extreme_tags(),
            hentai_tags: defaults::hentai_tags(),
            ecchi_tags: defaults::ecchi_tags(),
        }
    }
}

/// Catalog file locations, relative to the data directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Input catalog file
    #[serde(default = "defaults::catalog_file")]
    pub catalog_file: String,

    /// Output catalog file (never the same file as the input)
    #[serde(default = "defaults::output_file")]
    pub output_file: String,

    /// Output file for the refreshed kink-tag list
    #[serde(default = "defaults::tags_file")]
    pub tags_file: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            catalog_file: defaults::catalog_file(),
            output_file: defaults::output_file(),
            tags_file: defaults::tags_file(),
        }
    }
}

mod defaults {
    // Crawler defaults
    pub fn user_agent() -> String {
        "kink-artist-explorer/3.5".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn posts_url() -> String {
        "https://danbooru.donmai.us/posts.json".into()
    }
    pub fn tags_url() -> String {
        "https://danbooru.donmai.us/tags.json".into()
    }
    pub fn page_limit() -> u32 {
        100
    }
    pub fn max_pages() -> u32 {
        20
    }

    // Tag defaults
    pub fn target_tags() -> Vec<String> {
        [
            "public_humiliation",
            "humiliation",
            "foot_domination",
            "gokkun",
            "cum_in_mouth",
            "extreme_insertion",
            "large_insertion",
            "huge_dildo",
            "dildo_riding",
            "object_insertion",
            "object_insertion_from_behind",
            "anal_object_insertion",
            "tentacle_pit",
            "trap",
            "otoko_no_ko",
            "chastity_cage",
            "orgasm_denial",
            "urethral_insertion",
            "sounding",
            "dominatrix",
            "strap-on",
            "holding_key",
            "nipple_piercing",
            "small_penis",
            "cum",
            "bondage",
        ]
        .map(String::from)
        .to_vec()
    }
    pub fn core_tags() -> Vec<String> {
        ["femdom", "pegging", "trap", "chastity_cage"]
            .map(String::from)
            .to_vec()
    }
    pub fn extra_tags() -> Vec<String> {
        [
            "bdsm",
            "hypnosis",
            "leash",
            "pet_play",
            "spanking",
            "tickling",
        ]
        .map(String::from)
        .to_vec()
    }

    // Rating bucket defaults
    pub fn extreme_tags() -> Vec<String> {
        [
            "extreme_insertion",
            "large_insertion",
            "huge_dildo",
            "anal_object_insertion",
        ]
        .map(String::from)
        .to_vec()
    }
    pub fn hentai_tags() -> Vec<String> {
        [
            "cum_in_mouth",
            "gokkun",
            "dildo_riding",
            "object_insertion",
            "public_humiliation",
            "tentacle_pit",
        ]
        .map(String::from)
        .to_vec()
    }
    pub fn ecchi_tags() -> Vec<String> {
        [
            "femdom",
            "pegging",
            "trap",
            "chastity_cage",
            "humiliation",
            "foot_domination",
        ]
        .map(String::from)
        .to_vec()
    }

    // Path defaults
    pub fn catalog_file() -> String {
        "artists.json".into()
    }
    pub fn output_file() -> String {
        "updated_artists.json".into()
    }
    pub fn tags_file() -> String {
        "kink-tags.json".into()
    }
}
