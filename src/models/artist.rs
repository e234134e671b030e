//! Artist catalog record and content rating.

use std::collections::BTreeSet;
use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Ordinal content-severity rating for an artist.
///
/// Variants are ordered mildest to most severe, with `Unset` below all of
/// them. `Unset` is the only state the merge pipeline is allowed to
/// overwrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum NsfwLevel {
    #[default]
    Unset,
    Suggestive,
    Ecchi,
    Hentai,
    Extreme,
}

impl NsfwLevel {
    /// Canonical display casing, as persisted in the catalog.
    pub fn as_str(&self) -> &'static str {
        match self {
            NsfwLevel::Unset => "unknown",
            NsfwLevel::Suggestive => "Suggestive",
            NsfwLevel::Ecchi => "Ecchi",
            NsfwLevel::Hentai => "Hentai",
            NsfwLevel::Extreme => "Extreme",
        }
    }

    /// Parse a catalog value. Case-insensitive; empty and "unknown" both
    /// mean the rating was never assigned.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "unknown" => Some(NsfwLevel::Unset),
            "suggestive" => Some(NsfwLevel::Suggestive),
            "ecchi" => Some(NsfwLevel::Ecchi),
            "hentai" => Some(NsfwLevel::Hentai),
            "extreme" => Some(NsfwLevel::Extreme),
            _ => None,
        }
    }

    /// Whether the rating may be auto-assigned by the classifier.
    pub fn is_unset(&self) -> bool {
        matches!(self, NsfwLevel::Unset)
    }
}

impl fmt::Display for NsfwLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NsfwLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NsfwLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NsfwLevel::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("unrecognized nsfwLevel: {raw:?}")))
    }
}

/// One artist's profile in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRecord {
    /// Display name, original casing preserved
    pub artist_name: String,

    /// Content rating; never overwritten once explicitly set
    #[serde(default)]
    pub nsfw_level: NsfwLevel,

    /// Free-form style description
    #[serde(default = "default_art_style")]
    pub art_style: String,

    /// Observed kink tags, persisted sorted and deduplicated
    #[serde(default)]
    pub kink_tags: BTreeSet<String>,
}

fn default_art_style() -> String {
    "Unknown".to_string()
}

impl ArtistRecord {
    /// Create a brand-new record for an artist first seen during mining.
    pub fn new_mined(artist_name: impl Into<String>, kink_tags: BTreeSet<String>) -> Self {
        Self {
            artist_name: artist_name.into(),
            nsfw_level: NsfwLevel::Hentai,
            art_style: default_art_style(),
            kink_tags,
        }
    }

    /// Union freshly observed tags into this record's tag set.
    pub fn merge_tags<I: IntoIterator<Item = String>>(&mut self, tags: I) {
        self.kink_tags.extend(tags);
    }
}
