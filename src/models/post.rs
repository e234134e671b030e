//! Post data structure returned by the board search API.

use std::collections::HashSet;

use serde::Deserialize;

/// A post row from a tag search page.
///
/// Both tag fields are whitespace-delimited token lists; the board omits
/// them on some deleted or restricted posts, which degrades to "no tags,
/// no artists" rather than an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Post {
    /// All tags on the post
    #[serde(default)]
    pub tag_string: String,

    /// Artists credited on the post
    #[serde(default)]
    pub tag_string_artist: String,
}

impl Post {
    /// The post's tags as a set of tokens.
    pub fn tag_set(&self) -> HashSet<&str> {
        self.tag_string.split_whitespace().collect()
    }

    /// The artist-credit tokens on the post.
    pub fn artists(&self) -> impl Iterator<Item = &str> {
        self.tag_string_artist.split_whitespace()
    }
}
