//! Rating classification from an accumulated tag set.

use std::collections::BTreeSet;

use crate::models::{NsfwLevel, RatingRules};

/// Map a tag set to a content rating.
///
/// Buckets are checked in the order extreme, hentai, ecchi; the first
/// bucket the set intersects wins, and a set matching no bucket falls back
/// to `Suggestive`. The check order is long-standing product behavior and
/// is not a severity ranking.
pub fn classify(tags: &BTreeSet<String>, rules: &RatingRules) -> NsfwLevel {
    let hit = |bucket: &[String]| bucket.iter().any(|t| tags.contains(t));

    if hit(&rules.extreme_tags) {
        NsfwLevel::Extreme
    } else if hit(&rules.hentai_tags) {
        NsfwLevel::Hentai
    } else if hit(&rules.ecchi_tags) {
        NsfwLevel::Ecchi
    } else {
        NsfwLevel::Suggestive
    }
}
