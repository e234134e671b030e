//! Utility functions and helpers.

pub mod http;

/// Canonical lookup key for an artist display name.
///
/// Catalog names and board artist credits disagree on casing and
/// separators ("Foo_Bar" vs "foo bar"); both sides must go through this
/// before any identity comparison.
pub fn normalize(name: &str) -> String {
    name.replace('_', " ").trim().to_lowercase()
}
