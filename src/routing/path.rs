//! Path and pattern utilities shared by registration and lookup.

use crate::routing::RouterError;

/// Pattern segment matching any single remaining segment.
pub const WILDCARD: &str = "*";

/// Prefix marking a named parameter segment.
pub const PARAM_PREFIX: char = ':';

/// Split a path (or pattern) into its `/`-delimited segments.
///
/// Leading and trailing separators are stripped first, so `"/"` and `""`
/// both yield no segments. Empty interior segments are kept.
pub fn split_segments(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('/').collect()
}

/// Check wildcard placement in a route pattern.
///
/// Only a trailing `/*` is accepted: the first `*` must be the last
/// character and must follow a separator.
pub fn validate_pattern(pattern: &str) -> Result<(), RouterError> {
    let Some(star) = pattern.find('*') else {
        return Ok(());
    };

    let is_last = star == pattern.len() - 1;
    let after_separator = star > 0 && pattern.as_bytes()[star - 1] == b'/';
    if is_last && after_separator {
        Ok(())
    } else {
        Err(RouterError::InvalidPattern(pattern.to_string()))
    }
}
