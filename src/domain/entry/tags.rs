use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Split a comma-separated input into trimmed, non-empty pieces
///
/// Order and duplicates are kept; `normalize_tags` turns the result into a set.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// Sorted, deduplicated tag list with blank tags dropped
pub fn normalize_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// How a batch tag edit combines with the tags already stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagMode {
    /// Union with the existing tags
    Add,
    /// Discard the existing tags
    Replace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_drops_empty() {
        assert_eq!(
            parse_tags(" night , ,snow,  rain  ,"),
            vec!["night", "snow", "rain"]
        );
        assert!(parse_tags("  ,  , ").is_empty());
        assert!(parse_tags("").is_empty());
    }

    #[test]
    fn test_normalize_sorts_and_dedupes() {
        let tags = vec!["snow".to_string(), "night".to_string(), "snow".to_string()];
        assert_eq!(normalize_tags(tags), vec!["night", "snow"]);
    }
}
