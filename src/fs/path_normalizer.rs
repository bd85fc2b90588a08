//! src/fs/path_normalizer.rs
//! ============================================================================
//! # Path Normalizer: Canonical Record Paths
//!
//! Pure functions mapping a raw entry path to the canonical, slash-delimited,
//! root-relative form every `AssetRecord` carries. Normalization is total over
//! all string inputs: malformed paths are stripped down, never rejected.

/// Canonical separator for record paths.
pub const SEPARATOR: char = '/';

/// Builds the canonical record path for one ingested file.
///
/// - an empty `raw_path` falls back to `fallback_name` (the entry's leaf name);
/// - leading separators are stripped and empty segments collapsed, so the
///   result never contains `//`, a trailing `/` or a leading `/`;
/// - `base_prefix` is cleaned the same way and joined with exactly one
///   separator; an empty `base_prefix` leaves the cleaned path unchanged.
pub fn normalize(base_prefix: &str, raw_path: &str, fallback_name: &str) -> String {
    let raw: &str = if raw_path.is_empty() {
        fallback_name
    } else {
        raw_path
    };

    let cleaned: String = clean(raw);
    let prefix: String = clean(base_prefix);

    match (prefix.is_empty(), cleaned.is_empty()) {
        (true, _) => cleaned,
        (false, true) => prefix,
        (false, false) => format!("{prefix}{SEPARATOR}{cleaned}"),
    }
}

/// Drops leading separators and collapses duplicate or trailing ones by
/// rebuilding the path from its non-empty segments.
fn clean(path: &str) -> String {
    path.split(SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<&str>>()
        .join("/")
}

/// Splits a record path into its folder key and the remainder, if the path is
/// more than one segment deep. Single-segment paths yield `None`.
pub fn split_folder(path: &str) -> Option<(&str, &str)> {
    path.split_once(SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_prefix_with_single_separator() {
        assert_eq!(normalize("uploads", "photos/cat.png", "cat.png"), "uploads/photos/cat.png");
    }

    #[test]
    fn strips_leading_separator() {
        assert_eq!(normalize("uploads", "/photos/cat.png", "cat.png"), "uploads/photos/cat.png");
    }

    #[test]
    fn empty_raw_path_falls_back_to_leaf_name() {
        assert_eq!(normalize("uploads", "", "cat.png"), "uploads/cat.png");
    }

    #[test]
    fn empty_prefix_returns_cleaned_path_unchanged() {
        assert_eq!(normalize("", "/a//b/", "x"), "a/b");
    }

    #[test]
    fn collapses_duplicate_separators_everywhere() {
        assert_eq!(normalize("u//v/", "//a///b.txt", "b.txt"), "u/v/a/b.txt");
    }

    #[test]
    fn totality_over_degenerate_inputs() {
        // No input combination may yield empty segments, a leading separator
        // or a doubled separator.
        let samples = ["", "/", "//", "a", "/a", "a/", "//a//", "a//b", "///"];
        for prefix in samples {
            for raw in samples {
                for fallback in samples {
                    let out = normalize(prefix, raw, fallback);
                    assert!(!out.starts_with(SEPARATOR), "leading sep in {out:?}");
                    assert!(!out.contains("//"), "doubled sep in {out:?}");
                    assert!(!out.ends_with(SEPARATOR), "trailing sep in {out:?}");
                }
            }
        }
    }

    #[test]
    fn split_folder_on_nested_and_flat_paths() {
        assert_eq!(split_folder("a/b/c.txt"), Some(("a", "b/c.txt")));
        assert_eq!(split_folder("root.txt"), None);
    }
}
