//! Change-type synonyms and the template each one selects

use serde::Serialize;

/// Template used when nothing in [`TYPE_MAPPING`] matches
pub const DEFAULT_TEMPLATE: &str = "feature.md";

/// Synonym to template filename, in match priority order
///
/// Substring matches take the first entry that applies, so earlier rows win.
pub const TYPE_MAPPING: &[(&str, &str)] = &[
    ("bug", "bug.md"),
    ("bugfix", "bug.md"),
    ("fix", "bug.md"),
    ("feature", "feature.md"),
    ("feat", "feature.md"),
    ("enhancement", "feature.md"),
    ("docs", "docs.md"),
    ("documentation", "docs.md"),
    ("doc", "docs.md"),
    ("refactor", "refactor.md"),
    ("refactoring", "refactor.md"),
    ("cleanup", "refactor.md"),
    ("test", "test.md"),
    ("tests", "test.md"),
    ("testing", "test.md"),
    ("performance", "performance.md"),
    ("perf", "performance.md"),
    ("optimization", "performance.md"),
    ("security", "security.md"),
    ("sec", "security.md"),
];

/// Templates of the fixed catalog with their display labels
pub const FIXED_CATALOG: &[(&str, &str)] = &[
    ("bug.md", "Bug Fix"),
    ("feature.md", "Feature"),
    ("docs.md", "Documentation"),
    ("refactor.md", "Refactor"),
    ("test.md", "Test"),
    ("performance.md", "Performance"),
    ("security.md", "Security"),
];

/// Which template a change type selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Template filename, e.g. `bug.md`
    pub filename: &'static str,
    /// True when no synonym matched and [`DEFAULT_TEMPLATE`] was chosen
    pub fallback_used: bool,
}

/// Trim and lowercase a change type the way [`resolve`] sees it
pub fn normalize(change_type: &str) -> String {
    change_type.trim().to_lowercase()
}

/// Resolve a free-form change type to a template filename
///
/// Exact synonym first, then the first synonym that contains or is contained
/// in the input, then the default.
pub fn resolve(change_type: &str) -> Resolution {
    let key = normalize(change_type);

    if let Some((_, filename)) = TYPE_MAPPING.iter().find(|(synonym, _)| *synonym == key) {
        return Resolution {
            filename: *filename,
            fallback_used: false,
        };
    }

    // an empty input is contained in every synonym, so it takes the first row
    if let Some((synonym, filename)) = TYPE_MAPPING
        .iter()
        .find(|(synonym, _)| key.contains(synonym) || synonym.contains(key.as_str()))
    {
        tracing::debug!("Change type '{}' matched synonym '{}'", key, synonym);
        return Resolution {
            filename: *filename,
            fallback_used: false,
        };
    }

    tracing::warn!(
        "No template mapped for change type '{}', using {}",
        key,
        DEFAULT_TEMPLATE
    );
    Resolution {
        filename: DEFAULT_TEMPLATE,
        fallback_used: true,
    }
}

/// Distinct template filenames named by [`TYPE_MAPPING`], in table order
pub fn known_template_files() -> Vec<&'static str> {
    let mut files: Vec<&'static str> = Vec::new();
    for (_, filename) in TYPE_MAPPING {
        if !files.contains(filename) {
            files.push(*filename);
        }
    }
    files
}

/// Display label of a template in the fixed catalog
pub fn display_label(filename: &str) -> Option<&'static str> {
    FIXED_CATALOG
        .iter()
        .find(|(name, _)| *name == filename)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_synonyms() {
        for input in ["bug", "bugfix", "fix", "BUG", "  Fix  "] {
            let resolution = resolve(input);
            assert_eq!(resolution.filename, "bug.md", "input {input:?}");
            assert!(!resolution.fallback_used);
        }
        assert_eq!(resolve("feat").filename, "feature.md");
        assert_eq!(resolve("documentation").filename, "docs.md");
        assert_eq!(resolve("cleanup").filename, "refactor.md");
        assert_eq!(resolve("testing").filename, "test.md");
        assert_eq!(resolve("optimization").filename, "performance.md");
        assert_eq!(resolve("SEC").filename, "security.md");
    }

    #[test]
    fn test_substring_match_uses_declared_order() {
        assert_eq!(resolve("docs update").filename, "docs.md");
        assert_eq!(resolve("perf improvements").filename, "performance.md");
        assert_eq!(resolve("security hardening").filename, "security.md");
        // input contained in a synonym
        assert_eq!(resolve("refac").filename, "refactor.md");
        assert!(!resolve("hotfix").fallback_used);
        assert_eq!(resolve("hotfix").filename, "bug.md");
    }

    #[test]
    fn test_unknown_falls_back_to_feature() {
        let resolution = resolve("xyz");
        assert_eq!(resolution.filename, DEFAULT_TEMPLATE);
        assert!(resolution.fallback_used);
    }

    #[test]
    fn test_blank_matches_first_synonym() {
        for input in ["", "   "] {
            let resolution = resolve(input);
            assert_eq!(resolution.filename, "bug.md", "input {input:?}");
            assert!(!resolution.fallback_used);
        }
    }

    #[test]
    fn test_known_template_files_are_distinct_and_ordered() {
        assert_eq!(
            known_template_files(),
            vec![
                "bug.md",
                "feature.md",
                "docs.md",
                "refactor.md",
                "test.md",
                "performance.md",
                "security.md"
            ]
        );
    }

    #[test]
    fn test_every_synonym_targets_a_catalog_template() {
        for (_, filename) in TYPE_MAPPING {
            assert!(display_label(filename).is_some(), "{filename} has no label");
        }
        assert_eq!(display_label("bug.md"), Some("Bug Fix"));
        assert_eq!(display_label("nope.md"), None);
    }
}
