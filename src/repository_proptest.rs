//! Property-based tests for repository path helpers and name derivation.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::cache::{repository_name, validate_name};
    use crate::repository::Repository;
    use proptest::prelude::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ============================================================================
    // Repository property tests
    // ============================================================================

    proptest! {
        /// Property: the name of an opened repository is its directory's base name
        #[test]
        fn open_name_is_final_segment(name in "[a-zA-Z0-9][a-zA-Z0-9_-]{0,30}") {
            let temp_dir = TempDir::new().unwrap();
            let root = temp_dir.path().join(&name);
            fs::create_dir(&root).unwrap();

            let repository = Repository::open(&root).unwrap();
            prop_assert_eq!(repository.name(), name.as_str());
            prop_assert_eq!(repository.to_string(), name);
        }

        /// Property: join appends relative segments to the root unchanged
        #[test]
        fn join_appends_to_root(segments in prop::collection::vec("[a-z0-9_]{1,8}", 1..5)) {
            let temp_dir = TempDir::new().unwrap();
            let repository = Repository::open(temp_dir.path()).unwrap();

            let relative: PathBuf = segments.iter().collect();
            let joined = repository.join(&relative);

            prop_assert!(joined.is_absolute());
            prop_assert!(joined.starts_with(repository.path()));
            prop_assert_eq!(joined.strip_prefix(repository.path()).unwrap(), relative.as_path());
        }
    }

    // ============================================================================
    // repository_name property tests
    // ============================================================================

    proptest! {
        /// Property: a name survives being embedded in any common URI shape
        #[test]
        fn repository_name_recovers_name(name in "[a-zA-Z0-9][a-zA-Z0-9_-]{0,30}") {
            let uris = [
                format!("https://example.com/org/{}.git", name),
                format!("https://example.com/org/{}", name),
                format!("git@example.com:org/{}.git", name),
                format!("/srv/git/{}/", name),
            ];
            for uri in uris {
                prop_assert_eq!(repository_name(&uri).unwrap(), name.clone());
            }
        }

        /// Property: a derived name is always a valid cache directory name
        #[test]
        fn repository_name_is_always_valid(uri in ".*") {
            if let Ok(name) = repository_name(&uri) {
                prop_assert!(validate_name(&name).is_ok());
                prop_assert!(!name.contains('/'));
            }
        }
    }
}
