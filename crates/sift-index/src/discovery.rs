//! Candidate file discovery per entity kind.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::kind::{DiscoveryRule, EntityKind};

/// Walk `roots` and return every file matching `kind`'s discovery rule,
/// sorted and deduplicated.
///
/// Hidden entries are skipped and `.gitignore` files honoured. Missing roots
/// and files that vanish or are not UTF-8 are skipped with a log line.
///
/// # Errors
///
/// Returns an error if a candidate file exists but cannot be read.
pub fn discover(roots: &[PathBuf], kind: EntityKind) -> Result<Vec<PathBuf>> {
    let rule = kind.discovery_rule();
    let mut found = BTreeSet::new();

    for root in roots {
        if !root.exists() {
            tracing::warn!(root = %root.display(), "source root does not exist, skipping");
            continue;
        }

        let candidates = ignore::WalkBuilder::new(root)
            .hidden(true)
            .git_ignore(true)
            .build()
            .flatten()
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .is_some_and(|name| rule.matches_name(name))
            });

        for entry in candidates {
            if content_matches(entry.path(), &rule)? {
                found.insert(entry.into_path());
            }
        }
    }

    tracing::debug!(kind = %kind, files = found.len(), "discovery finished");
    Ok(found.into_iter().collect())
}

fn content_matches(path: &Path, rule: &DiscoveryRule) -> Result<bool> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(rule.matches_content(&content)),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::InvalidData) => {
            tracing::debug!(path = %path.display(), "skipping unreadable candidate: {e}");
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn finds_facades_by_name_and_content() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "Zed/Cart/Business/CartFacadeInterface.php",
            "<?php namespace Spryker\\Zed\\Cart\\Business;",
        );
        write(
            dir.path(),
            "Zed/Cart/CartFacadeInterface.php",
            "<?php namespace Spryker\\Zed\\Cart;",
        );
        write(dir.path(), "Zed/Cart/Business/CartFacade.php", "Business");

        let files = discover(&[dir.path().to_path_buf()], EntityKind::FacadeInterface).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Zed/Cart/Business/CartFacadeInterface.php"));
    }

    #[test]
    fn excludes_dependency_clients() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Client/Cart/CartClientInterface.php", "namespace Pyz\\Client\\Cart;");
        write(
            dir.path(),
            "Client/Cart/Dependency/CartToQuoteClientInterface.php",
            "namespace Pyz\\Client\\Cart\\Dependency\\Client;",
        );

        let files = discover(&[dir.path().to_path_buf()], EntityKind::ClientInterface).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("CartClientInterface.php"));
    }

    #[test]
    fn results_are_sorted_and_deduplicated_across_overlapping_roots() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b/BPlugin.php", "Zed");
        write(dir.path(), "a/APlugin.php", "Yves");

        let roots = vec![dir.path().to_path_buf(), dir.path().join("a")];
        let files = discover(&roots, EntityKind::Plugin).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files[0] < files[1]);
        assert!(files[0].ends_with("a/APlugin.php"));
    }

    #[test]
    fn missing_root_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "Glue/FooConfig.php", "Glue");
        let roots = vec![dir.path().join("nope"), dir.path().to_path_buf()];
        let files = discover(&roots, EntityKind::Config).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn hidden_directories_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".cache/Zed/XConfig.php", "Zed");
        let files = discover(&[dir.path().to_path_buf()], EntityKind::Config).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn non_utf8_candidate_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("BadPlugin.php");
        fs::write(&path, [0xff, 0xfe, b'Z', b'e', b'd']).unwrap();
        let files = discover(&[dir.path().to_path_buf()], EntityKind::Plugin).unwrap();
        assert!(files.is_empty());
    }
}
