//! Parallel directory discovery.
//!
//! Candidate files are found by walking each root path on its own worker;
//! the workers share no mutable state and a failure under one root does not
//! cancel the others. Traversal errors are logged with the offending path
//! and skipped.
//!
//! Work-in-progress material is excluded on the way: stems starting with an
//! underscore or dash, folders named like backups, and anything carrying a
//! dev marker.

use std::path::{Path, PathBuf};

use log::warn;
use rayon::prelude::*;
use walkdir::WalkDir;

const EXCLUDED_CONTAINS: &[&str] = &["DEV"];
const EXCLUDED_EQUALS: &[&str] = &["backup", "archive", "alt", "old"];
const EXCLUDED_STARTS: &[&str] = &["_", "-"];

/// What the crawler is looking for.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    extension: String,
}

impl CrawlOptions {
    /// Crawl for files with the given extension (with or without dot).
    pub fn extension(extension: &str) -> Self {
        Self {
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    fn admits(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }
}

fn stem_of(path: &Path) -> &str {
    path.file_stem().and_then(|stem| stem.to_str()).unwrap_or("")
}

fn is_excluded(path: &Path) -> bool {
    let stem = stem_of(path);
    EXCLUDED_STARTS.iter().any(|start| stem.starts_with(start))
        || EXCLUDED_EQUALS
            .iter()
            .any(|name| stem.eq_ignore_ascii_case(name))
        || EXCLUDED_CONTAINS.iter().any(|marker| stem.contains(marker))
}

fn crawl_root(root: &Path, options: &CrawlOptions) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded(entry.path()));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(root = root.display().to_string(), error = err.to_string(); "crawl error");
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_file() && options.admits(path) {
            files.push(path.to_path_buf());
        }
    }
    files
}

/// Crawls all roots in parallel, one worker task per root.
///
/// The result is sorted so downstream output is deterministic regardless of
/// worker completion order.
pub fn crawl(roots: &[PathBuf], options: &CrawlOptions) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = roots
        .par_iter()
        .map(|root| crawl_root(root, options))
        .reduce(Vec::new, |mut all, mut found| {
            all.append(&mut found);
            all
        });
    files.sort();
    files
}
