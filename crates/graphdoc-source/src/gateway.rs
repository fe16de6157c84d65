//! The batch reading surface.
//!
//! The gateway discovers candidate files beneath the configured roots and
//! builds their models. A file that cannot be read or built is logged with
//! its path and skipped; the batch continues with the remaining files.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::{debug, error, info};

use graphdoc_core::file::{GraphFile, Package};

use crate::crawler::{self, CrawlOptions};
use crate::document::SourceDocument;
use crate::files;

/// Extension of script files.
pub const SCRIPT_EXTENSION: &str = "dyn";
/// Extension of package member files.
pub const MEMBER_EXTENSION: &str = "dyf";
/// Extension of package manifest files.
pub const PACKAGE_MANIFEST_EXTENSION: &str = "json";

/// Reads scripts and packages from source trees.
#[derive(Debug, Default)]
pub struct SourceGateway;

impl SourceGateway {
    /// Reads all script files beneath the given roots, sorted by path.
    pub fn read_scripts(&self, roots: &[PathBuf]) -> Vec<GraphFile> {
        let mut scripts = Vec::new();
        for path in crawler::crawl(roots, &CrawlOptions::extension(SCRIPT_EXTENSION)) {
            match SourceDocument::read(&path).and_then(|doc| files::build_script(&doc)) {
                Ok(script) => scripts.push(script),
                Err(err) => {
                    error!(path = path.display().to_string(), error = err.to_string(); "script skipped")
                }
            }
        }
        info!(count = scripts.len(); "scripts read");
        scripts
    }

    /// Reads all packages beneath the given roots.
    ///
    /// Manifests are deduplicated by full name; each package's member files
    /// are discovered beneath its manifest directory and attached. The result
    /// is sorted by full name.
    pub fn read_packages(&self, roots: &[PathBuf]) -> Vec<Package> {
        let mut unique: IndexMap<String, Package> = IndexMap::new();
        for path in crawler::crawl(roots, &CrawlOptions::extension(PACKAGE_MANIFEST_EXTENSION)) {
            match SourceDocument::read(&path).and_then(|doc| files::build_package(&doc)) {
                Ok(package) => {
                    unique.entry(package.full_name()).or_insert(package);
                }
                // Source trees carry plenty of unrelated JSON; not a problem.
                Err(err) => {
                    debug!(path = path.display().to_string(), error = err.to_string(); "not a package manifest")
                }
            }
        }
        let mut packages: Vec<Package> = unique.into_values().collect();
        packages.sort_by_key(|package| package.full_name());
        for package in &mut packages {
            package.members = self.read_members(&package.path);
        }
        info!(count = packages.len(); "packages read");
        packages
    }

    fn read_members(&self, manifest_path: &Path) -> Vec<graphdoc_core::file::MemberFile> {
        let Some(package_dir) = manifest_path.parent() else {
            return Vec::new();
        };
        let mut members = Vec::new();
        for path in crawler::crawl(
            &[package_dir.to_path_buf()],
            &CrawlOptions::extension(MEMBER_EXTENSION),
        ) {
            match SourceDocument::read(&path).and_then(|doc| files::build_member(&doc)) {
                Ok(member) => members.push(member),
                Err(err) => {
                    error!(path = path.display().to_string(), error = err.to_string(); "member skipped")
                }
            }
        }
        members
    }

    /// Discovers previously written documentation files.
    pub fn doc_files(&self, roots: &[PathBuf], extension: &str) -> Vec<PathBuf> {
        let roots: Vec<PathBuf> = roots.iter().filter(|root| root.exists()).cloned().collect();
        crawler::crawl(&roots, &CrawlOptions::extension(extension))
    }
}
