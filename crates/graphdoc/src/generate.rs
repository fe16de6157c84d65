//! The batch entry point.
//!
//! Generation walks packages first (registering their members so scripts
//! can link to them), then scripts. Every produced path is recorded;
//! previously written documents that were not produced this run are stale
//! and deleted, and emptied directories are pruned.
//!
//! Per-file work is strictly sequential: read the previous document, build
//! the note table, render the tree against that snapshot, write the result.
//! A linker failure aborts that one file and the batch moves on.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};

use graphdoc_core::file::{GraphFile, MemberFile, Package};
use graphdoc_core::values::ValueHandler;
use graphdoc_source::SourceGateway;

use crate::content::member::member_blocks;
use crate::content::package::package_blocks;
use crate::content::script::{DocOptions, script_blocks};
use crate::content::{RenderContext, render_document};
use crate::error::DocError;
use crate::export::Exporter;
use crate::linker::NoteTable;
use crate::locate::{DocFile, DocsManager};

/// What a batch run did.
#[derive(Debug, Default)]
pub struct GenerateSummary {
    /// Paths written this run.
    pub written: Vec<PathBuf>,
    /// Files skipped because of a per-file error.
    pub failed: usize,
    /// Stale documents deleted.
    pub removed: usize,
}

/// Renders and writes documentation for scripts and packages.
pub struct DocsGenerator<'a> {
    manager: DocsManager,
    exporter: &'a dyn Exporter,
    values: ValueHandler,
    options: DocOptions,
}

impl<'a> DocsGenerator<'a> {
    /// Creates a generator.
    pub fn new(
        manager: DocsManager,
        exporter: &'a dyn Exporter,
        values: ValueHandler,
        options: DocOptions,
    ) -> Self {
        Self {
            manager,
            exporter,
            values,
            options,
        }
    }

    /// The path manager, with all registered members.
    pub fn manager(&self) -> &DocsManager {
        &self.manager
    }

    /// Renders one script document without writing it.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::UnlinkedNote`] when an annotation cannot be
    /// linked; the document must not be written then.
    pub fn script_document(&self, script: &GraphFile) -> Result<(DocFile, Vec<String>), DocError> {
        let doc = self.manager.script_doc_file(&script.path);
        let notes = NoteTable::link(script)?;
        let previous = doc.existing_lines();
        let ctx = RenderContext::new(
            self.exporter,
            &self.values,
            &self.manager,
            &doc,
            &previous,
            &notes,
        );
        let blocks = script_blocks(script, &self.options);
        let lines = render_document(&blocks, &ctx);
        Ok((doc, lines))
    }

    /// Renders one member document without writing it.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::UnlinkedNote`] when an annotation cannot be
    /// linked.
    pub fn member_document(
        &self,
        package: &Package,
        member: &MemberFile,
    ) -> Result<(DocFile, Vec<String>), DocError> {
        let doc = self.manager.member_doc_file(package, member);
        let notes = NoteTable::link(&member.graph)?;
        let previous = doc.existing_lines();
        let ctx = RenderContext::new(
            self.exporter,
            &self.values,
            &self.manager,
            &doc,
            &previous,
            &notes,
        );
        let blocks = member_blocks(member);
        let lines = render_document(&blocks, &ctx);
        Ok((doc, lines))
    }

    /// Renders one package document without writing it.
    pub fn package_document(&self, package: &Package) -> (DocFile, Vec<String>) {
        let doc = self.manager.package_doc_file(package);
        let notes = NoteTable::default();
        let previous = doc.existing_lines();
        let ctx = RenderContext::new(
            self.exporter,
            &self.values,
            &self.manager,
            &doc,
            &previous,
            &notes,
        );
        let blocks = package_blocks(package);
        let lines = render_document(&blocks, &ctx);
        (doc, lines)
    }

    /// Generates all documents and removes stale output.
    pub fn generate(&mut self, scripts: &[GraphFile], packages: &[Package]) -> GenerateSummary {
        for package in packages {
            self.manager.register_package(package);
        }

        let mut summary = GenerateSummary::default();
        for package in packages {
            let (doc, lines) = self.package_document(package);
            self.write(doc, &lines, &mut summary);
            for member in &package.members {
                match self.member_document(package, member) {
                    Ok((doc, lines)) => self.write(doc, &lines, &mut summary),
                    Err(err) => {
                        summary.failed += 1;
                        error!(error = err.to_string(); "member documentation failed");
                    }
                }
            }
        }
        for script in scripts {
            match self.script_document(script) {
                Ok((doc, lines)) => self.write(doc, &lines, &mut summary),
                Err(err) => {
                    summary.failed += 1;
                    error!(error = err.to_string(); "script documentation failed");
                }
            }
        }

        summary.removed = self.remove_stale(&summary.written);
        info!(
            written = summary.written.len(),
            failed = summary.failed,
            removed = summary.removed;
            "documentation generated"
        );
        summary
    }

    fn write(&self, doc: DocFile, lines: &[String], summary: &mut GenerateSummary) {
        match doc.write(lines) {
            Ok(()) => summary.written.push(doc.doc_path),
            Err(err) => {
                summary.failed += 1;
                error!(
                    path = doc.doc_path.display().to_string(),
                    error = err.to_string();
                    "write failed"
                );
            }
        }
    }

    fn remove_stale(&self, written: &[PathBuf]) -> usize {
        let roots = [
            self.manager.script_doc_path(),
            self.manager.package_doc_path(),
        ];
        let extension = self.exporter.extension().trim_start_matches('.');
        let existing = SourceGateway.doc_files(&roots, extension);
        let written: HashSet<&PathBuf> = written.iter().collect();
        let mut removed = 0;
        for path in existing {
            if written.contains(&path) {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    removed += 1;
                    info!(path = path.display().to_string(); "stale document removed");
                }
                Err(err) => {
                    warn!(
                        path = path.display().to_string(),
                        error = err.to_string();
                        "stale document not removed"
                    );
                }
            }
        }
        for root in &roots {
            prune_empty_dirs(root);
        }
        removed
    }
}

/// Removes emptied subdirectories beneath `dir`, leaving `dir` itself.
fn prune_empty_dirs(dir: &Path) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            prune_empty_dirs(&path);
            // Succeeds only when the directory ended up empty.
            let _ = fs::remove_dir(&path);
        }
    }
}
