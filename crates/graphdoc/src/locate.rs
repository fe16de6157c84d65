//! Destination paths and document files.
//!
//! The documentation tree mirrors the source tree: the scripts and packages
//! subtrees reappear under the documentation root with the output extension.
//! Package documents additionally nest under `<package name>/`, member
//! documents under `<package name>/<package version>/`.
//!
//! [`DocsManager`] owns the mapping and a registry resolving the member a
//! package-reference node points at; [`DocFile`] pairs a source path with
//! its destination and reads/writes the document text.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use graphdoc_core::file::{MemberFile, Package};

/// Characters stripped from file names before they reach the documentation
/// tree; dots become dashes so version numbers stay readable.
fn clean_stem(value: &str) -> String {
    let mut cleaned = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' | '[' | ']' | '&' | '(' | ')' => {}
            '.' => cleaned.push('-'),
            other => cleaned.push(other),
        }
    }
    cleaned.trim().to_string()
}

/// The human-readable name of a file: its cleaned stem with underscores
/// replaced by spaces.
fn display_name(stem: &str) -> String {
    clean_stem(stem).replace('_', " ").trim().to_string()
}

/// One document: source path, destination path, display name.
#[derive(Debug, Clone)]
pub struct DocFile {
    pub src_path: PathBuf,
    pub doc_path: PathBuf,
    pub display_name: String,
}

impl DocFile {
    /// Reads the previously written text, line by line.
    ///
    /// A missing file is an empty document, not an error; the first run of a
    /// new source file starts from nothing.
    pub fn existing_lines(&self) -> Vec<String> {
        match fs::read_to_string(&self.doc_path) {
            Ok(text) => text.lines().map(str::to_string).collect(),
            Err(err) => {
                debug!(path = self.doc_path.display().to_string(), error = err.to_string(); "no previous document");
                Vec::new()
            }
        }
    }

    /// Writes the document, creating parent directories as needed.
    pub fn write(&self, lines: &[String]) -> io::Result<()> {
        if let Some(parent) = self.doc_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut text = lines.join("\n");
        text.push('\n');
        fs::write(&self.doc_path, text)
    }
}

/// Registered documentation target of a package member.
#[derive(Debug, Clone)]
pub struct MemberTarget {
    pub doc_path: PathBuf,
    pub display_name: String,
}

/// Computes destination paths and resolves member documents.
#[derive(Debug)]
pub struct DocsManager {
    doc_root: PathBuf,
    script_src: PathBuf,
    package_src: PathBuf,
    extension: String,
    members: HashMap<String, MemberTarget>,
}

impl DocsManager {
    /// Creates a manager for one documentation root.
    ///
    /// `extension` is the output format's extension including the dot.
    pub fn new(doc_root: &Path, script_src: &Path, package_src: &Path, extension: &str) -> Self {
        Self {
            doc_root: doc_root.to_path_buf(),
            script_src: script_src.to_path_buf(),
            package_src: package_src.to_path_buf(),
            extension: extension.to_string(),
            members: HashMap::new(),
        }
    }

    /// The documentation root.
    pub fn doc_root(&self) -> &Path {
        &self.doc_root
    }

    fn mirror_name(&self, src: &Path) -> PathBuf {
        self.doc_root
            .join(src.file_name().unwrap_or(src.as_os_str()))
    }

    /// Root of the script documentation subtree.
    pub fn script_doc_path(&self) -> PathBuf {
        self.mirror_name(&self.script_src)
    }

    /// Root of the package documentation subtree.
    pub fn package_doc_path(&self) -> PathBuf {
        self.mirror_name(&self.package_src)
    }

    /// Maps a source path to its destination path in the mirrored tree.
    pub fn switch_path(&self, src: &Path) -> PathBuf {
        let (src_root, doc_root) = if src.starts_with(&self.script_src) {
            (&self.script_src, self.script_doc_path())
        } else {
            (&self.package_src, self.package_doc_path())
        };
        let relative = src.strip_prefix(src_root).unwrap_or(src);
        let mut doc_path = doc_root.join(relative);
        let stem = src
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("");
        doc_path.set_file_name(format!("{}{}", clean_stem(stem), self.extension));
        doc_path
    }

    /// The document of a script.
    pub fn script_doc_file(&self, src_path: &Path) -> DocFile {
        let stem = src_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("");
        DocFile {
            src_path: src_path.to_path_buf(),
            doc_path: self.switch_path(src_path),
            display_name: display_name(stem),
        }
    }

    /// The document of a package: `<name>/<name>-<version>` under the
    /// package documentation root.
    pub fn package_doc_file(&self, package: &Package) -> DocFile {
        let name = clean_stem(&package.name);
        let version = clean_stem(package.version());
        let doc_path = self
            .package_doc_path()
            .join(&name)
            .join(format!("{name}-{version}{}", self.extension));
        DocFile {
            src_path: package.path.clone(),
            doc_path,
            display_name: display_name(&package.full_name()),
        }
    }

    /// The document of a package member:
    /// `<package name>/<package version>/<member>`.
    pub fn member_doc_file(&self, package: &Package, member: &MemberFile) -> DocFile {
        let stem = member
            .graph
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or(&member.graph.name);
        let doc_path = self
            .package_doc_path()
            .join(clean_stem(&package.name))
            .join(clean_stem(package.version()))
            .join(format!("{}{}", clean_stem(stem), self.extension));
        DocFile {
            src_path: member.graph.path.clone(),
            doc_path,
            display_name: display_name(stem),
        }
    }

    /// Registers a package's members for link resolution.
    pub fn register_package(&mut self, package: &Package) {
        for member in &package.members {
            let doc_file = self.member_doc_file(package, member);
            self.members.insert(
                member_key(&member.graph.uuid, package.version()),
                MemberTarget {
                    doc_path: doc_file.doc_path,
                    display_name: doc_file.display_name,
                },
            );
        }
    }

    /// Resolves the document of the member a package-reference node calls.
    ///
    /// `None` when the package is not installed in the documented source
    /// tree; the node then renders with its plain name.
    pub fn member_target(&self, uuid: &str, version: &str) -> Option<&MemberTarget> {
        self.members.get(&member_key(uuid, version))
    }
}

fn member_key(uuid: &str, version: &str) -> String {
    format!("{uuid}-{version}")
}
