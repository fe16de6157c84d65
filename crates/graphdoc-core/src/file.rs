//! File models: scripts, package members, and packages.
//!
//! A [`GraphFile`] is the parsed object model of one graph file on disk.
//! Scripts are plain graph files; package members wrap a graph file with the
//! category they are published under; a [`Package`] pairs the package
//! manifest with its member files.
//!
//! All models are constructed once by the ingestion layer and never mutated
//! by the documentation engine.

use std::path::PathBuf;

use log::debug;

use crate::annotation::{Annotation, Group};
use crate::dependency::{Dependency, ExternalDependency, PackageDependency};
use crate::node::{GraphNode, NodeId, NodeKind};

/// Environment information recorded in a graph file.
#[derive(Debug, Clone, Default)]
pub struct GraphInfo {
    pub version: String,
    pub scale_factor: String,
    pub run_type: String,
    pub has_run_without_crash: bool,
    pub is_visible_in_library: bool,
}

/// A declared input or output port of a script.
#[derive(Debug, Clone)]
pub struct IoPort {
    pub node_id: NodeId,
    pub name: String,
    pub description: String,
    pub value: String,
}

/// The parsed object model of one graph file (a script or a package member).
#[derive(Debug, Clone)]
pub struct GraphFile {
    pub path: PathBuf,
    pub uuid: String,
    pub name: String,
    pub description: String,
    pub info: GraphInfo,
    pub nodes: Vec<GraphNode>,
    pub groups: Vec<Group>,
    pub annotations: Vec<Annotation>,
    pub dependencies: Vec<Dependency>,
    pub inputs: Vec<IoPort>,
    pub outputs: Vec<IoPort>,
}

impl GraphFile {
    /// The canonical display name, `name [uuid]`.
    pub fn full_name(&self) -> String {
        format!("{} [{}]", self.name, self.uuid)
    }

    /// Looks up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    /// Resolves a list of ids to nodes, skipping ids that no longer exist.
    pub fn nodes_by_ids<'a>(&self, ids: impl IntoIterator<Item = &'a NodeId>) -> Vec<&GraphNode> {
        let mut nodes = Vec::new();
        for id in ids {
            match self.node(id) {
                Some(node) => nodes.push(node),
                None => debug!(node_id = id.as_str(), file = self.name; "unknown node id"),
            }
        }
        nodes
    }

    /// Returns the group a node belongs to, if any.
    pub fn group_of(&self, id: &NodeId) -> Option<&Group> {
        self.groups.iter().find(|group| group.node_ids.contains(id))
    }

    /// Nodes matching a predicate, sorted by (name, id) for stable output.
    pub fn nodes_where(&self, mut pred: impl FnMut(&GraphNode) -> bool) -> Vec<&GraphNode> {
        let mut nodes: Vec<&GraphNode> = self.nodes.iter().filter(|node| pred(node)).collect();
        nodes.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));
        nodes
    }

    /// Python script nodes, sorted by (name, id).
    pub fn python_nodes(&self) -> Vec<&GraphNode> {
        self.nodes_where(|node| matches!(node.kind, NodeKind::Python { .. }))
    }

    /// Code block nodes, sorted by (name, id).
    pub fn code_block_nodes(&self) -> Vec<&GraphNode> {
        self.nodes_where(|node| matches!(node.kind, NodeKind::CodeBlock { .. }))
    }

    /// File- and directory-path input nodes, sorted by (name, id).
    pub fn path_nodes(&self) -> Vec<&GraphNode> {
        self.nodes_where(|node| node.kind.is_path())
    }

    /// Package-reference nodes, sorted by (name, id).
    pub fn custom_nodes(&self) -> Vec<&GraphNode> {
        self.nodes_where(|node| matches!(node.kind, NodeKind::Custom { .. }))
    }

    /// Nodes flagged as graph inputs.
    pub fn input_nodes(&self) -> Vec<&GraphNode> {
        self.nodes.iter().filter(|node| node.is_input).collect()
    }

    /// Nodes flagged as graph outputs.
    pub fn output_nodes(&self) -> Vec<&GraphNode> {
        self.nodes.iter().filter(|node| node.is_output).collect()
    }

    /// Package dependencies, sorted by name.
    pub fn package_dependencies(&self) -> Vec<&PackageDependency> {
        let mut deps: Vec<&PackageDependency> = self
            .dependencies
            .iter()
            .filter_map(|dep| match dep {
                Dependency::Package(dep) => Some(dep),
                Dependency::External(_) => None,
            })
            .collect();
        deps.sort_by(|a, b| a.name.cmp(&b.name));
        deps
    }

    /// External dependencies, sorted by name.
    pub fn external_dependencies(&self) -> Vec<&ExternalDependency> {
        let mut deps: Vec<&ExternalDependency> = self
            .dependencies
            .iter()
            .filter_map(|dep| match dep {
                Dependency::External(dep) => Some(dep),
                Dependency::Package(_) => None,
            })
            .collect();
        deps.sort_by(|a, b| a.name.cmp(&b.name));
        deps
    }

    /// The package dependency a node belongs to, if any.
    pub fn package_of(&self, id: &NodeId) -> Option<&PackageDependency> {
        self.package_dependencies()
            .into_iter()
            .find(|dep| dep.node_ids.contains(id))
    }
}

/// A reusable node published by a package: a graph file plus its category.
#[derive(Debug, Clone)]
pub struct MemberFile {
    pub graph: GraphFile,
    pub category: String,
}

/// Manifest information of a package.
#[derive(Debug, Clone, Default)]
pub struct PackageInfo {
    pub version: String,
    pub license: String,
    pub group: String,
    pub keywords: String,
    pub contents: String,
    pub engine_version: String,
    pub site_url: String,
    pub repository_url: String,
}

/// A package: manifest data plus the member files found beneath it.
#[derive(Debug, Clone)]
pub struct Package {
    pub path: PathBuf,
    pub name: String,
    pub description: String,
    pub info: PackageInfo,
    pub members: Vec<MemberFile>,
}

impl Package {
    /// The package version from the manifest.
    pub fn version(&self) -> &str {
        &self.info.version
    }

    /// The canonical display name, `name [version]`.
    pub fn full_name(&self) -> String {
        format!("{} [{}]", self.name, self.info.version)
    }

    /// All member categories, sorted and deduplicated.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .members
            .iter()
            .map(|member| member.category.as_str())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Members of one category, sorted by name.
    pub fn members_by_category(&self, category: &str) -> Vec<&MemberFile> {
        let mut members: Vec<&MemberFile> = self
            .members
            .iter()
            .filter(|member| member.category == category)
            .collect();
        members.sort_by(|a, b| a.graph.name.cmp(&b.graph.name));
        members
    }
}
