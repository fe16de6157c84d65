//! Dependency records of a graph file.
//!
//! The host tool records two reference types: dependencies on installed
//! packages (with a version and the referencing node ids) and external
//! file dependencies.

use crate::node::NodeId;

/// A dependency entry of a graph file.
#[derive(Debug, Clone)]
pub enum Dependency {
    Package(PackageDependency),
    External(ExternalDependency),
}

/// A dependency on an installed package.
#[derive(Debug, Clone)]
pub struct PackageDependency {
    pub name: String,
    pub version: String,
    /// Ids of the nodes in this file that reference the package.
    pub node_ids: Vec<NodeId>,
}

impl PackageDependency {
    /// The canonical display name, `name [version]`.
    ///
    /// Used as heading text, so it must be stable across runs.
    pub fn full_name(&self) -> String {
        format!("{} [{}]", self.name, self.version)
    }
}

/// A dependency on a file outside the graph, such as a spreadsheet.
#[derive(Debug, Clone)]
pub struct ExternalDependency {
    pub name: String,
    pub node_ids: Vec<NodeId>,
}
