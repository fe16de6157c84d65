//! Graph node model.
//!
//! A [`GraphNode`] is one node of a visual program. Its behaviour-relevant
//! variation (code payloads, path inputs, package references) is captured in
//! the closed [`NodeKind`] union; documentation rendering matches on the kind
//! instead of downcasting.

use std::fmt;

use crate::geometry::Point;

/// Stable node identity, unique within one graph file.
///
/// The id is the only join key between parts of the file model: groups,
/// dependencies, and note linkage all refer to nodes by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Creates an id from its string representation.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The closed set of node kinds the documentation engine distinguishes.
///
/// Kinds carry the payload the renderer needs: code nodes carry their source
/// text, path nodes their configured path, package-reference nodes the uuid
/// of the member they call.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Any node without documentation-relevant payload.
    General,
    /// A code block written in the host tool's scripting language.
    CodeBlock { code: String },
    /// A python script node.
    Python { code: String, engine: String },
    /// A file-path input node.
    FilePath { hint_path: String, input_value: String },
    /// A directory-path input node.
    DirPath { hint_path: String, input_value: String },
    /// A selection node bound to elements of the host document.
    Selection { selected: String },
    /// A primitive input node (number, string, boolean).
    CoreInput { value: String },
    /// A reference to a reusable package member, identified by uuid.
    Custom { uuid: String },
}

impl NodeKind {
    /// True for file- and directory-path input nodes.
    pub fn is_path(&self) -> bool {
        matches!(self, Self::FilePath { .. } | Self::DirPath { .. })
    }
}

/// A node in the visual program.
///
/// Owned by the file model and immutable for the duration of a documentation
/// run. The position is used only for proximity queries.
#[derive(Debug, Clone)]
pub struct GraphNode {
    pub id: NodeId,
    pub name: String,
    pub description: String,
    pub position: Point,
    pub disabled: bool,
    pub shows_geometry: bool,
    pub is_input: bool,
    pub is_output: bool,
    pub kind: NodeKind,
}

impl GraphNode {
    /// Returns the configured path for path-input nodes.
    pub fn path_hint(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::FilePath { hint_path, .. } | NodeKind::DirPath { hint_path, .. } => {
                Some(hint_path)
            }
            _ => None,
        }
    }

    /// Returns the source text for code-carrying nodes.
    pub fn code(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::CodeBlock { code } | NodeKind::Python { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Returns the member uuid for package-reference nodes.
    pub fn member_uuid(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Custom { uuid } => Some(uuid),
            _ => None,
        }
    }

    /// The display name of a dependency entry for this node.
    ///
    /// Path nodes list their configured file or directory name, every other
    /// node its own name.
    pub fn dependency_name(&self) -> String {
        match self.path_hint() {
            Some(hint) => {
                let name = hint.rsplit(['/', '\\']).next().unwrap_or(hint);
                name.to_string()
            }
            None => self.name.clone(),
        }
    }
}
