//! Access to one parsed graph file.
//!
//! [`SourceDocument`] wraps the JSON value of a single file and exposes the
//! record collections the builders consume, mirroring the native layout:
//! node records live under `Nodes` and are completed with their view record
//! from `View.NodeViews`, labels live under `View.Annotations` (split into
//! groups and annotations by whether they list member nodes), dependency
//! records under `NodeLibraryDependencies`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::SourceError;

/// One JSON record of a graph file.
pub type Record = Map<String, Value>;

/// A parsed graph or package manifest file.
#[derive(Debug)]
pub struct SourceDocument {
    path: PathBuf,
    root: Value,
}

impl SourceDocument {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] when the file cannot be read and
    /// [`SourceError::Json`] when it is not valid JSON.
    pub fn read(path: &Path) -> Result<Self, SourceError> {
        let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let root = serde_json::from_str(&text).map_err(|source| SourceError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    /// Builds a document from an in-memory value (used by tests).
    pub fn from_value(path: &Path, root: Value) -> Self {
        Self {
            path: path.to_path_buf(),
            root,
        }
    }

    /// The path the document was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A top-level string field, empty when absent.
    pub fn str_value(&self, key: &str) -> &str {
        self.root.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// True when the top-level object carries the given key.
    pub fn has_key(&self, key: &str) -> bool {
        self.root
            .as_object()
            .is_some_and(|root| root.contains_key(key))
    }

    fn records(&self, keys: &[&str]) -> Vec<&Record> {
        let mut value = &self.root;
        for key in keys {
            value = value.get(key).unwrap_or(&Value::Null);
        }
        match value {
            Value::Array(items) => items.iter().filter_map(Value::as_object).collect(),
            Value::Object(map) => vec![map],
            _ => Vec::new(),
        }
    }

    /// Node records, each completed with its view record.
    ///
    /// The model part of a node (code, paths, descriptions) and its view part
    /// (name, position, visibility flags) are stored separately in the native
    /// format and joined by the `Id` field.
    pub fn nodes(&self) -> Vec<Record> {
        let views = self.records(&["View", "NodeViews"]);
        self.records(&["Nodes"])
            .into_iter()
            .map(|node| {
                let mut merged = node.clone();
                let id = record_id(node);
                if let Some(view) = views.iter().find(|view| record_id(view) == id) {
                    for (key, value) in view.iter() {
                        merged.insert(key.clone(), value.clone());
                    }
                }
                merged
            })
            .collect()
    }

    fn view_annotations(&self) -> Vec<&Record> {
        self.records(&["View", "Annotations"])
    }

    /// View labels without member nodes: floating annotations.
    pub fn annotations(&self) -> Vec<&Record> {
        self.view_annotations()
            .into_iter()
            .filter(|record| member_ids(record).is_empty())
            .collect()
    }

    /// View labels with member nodes: groups.
    pub fn groups(&self) -> Vec<&Record> {
        self.view_annotations()
            .into_iter()
            .filter(|record| !member_ids(record).is_empty())
            .collect()
    }

    /// Dependency records.
    pub fn dependencies(&self) -> Vec<&Record> {
        self.records(&["NodeLibraryDependencies"])
    }

    /// Declared input ports.
    pub fn inputs(&self) -> Vec<&Record> {
        self.records(&["Inputs"])
    }

    /// Declared output ports.
    pub fn outputs(&self) -> Vec<&Record> {
        self.records(&["Outputs"])
    }

    /// The environment record of a graph file.
    pub fn graph_info(&self) -> Option<&Record> {
        self.records(&["View", "Dynamo"]).into_iter().next()
    }

    /// The root object of a package manifest.
    pub fn package_info(&self) -> Option<&Record> {
        self.root.as_object()
    }
}

/// The `Id` of a record, empty when absent.
pub fn record_id(record: &Record) -> &str {
    record.get("Id").and_then(Value::as_str).unwrap_or("")
}

/// Member node ids of a view label record.
pub fn member_ids(record: &Record) -> Vec<&str> {
    record
        .get("Nodes")
        .and_then(Value::as_array)
        .map(|ids| ids.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
