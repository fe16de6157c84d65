//! Assembly of file models from parsed documents.
//!
//! The file builders pull the record collections out of a [`SourceDocument`]
//! and run them through the node-level builders. Required identity fields
//! are checked up front so an unreadable file is reported with its path and
//! the missing field.

use graphdoc_core::file::{GraphFile, MemberFile, Package};

use crate::builders;
use crate::document::SourceDocument;
use crate::error::SourceError;

fn require<'a>(
    doc: &'a SourceDocument,
    kind: &'static str,
    field: &'static str,
) -> Result<&'a str, SourceError> {
    let value = doc.str_value(field);
    if value.is_empty() {
        return Err(SourceError::MissingField {
            kind,
            path: doc.path().to_path_buf(),
            field,
        });
    }
    Ok(value)
}

fn build_graph(doc: &SourceDocument, kind: &'static str) -> Result<GraphFile, SourceError> {
    let uuid = require(doc, kind, "Uuid")?.to_string();
    let name = require(doc, kind, "Name")?.to_string();
    Ok(GraphFile {
        path: doc.path().to_path_buf(),
        uuid,
        name,
        description: doc.str_value("Description").to_string(),
        info: builders::build_graph_info(doc.graph_info()),
        nodes: doc.nodes().iter().filter_map(builders::build_node).collect(),
        groups: doc
            .groups()
            .into_iter()
            .filter_map(builders::build_group)
            .collect(),
        annotations: doc
            .annotations()
            .into_iter()
            .filter_map(builders::build_annotation)
            .collect(),
        dependencies: doc
            .dependencies()
            .into_iter()
            .filter_map(builders::build_dependency)
            .collect(),
        inputs: doc
            .inputs()
            .into_iter()
            .filter_map(builders::build_io_port)
            .collect(),
        outputs: doc
            .outputs()
            .into_iter()
            .filter_map(builders::build_io_port)
            .collect(),
    })
}

/// Builds a script model.
///
/// # Errors
///
/// Returns [`SourceError::MissingField`] when the file lacks `Uuid` or
/// `Name`.
pub fn build_script(doc: &SourceDocument) -> Result<GraphFile, SourceError> {
    build_graph(doc, "script")
}

/// Builds a package-member model.
///
/// # Errors
///
/// Returns [`SourceError::MissingField`] when the file lacks `Uuid`, `Name`,
/// or `Category`.
pub fn build_member(doc: &SourceDocument) -> Result<MemberFile, SourceError> {
    let category = require(doc, "package member", "Category")?.to_string();
    Ok(MemberFile {
        graph: build_graph(doc, "package member")?,
        category,
    })
}

/// Builds a package model from its manifest; members are attached by the
/// gateway.
///
/// # Errors
///
/// Returns [`SourceError::MissingField`] when the manifest lacks `name` or
/// `version`.
pub fn build_package(doc: &SourceDocument) -> Result<Package, SourceError> {
    let name = require(doc, "package", "name")?.to_string();
    require(doc, "package", "version")?;
    let info = doc
        .package_info()
        .map(builders::build_package_info)
        .unwrap_or_default();
    Ok(Package {
        path: doc.path().to_path_buf(),
        name,
        description: doc.str_value("description").to_string(),
        info,
        members: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::Path;

    use serde_json::json;

    #[test]
    fn script_requires_identity_fields() {
        let doc = SourceDocument::from_value(Path::new("a.dyn"), json!({"Name": "a"}));
        let err = build_script(&doc).expect_err("missing uuid");
        assert!(err.to_string().contains("Uuid"));
    }

    #[test]
    fn script_collects_all_record_kinds() {
        let doc = SourceDocument::from_value(
            Path::new("a.dyn"),
            json!({
                "Uuid": "u-1",
                "Name": "Rails",
                "Description": "Lays out rails",
                "Nodes": [
                    {"Id": "n1"},
                    {"Id": "n2", "ConcreteType": "Dynamo.Graph.Nodes.CodeBlockNodeModel, DynamoCore",
                     "NodeType": "CodeBlockNode", "Code": "x;"}
                ],
                "Inputs": [{"Id": "n1", "Name": "count", "Value": "3"}],
                "Outputs": [],
                "NodeLibraryDependencies": [
                    {"ReferenceType": "Package", "Name": "tools", "Version": "1.0", "Nodes": []}
                ],
                "View": {
                    "Dynamo": {"Version": "2.17", "RunType": "Manual"},
                    "NodeViews": [{"Id": "n1", "Name": "Count", "X": 1.0, "Y": 2.0}],
                    "Annotations": [
                        {"Id": "g1", "Title": "Inputs", "DescriptionText": "", "Nodes": ["n1"]},
                        {"Id": "a1", "Title": "[W] beware", "Nodes": []}
                    ]
                }
            }),
        );
        let script = build_script(&doc).expect("script");
        assert_eq!(script.full_name(), "Rails [u-1]");
        assert_eq!(script.nodes.len(), 2);
        assert_eq!(script.groups.len(), 1);
        assert_eq!(script.annotations.len(), 1);
        assert_eq!(script.inputs.len(), 1);
        assert_eq!(script.info.version, "2.17");
        assert_eq!(script.package_dependencies().len(), 1);
    }

    #[test]
    fn package_manifest_builds_without_members() {
        let doc = SourceDocument::from_value(
            Path::new("pkg.json"),
            json!({
                "name": "tools",
                "version": "1.2.0",
                "description": "Shared helpers",
                "engine_version": "2.17",
                "keywords": ["rail", "survey"]
            }),
        );
        let package = build_package(&doc).expect("package");
        assert_eq!(package.full_name(), "tools [1.2.0]");
        assert_eq!(package.info.keywords, "rail, survey");
        assert!(package.members.is_empty());
    }
}
