//! Builders for node-level records.
//!
//! Node kinds are decided by an explicit, priority-ordered list of
//! matcher/factory pairs tried in sequence; the first match wins. The order
//! is semantically load-bearing: python nodes must be recognized before
//! generic code nodes, package-reference nodes before the general fallback
//! that accepts every record.

use serde_json::Value;

use graphdoc_core::annotation::{Annotation, Group};
use graphdoc_core::dependency::{Dependency, ExternalDependency, PackageDependency};
use graphdoc_core::file::{GraphInfo, IoPort, PackageInfo};
use graphdoc_core::geometry::Point;
use graphdoc_core::node::{GraphNode, NodeId, NodeKind};

use crate::document::{Record, member_ids, record_id};

const CUSTOM_FUNCTION_TYPE: &str = "Dynamo.Graph.Nodes.CustomNodes.Function, DynamoCore";
const ZERO_TOUCH_TYPE: &str = "Dynamo.Graph.Nodes.ZeroTouch.DSFunction, DynamoCore";
const PYTHON_TYPE: &str = "PythonNodeModels.PythonNode, PythonNodeModels";
const CODE_BLOCK_TYPE: &str = "Dynamo.Graph.Nodes.CodeBlockNodeModel, DynamoCore";
const FILE_INPUT_TYPE: &str = "CoreNodeModels.Input.Filename, CoreNodeModels";
const DIR_INPUT_TYPE: &str = "CoreNodeModels.Input.Directory, CoreNodeModels";

const DEFAULT_PYTHON_ENGINE: &str = "IronPython2";

/// One matcher/factory pair of the node builder list.
pub struct NodeBuilder {
    /// Name used in the builder-order test and in trace logging.
    pub name: &'static str,
    matches: fn(&Record) -> bool,
    kind: fn(&Record) -> NodeKind,
}

impl NodeBuilder {
    /// True when this builder accepts the record.
    pub fn matches(&self, record: &Record) -> bool {
        (self.matches)(record)
    }

    /// Builds the node kind; only valid when [`Self::matches`] returned true.
    pub fn kind(&self, record: &Record) -> NodeKind {
        (self.kind)(record)
    }
}

fn str_field(record: &Record, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn bool_field(record: &Record, key: &str, default: bool) -> bool {
    record.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn f64_field(record: &Record, key: &str) -> f64 {
    record.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn has_type(record: &Record, concrete_type: &str, node_type: &str) -> bool {
    record.get("ConcreteType").and_then(Value::as_str) == Some(concrete_type)
        && record.get("NodeType").and_then(Value::as_str) == Some(node_type)
}

fn is_blank_value(record: &Record, key: &str) -> bool {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim()
        .is_empty()
}

/// The node builder list in priority order.
pub fn node_builders() -> Vec<NodeBuilder> {
    vec![
        NodeBuilder {
            name: "custom-function",
            matches: |record| has_type(record, CUSTOM_FUNCTION_TYPE, "FunctionNode"),
            kind: |record| NodeKind::Custom {
                uuid: str_field(record, "FunctionSignature"),
            },
        },
        NodeBuilder {
            name: "zero-touch-function",
            matches: |record| has_type(record, ZERO_TOUCH_TYPE, "FunctionNode"),
            kind: |record| NodeKind::Custom {
                uuid: str_field(record, "FunctionSignature"),
            },
        },
        NodeBuilder {
            name: "python",
            matches: |record| has_type(record, PYTHON_TYPE, "PythonScriptNode"),
            kind: |record| NodeKind::Python {
                code: str_field(record, "Code"),
                engine: {
                    let engine = str_field(record, "Engine");
                    if engine.is_empty() {
                        DEFAULT_PYTHON_ENGINE.to_string()
                    } else {
                        engine
                    }
                },
            },
        },
        NodeBuilder {
            name: "code-block",
            matches: |record| has_type(record, CODE_BLOCK_TYPE, "CodeBlockNode"),
            kind: |record| NodeKind::CodeBlock {
                code: str_field(record, "Code"),
            },
        },
        NodeBuilder {
            name: "file-path",
            matches: |record| has_type(record, FILE_INPUT_TYPE, "ExtensionNode"),
            kind: |record| NodeKind::FilePath {
                hint_path: str_field(record, "HintPath"),
                input_value: str_field(record, "InputValue"),
            },
        },
        NodeBuilder {
            name: "dir-path",
            matches: |record| has_type(record, DIR_INPUT_TYPE, "ExtensionNode"),
            kind: |record| NodeKind::DirPath {
                hint_path: str_field(record, "HintPath"),
                input_value: str_field(record, "InputValue"),
            },
        },
        NodeBuilder {
            name: "selection",
            matches: |record| {
                record.get("NodeType").and_then(Value::as_str) == Some("ExtensionNode")
                    && !is_blank_value(record, "SelectedString")
            },
            kind: |record| NodeKind::Selection {
                selected: str_field(record, "SelectedString"),
            },
        },
        NodeBuilder {
            name: "core-input",
            matches: |record| {
                record
                    .get("NodeType")
                    .and_then(Value::as_str)
                    .is_some_and(|node_type| node_type.ends_with("InputNode"))
                    && !is_blank_value(record, "InputValue")
            },
            kind: |record| NodeKind::CoreInput {
                value: str_field(record, "InputValue"),
            },
        },
        NodeBuilder {
            name: "general",
            matches: |_| true,
            kind: |_| NodeKind::General,
        },
    ]
}

/// Builds a graph node from a merged node record.
///
/// Records without an id are rejected; everything else is accepted by the
/// general fallback builder.
pub fn build_node(record: &Record) -> Option<GraphNode> {
    let id = record_id(record);
    if id.is_empty() {
        return None;
    }
    let kind = node_builders()
        .iter()
        .find(|builder| builder.matches(record))
        .map(|builder| builder.kind(record))?;
    Some(GraphNode {
        id: NodeId::new(id),
        name: str_field(record, "Name"),
        description: str_field(record, "Description"),
        position: Point::new(f64_field(record, "X"), f64_field(record, "Y")),
        disabled: bool_field(record, "Excluded", false),
        shows_geometry: bool_field(record, "ShowGeometry", true),
        is_input: bool_field(record, "IsSetAsInput", false),
        is_output: bool_field(record, "IsSetAsOutput", false),
        kind,
    })
}

/// Builds a dependency from its record; package references before external.
pub fn build_dependency(record: &Record) -> Option<Dependency> {
    let node_ids = member_ids(record)
        .into_iter()
        .map(NodeId::new)
        .collect::<Vec<_>>();
    match record.get("ReferenceType").and_then(Value::as_str) {
        Some("Package") => Some(Dependency::Package(PackageDependency {
            name: str_field(record, "Name"),
            version: str_field(record, "Version"),
            node_ids,
        })),
        Some("External") => Some(Dependency::External(ExternalDependency {
            name: str_field(record, "Name"),
            node_ids,
        })),
        _ => None,
    }
}

/// Builds a floating annotation from a view label record.
pub fn build_annotation(record: &Record) -> Option<Annotation> {
    let id = record_id(record);
    if id.is_empty() {
        return None;
    }
    Some(Annotation {
        id: NodeId::new(id),
        name: str_field(record, "Title"),
        position: Point::new(f64_field(record, "Left"), f64_field(record, "Top")),
        text: str_field(record, "Title"),
    })
}

/// Builds a group from a view label record.
pub fn build_group(record: &Record) -> Option<Group> {
    let id = record_id(record);
    if id.is_empty() {
        return None;
    }
    Some(Group {
        id: NodeId::new(id),
        name: str_field(record, "Title"),
        position: Point::new(f64_field(record, "Left"), f64_field(record, "Top")),
        text: str_field(record, "DescriptionText"),
        color: str_field(record, "Background"),
        node_ids: member_ids(record).into_iter().map(NodeId::new).collect(),
    })
}

/// Builds the environment record of a graph file.
pub fn build_graph_info(record: Option<&Record>) -> GraphInfo {
    let Some(record) = record else {
        return GraphInfo::default();
    };
    GraphInfo {
        version: str_field(record, "Version"),
        scale_factor: record
            .get("ScaleFactor")
            .map(|value| match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default(),
        run_type: str_field(record, "RunType"),
        has_run_without_crash: bool_field(record, "HasRunWithoutCrash", false),
        is_visible_in_library: bool_field(record, "IsVisibleInDynamoLibrary", true),
    }
}

/// Builds package manifest information.
pub fn build_package_info(record: &Record) -> PackageInfo {
    PackageInfo {
        version: str_field(record, "version"),
        license: str_field(record, "license"),
        group: str_field(record, "group"),
        keywords: match record.get("keywords") {
            Some(Value::Array(words)) => words
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            Some(Value::String(words)) => words.clone(),
            _ => String::new(),
        },
        contents: str_field(record, "contents"),
        engine_version: str_field(record, "engine_version"),
        site_url: str_field(record, "site_url"),
        repository_url: str_field(record, "repository_url"),
    }
}

/// Builds a declared input or output port.
pub fn build_io_port(record: &Record) -> Option<IoPort> {
    let id = record_id(record);
    if id.is_empty() {
        return None;
    }
    let value = if record.contains_key("Value") {
        str_field(record, "Value")
    } else {
        str_field(record, "InitialValue")
    };
    Some(IoPort {
        node_id: NodeId::new(id),
        name: str_field(record, "Name"),
        description: str_field(record, "Description"),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().expect("record literal").clone()
    }

    #[test]
    fn builder_order_is_stable() {
        let names: Vec<&str> = node_builders().iter().map(|builder| builder.name).collect();
        assert_eq!(
            names,
            vec![
                "custom-function",
                "zero-touch-function",
                "python",
                "code-block",
                "file-path",
                "dir-path",
                "selection",
                "core-input",
                "general",
            ]
        );
    }

    #[test]
    fn python_record_builds_a_python_node_not_a_code_block() {
        let node = build_node(&record(json!({
            "Id": "p1",
            "ConcreteType": "PythonNodeModels.PythonNode, PythonNodeModels",
            "NodeType": "PythonScriptNode",
            "Code": "import clr",
            "Engine": "CPython3",
            "Name": "Script"
        })))
        .expect("node");
        assert_eq!(
            node.kind,
            NodeKind::Python {
                code: "import clr".to_string(),
                engine: "CPython3".to_string(),
            }
        );
    }

    #[test]
    fn python_engine_defaults_when_absent() {
        let node = build_node(&record(json!({
            "Id": "p1",
            "ConcreteType": "PythonNodeModels.PythonNode, PythonNodeModels",
            "NodeType": "PythonScriptNode",
            "Code": "pass"
        })))
        .expect("node");
        assert!(matches!(node.kind, NodeKind::Python { engine, .. } if engine == "IronPython2"));
    }

    #[test]
    fn unknown_records_fall_back_to_general() {
        let node = build_node(&record(json!({
            "Id": "g1",
            "ConcreteType": "Some.Unknown.Type, Library",
            "NodeType": "ExtensionNode",
            "Name": "Mystery"
        })))
        .expect("node");
        assert_eq!(node.kind, NodeKind::General);
    }

    #[test]
    fn selection_wins_over_general_for_selected_extension_nodes() {
        let node = build_node(&record(json!({
            "Id": "s1",
            "NodeType": "ExtensionNode",
            "SelectedString": "Wall 42"
        })))
        .expect("node");
        assert_eq!(
            node.kind,
            NodeKind::Selection {
                selected: "Wall 42".to_string()
            }
        );
    }

    #[test]
    fn records_without_id_are_rejected() {
        assert!(build_node(&record(json!({"Name": "NoId"}))).is_none());
    }

    #[test]
    fn dependency_reference_types_are_distinguished() {
        let package = build_dependency(&record(json!({
            "ReferenceType": "Package",
            "Name": "tools",
            "Version": "1.0.0",
            "Nodes": ["a"]
        })))
        .expect("dependency");
        assert!(matches!(package, Dependency::Package(dep) if dep.full_name() == "tools [1.0.0]"));

        let external = build_dependency(&record(json!({
            "ReferenceType": "External",
            "Name": "lookup.xlsx",
            "Nodes": []
        })));
        assert!(matches!(external, Some(Dependency::External(_))));

        assert!(build_dependency(&record(json!({"Name": "odd"}))).is_none());
    }
}
