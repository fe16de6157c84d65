//! End-to-end test: a small source tree goes in, documentation comes out.

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::tempdir;

use graphdoc_cli::{Args, Command, run};

fn write_json(path: &Path, value: serde_json::Value) {
    fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
    fs::write(path, serde_json::to_string_pretty(&value).expect("json")).expect("write");
}

fn script_json() -> serde_json::Value {
    json!({
        "Uuid": "s-1",
        "Name": "10_layout",
        "Description": "Lays out the rails",
        "Nodes": [
            {
                "Id": "n-py",
                "ConcreteType": "PythonNodeModels.PythonNode, PythonNodeModels",
                "NodeType": "PythonScriptNode",
                "Code": "OUT = IN[0]",
                "Engine": "CPython3"
            }
        ],
        "Inputs": [],
        "Outputs": [],
        "NodeLibraryDependencies": [],
        "View": {
            "Dynamo": {"Version": "2.17", "RunType": "Manual"},
            "NodeViews": [
                {"Id": "n-py", "Name": "Layout", "X": 0.0, "Y": 0.0,
                 "ShowGeometry": true, "Excluded": false,
                 "IsSetAsInput": false, "IsSetAsOutput": false}
            ],
            "Annotations": [
                {"Id": "a-1", "Title": "[W] Needs the survey model\n\nFails on empty documents.",
                 "Nodes": [], "Left": 1.0, "Top": 1.0}
            ]
        }
    })
}

#[test]
fn docs_subcommand_writes_script_and_package_documents() {
    let temp = tempdir().expect("tempdir");
    let source_root = temp.path().join("src");
    let doc_root = temp.path().join("docs");

    write_json(&source_root.join("Scripts/10_layout.dyn"), script_json());
    write_json(
        &source_root.join("Packages/rail.tools/pkg.json"),
        json!({
            "name": "rail.tools",
            "version": "1.2.0",
            "description": "Rail helpers",
            "engine_version": "2.17"
        }),
    );
    write_json(
        &source_root.join("Packages/rail.tools/dyf/Area.dyf"),
        json!({
            "Uuid": "m-1",
            "Name": "Area",
            "Category": "Geometry",
            "Nodes": [],
            "View": {"NodeViews": [], "Annotations": []}
        }),
    );

    let args = Args {
        command: Command::Docs {
            source_root: Some(source_root.clone()),
            doc_root: Some(doc_root.clone()),
        },
        config: None,
        log_level: "off".to_string(),
    };
    run(&args).expect("docs run succeeds");

    let script_doc = doc_root.join("Scripts/10_layout.org");
    let text = fs::read_to_string(&script_doc).expect("script document");
    assert!(text.contains("* Warnings"));
    assert!(text.contains("Fails on empty documents."));
    assert!(text.contains("#+begin_src python"));
    assert!(text.contains("Lays out the rails"));

    assert!(
        doc_root
            .join("Packages/rail-tools/rail-tools-1-2-0.org")
            .exists()
    );
    assert!(doc_root.join("Packages/rail-tools/1-2-0/Area.org").exists());

    // A second run against its own output must not change anything.
    run(&args).expect("second run succeeds");
    assert_eq!(fs::read_to_string(&script_doc).expect("script document"), text);
}

#[test]
fn check_subcommand_runs_on_a_clean_tree() {
    let temp = tempdir().expect("tempdir");
    let source_root = temp.path().join("src");
    write_json(&source_root.join("Scripts/10_layout.dyn"), script_json());

    let args = Args {
        command: Command::Check {
            source_root: Some(source_root),
        },
        config: None,
        log_level: "off".to_string(),
    };
    run(&args).expect("check run succeeds");
}
