//! End-to-end properties of the generator: regeneration is idempotent,
//! authored text survives, placeholders round-trip, empty subtrees are
//! suppressed, and stale output is cleaned up.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use graphdoc::export::org::OrgExporter;
use graphdoc::locate::DocsManager;
use graphdoc::{DocOptions, DocsGenerator};
use graphdoc_core::annotation::{Annotation, Group};
use graphdoc_core::dependency::{Dependency, ExternalDependency, PackageDependency};
use graphdoc_core::file::{GraphFile, GraphInfo, MemberFile, Package, PackageInfo};
use graphdoc_core::geometry::Point;
use graphdoc_core::node::{GraphNode, NodeId, NodeKind};
use graphdoc_core::values::ValueHandler;

const EXPORTER: OrgExporter = OrgExporter;

fn node(id: &str, name: &str, x: f64, y: f64, kind: NodeKind) -> GraphNode {
    GraphNode {
        id: NodeId::new(id),
        name: name.to_string(),
        description: String::new(),
        position: Point::new(x, y),
        disabled: false,
        shows_geometry: true,
        is_input: false,
        is_output: false,
        kind,
    }
}

fn empty_graph(path: &str, uuid: &str, name: &str) -> GraphFile {
    GraphFile {
        path: PathBuf::from(path),
        uuid: uuid.to_string(),
        name: name.to_string(),
        description: String::new(),
        info: GraphInfo {
            version: "2.17".to_string(),
            ..GraphInfo::default()
        },
        nodes: Vec::new(),
        groups: Vec::new(),
        annotations: Vec::new(),
        dependencies: Vec::new(),
        inputs: Vec::new(),
        outputs: Vec::new(),
    }
}

/// A script exercising every block: python and code block nodes, a path
/// node, a package-reference node, linked warning and input notes, and a
/// tutorial group.
fn full_script() -> GraphFile {
    let mut script = empty_graph("/src/Scripts/run model.dyn", "s-1", "run model");

    let python = node(
        "n-py",
        "Calc",
        0.0,
        0.0,
        NodeKind::Python {
            code: "import math\nprint(math.pi)".to_string(),
            engine: "CPython3".to_string(),
        },
    );
    let block = node(
        "n-cb",
        "Block",
        50.0,
        0.0,
        NodeKind::CodeBlock {
            code: "a + b;".to_string(),
        },
    );
    let path = node(
        "n-path",
        "tracks.xlsx",
        100.0,
        0.0,
        NodeKind::FilePath {
            hint_path: "C:\\data\\tracks.xlsx".to_string(),
            input_value: "tracks.xlsx".to_string(),
        },
    );
    let custom = node(
        "n-cust",
        "Area Of",
        150.0,
        0.0,
        NodeKind::Custom {
            uuid: "m-1".to_string(),
        },
    );
    let mut input = node("n-in", "Count", 200.0, 0.0, NodeKind::CoreInput {
        value: "3".to_string(),
    });
    input.is_input = true;

    script.nodes = vec![python, block, path, custom, input];
    script.annotations = vec![
        Annotation {
            id: NodeId::new("a-warn"),
            name: String::new(),
            position: Point::new(1.0, 1.0),
            text: "[W] Slow for large models\n\nRuns minutes on big graphs.".to_string(),
        },
        Annotation {
            id: NodeId::new("a-in"),
            name: String::new(),
            position: Point::new(199.0, 0.0),
            text: "[I] Track count\n\nHow many tracks to lay out.".to_string(),
        },
    ];
    script.groups = vec![Group {
        id: NodeId::new("g-tut"),
        name: "Tutorial".to_string(),
        position: Point::new(0.0, 50.0),
        text: "[T]\n\nRun after loading the survey model.".to_string(),
        color: "#FFAA00".to_string(),
        node_ids: vec![NodeId::new("n-py")],
    }];
    script.dependencies = vec![
        Dependency::Package(PackageDependency {
            name: "rail.tools".to_string(),
            version: "1.2.0".to_string(),
            node_ids: vec![NodeId::new("n-cust")],
        }),
        Dependency::External(ExternalDependency {
            name: "tracks.xlsx".to_string(),
            node_ids: vec![NodeId::new("n-path")],
        }),
    ];
    script
}

fn package() -> Package {
    let mut member_graph = empty_graph("/src/Packages/rail.tools/dyf/Area_Of.dyf", "m-1", "Area Of");
    member_graph.nodes = vec![node(
        "m-py",
        "Compute",
        0.0,
        0.0,
        NodeKind::Python {
            code: "return inputs[0]".to_string(),
            engine: "CPython3".to_string(),
        },
    )];
    Package {
        path: PathBuf::from("/src/Packages/rail.tools/pkg.json"),
        name: "rail.tools".to_string(),
        description: "Rail layout helpers".to_string(),
        info: PackageInfo {
            version: "1.2.0".to_string(),
            engine_version: "2.17".to_string(),
            contents: "Area and layout nodes".to_string(),
            ..PackageInfo::default()
        },
        members: vec![MemberFile {
            graph: member_graph,
            category: "Geometry".to_string(),
        }],
    }
}

fn generator(doc_root: &Path) -> DocsGenerator<'static> {
    let manager = DocsManager::new(
        doc_root,
        Path::new("/src/Scripts"),
        Path::new("/src/Packages"),
        ".org",
    );
    DocsGenerator::new(
        manager,
        &EXPORTER,
        ValueHandler::default(),
        DocOptions::default(),
    )
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("document exists")
}

#[test]
fn regeneration_is_byte_identical() {
    let temp = TempDir::new().expect("tempdir");
    let scripts = vec![full_script()];
    let packages = vec![package()];

    let mut generator = generator(temp.path());
    let first = generator.generate(&scripts, &packages);
    assert_eq!(first.failed, 0);
    assert!(!first.written.is_empty());
    let first_texts: Vec<String> = first.written.iter().map(|path| read(path)).collect();

    let second = generator.generate(&scripts, &packages);
    assert_eq!(second.written, first.written);
    assert_eq!(second.removed, 0);
    let second_texts: Vec<String> = second.written.iter().map(|path| read(path)).collect();
    assert_eq!(first_texts, second_texts);
}

#[test]
fn script_document_renders_all_sections() {
    let temp = TempDir::new().expect("tempdir");
    let scripts = vec![full_script()];
    let packages = vec![package()];
    let mut generator = generator(temp.path());
    generator.generate(&scripts, &packages);

    let text = read(&temp.path().join("Scripts/run model.org"));
    assert!(
        text.lines()
            .any(|line| line.starts_with("#+title:") && line.ends_with("run model"))
    );
    assert!(text.contains("* Tutorial"));
    assert!(text.contains("Run after loading the survey model."));
    assert!(text.contains("** Files / Directories"));
    assert!(text.contains("*** tracks.xlsx"));
    assert!(text.contains("** Input"));
    assert!(text.contains("How many tracks to lay out."));
    assert!(text.contains("* Warnings"));
    assert!(text.contains("Runs minutes on big graphs."));
    assert!(text.contains("* Source Code"));
    assert!(text.contains("#+begin_src python"));
    assert!(text.contains("#+begin_src DesignScript"));
    assert!(text.contains("* Information"));
    assert!(text.contains("**** rail.tools [1.2.0]"));
    // The package-reference node links to its member document.
    assert!(text.contains("[[file:./../Packages/rail-tools/1-2-0/Area_Of.org][Area Of]]"));
}

#[test]
fn warning_note_links_to_the_nearest_node() {
    let temp = TempDir::new().expect("tempdir");
    let scripts = vec![full_script()];
    let mut generator = generator(temp.path());
    generator.generate(&scripts, &[]);

    let text = read(&temp.path().join("Scripts/run model.org"));
    // The warning sits at (1,1): nearest node is the python node "Calc".
    let warnings = text.split("* Warnings").nth(1).expect("warnings section");
    assert!(warnings.trim_start().starts_with("** Calc"));
}

#[test]
fn manual_text_is_preserved_across_regeneration() {
    let temp = TempDir::new().expect("tempdir");
    let scripts = vec![full_script()];
    let mut generator = generator(temp.path());
    generator.generate(&scripts, &[]);

    let doc_path = temp.path().join("Scripts/run model.org");
    // The description has no model content: the author replaces its
    // placeholder by hand.
    let text = read(&doc_path).replace(
        "** Description\n\n???",
        "** Description\n\nLays out rails along the alignment.",
    );
    fs::write(&doc_path, text).expect("write");

    generator.generate(&scripts, &[]);
    let regenerated = read(&doc_path);
    assert!(regenerated.contains("Lays out rails along the alignment."));
    // And the carried-over text is stable on the run after that.
    generator.generate(&scripts, &[]);
    assert_eq!(read(&doc_path), regenerated);
}

#[test]
fn placeholder_round_trips_without_duplication() {
    let temp = TempDir::new().expect("tempdir");
    let scripts = vec![full_script()];
    let mut generator = generator(temp.path());
    generator.generate(&scripts, &[]);

    let doc_path = temp.path().join("Scripts/run model.org");
    let first = read(&doc_path);
    let placeholders = first.matches("???").count();
    assert!(placeholders > 0);

    generator.generate(&scripts, &[]);
    assert_eq!(read(&doc_path).matches("???").count(), placeholders);
}

#[test]
fn empty_dependency_sections_are_suppressed() {
    let temp = TempDir::new().expect("tempdir");
    let mut script = full_script();
    script.dependencies.clear();
    let mut generator = generator(temp.path());
    generator.generate(&[script], &[]);

    let text = read(&temp.path().join("Scripts/run model.org"));
    assert!(!text.contains("Dependencies"));
    assert!(!text.contains("* External"));
    assert!(!text.contains("* Packages"));
}

#[test]
fn external_dependencies_alone_keep_their_sibling_suppressed() {
    let temp = TempDir::new().expect("tempdir");
    let mut script = full_script();
    script.dependencies = vec![Dependency::External(ExternalDependency {
        name: "tracks.xlsx".to_string(),
        node_ids: vec![NodeId::new("n-path")],
    })];
    let mut generator = generator(temp.path());
    generator.generate(&[script], &[]);

    let text = read(&temp.path().join("Scripts/run model.org"));
    assert!(text.contains("** Dependencies"));
    assert!(text.contains("*** External"));
    assert!(!text.contains("*** Packages"));
}

#[test]
fn scripts_without_code_render_no_source_section() {
    let temp = TempDir::new().expect("tempdir");
    let mut script = empty_graph("/src/Scripts/plain.dyn", "s-2", "plain");
    script.nodes = vec![node("n-1", "Plain", 0.0, 0.0, NodeKind::General)];
    let mut generator = generator(temp.path());
    generator.generate(&[script], &[]);

    let text = read(&temp.path().join("Scripts/plain.org"));
    assert!(!text.contains("* Source Code"));
    assert!(!text.contains("* Warnings"));
}

#[test]
fn package_and_member_documents_are_written() {
    let temp = TempDir::new().expect("tempdir");
    let packages = vec![package()];
    let mut generator = generator(temp.path());
    generator.generate(&[], &packages);

    let package_text = read(
        &temp
            .path()
            .join("Packages/rail-tools/rail-tools-1-2-0.org"),
    );
    assert!(package_text.contains("* Information"));
    assert!(package_text.contains("Rail layout helpers"));
    assert!(package_text.contains("Area and layout nodes"));
    assert!(package_text.contains("* Node Documentation"));
    assert!(package_text.contains("** Geometry"));
    assert!(package_text.contains("[[file:./1-2-0/Area_Of.org][Area Of]]"));

    let member_text = read(&temp.path().join("Packages/rail-tools/1-2-0/Area_Of.org"));
    assert!(member_text.contains("* Source Code"));
    assert!(member_text.contains("** Python Nodes"));
    assert!(member_text.contains("| Category  | Geometry"));
}

#[test]
fn stale_documents_are_removed() {
    let temp = TempDir::new().expect("tempdir");
    let scripts = vec![full_script()];
    let mut generator = generator(temp.path());
    generator.generate(&scripts, &[]);

    let stale = temp.path().join("Scripts/gone.org");
    fs::write(&stale, "* Leftover\n").expect("write");

    let summary = generator.generate(&scripts, &[]);
    assert_eq!(summary.removed, 1);
    assert!(!stale.exists());
    assert!(temp.path().join("Scripts/run model.org").exists());
}

#[test]
fn orphaned_annotation_fails_that_file_only() {
    let temp = TempDir::new().expect("tempdir");
    let mut broken = empty_graph("/src/Scripts/broken.dyn", "s-3", "broken");
    broken.annotations = vec![Annotation {
        id: NodeId::new("a-1"),
        name: String::new(),
        position: Point::new(0.0, 0.0),
        text: "[W] floats alone".to_string(),
    }];
    let good = full_script();

    let mut generator = generator(temp.path());
    let summary = generator.generate(&[broken, good], &[]);
    assert_eq!(summary.failed, 1);
    assert!(!temp.path().join("Scripts/broken.org").exists());
    assert!(temp.path().join("Scripts/run model.org").exists());
}
