//! Association of section notes with the file or with individual nodes.
//!
//! Linking is a pure per-file pass: it reads the immutable model and
//! produces a [`NoteTable`] side table keyed by node id. Nothing is cached
//! on the model objects.
//!
//! Groups link to their explicit member list. Annotations link to the
//! nearest candidate node by Euclidean distance over canvas positions;
//! candidates are the nodes admitted by the note's section. When two
//! candidates are equidistant, the first one in the file's node enumeration
//! order wins; implementation-defined, but deliberate and tested.

use indexmap::IndexMap;

use graphdoc_core::file::GraphFile;
use graphdoc_core::geometry::Point;
use graphdoc_core::node::{GraphNode, NodeId};

use crate::error::DocError;
use crate::sections::{Section, SectionId, SectionKind, SectionNote, section};

/// Whether a node is a linking candidate for a section within this file.
///
/// Beyond the section's own node predicate, scripts may declare ports: a
/// node listed in the file's input or output declarations is a candidate
/// even without the flag.
fn admits(file: &GraphFile, section: &Section, node: &GraphNode) -> bool {
    match section.id {
        SectionId::Input => {
            node.is_input || file.inputs.iter().any(|port| port.node_id == node.id)
        }
        SectionId::Output => {
            node.is_output || file.outputs.iter().any(|port| port.node_id == node.id)
        }
        _ => section.admits(node),
    }
}

/// Linked section notes of one file.
#[derive(Debug, Default)]
pub struct NoteTable {
    headline: IndexMap<SectionId, Vec<SectionNote>>,
    nodes: IndexMap<NodeId, Vec<SectionNote>>,
}

impl NoteTable {
    /// Builds the note table for a file.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::UnlinkedNote`] when a node-scoped annotation has
    /// no candidate node at all; generation of this file must abort.
    pub fn link(file: &GraphFile) -> Result<Self, DocError> {
        let mut table = NoteTable::default();
        for group in &file.groups {
            let Some(note) = SectionNote::parse(&group.text) else {
                continue;
            };
            match section(note.section).kind {
                SectionKind::Headline => table.push_headline(note),
                SectionKind::Node => {
                    for id in &group.node_ids {
                        table.push_node(id.clone(), note.clone());
                    }
                }
            }
        }
        for annotation in &file.annotations {
            let Some(note) = SectionNote::parse(&annotation.text) else {
                continue;
            };
            let definition = section(note.section);
            match definition.kind {
                SectionKind::Headline => table.push_headline(note),
                SectionKind::Node => {
                    let candidates = file
                        .nodes
                        .iter()
                        .filter(|node| admits(file, definition, node));
                    match nearest_node(candidates, annotation.position) {
                        Some(node) => table.push_node(node.id.clone(), note),
                        None => {
                            return Err(DocError::UnlinkedNote {
                                label: annotation
                                    .text
                                    .lines()
                                    .next()
                                    .unwrap_or("")
                                    .trim()
                                    .to_string(),
                                path: file.path.clone(),
                            });
                        }
                    }
                }
            }
        }
        table.sort_by_order();
        Ok(table)
    }

    fn push_headline(&mut self, note: SectionNote) {
        self.headline.entry(note.section).or_default().push(note);
    }

    fn push_node(&mut self, id: NodeId, note: SectionNote) {
        self.nodes.entry(id).or_default().push(note);
    }

    fn sort_by_order(&mut self) {
        for notes in self.headline.values_mut() {
            notes.sort_by_key(|note| note.order.unwrap_or(u32::MAX));
        }
        for notes in self.nodes.values_mut() {
            notes.sort_by_key(|note| note.order.unwrap_or(u32::MAX));
        }
    }

    /// Headline notes of a section, in order-hint then placement order.
    pub fn headline_notes(&self, id: SectionId) -> &[SectionNote] {
        self.headline.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All notes linked to a node.
    pub fn node_notes(&self, id: &NodeId) -> &[SectionNote] {
        self.nodes.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of the nodes carrying notes of a section, in linking order.
    pub fn nodes_with(&self, section: SectionId) -> Vec<&NodeId> {
        self.nodes
            .iter()
            .filter(|(_, notes)| notes.iter().any(|note| note.section == section))
            .map(|(id, _)| id)
            .collect()
    }
}

/// Finds the candidate closest to `position`.
///
/// Comparison is strict, so among equidistant candidates the first one
/// encountered wins.
pub fn nearest_node<'a>(
    candidates: impl Iterator<Item = &'a GraphNode>,
    position: Point,
) -> Option<&'a GraphNode> {
    let mut best: Option<(&GraphNode, f64)> = None;
    for node in candidates {
        let distance = node.position.distance(position);
        match best {
            Some((_, closest)) if distance >= closest => {}
            _ => best = Some((node, distance)),
        }
    }
    best.map(|(node, _)| node)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    use graphdoc_core::annotation::{Annotation, Group};
    use graphdoc_core::file::GraphInfo;
    use graphdoc_core::node::NodeKind;

    fn node(id: &str, x: f64, y: f64) -> GraphNode {
        GraphNode {
            id: NodeId::new(id),
            name: id.to_string(),
            description: String::new(),
            position: Point::new(x, y),
            disabled: false,
            shows_geometry: true,
            is_input: false,
            is_output: false,
            kind: NodeKind::General,
        }
    }

    fn annotation(id: &str, x: f64, y: f64, text: &str) -> Annotation {
        Annotation {
            id: NodeId::new(id),
            name: String::new(),
            position: Point::new(x, y),
            text: text.to_string(),
        }
    }

    fn file(nodes: Vec<GraphNode>, annotations: Vec<Annotation>, groups: Vec<Group>) -> GraphFile {
        GraphFile {
            path: PathBuf::from("script.dyn"),
            uuid: "u".to_string(),
            name: "script".to_string(),
            description: String::new(),
            info: GraphInfo::default(),
            nodes,
            groups,
            annotations,
            dependencies: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    #[test]
    fn annotation_links_to_the_nearest_node() {
        let nodes = vec![node("a", 0.0, 0.0), node("b", 10.0, 0.0)];

        let near_a = file(nodes.clone(), vec![annotation("n", 1.0, 0.0, "[W] careful")], vec![]);
        let table = NoteTable::link(&near_a).expect("table");
        assert_eq!(table.nodes_with(SectionId::Warnings), vec![&NodeId::new("a")]);

        let near_b = file(nodes, vec![annotation("n", 9.0, 0.0, "[W] careful")], vec![]);
        let table = NoteTable::link(&near_b).expect("table");
        assert_eq!(table.nodes_with(SectionId::Warnings), vec![&NodeId::new("b")]);
    }

    #[test]
    fn equidistant_candidates_resolve_to_the_first_in_enumeration_order() {
        let nodes = vec![node("a", 0.0, 0.0), node("b", 10.0, 0.0)];
        let centred = file(nodes, vec![annotation("n", 5.0, 0.0, "[W] careful")], vec![]);
        let table = NoteTable::link(&centred).expect("table");
        assert_eq!(table.nodes_with(SectionId::Warnings), vec![&NodeId::new("a")]);
    }

    #[test]
    fn section_predicate_restricts_candidates() {
        let mut input = node("in", 100.0, 0.0);
        input.is_input = true;
        let other = node("near", 0.0, 0.0);
        let linked = file(
            vec![other, input],
            vec![annotation("n", 1.0, 0.0, "[I] count of tracks")],
            vec![],
        );
        // The nearer node is not an input, so the note links to the far one.
        let table = NoteTable::link(&linked).expect("table");
        assert_eq!(table.nodes_with(SectionId::Input), vec![&NodeId::new("in")]);
    }

    #[test]
    fn declared_ports_are_candidates_without_the_flag() {
        use graphdoc_core::file::IoPort;

        let declared = node("decl", 100.0, 0.0);
        let mut linked = file(
            vec![node("near", 0.0, 0.0), declared],
            vec![annotation("n", 1.0, 0.0, "[I] element count")],
            vec![],
        );
        linked.inputs = vec![IoPort {
            node_id: NodeId::new("decl"),
            name: "count".to_string(),
            description: String::new(),
            value: String::new(),
        }];
        let table = NoteTable::link(&linked).expect("table");
        assert_eq!(table.nodes_with(SectionId::Input), vec![&NodeId::new("decl")]);
    }

    #[test]
    fn orphaned_node_annotation_is_a_per_file_error() {
        let empty = file(vec![], vec![annotation("n", 0.0, 0.0, "[W] lost")], vec![]);
        let err = NoteTable::link(&empty).expect_err("must fail");
        match err {
            DocError::UnlinkedNote { label, .. } => assert_eq!(label, "[W] lost"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn groups_link_by_member_list_not_proximity() {
        let nodes = vec![node("a", 0.0, 0.0), node("b", 1000.0, 1000.0)];
        let group = Group {
            id: NodeId::new("g"),
            name: "G".to_string(),
            position: Point::new(0.0, 0.0),
            text: "[W] all of these".to_string(),
            color: String::new(),
            node_ids: vec![NodeId::new("b")],
        };
        let linked = file(nodes, vec![], vec![group]);
        let table = NoteTable::link(&linked).expect("table");
        assert_eq!(table.nodes_with(SectionId::Warnings), vec![&NodeId::new("b")]);
    }

    #[test]
    fn headline_notes_are_sorted_by_order_hint() {
        let linked = file(
            vec![],
            vec![
                annotation("n1", 0.0, 0.0, "[T] 2 Later"),
                annotation("n2", 0.0, 0.0, "[T] 1 First"),
            ],
            vec![],
        );
        let table = NoteTable::link(&linked).expect("table");
        let titles: Vec<&str> = table
            .headline_notes(SectionId::Tutorial)
            .iter()
            .map(|note| note.title.as_str())
            .collect();
        assert_eq!(titles, vec!["First", "Later"]);
    }

    #[test]
    fn labels_without_sections_are_ignored() {
        let linked = file(vec![node("a", 0.0, 0.0)], vec![annotation("n", 0.0, 0.0, "plain remark")], vec![]);
        let table = NoteTable::link(&linked).expect("table");
        assert!(table.nodes_with(SectionId::Warnings).is_empty());
    }
}
