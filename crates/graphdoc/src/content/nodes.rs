//! Node-level content blocks.
//!
//! These blocks render below a listing heading with the current node set in
//! the context. A node documented in its own package renders a link heading
//! instead of repeating its table here.

use graphdoc_core::file::GraphFile;
use graphdoc_core::node::{GraphNode, NodeKind};

use crate::content::{Block, Headline, RenderContext, child_lines};
use crate::merge::MergeOptions;
use crate::sections::{SectionId, SectionNote};

/// The attribute table every node block shares.
pub fn node_table(graph: &GraphFile, node: &GraphNode, ctx: &RenderContext<'_>) -> Vec<String> {
    let values = ctx.values;
    let group_name = graph
        .group_of(&node.id)
        .map(|group| group.name.as_str())
        .unwrap_or("");
    let mut rows = vec![
        vec![
            "Description".to_string(),
            values.value_or_default(&node.description, Some("No description")),
        ],
        vec![
            "Group".to_string(),
            values.value_or_default(group_name, Some("No group")),
        ],
        vec![
            "Enabled".to_string(),
            values.bool_as_str(!node.disabled).to_string(),
        ],
        vec![
            "Shows geometry".to_string(),
            values.bool_as_str(node.shows_geometry).to_string(),
        ],
    ];
    if let NodeKind::Python { engine, .. } = &node.kind {
        rows.push(vec![
            "Engine".to_string(),
            values.value_or_default(engine, Some("No python engine")),
        ]);
    }
    ctx.exporter.as_table(Some(&["Attribute", "Value"]), &rows)
}

/// A node's canonical display name: trimmed, default-substituted when
/// blank. Headings are merge keys, so this must be stable across runs.
pub fn node_name(node: &GraphNode, ctx: &RenderContext<'_>) -> String {
    ctx.values.value_or_default(&node.name, None)
}

/// The heading text of a node: its name, or a link to the member document
/// when the node is a package reference that is documented elsewhere.
pub fn node_heading(graph: &GraphFile, node: &GraphNode, ctx: &RenderContext<'_>) -> String {
    let name = node_name(node, ctx);
    if let Some(uuid) = node.member_uuid() {
        if let Some(dep) = graph.package_of(&node.id) {
            if let Some(target) = ctx.manager.member_target(uuid, &dep.version) {
                return ctx
                    .exporter
                    .file_link(&target.doc_path, &ctx.doc.doc_path, &name);
            }
        }
    }
    name
}

/// A linked note rendered as its own headed block.
///
/// Giving the note a heading keeps its body out of the manual-text recovery
/// of the surrounding block on the next run.
pub struct SectionNoteBlock<'a> {
    note: &'a SectionNote,
}

impl<'a> SectionNoteBlock<'a> {
    pub fn new(note: &'a SectionNote) -> Self {
        Self { note }
    }
}

impl<'a> Headline<'a> for SectionNoteBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some(self.note.heading_title().to_string())
    }

    fn body(&self, _level: usize, _ctx: &RenderContext<'a>) -> Vec<String> {
        self.note.body.clone()
    }
}

fn note_children<'a>(
    section: Option<SectionId>,
    level: usize,
    ctx: &RenderContext<'a>,
) -> Vec<String> {
    let node = ctx.node();
    let mut lines = Vec::new();
    for note in ctx.notes.node_notes(&node.id) {
        if section.is_some_and(|section| note.section != section) {
            continue;
        }
        let block = SectionNoteBlock::new(note);
        lines.extend(child_lines(&block, level, ctx));
    }
    lines
}

/// A node's attribute table plus its linked notes.
pub struct NodeInfoBlock<'a> {
    graph: &'a GraphFile,
    section: Option<SectionId>,
}

impl<'a> NodeInfoBlock<'a> {
    /// `section` restricts the rendered notes; `None` renders them all.
    pub fn new(graph: &'a GraphFile, section: Option<SectionId>) -> Self {
        Self { graph, section }
    }
}

impl<'a> Headline<'a> for NodeInfoBlock<'a> {
    fn headline(&self, ctx: &RenderContext<'a>) -> Option<String> {
        Some(node_heading(self.graph, ctx.node(), ctx))
    }

    fn body(&self, _level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        node_table(self.graph, ctx.node(), ctx)
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        note_children(self.section, level, ctx)
    }
}

/// A code-carrying node: fenced source block plus linked notes.
pub struct CodeNodeBlock<'a> {
    graph: &'a GraphFile,
    language: &'static str,
}

impl<'a> CodeNodeBlock<'a> {
    pub fn new(graph: &'a GraphFile, language: &'static str) -> Self {
        Self { graph, language }
    }
}

impl<'a> Headline<'a> for CodeNodeBlock<'a> {
    fn headline(&self, ctx: &RenderContext<'a>) -> Option<String> {
        Some(node_name(ctx.node(), ctx))
    }

    fn body(&self, _level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let code = ctx.node().code().unwrap_or("");
        ctx.exporter.as_code(code, self.language, 4)
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        note_children(None, level, ctx)
    }
}

/// A path-input node: attribute table, then the author's own notes about
/// the file or directory, recovered from the previous output.
///
/// The table is regenerated every run, so a previously written copy is
/// stripped from the recovered text.
pub struct PathNodeBlock<'a> {
    graph: &'a GraphFile,
}

impl<'a> PathNodeBlock<'a> {
    pub fn new(graph: &'a GraphFile) -> Self {
        Self { graph }
    }
}

impl<'a> Headline<'a> for PathNodeBlock<'a> {
    fn headline(&self, ctx: &RenderContext<'a>) -> Option<String> {
        Some(node_name(ctx.node(), ctx))
    }

    fn body(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let mut lines = node_table(self.graph, ctx.node(), ctx);
        lines.push(String::new());
        lines.extend(ctx.manual_docs(
            &node_name(ctx.node(), ctx),
            level,
            MergeOptions {
                strip_tables: true,
                strip_doc_links: false,
            },
        ));
        lines
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        note_children(None, level, ctx)
    }
}

/// One child block per listed node, rendered with the node set as current.
pub struct NodeListingBlock<'a> {
    headline: &'static str,
    nodes: Vec<&'a GraphNode>,
    child: Box<dyn Block<'a> + 'a>,
}

impl<'a> NodeListingBlock<'a> {
    pub fn new(
        headline: &'static str,
        nodes: Vec<&'a GraphNode>,
        child: Box<dyn Block<'a> + 'a>,
    ) -> Self {
        Self {
            headline,
            nodes,
            child,
        }
    }
}

impl<'a> Headline<'a> for NodeListingBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some(self.headline.to_string())
    }

    fn body(&self, _level: usize, _ctx: &RenderContext<'a>) -> Vec<String> {
        Vec::new()
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let mut lines = Vec::new();
        for node in &self.nodes {
            let node_ctx = ctx.with_node(node);
            lines.extend(child_lines(self.child.as_ref(), level, &node_ctx));
        }
        lines
    }

    fn present(&self, _ctx: &RenderContext<'a>) -> bool {
        !self.nodes.is_empty()
    }
}
