//! The composite content tree.
//!
//! A document is rendered by a tree of content blocks built fresh for every
//! run and discarded afterwards. Each block knows how to render itself at a
//! nesting level, whether it has anything to say, and how to recover the
//! text an author wrote under its heading in the previous output.
//!
//! Rendering is top-down: a block emits a blank separator, its heading, its
//! body (model-derived content, or recovered manual text when the model has
//! nothing for this heading), and its non-empty children one level deeper.
//! Heading text doubles as the merge key and must therefore be computed
//! identically on every run for the same model state.

use graphdoc_core::node::GraphNode;
use graphdoc_core::values::{self, ValueHandler};

use crate::export::Exporter;
use crate::linker::NoteTable;
use crate::locate::{DocFile, DocsManager};
use crate::merge::{self, MergeOptions};

pub mod blocks;
pub mod member;
pub mod nodes;
pub mod package;
pub mod script;

/// Everything a block may consult while rendering.
///
/// The context is cheap to copy; listing blocks clone it with the current
/// node set for each child they render.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub exporter: &'a dyn Exporter,
    pub values: &'a ValueHandler,
    pub manager: &'a DocsManager,
    pub doc: &'a DocFile,
    pub previous: &'a [String],
    pub notes: &'a NoteTable,
    node: Option<&'a GraphNode>,
}

impl<'a> RenderContext<'a> {
    /// Creates a context without a current node.
    pub fn new(
        exporter: &'a dyn Exporter,
        values: &'a ValueHandler,
        manager: &'a DocsManager,
        doc: &'a DocFile,
        previous: &'a [String],
        notes: &'a NoteTable,
    ) -> Self {
        Self {
            exporter,
            values,
            manager,
            doc,
            previous,
            notes,
            node: None,
        }
    }

    /// A copy of this context with the current node set.
    pub fn with_node(&self, node: &'a GraphNode) -> RenderContext<'a> {
        RenderContext {
            node: Some(node),
            ..*self
        }
    }

    /// The current node.
    ///
    /// # Panics
    ///
    /// Panics when no node is set. Node-scoped blocks are only reachable
    /// through listing blocks that set one; anything else is a programmer
    /// error, not a recoverable condition.
    pub fn node(&self) -> &'a GraphNode {
        self.node
            .expect("node-scoped content block rendered without a current node")
    }

    /// Recovers the manual text under the given heading from the previous
    /// output; see [`merge::manual_docs`].
    pub fn manual_docs(&self, headline: &str, level: usize, options: MergeOptions) -> Vec<String> {
        let heading = self.exporter.heading(headline, level);
        merge::manual_docs(self.previous, &heading, self.exporter, self.values, options)
    }

    /// Like [`Self::manual_docs`], but empty when only the placeholder would
    /// be recovered. Used by blocks whose body is optional.
    pub fn manual_docs_if_written(
        &self,
        headline: &str,
        level: usize,
        options: MergeOptions,
    ) -> Vec<String> {
        let lines = self.manual_docs(headline, level, options);
        if lines.len() == 1 && lines[0] == self.values.placeholder() {
            Vec::new()
        } else {
            lines
        }
    }
}

/// A unit of the rendered document tree.
pub trait Block<'a> {
    /// Whether this block would render anything beyond an empty heading.
    /// Blocks answering `false` are suppressed entirely.
    fn has_content(&self, ctx: &RenderContext<'a>) -> bool {
        let _ = ctx;
        true
    }

    /// Renders the block at the given nesting level.
    fn render(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String>;
}

/// The shared shape of blocks that render a heading, a body, and children.
///
/// Implementors get the rendering skeleton through the blanket [`Block`]
/// implementation; it is the only way to implement [`Block`].
pub trait Headline<'a> {
    /// The heading text at this block's position; also the merge key.
    /// `None` renders the body without any heading (the title block).
    fn headline(&self, ctx: &RenderContext<'a>) -> Option<String>;

    /// The body below the heading.
    fn body(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String>;

    /// Rendered child blocks, one level deeper than `level` of the parent.
    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let _ = (level, ctx);
        Vec::new()
    }

    /// See [`Block::has_content`].
    fn present(&self, ctx: &RenderContext<'a>) -> bool {
        let _ = ctx;
        true
    }
}

impl<'a, T: Headline<'a>> Block<'a> for T {
    fn has_content(&self, ctx: &RenderContext<'a>) -> bool {
        self.present(ctx)
    }

    fn render(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let mut inner = Vec::new();
        if let Some(headline) = self.headline(ctx) {
            inner.push(ctx.exporter.heading(&headline, level));
            inner.push(String::new());
        }
        inner.extend(self.body(level, ctx));
        let inner = values::strip_empty(inner);

        let mut lines = vec![String::new()];
        lines.extend(inner);
        lines.push(String::new());
        lines.extend(values::strip_empty(self.children(level + 1, ctx)));
        lines
    }
}

/// Renders one child, trimmed of trailing blanks; nothing when the child has
/// no content.
pub fn child_lines<'a>(
    child: &dyn Block<'a>,
    level: usize,
    ctx: &RenderContext<'a>,
) -> Vec<String> {
    if !child.has_content(ctx) {
        return Vec::new();
    }
    values::strip_trailing_empty(child.render(level, ctx))
}

/// Renders a list of children in order.
pub fn render_children<'a>(
    children: &[Box<dyn Block<'a> + 'a>],
    level: usize,
    ctx: &RenderContext<'a>,
) -> Vec<String> {
    let mut lines = Vec::new();
    for child in children {
        lines.extend(child_lines(child.as_ref(), level, ctx));
    }
    lines
}

/// Renders a whole document from its root blocks.
pub fn render_document<'a>(
    blocks: &[Box<dyn Block<'a> + 'a>],
    ctx: &RenderContext<'a>,
) -> Vec<String> {
    let mut lines = Vec::new();
    for block in blocks {
        if block.has_content(ctx) {
            lines.extend(block.render(1, ctx));
        }
    }
    lines
}

/// The fixed document head: format preamble and title, no heading.
pub struct TitleBlock;

impl<'a> Headline<'a> for TitleBlock {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        None
    }

    fn body(&self, _level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let mut lines = ctx.exporter.doc_head();
        lines.push(String::new());
        lines.push(ctx.exporter.title(&ctx.doc.display_name));
        lines
    }
}
