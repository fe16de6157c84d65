//! Script documents.
//!
//! A script document opens with the tutorial section (files, input, output
//! beneath it), lists warned nodes, shows the source code carried in the
//! graph, and closes with the information block. Numbered scripts link to
//! their predecessor and successor so a reader can walk a workflow in
//! order.

use std::fs;
use std::path::{Path, PathBuf};

use graphdoc_core::file::GraphFile;

use crate::content::blocks::{
    DescriptionBlock, InformationBlock, ParentBlock, SectionTextBlock, dependencies_block,
    note_bodies,
};
use crate::content::nodes::{CodeNodeBlock, NodeInfoBlock, NodeListingBlock, PathNodeBlock};
use crate::content::{Block, Headline, RenderContext, TitleBlock, child_lines};
use crate::merge::MergeOptions;
use crate::paths;
use crate::sections::{SectionId, section};

/// Rendering options for graph documents.
#[derive(Debug, Clone)]
pub struct DocOptions {
    /// Whether script documents include code block nodes next to python
    /// nodes.
    pub code_blocks: bool,
}

impl Default for DocOptions {
    fn default() -> Self {
        Self { code_blocks: true }
    }
}

/// Scripting language of code block nodes in the host tool.
const CODE_BLOCK_LANGUAGE: &str = "DesignScript";
const PYTHON_LANGUAGE: &str = "python";

/// The path-node section: file and directory inputs with their authored
/// notes.
pub struct FilesBlock<'a> {
    graph: &'a GraphFile,
}

impl<'a> FilesBlock<'a> {
    pub fn new(graph: &'a GraphFile) -> Self {
        Self { graph }
    }
}

impl<'a> Headline<'a> for FilesBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some(section(SectionId::Files).title.to_string())
    }

    fn body(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let lines = note_bodies(ctx.notes.headline_notes(SectionId::Files));
        if !lines.is_empty() {
            return lines;
        }
        let title = section(SectionId::Files).title;
        if self.graph.path_nodes().is_empty() {
            ctx.manual_docs(title, level, MergeOptions::default())
        } else {
            ctx.manual_docs_if_written(title, level, MergeOptions::default())
        }
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let mut lines = Vec::new();
        let child = PathNodeBlock::new(self.graph);
        for node in self.graph.path_nodes() {
            lines.extend(child_lines(&child, level, &ctx.with_node(node)));
        }
        lines
    }
}

/// Which neighbor a script input/output section links to.
enum IoDirection {
    Previous,
    Next,
}

/// The input or output section of a script.
///
/// Body: a navigation link to the neighboring numbered script, then either
/// the linked input/output notes (one child per annotated node) or the
/// author's recovered text.
pub struct IoSectionBlock<'a> {
    graph: &'a GraphFile,
    section: SectionId,
}

impl<'a> IoSectionBlock<'a> {
    pub fn input(graph: &'a GraphFile) -> Self {
        Self {
            graph,
            section: SectionId::Input,
        }
    }

    pub fn output(graph: &'a GraphFile) -> Self {
        Self {
            graph,
            section: SectionId::Output,
        }
    }

    fn direction(&self) -> IoDirection {
        match self.section {
            SectionId::Output => IoDirection::Next,
            _ => IoDirection::Previous,
        }
    }

    fn neighbor_link(&self, ctx: &RenderContext<'a>) -> Option<String> {
        let src = &self.graph.path;
        paths::start_number(src)?;
        let siblings = numbered_siblings(src);
        let index = siblings.iter().position(|path| path == src)?;
        let other = match self.direction() {
            IoDirection::Previous => {
                if index == 0 {
                    return None;
                }
                siblings.get(index - 1)?
            }
            IoDirection::Next => siblings.get(index + 1)?,
        };
        let target = ctx.manager.script_doc_file(other);
        Some(
            ctx.exporter
                .file_link(&target.doc_path, &ctx.doc.doc_path, &target.display_name),
        )
    }
}

/// Sibling scripts of `src` that carry an ordering number, sorted by it.
fn numbered_siblings(src: &Path) -> Vec<PathBuf> {
    let Some(parent) = src.parent() else {
        return Vec::new();
    };
    let Ok(entries) = fs::read_dir(parent) else {
        return Vec::new();
    };
    let mut siblings: Vec<(u32, PathBuf)> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension() == src.extension() && !paths::is_dev(path))
        .filter_map(|path| paths::start_number(&path).map(|number| (number, path)))
        .collect();
    siblings.sort();
    siblings.into_iter().map(|(_, path)| path).collect()
}

impl<'a> Headline<'a> for IoSectionBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some(section(self.section).title.to_string())
    }

    fn body(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(link) = self.neighbor_link(ctx) {
            lines.push(link);
            lines.push(String::new());
        }
        if ctx.notes.nodes_with(self.section).is_empty() {
            lines.extend(ctx.manual_docs(
                section(self.section).title,
                level,
                MergeOptions {
                    strip_tables: false,
                    strip_doc_links: true,
                },
            ));
        }
        lines
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let mut lines = Vec::new();
        let child = NodeInfoBlock::new(self.graph, Some(self.section));
        for id in ctx.notes.nodes_with(self.section) {
            if let Some(node) = self.graph.node(id) {
                lines.extend(child_lines(&child, level, &ctx.with_node(node)));
            }
        }
        lines
    }
}

/// Warned nodes, one child per node carrying a warning note.
pub struct WarningsBlock<'a> {
    graph: &'a GraphFile,
}

impl<'a> WarningsBlock<'a> {
    pub fn new(graph: &'a GraphFile) -> Self {
        Self { graph }
    }
}

impl<'a> Headline<'a> for WarningsBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some(section(SectionId::Warnings).title.to_string())
    }

    fn body(&self, _level: usize, _ctx: &RenderContext<'a>) -> Vec<String> {
        Vec::new()
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let mut lines = Vec::new();
        let child = NodeInfoBlock::new(self.graph, Some(SectionId::Warnings));
        for id in ctx.notes.nodes_with(SectionId::Warnings) {
            if let Some(node) = self.graph.node(id) {
                lines.extend(child_lines(&child, level, &ctx.with_node(node)));
            }
        }
        lines
    }

    fn present(&self, ctx: &RenderContext<'a>) -> bool {
        !ctx.notes.nodes_with(SectionId::Warnings).is_empty()
    }
}

/// The source code subtree: python nodes, and code blocks when enabled.
pub fn source_code_block<'a>(graph: &'a GraphFile, code_blocks: bool) -> ParentBlock<'a> {
    let mut children: Vec<Box<dyn Block<'a> + 'a>> = vec![Box::new(NodeListingBlock::new(
        "Python Nodes",
        graph.python_nodes(),
        Box::new(CodeNodeBlock::new(graph, PYTHON_LANGUAGE)),
    ))];
    if code_blocks {
        children.push(Box::new(NodeListingBlock::new(
            "Code Blocks",
            graph.code_block_nodes(),
            Box::new(CodeNodeBlock::new(graph, CODE_BLOCK_LANGUAGE)),
        )));
    }
    ParentBlock::new("Source Code", children)
}

/// The root blocks of a script document.
pub fn script_blocks<'a>(
    graph: &'a GraphFile,
    options: &DocOptions,
) -> Vec<Box<dyn Block<'a> + 'a>> {
    vec![
        Box::new(TitleBlock),
        Box::new(SectionTextBlock::new(
            SectionId::Tutorial,
            vec![
                Box::new(FilesBlock::new(graph)),
                Box::new(IoSectionBlock::input(graph)),
                Box::new(IoSectionBlock::output(graph)),
            ],
        )),
        Box::new(WarningsBlock::new(graph)),
        Box::new(source_code_block(graph, options.code_blocks)),
        Box::new(InformationBlock::new(
            graph,
            None,
            vec![
                Box::new(DescriptionBlock::new(graph)),
                Box::new(dependencies_block(graph)),
            ],
        )),
    ]
}
