//! File-level content blocks shared by scripts, members, and packages.

use graphdoc_core::file::GraphFile;
use graphdoc_core::values;

use crate::content::{Block, Headline, RenderContext, nodes, render_children};
use crate::merge::MergeOptions;
use crate::sections::{SectionId, section};

/// A heading whose content is carried entirely by its children.
pub struct ParentBlock<'a> {
    headline: &'static str,
    children: Vec<Box<dyn Block<'a> + 'a>>,
}

impl<'a> ParentBlock<'a> {
    pub fn new(headline: &'static str, children: Vec<Box<dyn Block<'a> + 'a>>) -> Self {
        Self { headline, children }
    }
}

impl<'a> Headline<'a> for ParentBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some(self.headline.to_string())
    }

    fn body(&self, _level: usize, _ctx: &RenderContext<'a>) -> Vec<String> {
        Vec::new()
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        render_children(&self.children, level, ctx)
    }

    fn present(&self, ctx: &RenderContext<'a>) -> bool {
        self.children.iter().any(|child| child.has_content(ctx))
    }
}

/// A section-backed text block: body from the file's headline notes, manual
/// text as the fallback.
pub struct SectionTextBlock<'a> {
    section: SectionId,
    children: Vec<Box<dyn Block<'a> + 'a>>,
}

impl<'a> SectionTextBlock<'a> {
    pub fn new(section: SectionId, children: Vec<Box<dyn Block<'a> + 'a>>) -> Self {
        Self { section, children }
    }
}

/// Concatenates note bodies, separated by blank lines.
pub(crate) fn note_bodies(notes: &[crate::sections::SectionNote]) -> Vec<String> {
    let mut lines = Vec::new();
    for note in notes {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(note.body.iter().cloned());
    }
    lines
}

impl<'a> Headline<'a> for SectionTextBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some(section(self.section).title.to_string())
    }

    fn body(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let lines = note_bodies(ctx.notes.headline_notes(self.section));
        if lines.is_empty() {
            return ctx.manual_docs(section(self.section).title, level, MergeOptions::default());
        }
        lines
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        render_children(&self.children, level, ctx)
    }
}

/// The file description: model description plus description notes, manual
/// text when both are absent.
pub struct DescriptionBlock<'a> {
    graph: &'a GraphFile,
}

impl<'a> DescriptionBlock<'a> {
    pub fn new(graph: &'a GraphFile) -> Self {
        Self { graph }
    }
}

impl<'a> Headline<'a> for DescriptionBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some(section(SectionId::Description).title.to_string())
    }

    fn body(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let mut lines = Vec::new();
        if !values::is_blank(&self.graph.description) {
            lines.extend(
                self.graph
                    .description
                    .lines()
                    .map(|line| line.trim_end().to_string()),
            );
        }
        let notes = note_bodies(ctx.notes.headline_notes(SectionId::Description));
        if !notes.is_empty() {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(notes);
        }
        if lines.is_empty() {
            return ctx.manual_docs(
                section(SectionId::Description).title,
                level,
                MergeOptions::default(),
            );
        }
        lines
    }
}

/// The information table: identifier, version, and the member category.
pub struct InformationBlock<'a> {
    graph: &'a GraphFile,
    category: Option<&'a str>,
    children: Vec<Box<dyn Block<'a> + 'a>>,
}

impl<'a> InformationBlock<'a> {
    pub fn new(
        graph: &'a GraphFile,
        category: Option<&'a str>,
        children: Vec<Box<dyn Block<'a> + 'a>>,
    ) -> Self {
        Self {
            graph,
            category,
            children,
        }
    }
}

impl<'a> Headline<'a> for InformationBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some("Information".to_string())
    }

    fn body(&self, _level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let values = ctx.values;
        let mut rows = vec![
            vec![
                "UUID".to_string(),
                values.value_or_default(&self.graph.uuid, None),
            ],
            vec![
                "Version".to_string(),
                values.value_or_default(&self.graph.info.version, None),
            ],
        ];
        if let Some(category) = self.category {
            rows.push(vec![
                "Category".to_string(),
                values.value_or_default(category, Some("No category")),
            ]);
        }
        ctx.exporter.as_table(Some(&["Attribute", "Value"]), &rows)
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        render_children(&self.children, level, ctx)
    }
}

/// Package dependencies: one child heading per referenced package, with a
/// table of the referencing nodes.
pub struct PackageDependenciesBlock<'a> {
    graph: &'a GraphFile,
}

impl<'a> PackageDependenciesBlock<'a> {
    pub fn new(graph: &'a GraphFile) -> Self {
        Self { graph }
    }
}

impl<'a> Headline<'a> for PackageDependenciesBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some("Packages".to_string())
    }

    fn body(&self, _level: usize, _ctx: &RenderContext<'a>) -> Vec<String> {
        Vec::new()
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let mut lines = Vec::new();
        for dep in self.graph.package_dependencies() {
            let block = PackageDependencyBlock {
                graph: self.graph,
                dep,
            };
            lines.extend(crate::content::child_lines(&block, level, ctx));
        }
        lines
    }

    fn present(&self, _ctx: &RenderContext<'a>) -> bool {
        !self.graph.package_dependencies().is_empty()
    }
}

struct PackageDependencyBlock<'a> {
    graph: &'a GraphFile,
    dep: &'a graphdoc_core::dependency::PackageDependency,
}

impl<'a> Headline<'a> for PackageDependencyBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some(self.dep.full_name())
    }

    fn body(&self, _level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let nodes = self.graph.nodes_by_ids(&self.dep.node_ids);
        if nodes.is_empty() {
            return vec![ctx.values.value_or_default("", Some("No nodes"))];
        }
        let rows: Vec<Vec<String>> = nodes
            .iter()
            .map(|node| {
                vec![
                    nodes::node_heading(self.graph, node, ctx),
                    node.member_uuid().unwrap_or("").to_string(),
                ]
            })
            .collect();
        ctx.exporter.as_table(Some(&["Name", "UUID"]), &rows)
    }
}

/// External dependencies: one child heading per dependency, listing the
/// nodes it reaches the graph through.
pub struct ExternalDependenciesBlock<'a> {
    graph: &'a GraphFile,
}

impl<'a> ExternalDependenciesBlock<'a> {
    pub fn new(graph: &'a GraphFile) -> Self {
        Self { graph }
    }
}

impl<'a> Headline<'a> for ExternalDependenciesBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some("External".to_string())
    }

    fn body(&self, _level: usize, _ctx: &RenderContext<'a>) -> Vec<String> {
        Vec::new()
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let mut lines = Vec::new();
        for dep in self.graph.external_dependencies() {
            let block = ExternalDependencyBlock {
                graph: self.graph,
                dep,
            };
            lines.extend(crate::content::child_lines(&block, level, ctx));
        }
        lines
    }

    fn present(&self, _ctx: &RenderContext<'a>) -> bool {
        !self.graph.external_dependencies().is_empty()
    }
}

struct ExternalDependencyBlock<'a> {
    graph: &'a GraphFile,
    dep: &'a graphdoc_core::dependency::ExternalDependency,
}

impl<'a> Headline<'a> for ExternalDependencyBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some(self.dep.name.clone())
    }

    fn body(&self, _level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let nodes = self.graph.nodes_by_ids(&self.dep.node_ids);
        if nodes.is_empty() {
            return vec![ctx.values.value_or_default("", Some("No nodes"))];
        }
        let names: Vec<String> = nodes.iter().map(|node| node.dependency_name()).collect();
        ctx.exporter.as_list(&names)
    }
}

/// The standard dependencies subtree under the information block.
pub fn dependencies_block<'a>(graph: &'a GraphFile) -> ParentBlock<'a> {
    ParentBlock::new(
        "Dependencies",
        vec![
            Box::new(PackageDependenciesBlock::new(graph)),
            Box::new(ExternalDependenciesBlock::new(graph)),
        ],
    )
}
