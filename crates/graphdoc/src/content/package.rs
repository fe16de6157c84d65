//! Package documents.
//!
//! A package document renders the manifest information, the package
//! description and contents, and a link shelf of its member documents,
//! grouped by category.

use graphdoc_core::file::Package;
use graphdoc_core::values;

use crate::content::{Block, Headline, RenderContext, TitleBlock, child_lines, render_children};
use crate::merge::MergeOptions;

/// The manifest information table with description and contents beneath it.
pub struct PackageInformationBlock<'a> {
    package: &'a Package,
    children: Vec<Box<dyn Block<'a> + 'a>>,
}

impl<'a> PackageInformationBlock<'a> {
    pub fn new(package: &'a Package, children: Vec<Box<dyn Block<'a> + 'a>>) -> Self {
        Self { package, children }
    }
}

impl<'a> Headline<'a> for PackageInformationBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some("Information".to_string())
    }

    fn body(&self, _level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let values = ctx.values;
        let info = &self.package.info;
        let rows = vec![
            vec![
                "Version".to_string(),
                values.value_or_default(&info.version, None),
            ],
            vec![
                "Engine".to_string(),
                values.value_or_default(&info.engine_version, None),
            ],
            vec![
                "Homepage".to_string(),
                values.value_or_default(&info.site_url, None),
            ],
            vec![
                "Repository".to_string(),
                values.value_or_default(&info.repository_url, None),
            ],
        ];
        ctx.exporter.as_table(None, &rows)
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        render_children(&self.children, level, ctx)
    }
}

/// A manifest text field under its own heading, manual text as fallback.
pub struct PackageTextBlock<'a> {
    headline: &'static str,
    text: &'a str,
}

impl<'a> PackageTextBlock<'a> {
    pub fn new(headline: &'static str, text: &'a str) -> Self {
        Self { headline, text }
    }
}

impl<'a> Headline<'a> for PackageTextBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some(self.headline.to_string())
    }

    fn body(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        if values::is_blank(self.text) {
            return ctx.manual_docs(self.headline, level, MergeOptions::default());
        }
        self.text
            .lines()
            .map(|line| line.trim_end().to_string())
            .collect()
    }
}

/// The member link shelf: one child heading per category, each listing
/// links to the member documents.
pub struct PackageNodesBlock<'a> {
    package: &'a Package,
}

impl<'a> PackageNodesBlock<'a> {
    pub fn new(package: &'a Package) -> Self {
        Self { package }
    }
}

impl<'a> Headline<'a> for PackageNodesBlock<'a> {
    fn headline(&self, _ctx: &RenderContext<'a>) -> Option<String> {
        Some("Node Documentation".to_string())
    }

    fn body(&self, _level: usize, _ctx: &RenderContext<'a>) -> Vec<String> {
        Vec::new()
    }

    fn children(&self, level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let mut lines = Vec::new();
        for category in self.package.categories() {
            let block = CategoryBlock {
                package: self.package,
                category,
            };
            lines.extend(child_lines(&block, level, ctx));
        }
        lines
    }

    fn present(&self, _ctx: &RenderContext<'a>) -> bool {
        !self.package.members.is_empty()
    }
}

struct CategoryBlock<'a> {
    package: &'a Package,
    category: &'a str,
}

impl<'a> Headline<'a> for CategoryBlock<'a> {
    fn headline(&self, ctx: &RenderContext<'a>) -> Option<String> {
        Some(ctx.values.value_or_default(self.category, None))
    }

    fn body(&self, _level: usize, ctx: &RenderContext<'a>) -> Vec<String> {
        let links: Vec<String> = self
            .package
            .members_by_category(self.category)
            .into_iter()
            .map(|member| {
                let doc = ctx.manager.member_doc_file(self.package, member);
                ctx.exporter
                    .file_link(&doc.doc_path, &ctx.doc.doc_path, &doc.display_name)
            })
            .collect();
        ctx.exporter.as_list(&links)
    }
}

/// The root blocks of a package document.
pub fn package_blocks<'a>(package: &'a Package) -> Vec<Box<dyn Block<'a> + 'a>> {
    vec![
        Box::new(TitleBlock),
        Box::new(PackageInformationBlock::new(
            package,
            vec![
                Box::new(PackageTextBlock::new("Description", &package.description)),
                Box::new(PackageTextBlock::new("Content", &package.info.contents)),
            ],
        )),
        Box::new(PackageNodesBlock::new(package)),
    ]
}
