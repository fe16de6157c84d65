//! Package member documents.
//!
//! A member document shows the member's source code and its information
//! block; the category row ties it back to the library shelf it is
//! published under. Code block nodes are never listed here, only python
//! nodes carry reusable source.

use graphdoc_core::file::MemberFile;

use crate::content::blocks::{DescriptionBlock, InformationBlock, dependencies_block};
use crate::content::script::source_code_block;
use crate::content::{Block, TitleBlock};

/// The root blocks of a member document.
pub fn member_blocks<'a>(member: &'a MemberFile) -> Vec<Box<dyn Block<'a> + 'a>> {
    let graph = &member.graph;
    vec![
        Box::new(TitleBlock),
        Box::new(source_code_block(graph, false)),
        Box::new(InformationBlock::new(
            graph,
            Some(&member.category),
            vec![
                Box::new(DescriptionBlock::new(graph)),
                Box::new(dependencies_block(graph)),
            ],
        )),
    ]
}
