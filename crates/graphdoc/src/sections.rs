//! The section vocabulary and the embedded markup parser.
//!
//! Authors document their graphs inside the host tool itself by starting a
//! label with a section marker, a bracket pair around a single letter code:
//!
//! ```text
//! [W] Needs a loaded link
//!
//! The selection turns up empty when the link is unloaded.
//! ```
//!
//! The vocabulary is closed and file-format-agnostic. Headline sections
//! attach to the file; node sections attach to a single node, found either
//! through a group's member list or by proximity (see the linker).

use graphdoc_core::node::GraphNode;
use graphdoc_core::values;

/// Identity of a documentation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Description,
    Tutorial,
    Files,
    Input,
    Output,
    Warnings,
}

/// Whether a section documents the file or a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Headline,
    Node,
}

/// A documentation section: title, parse marker, and applicability.
#[derive(Debug)]
pub struct Section {
    pub id: SectionId,
    pub title: &'static str,
    pub marker: &'static str,
    pub kind: SectionKind,
}

impl Section {
    /// Whether a node is a linking candidate for this section.
    ///
    /// Headline sections have no candidates; the input and output sections
    /// only match nodes flagged as graph inputs or outputs.
    pub fn admits(&self, node: &GraphNode) -> bool {
        match self.id {
            SectionId::Input => node.is_input,
            SectionId::Output => node.is_output,
            SectionId::Warnings => true,
            _ => false,
        }
    }
}

/// The closed section vocabulary.
pub const SECTIONS: [Section; 6] = [
    Section {
        id: SectionId::Description,
        title: "Description",
        marker: "[D]",
        kind: SectionKind::Headline,
    },
    Section {
        id: SectionId::Tutorial,
        title: "Tutorial",
        marker: "[T]",
        kind: SectionKind::Headline,
    },
    Section {
        id: SectionId::Files,
        title: "Files / Directories",
        marker: "[F]",
        kind: SectionKind::Headline,
    },
    Section {
        id: SectionId::Input,
        title: "Input",
        marker: "[I]",
        kind: SectionKind::Node,
    },
    Section {
        id: SectionId::Output,
        title: "Output",
        marker: "[O]",
        kind: SectionKind::Node,
    },
    Section {
        id: SectionId::Warnings,
        title: "Warnings",
        marker: "[W]",
        kind: SectionKind::Node,
    },
];

/// Looks up a section definition by id.
pub fn section(id: SectionId) -> &'static Section {
    SECTIONS
        .iter()
        .find(|section| section.id == id)
        .expect("section vocabulary is closed")
}

/// A parsed section note: the section it belongs to, the author's title, an
/// optional ordering hint, and the free-text body.
#[derive(Debug, Clone)]
pub struct SectionNote {
    pub section: SectionId,
    pub title: String,
    pub order: Option<u32>,
    pub body: Vec<String>,
}

impl SectionNote {
    /// Parses a label text.
    ///
    /// The first line starting with a known marker begins the section;
    /// everything before it is discarded. The remainder of the marker line
    /// is the title; a leading integer token in it is taken as an ordering
    /// hint. Text without any marker carries no section and yields `None`.
    pub fn parse(text: &str) -> Option<SectionNote> {
        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            for section in &SECTIONS {
                let Some(rest) = trimmed.strip_prefix(section.marker) else {
                    continue;
                };
                let (order, title) = split_order(rest.trim());
                let body: Vec<String> = text
                    .lines()
                    .skip(idx + 1)
                    .map(|line| line.trim_end().to_string())
                    .collect();
                return Some(SectionNote {
                    section: section.id,
                    title,
                    order,
                    body: values::strip_empty(body),
                });
            }
        }
        None
    }

    /// The heading this note renders under: its title, or the section title
    /// when the author gave none.
    pub fn heading_title(&self) -> &str {
        if self.title.is_empty() {
            section(self.section).title
        } else {
            &self.title
        }
    }
}

fn split_order(rest: &str) -> (Option<u32>, String) {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("");
    match first.parse::<u32>() {
        Ok(order) => (Some(order), parts.next().unwrap_or("").trim().to_string()),
        Err(_) => (None, rest.to_string()),
    }
}
