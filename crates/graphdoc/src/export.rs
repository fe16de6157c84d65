//! The format backend contract.
//!
//! An exporter renders the atomic documentation primitives (headings,
//! tables, lists, links, code blocks) and can recognize the structures it
//! previously emitted. The recognition half is not optional: the merge
//! engine re-reads a document written by an earlier run and relies on
//! [`Exporter::is_heading`] and [`Exporter::table_ranges`] classifying that
//! output exactly as it was produced.

use std::path::Path;

pub mod org;

/// A link found in previously rendered lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkIndex {
    /// Index of the line the link was found in.
    pub line: usize,
    /// The link target, including its protocol.
    pub target: String,
    /// The display label, when the link carries one.
    pub label: Option<String>,
}

/// Rendering backend for one output format.
pub trait Exporter {
    /// File extension of the output format, including the dot.
    fn extension(&self) -> &str;

    /// Fixed preamble lines emitted at the top of every document.
    fn doc_head(&self) -> Vec<String>;

    /// The document title line.
    fn title(&self, display_name: &str) -> String;

    /// A heading line at the given nesting level (1-based).
    ///
    /// Heading text doubles as the merge key, so for a given model state it
    /// must be identical on every run.
    fn heading(&self, name: &str, level: usize) -> String;

    /// Whether a previously written line is a heading of any level.
    fn is_heading(&self, line: &str) -> bool;

    /// An unordered list.
    fn as_list(&self, values: &[String]) -> Vec<String>;

    /// A link to a URL.
    fn url_link(&self, url: &str, display_name: Option<&str>) -> String;

    /// A link to another document, relative to the document being written.
    fn file_link(&self, target: &Path, current: &Path, display_name: &str) -> String;

    /// Positions of links inside previously written lines.
    fn link_indexes(&self, lines: &[String]) -> Vec<LinkIndex>;

    /// A table with deterministic column widths.
    fn as_table(&self, header: Option<&[&str]>, rows: &[Vec<String>]) -> Vec<String>;

    /// Half-open `(start, end)` line ranges of tables inside previously
    /// written lines.
    fn table_ranges(&self, lines: &[String]) -> Vec<(usize, usize)>;

    /// A fenced code block tagged with a language name.
    fn as_code(&self, code: &str, language: &str, indent: usize) -> Vec<String>;
}
