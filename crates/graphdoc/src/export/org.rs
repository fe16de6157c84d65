//! Org outline markup backend.
//!
//! Headings are lines of repeated stars, one per nesting level. Tables are
//! pipe-delimited with a dashed separator row after the header. Links use
//! the double-bracket form `[[target][label]]`. Everything emitted here must
//! survive re-recognition by [`is_heading`](Exporter::is_heading) and
//! [`table_ranges`](Exporter::table_ranges) on a later run.

use std::path::Path;

use crate::export::{Exporter, LinkIndex};
use crate::paths;

const HEADING_PREFIX: char = '*';
const TABLE_SEPARATOR: char = '|';
const TABLE_HORIZONTAL: char = '+';

const LINK_PROTOCOLS: &[&str] = &["file", "http", "https"];

/// Builds a double-bracket link, prefixing the default protocol when the
/// target carries none.
fn create_link(target: &str, display_name: Option<&str>, default_protocol: &str) -> String {
    let target = if LINK_PROTOCOLS
        .iter()
        .any(|protocol| target.starts_with(&format!("{protocol}:")))
    {
        target.to_string()
    } else {
        format!("{default_protocol}:{target}")
    };
    match display_name {
        Some(name) => format!("[[{target}][{name}]]"),
        None => format!("[[{target}]]"),
    }
}

/// Whether a value contains a double-bracket link.
fn is_link(value: &str) -> bool {
    value.contains("][")
}

/// Splits a link into target and display label.
fn link_values(value: &str) -> (String, Option<String>) {
    let mut parts = value
        .split("][")
        .map(|part| part.trim_matches(['[', ']']).trim().to_string());
    let target = parts.next().unwrap_or_default();
    (target, parts.next())
}

/// The text a link cell occupies visually: its label, or its bare target.
fn cell_display(value: &str) -> String {
    if is_link(value) {
        let (target, label) = link_values(value);
        label.unwrap_or(target)
    } else {
        value.trim().to_string()
    }
}

struct OrgTable<'a> {
    header: Option<&'a [&'a str]>,
    rows: &'a [Vec<String>],
    widths: Vec<usize>,
}

impl<'a> OrgTable<'a> {
    fn new(header: Option<&'a [&'a str]>, rows: &'a [Vec<String>]) -> Self {
        let columns = rows
            .iter()
            .map(Vec::len)
            .chain(header.map(|header| header.len()))
            .max()
            .unwrap_or(0);
        let mut widths = vec![0; columns];
        if let Some(header) = header {
            for (idx, cell) in header.iter().enumerate() {
                widths[idx] = widths[idx].max(cell.len());
            }
        }
        for row in rows {
            for (idx, cell) in row.iter().enumerate() {
                widths[idx] = widths[idx].max(cell_display(cell).chars().count());
            }
        }
        Self {
            header,
            rows,
            widths,
        }
    }

    fn cell(&self, value: &str, idx: usize) -> String {
        let value = value.trim();
        let fill = self.widths[idx].saturating_sub(cell_display(value).chars().count());
        format!(" {}{} ", value, " ".repeat(fill))
    }

    fn row(&self, values: &[String]) -> String {
        let cells: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(idx, value)| self.cell(value, idx))
            .collect();
        format!(
            "{TABLE_SEPARATOR}{}{TABLE_SEPARATOR}",
            cells.join(&TABLE_SEPARATOR.to_string())
        )
    }

    fn separator_row(&self, header: &[&str]) -> String {
        let dashes: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(idx, cell)| "-".repeat(self.cell(cell, idx).chars().count()))
            .collect();
        format!(
            "{TABLE_SEPARATOR}{}{TABLE_SEPARATOR}",
            dashes.join(&TABLE_HORIZONTAL.to_string())
        )
    }

    fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(header) = self.header {
            let cells: Vec<String> = header.iter().map(|cell| cell.to_string()).collect();
            lines.push(self.row(&cells));
            lines.push(self.separator_row(header));
        }
        for row in self.rows {
            lines.push(self.row(row));
        }
        lines
    }
}

/// The org markup exporter.
#[derive(Debug, Default)]
pub struct OrgExporter;

impl OrgExporter {
    fn preamble(&self, name: &str, value: &str) -> String {
        let name = format!("{}:", name.to_lowercase());
        format!("#+{name:<15}{}", value.trim())
    }
}

impl Exporter for OrgExporter {
    fn extension(&self) -> &str {
        ".org"
    }

    fn doc_head(&self) -> Vec<String> {
        vec![
            self.preamble(
                "Setupfile",
                "https://fniessen.github.io/org-html-themes/org/theme-readtheorg.setup",
            ),
            self.preamble(
                "html_head",
                "<style>pre.src{background:#343131;color:white;} </style>",
            ),
        ]
    }

    fn title(&self, display_name: &str) -> String {
        self.preamble("Title", display_name)
    }

    fn heading(&self, name: &str, level: usize) -> String {
        let prefix: String = std::iter::repeat_n(HEADING_PREFIX, level).collect();
        format!("{prefix} {name}")
    }

    fn is_heading(&self, line: &str) -> bool {
        let mut parts = line.trim_start().split_whitespace();
        let Some(first) = parts.next() else {
            return false;
        };
        first.chars().all(|c| c == HEADING_PREFIX) && parts.next().is_some()
    }

    fn as_list(&self, values: &[String]) -> Vec<String> {
        values.iter().map(|value| format!("- {value}")).collect()
    }

    fn url_link(&self, url: &str, display_name: Option<&str>) -> String {
        create_link(url, display_name, "https")
    }

    fn file_link(&self, target: &Path, current: &Path, display_name: &str) -> String {
        let relative = paths::relative_to(target, current);
        create_link(&relative, Some(display_name), "file")
    }

    fn link_indexes(&self, lines: &[String]) -> Vec<LinkIndex> {
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| is_link(line))
            .map(|(line, value)| {
                let (target, label) = link_values(value);
                LinkIndex {
                    line,
                    target,
                    label,
                }
            })
            .collect()
    }

    fn as_table(&self, header: Option<&[&str]>, rows: &[Vec<String>]) -> Vec<String> {
        OrgTable::new(header, rows).render()
    }

    fn table_ranges(&self, lines: &[String]) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        let mut idx = 0;
        while idx < lines.len() {
            if !lines[idx].trim_start().starts_with(TABLE_SEPARATOR) {
                idx += 1;
                continue;
            }
            let start = idx;
            while idx < lines.len() && lines[idx].trim_start().starts_with(TABLE_SEPARATOR) {
                idx += 1;
            }
            ranges.push((start, idx));
        }
        ranges
    }

    fn as_code(&self, code: &str, language: &str, indent: usize) -> Vec<String> {
        let indent_str = " ".repeat(indent);
        let mut lines = vec![format!("#+begin_src {language}")];
        for line in code.lines() {
            lines.push(line.replace('\t', &indent_str).trim_end().to_string());
        }
        lines.push("#+end_src".to_string());
        lines
    }
}
