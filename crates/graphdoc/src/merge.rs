//! Recovery of previously authored text.
//!
//! Every run rewrites each document from scratch; the only store for manual
//! prose is the previous output itself. These pure functions isolate the
//! text an author wrote under a heading so the renderer can carry it over.
//!
//! A heading whose text changed between runs (renamed node, changed
//! canonicalization) silently recovers nothing and falls back to the
//! placeholder. That loses the prose but never corrupts the document.

use graphdoc_core::values::{self, ValueHandler};

use crate::export::Exporter;

/// What to clean out of a recovered block before treating it as manual text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeOptions {
    /// Remove the first table: the block regenerates its own table, and a
    /// recovered copy would accumulate run over run.
    pub strip_tables: bool,
    /// Remove a leading navigation link to another document.
    pub strip_doc_links: bool,
}

/// Returns the raw lines under `heading` in the previous output, up to the
/// next heading of any level. `None` when the heading does not occur.
pub fn existing_block(
    previous: &[String],
    heading: &str,
    exporter: &dyn Exporter,
) -> Option<Vec<String>> {
    let start = previous
        .iter()
        .position(|line| line.trim_end() == heading)?;
    let mut block = Vec::new();
    for line in &previous[start + 1..] {
        if exporter.is_heading(line) {
            break;
        }
        block.push(line.trim_end().to_string());
    }
    Some(block)
}

/// Recovers the manual text under `heading`, or the placeholder when there
/// is none.
///
/// Placeholder lines are always stripped; tables and document links are
/// stripped per [`MergeOptions`]. The result is never empty: emitting the
/// placeholder gives the next run's extraction something stable to find.
pub fn manual_docs(
    previous: &[String],
    heading: &str,
    exporter: &dyn Exporter,
    handler: &ValueHandler,
    options: MergeOptions,
) -> Vec<String> {
    let block = existing_block(previous, heading, exporter).unwrap_or_default();
    let mut lines = handler.remove_placeholder(values::strip_empty(block));
    if options.strip_tables {
        if let Some(&(start, end)) = exporter.table_ranges(&lines).first() {
            lines.drain(start..end);
        }
    }
    if options.strip_doc_links {
        let link_line = exporter
            .link_indexes(&lines)
            .iter()
            .find(|index| index.target.ends_with(exporter.extension()))
            .map(|index| index.line);
        if let Some(line) = link_line {
            lines.remove(line);
        }
    }
    handler.or_placeholder(values::strip_empty(lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    use graphdoc_core::values::to_lines;

    use crate::export::org::OrgExporter;

    fn handler() -> ValueHandler {
        ValueHandler::default()
    }

    #[test]
    fn authored_paragraph_is_recovered_verbatim() {
        let previous = to_lines(&[
            "* Heading X",
            "",
            "Author's hand-written paragraph",
            "",
            "* Heading Y",
            "",
            "other text",
        ]);
        let recovered = manual_docs(
            &previous,
            "* Heading X",
            &OrgExporter,
            &handler(),
            MergeOptions::default(),
        );
        assert_eq!(recovered, vec!["Author's hand-written paragraph".to_string()]);
    }

    #[test]
    fn extraction_stops_at_headings_of_any_level() {
        let previous = to_lines(&["* Top", "body", "*** Deep heading", "not mine"]);
        let block = existing_block(&previous, "* Top", &OrgExporter).expect("block");
        assert_eq!(block, vec!["body".to_string()]);
    }

    #[test]
    fn missing_heading_degrades_to_the_placeholder() {
        let previous = to_lines(&["* Other", "text"]);
        let recovered = manual_docs(
            &previous,
            "* Heading X",
            &OrgExporter,
            &handler(),
            MergeOptions::default(),
        );
        assert_eq!(recovered, vec!["???".to_string()]);
    }

    #[test]
    fn placeholder_round_trips_without_duplication() {
        let previous = to_lines(&["* Heading X", "", "???", "", "* Heading Y"]);
        let recovered = manual_docs(
            &previous,
            "* Heading X",
            &OrgExporter,
            &handler(),
            MergeOptions::default(),
        );
        assert_eq!(recovered, vec!["???".to_string()]);
    }

    #[test]
    fn regenerated_tables_are_stripped_from_recovered_text() {
        let previous = to_lines(&[
            "*** tracks.xlsx",
            "",
            "| Attribute | Value |",
            "|-----------+-------|",
            "| Enabled   | Yes   |",
            "",
            "Where the survey team drops the spreadsheet.",
            "",
            "*** next",
        ]);
        let recovered = manual_docs(
            &previous,
            "*** tracks.xlsx",
            &OrgExporter,
            &handler(),
            MergeOptions {
                strip_tables: true,
                strip_doc_links: false,
            },
        );
        assert_eq!(
            recovered,
            vec!["Where the survey team drops the spreadsheet.".to_string()]
        );
    }

    #[test]
    fn navigation_links_are_stripped_but_other_links_stay() {
        let previous = to_lines(&[
            "** Input",
            "",
            "[[file:./09_load.org][09 load]]",
            "",
            "Pick the alignment layer.",
            "See [[https://example.com][the wiki]] for details.",
        ]);
        let recovered = manual_docs(
            &previous,
            "** Input",
            &OrgExporter,
            &handler(),
            MergeOptions {
                strip_tables: false,
                strip_doc_links: true,
            },
        );
        assert_eq!(
            recovered,
            vec![
                "Pick the alignment layer.".to_string(),
                "See [[https://example.com][the wiki]] for details.".to_string(),
            ]
        );
    }
}
