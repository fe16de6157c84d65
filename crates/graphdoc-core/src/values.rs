//! Default substitution and blank-line handling for rendered text.
//!
//! Rendered documents never contain empty cells or absent bodies: blank model
//! values are replaced by a default phrase, and a heading without any content
//! is filled with a placeholder that marks "no manual documentation written
//! yet". The placeholder must survive a round trip: a later run recognizes
//! and strips it before deciding whether the author wrote anything.
//!
//! All strings are configurable (for localized documentation trees) via
//! [`ValueHandler`], which deserializes from the application configuration.

use serde::Deserialize;

fn default_value() -> String {
    "No information".to_string()
}

fn default_placeholder() -> String {
    "???".to_string()
}

fn default_true() -> String {
    "Yes".to_string()
}

fn default_false() -> String {
    "No".to_string()
}

/// Text defaults used when rendering model values.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueHandler {
    /// Substitute for blank model values.
    #[serde(default = "default_value")]
    default_value: String,

    /// Placeholder standing in for missing manual documentation.
    ///
    /// Must never appear in legitimate authored text; collisions are not
    /// detected.
    #[serde(default = "default_placeholder")]
    placeholder: String,

    #[serde(default = "default_true")]
    true_value: String,

    #[serde(default = "default_false")]
    false_value: String,
}

impl Default for ValueHandler {
    fn default() -> Self {
        Self {
            default_value: default_value(),
            placeholder: default_placeholder(),
            true_value: default_true(),
            false_value: default_false(),
        }
    }
}

impl ValueHandler {
    /// The placeholder for missing manual documentation.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The substitute for blank values.
    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Renders a boolean as its configured display string.
    pub fn bool_as_str(&self, value: bool) -> &str {
        if value { &self.true_value } else { &self.false_value }
    }

    /// Returns the trimmed value, or the default phrase when blank.
    pub fn value_or_default(&self, value: &str, default: Option<&str>) -> String {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            default.unwrap_or(&self.default_value).to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Returns the default phrase as a single line when the collection is
    /// empty, nothing otherwise.
    pub fn default_if_empty(&self, len: usize, default: Option<&str>) -> Vec<String> {
        if len == 0 {
            vec![default.unwrap_or(&self.default_value).to_string()]
        } else {
            Vec::new()
        }
    }

    /// Removes every line that consists solely of the placeholder.
    pub fn remove_placeholder(&self, lines: Vec<String>) -> Vec<String> {
        lines
            .into_iter()
            .filter(|line| line.trim() != self.placeholder)
            .collect()
    }

    /// Returns the lines unchanged, or the placeholder when there are none.
    pub fn or_placeholder(&self, lines: Vec<String>) -> Vec<String> {
        if lines.is_empty() {
            vec![self.placeholder.clone()]
        } else {
            lines
        }
    }
}

/// True when the value is empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Removes blank lines from the start of the list.
pub fn strip_leading_empty(mut lines: Vec<String>) -> Vec<String> {
    let skip = lines.iter().take_while(|line| is_blank(line)).count();
    lines.drain(..skip);
    lines
}

/// Removes blank lines from the end of the list.
pub fn strip_trailing_empty(mut lines: Vec<String>) -> Vec<String> {
    while lines.last().is_some_and(|line| is_blank(line)) {
        lines.pop();
    }
    lines
}

/// Removes blank lines from both ends of the list.
pub fn strip_empty(lines: Vec<String>) -> Vec<String> {
    strip_trailing_empty(strip_leading_empty(lines))
}

/// Converts string slices into owned lines.
pub fn to_lines(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
