//! Error adapter for rendering CLI errors through miette.
//!
//! CLI errors carry no source spans; the adapter only hooks them into
//! miette's graphical report formatting.

use std::fmt;

use miette::Diagnostic;

use crate::error::CliError;

/// Wraps a [`CliError`] for miette rendering.
pub struct Reportable<'a>(pub &'a CliError);

impl fmt::Debug for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0, f)
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for Reportable<'_> {}

impl Diagnostic for Reportable<'_> {}
