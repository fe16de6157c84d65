//! Graphdoc - documentation synthesis for visual-programming graph files.
//!
//! Graph files are regenerated documentation-first: every run rebuilds each
//! document from the parsed model, while prose an author added to the
//! previous output is recovered and carried over. The crate provides:
//!
//! - [`sections`]: the embedded section-markup vocabulary and parser
//! - [`linker`]: association of notes with the file or the nearest node
//! - [`merge`]: recovery of previously authored text
//! - [`content`]: the composite content tree that renders documents
//! - [`export`]: the format backend contract and the org markup backend
//! - [`locate`]: destination paths and document files
//!
//! [`DocsGenerator`] ties everything together for a batch run:
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use graphdoc::export::org::OrgExporter;
//! use graphdoc::locate::DocsManager;
//! use graphdoc::{DocOptions, DocsGenerator};
//! use graphdoc_core::values::ValueHandler;
//! use graphdoc_source::SourceGateway;
//!
//! let gateway = SourceGateway;
//! let scripts = gateway.read_scripts(&[Path::new("/src/Scripts").to_path_buf()]);
//! let packages = gateway.read_packages(&[Path::new("/src/Packages").to_path_buf()]);
//!
//! let exporter = OrgExporter;
//! let manager = DocsManager::new(
//!     Path::new("/docs"),
//!     Path::new("/src/Scripts"),
//!     Path::new("/src/Packages"),
//!     ".org",
//! );
//! let mut generator = DocsGenerator::new(
//!     manager,
//!     &exporter,
//!     ValueHandler::default(),
//!     DocOptions::default(),
//! );
//! let summary = generator.generate(&scripts, &packages);
//! println!("{} documents written", summary.written.len());
//! ```

pub mod content;
pub mod export;
pub mod linker;
pub mod locate;
pub mod merge;
pub mod paths;
pub mod sections;

mod error;
mod generate;

pub use content::script::DocOptions;
pub use error::DocError;
pub use generate::{DocsGenerator, GenerateSummary};
