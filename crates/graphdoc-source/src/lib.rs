//! Graph file ingestion for the graphdoc documentation generator.
//!
//! This crate turns the host tool's native JSON files into the typed object
//! model of `graphdoc-core`:
//!
//! - [`document`]: access to one parsed JSON file, mirroring the native layout
//! - [`builders`]: priority-ordered matcher/factory pairs for node records
//! - [`files`]: assembly of script, member, and package models
//! - [`crawler`]: parallel directory discovery with exclusion rules
//! - [`gateway`]: the batch reading surface used by the CLI

pub mod builders;
pub mod crawler;
pub mod document;
pub mod files;
pub mod gateway;

mod error;

pub use error::SourceError;
pub use gateway::{MEMBER_EXTENSION, PACKAGE_MANIFEST_EXTENSION, SCRIPT_EXTENSION, SourceGateway};
