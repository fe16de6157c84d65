//! Graphdoc Core Types and Definitions
//!
//! This crate provides the foundational types for the graphdoc documentation
//! generator. It includes:
//!
//! - **Geometry**: Canvas positions and distance queries ([`geometry`] module)
//! - **Nodes**: Graph nodes as a closed tagged union over node kinds ([`node`] module)
//! - **Annotations**: Free-floating labels and member-listing groups ([`annotation`] module)
//! - **Dependencies**: Package and external dependency records ([`dependency`] module)
//! - **Files**: Script, package-member, and package file models ([`file`] module)
//! - **Values**: Default substitution and blank-line handling for rendered text ([`values`] module)

pub mod annotation;
pub mod dependency;
pub mod file;
pub mod geometry;
pub mod node;
pub mod values;
