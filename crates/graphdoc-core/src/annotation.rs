//! Annotations and groups.
//!
//! Both originate from the host tool's view layer. An [`Annotation`] is a
//! free-floating label that documents whatever it was placed next to; a
//! [`Group`] is a container that explicitly lists its member nodes. The two
//! are mutually exclusive: a view label with member ids is ingested as a
//! group, one without as an annotation.

use crate::geometry::Point;
use crate::node::NodeId;

/// A free-floating text label on the graph canvas.
///
/// The text may embed a section marker; the documentation engine associates
/// such labels with the nearest eligible node by canvas distance.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub id: NodeId,
    pub name: String,
    pub position: Point,
    pub text: String,
}

/// A container annotation with an explicit member list.
///
/// Groups are linked to their members by id, never by proximity.
#[derive(Debug, Clone)]
pub struct Group {
    pub id: NodeId,
    pub name: String,
    pub position: Point,
    pub text: String,
    pub color: String,
    pub node_ids: Vec<NodeId>,
}
