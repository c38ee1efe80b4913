use std::fmt;

use crate::math::spherical::rod_rotation;
use crate::math::{Point3, Vector3};

use super::corner::{Corner, CornerId};

/// Part identifier of an edge, unique within the edge family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u16);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A straight rod spanning two corners.
///
/// Exactly one edge exists per unordered pair of mutually-connected corners.
#[derive(Debug, Clone)]
pub struct Edge {
    /// Part identifier.
    pub id: EdgeId,
    /// Corner the rod is anchored at.
    pub start: CornerId,
    /// Corner the rod points to.
    pub end: CornerId,
    /// Euclidean distance between the endpoint positions.
    pub length: f64,
    /// Anchor position: the start corner's position, not a midpoint.
    pub position: Point3,
    /// Axis angles in degrees orienting a +Z-aligned rod primitive onto the
    /// edge vector.
    pub rotation: Vector3,
}

impl Edge {
    /// Creates an edge between two corners, deriving length, anchor and
    /// rotation from their positions.
    #[must_use]
    pub fn new(id: EdgeId, start: &Corner, end: &Corner) -> Self {
        Self {
            id,
            start: start.id,
            end: end.id,
            length: (end.position - start.position).norm(),
            position: start.position,
            rotation: rod_rotation(&start.position, &end.position),
        }
    }
}
