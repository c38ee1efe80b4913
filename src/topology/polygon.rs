use std::fmt;

use crate::error::TopologyError;
use crate::math::{Point3, Vector3};

use super::corner::CornerId;

/// Part identifier of a polygon, unique within the polygon family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolygonId(pub u16);

impl fmt::Display for PolygonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A planar face of the input mesh.
///
/// Polygons reference their corners by identifier; they never own them.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Part identifier.
    pub id: PolygonId,
    /// Boundary corners in traversal order.
    pub corners: Vec<CornerId>,
    /// Unit face normal, derived from the boundary positions at
    /// construction and not independently settable.
    normal: Vector3,
}

impl Polygon {
    /// Creates a polygon from its boundary corner identifiers and their
    /// positions, deriving the face normal from the first three positions.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DegeneratePolygon`] if the boundary has
    /// fewer than three points or its first three points are collinear.
    pub fn new(
        id: PolygonId,
        corners: Vec<CornerId>,
        positions: &[Point3],
    ) -> Result<Self, TopologyError> {
        let normal = face_normal(positions).ok_or(TopologyError::DegeneratePolygon { polygon: id })?;
        Ok(Self {
            id,
            corners,
            normal,
        })
    }

    /// The unit face normal.
    #[must_use]
    pub fn normal(&self) -> Vector3 {
        self.normal
    }
}

/// Unit normal of the face spanned by the first three boundary points, or
/// `None` if they are collinear (or fewer than three).
fn face_normal(positions: &[Point3]) -> Option<Vector3> {
    if positions.len() < 3 {
        return None;
    }
    let cross = (positions[1] - positions[0]).cross(&(positions[2] - positions[0]));
    let len = cross.norm();
    if len == 0.0 {
        return None;
    }
    Some(cross / len)
}
