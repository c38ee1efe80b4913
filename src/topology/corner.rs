use std::fmt;

use crate::math::Point3;

/// Part identifier of a corner, unique within the corner family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CornerId(pub u16);

impl fmt::Display for CornerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A unique vertex of the solid, realized as a printed joint piece with one
/// angled socket per connected rod.
#[derive(Debug, Clone)]
pub struct Corner {
    /// Part identifier.
    pub id: CornerId,
    /// The 3D position of the corner.
    pub position: Point3,
    /// Corners this one shares a polygon edge with, in polygon traversal
    /// order (not sorted).
    pub connections: Vec<CornerId>,
    /// `(vertical, horizontal)` exit angles in degrees, index-aligned with
    /// `connections`.
    pub angles: Vec<(i32, i32)>,
}

impl Corner {
    /// Creates a corner at the given position, with no connections yet.
    #[must_use]
    pub fn new(id: CornerId, position: Point3) -> Self {
        Self {
            id,
            position,
            connections: Vec::new(),
            angles: Vec::new(),
        }
    }
}
