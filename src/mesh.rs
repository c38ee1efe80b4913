//! The mesh collaborator seam.
//!
//! Parsing a model file into polygons is someone else's job; the pipeline
//! only needs an ordered sequence of polygons, each an ordered sequence of
//! 3D points.

use crate::math::Point3;

/// A source of polygon geometry for the pipeline.
///
/// Polygon order and per-polygon point order are significant: they drive
/// first-seen corner ordering and connection ordering downstream.
pub trait MeshSource {
    /// The polygons of the model, each as its ordered boundary points.
    fn polygons(&self) -> &[Vec<Point3>];
}

/// An in-memory polygon list, for tests and for callers that already parsed
/// their model.
#[derive(Debug, Clone, Default)]
pub struct PolygonList {
    polygons: Vec<Vec<Point3>>,
}

impl PolygonList {
    /// Wraps an already-built polygon list.
    #[must_use]
    pub fn new(polygons: Vec<Vec<Point3>>) -> Self {
        Self { polygons }
    }
}

impl MeshSource for PolygonList {
    fn polygons(&self) -> &[Vec<Point3>] {
        &self.polygons
    }
}
