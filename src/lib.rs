//! rodworks — fabrication plans for rod-and-corner constructions.
//!
//! Takes a polygonal solid model and derives the parts needed to build it
//! physically: straight rods for the edges and custom corner pieces for the
//! vertices, each corner carrying the exact exit angles of its rods. The
//! result is an XML assembly manifest plus flat part tables for labeling
//! and manufacturing.

pub mod error;
pub mod export;
pub mod ident;
pub mod math;
pub mod mesh;
pub mod topology;

pub use error::{ExportError, IdentError, Result, RodworksError, TopologyError};
pub use export::{export_plan, project_name, ExportConfig, TableOptions};
pub use mesh::{MeshSource, PolygonList};
pub use topology::{Corner, CornerId, Edge, EdgeId, Polygon, PolygonId, Solid};
