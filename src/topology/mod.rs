pub mod corner;
pub mod edge;
pub mod polygon;
pub mod solid;

pub use corner::{Corner, CornerId};
pub use edge::{Edge, EdgeId};
pub use polygon::{Polygon, PolygonId};
pub use solid::Solid;
