use std::collections::{HashMap, HashSet};
use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::{Result, TopologyError};
use crate::ident::IdentPool;
use crate::math::spherical::rod_angles;
use crate::math::Point3;
use crate::mesh::MeshSource;

use super::corner::{Corner, CornerId};
use super::edge::{Edge, EdgeId};
use super::polygon::{Polygon, PolygonId};

/// Bit-exact position key for corner deduplication.
///
/// `-0.0` is folded onto `0.0` so the key agrees with floating-point
/// equality; everything else matches only when bit-identical. Two source
/// vertices that differ by floating-point noise stay distinct corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct PointKey([u64; 3]);

impl PointKey {
    fn of(point: &Point3) -> Self {
        fn bits(coordinate: f64) -> u64 {
            if coordinate == 0.0 {
                0.0_f64.to_bits()
            } else {
                coordinate.to_bits()
            }
        }
        Self([bits(point.x), bits(point.y), bits(point.z)])
    }
}

/// The aggregate owning all corners, polygons and edges of one model.
///
/// Built once per invocation through a strictly ordered pipeline: corner
/// deduplication, polygon building, connectivity resolution, angle
/// computation, edge extraction. After [`Solid::build`] returns, the solid
/// is only read (apart from the optional shuffle and corner range trim the
/// table export applies).
#[derive(Debug, Default)]
pub struct Solid {
    corners: Vec<Corner>,
    polygons: Vec<Polygon>,
    edges: Vec<Edge>,
}

impl Solid {
    /// Runs the full geometry pipeline over a mesh source.
    ///
    /// The random generator drives identifier assignment only; a fixed seed
    /// makes the whole run reproducible.
    ///
    /// # Errors
    ///
    /// Returns an error if an identifier pool is exhausted, a polygon
    /// references a point missing from the deduplicated corner set, or a
    /// polygon boundary is degenerate.
    pub fn build<M: MeshSource, R: Rng>(source: &M, rng: &mut R) -> Result<Self> {
        let model = source.polygons();
        let mut solid = Self::default();

        let position_index = solid.fill_corners(model, rng)?;
        solid.fill_polygons(model, &position_index, rng)?;
        solid.resolve_connectivity();
        solid.compute_angles()?;
        solid.fill_edges(rng)?;

        info!(
            corners = solid.corners.len(),
            polygons = solid.polygons.len(),
            edges = solid.edges.len(),
            "solid built"
        );
        Ok(solid)
    }

    // --- Pipeline stages ---

    /// Collapses the raw per-polygon point lists into unique corners,
    /// preserving first-seen order.
    fn fill_corners<R: Rng>(
        &mut self,
        model: &[Vec<Point3>],
        rng: &mut R,
    ) -> Result<HashMap<PointKey, CornerId>> {
        let mut pool = IdentPool::new("corner");
        let mut index = HashMap::new();

        for points in model {
            for point in points {
                let key = PointKey::of(point);
                if index.contains_key(&key) {
                    continue;
                }
                let id = CornerId(pool.next(rng)?);
                index.insert(key, id);
                self.corners.push(Corner::new(id, *point));
            }
        }

        debug!(corners = self.corners.len(), "deduplicated corner positions");
        Ok(index)
    }

    /// Re-expresses each input polygon as corner identifiers and derives
    /// its face normal.
    fn fill_polygons<R: Rng>(
        &mut self,
        model: &[Vec<Point3>],
        position_index: &HashMap<PointKey, CornerId>,
        rng: &mut R,
    ) -> Result<()> {
        let mut pool = IdentPool::new("polygon");

        for points in model {
            let id = PolygonId(pool.next(rng)?);
            let mut corners = Vec::with_capacity(points.len());
            for point in points {
                let corner = position_index.get(&PointKey::of(point)).ok_or(
                    TopologyError::UnresolvedVertex {
                        polygon: id,
                        x: point.x,
                        y: point.y,
                        z: point.z,
                    },
                )?;
                corners.push(*corner);
            }
            self.polygons.push(Polygon::new(id, corners, points)?);
        }
        Ok(())
    }

    /// Derives per-corner adjacency from cyclically-consecutive boundary
    /// entries. Duplicates across shared polygons collapse; order is first
    /// polygon-traversal encounter.
    fn resolve_connectivity(&mut self) {
        let slots: HashMap<CornerId, usize> = self
            .corners
            .iter()
            .enumerate()
            .map(|(slot, corner)| (corner.id, slot))
            .collect();

        for polygon in &self.polygons {
            let boundary = &polygon.corners;
            for (i, &a) in boundary.iter().enumerate() {
                let b = boundary[(i + 1) % boundary.len()];
                if a == b {
                    // Repeated consecutive point in the source polygon.
                    continue;
                }
                for (from, to) in [(a, b), (b, a)] {
                    if let Some(&slot) = slots.get(&from) {
                        let connections = &mut self.corners[slot].connections;
                        if !connections.contains(&to) {
                            connections.push(to);
                        }
                    }
                }
            }
        }
    }

    /// Computes the `(vertical, horizontal)` exit angles for every ordered
    /// (corner, connected corner) pair, aligned with the connection order.
    fn compute_angles(&mut self) -> Result<()> {
        let positions: HashMap<CornerId, Point3> = self
            .corners
            .iter()
            .map(|corner| (corner.id, corner.position))
            .collect();

        for corner in &mut self.corners {
            let mut angles = Vec::with_capacity(corner.connections.len());
            for target in &corner.connections {
                let target_position = positions
                    .get(target)
                    .ok_or(TopologyError::CornerNotFound(*target))?;
                angles.push(rod_angles(&corner.position, target_position));
            }
            corner.angles = angles;
        }
        Ok(())
    }

    /// Deduplicates the undirected adjacency into unique edges.
    fn fill_edges<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        let mut pool = IdentPool::new("edge");
        let mut seen: HashSet<(CornerId, CornerId)> = HashSet::new();

        let adjacency: Vec<(CornerId, Vec<CornerId>)> = self
            .corners
            .iter()
            .map(|corner| (corner.id, corner.connections.clone()))
            .collect();

        for (from, neighbors) in adjacency {
            for to in neighbors {
                if seen.contains(&(from, to)) || seen.contains(&(to, from)) {
                    continue;
                }
                seen.insert((from, to));

                let id = EdgeId(pool.next(rng)?);
                let edge = Edge::new(id, self.corner(from)?, self.corner(to)?);
                self.edges.push(edge);
            }
        }

        debug!(edges = self.edges.len(), "extracted unique edges");
        Ok(())
    }

    // --- Lookups and accessors ---

    /// Looks up a corner by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::CornerNotFound`] if no corner carries the
    /// identifier.
    pub fn corner(&self, id: CornerId) -> std::result::Result<&Corner, TopologyError> {
        self.corners
            .iter()
            .find(|corner| corner.id == id)
            .ok_or(TopologyError::CornerNotFound(id))
    }

    /// All corners, in first-seen (or shuffled) order.
    #[must_use]
    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    /// All polygons.
    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// All edges.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    // --- Post-build operations ---

    /// Flags candidate coplanar polygon pairs by exact normal equality.
    ///
    /// Each polygon is compared against every polygon seen before it; a
    /// `(later, earlier)` pair is recorded per exact match. Detection only,
    /// nothing is merged.
    #[must_use]
    pub fn coplanar_pairs(&self) -> Vec<(PolygonId, PolygonId)> {
        let mut pairs = Vec::new();
        for (i, polygon) in self.polygons.iter().enumerate() {
            for earlier in &self.polygons[..i] {
                if earlier.normal() == polygon.normal() {
                    pairs.push((polygon.id, earlier.id));
                }
            }
        }
        pairs
    }

    /// Randomizes the order of all three part collections.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.corners.shuffle(rng);
        self.polygons.shuffle(rng);
        self.edges.shuffle(rng);
    }

    /// Restricts the corner collection to the inclusive 0-based index range
    /// `[start_from, finish_at]`; `finish_at == 0` means "to the end".
    ///
    /// This mutates the collection itself: corners outside the range are
    /// gone for any later read of the solid.
    pub(crate) fn trim_corner_range(&mut self, start_from: usize, finish_at: usize) {
        let len = self.corners.len();
        let end = if finish_at == 0 {
            len
        } else {
            (finish_at + 1).min(len)
        };
        let start = start_from.min(end);
        self.corners.truncate(end);
        self.corners.drain(..start);
    }
}

impl fmt::Display for Solid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} corners, {} polygons, {} edges.",
            self.corners.len(),
            self.polygons.len(),
            self.edges.len()
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mesh::PolygonList;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Tetrahedron as four triangles: 4 corners, all pairwise connected.
    fn tetrahedron() -> PolygonList {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        let c = Point3::new(0.0, 1.0, 0.0);
        let d = Point3::new(0.0, 0.0, 1.0);
        PolygonList::new(vec![
            vec![a, b, c],
            vec![a, b, d],
            vec![a, c, d],
            vec![b, c, d],
        ])
    }

    /// Axis-aligned unit cube as six quads.
    fn quad_cube() -> PolygonList {
        let p = |x: f64, y: f64, z: f64| Point3::new(x, y, z);
        PolygonList::new(vec![
            vec![p(0., 0., 0.), p(1., 0., 0.), p(1., 1., 0.), p(0., 1., 0.)],
            vec![p(0., 0., 1.), p(1., 0., 1.), p(1., 1., 1.), p(0., 1., 1.)],
            vec![p(0., 0., 0.), p(1., 0., 0.), p(1., 0., 1.), p(0., 0., 1.)],
            vec![p(0., 1., 0.), p(1., 1., 0.), p(1., 1., 1.), p(0., 1., 1.)],
            vec![p(0., 0., 0.), p(0., 1., 0.), p(0., 1., 1.), p(0., 0., 1.)],
            vec![p(1., 0., 0.), p(1., 1., 0.), p(1., 1., 1.), p(1., 0., 1.)],
        ])
    }

    fn build(source: &PolygonList, seed: u64) -> Solid {
        let mut rng = StdRng::seed_from_u64(seed);
        Solid::build(source, &mut rng).unwrap()
    }

    #[test]
    fn tetrahedron_deduplicates_to_four_corners() {
        // 4 faces x 3 points = 12 raw points, 4 distinct positions.
        let solid = build(&tetrahedron(), 3);
        assert_eq!(solid.corners().len(), 4);
        assert_eq!(solid.polygons().len(), 4);
    }

    #[test]
    fn noisy_points_stay_distinct() {
        let solid = build(
            &PolygonList::new(vec![
                vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(0.0, 1.0, 0.0),
                ],
                vec![
                    Point3::new(0.0, 0.0, 1e-15),
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(0.0, 1.0, 0.0),
                ],
            ]),
            3,
        );
        // The z-noise point does not merge with the origin corner.
        assert_eq!(solid.corners().len(), 4);
    }

    #[test]
    fn negative_zero_merges_with_zero() {
        let solid = build(
            &PolygonList::new(vec![
                vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(0.0, 1.0, 0.0),
                ],
                vec![
                    Point3::new(-0.0, 0.0, 0.0),
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(0.0, 0.0, 1.0),
                ],
            ]),
            3,
        );
        assert_eq!(solid.corners().len(), 4);
    }

    #[test]
    fn identifiers_are_unique_per_family() {
        let solid = build(&quad_cube(), 11);

        let corner_ids: HashSet<_> = solid.corners().iter().map(|c| c.id).collect();
        assert_eq!(corner_ids.len(), solid.corners().len());

        let polygon_ids: HashSet<_> = solid.polygons().iter().map(|p| p.id).collect();
        assert_eq!(polygon_ids.len(), solid.polygons().len());

        let edge_ids: HashSet<_> = solid.edges().iter().map(|e| e.id).collect();
        assert_eq!(edge_ids.len(), solid.edges().len());
    }

    #[test]
    fn tetrahedron_yields_six_unique_edges() {
        let solid = build(&tetrahedron(), 5);
        assert_eq!(solid.edges().len(), 6);

        let mut pairs = HashSet::new();
        for edge in solid.edges() {
            assert!(
                pairs.insert((edge.start, edge.end)) && !pairs.contains(&(edge.end, edge.start)),
                "duplicate edge {}-{}",
                edge.start,
                edge.end
            );
        }
    }

    #[test]
    fn quad_cube_connectivity() {
        // Quads connect consecutive corners only: no face diagonals.
        let solid = build(&quad_cube(), 5);
        assert_eq!(solid.corners().len(), 8);
        assert_eq!(solid.edges().len(), 12);
        for corner in solid.corners() {
            assert_eq!(corner.connections.len(), 3);
        }
    }

    #[test]
    fn angles_align_with_connections() {
        let solid = build(&tetrahedron(), 9);
        for corner in solid.corners() {
            assert_eq!(corner.angles.len(), corner.connections.len());
            for (i, target) in corner.connections.iter().enumerate() {
                let target_position = solid.corner(*target).unwrap().position;
                assert_eq!(
                    corner.angles[i],
                    rod_angles(&corner.position, &target_position)
                );
            }
        }
    }

    #[test]
    fn coplanar_pairs_found_for_split_square() {
        // A square split into two triangles with the same winding: the
        // normalized normals are bit-identical.
        let solid = build(
            &PolygonList::new(vec![
                vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.0, 0.0, 0.0),
                    Point3::new(1.0, 1.0, 0.0),
                ],
                vec![
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(1.0, 1.0, 0.0),
                    Point3::new(0.0, 1.0, 0.0),
                ],
            ]),
            2,
        );

        let pairs = solid.coplanar_pairs();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, solid.polygons()[1].id);
        assert_eq!(pairs[0].1, solid.polygons()[0].id);
    }

    #[test]
    fn coplanar_pairs_empty_for_tetrahedron() {
        assert!(build(&tetrahedron(), 2).coplanar_pairs().is_empty());
    }

    #[test]
    fn missing_corner_lookup_is_an_error() {
        let solid = build(&tetrahedron(), 2);
        let absent = CornerId(0);
        assert!(matches!(
            solid.corner(absent),
            Err(TopologyError::CornerNotFound(id)) if id == absent
        ));
    }

    #[test]
    fn trim_drops_leading_corners() {
        let mut solid = build(&quad_cube(), 8);
        let kept: Vec<_> = solid.corners()[1..5].iter().map(|c| c.id).collect();

        solid.trim_corner_range(1, 4);

        let remaining: Vec<_> = solid.corners().iter().map(|c| c.id).collect();
        assert_eq!(remaining, kept);
    }

    #[test]
    fn trim_with_zero_finish_keeps_tail() {
        let mut solid = build(&quad_cube(), 8);
        solid.trim_corner_range(1, 0);
        assert_eq!(solid.corners().len(), 7);
    }

    #[test]
    fn shuffle_preserves_part_sets() {
        let mut solid = build(&quad_cube(), 4);
        let corner_ids: HashSet<_> = solid.corners().iter().map(|c| c.id).collect();
        let edge_ids: HashSet<_> = solid.edges().iter().map(|e| e.id).collect();

        let mut rng = StdRng::seed_from_u64(99);
        solid.shuffle(&mut rng);

        assert_eq!(
            solid.corners().iter().map(|c| c.id).collect::<HashSet<_>>(),
            corner_ids
        );
        assert_eq!(
            solid.edges().iter().map(|e| e.id).collect::<HashSet<_>>(),
            edge_ids
        );
    }

    #[test]
    fn seeded_builds_are_identical() {
        let a = build(&quad_cube(), 77);
        let b = build(&quad_cube(), 77);

        let ids = |s: &Solid| {
            (
                s.corners().iter().map(|c| c.id).collect::<Vec<_>>(),
                s.polygons().iter().map(|p| p.id).collect::<Vec<_>>(),
                s.edges().iter().map(|e| e.id).collect::<Vec<_>>(),
            )
        };
        assert_eq!(ids(&a), ids(&b));
    }

    #[test]
    fn summary_line_lists_counts() {
        let solid = build(&tetrahedron(), 1);
        assert_eq!(solid.to_string(), "4 corners, 4 polygons, 6 edges.");
    }
}
