//! Voronoi Cell Structure
//!
//! Per-cell descriptors consumed by the rendering layer: boundary polygon,
//! area centroid, an inscribed-circle estimate, and neighbor adjacency.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geometry::{
    convex_contains, distance_to_segment, is_convex, polygon_centroid, signed_area,
    sort_by_angle, Bounds, Point, Polygon,
};

/// Geometric descriptors of a single resolved polygon
///
/// Produced by [`CellShape::analyze`] once per final polygon and shared by the
/// cell itself and every neighbor snapshot that refers to it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CellShape {
    /// Boundary vertices, in the winding the Voronoi builder emitted
    pub points: Polygon,
    /// Area-weighted centroid of `points`
    pub centroid: Point,
    /// Minimum distance from the centroid to any boundary edge
    pub inner_circle_radius: f64,
}

impl CellShape {
    /// Compute centroid and inscribed-circle estimate for a resolved polygon
    ///
    /// Returns `None` when the polygon has zero area (centroid undefined).
    ///
    /// # Convexity
    ///
    /// The radius estimate walks edges between vertices re-sorted by polar angle
    /// around the centroid. That only reconstructs the true boundary of a convex
    /// polygon. Voronoi cells are convex, so this holds for every cell the
    /// builder emits; a non-convex input is reported with a warning and gets an
    /// estimate that may be wrong.
    pub fn analyze(points: Polygon) -> Option<Self> {
        let centroid = polygon_centroid(&points)?;

        if !is_convex(&points) {
            tracing::warn!(
                vertices = points.len(),
                "non-convex polygon passed to cell analysis; inner radius is approximate"
            );
        }

        let inner_circle_radius = inner_circle_radius(centroid, &points);
        Some(Self {
            points,
            centroid,
            inner_circle_radius,
        })
    }
}

/// Minimum distance from `centroid` to the edges of the angularly sorted ring
fn inner_circle_radius(centroid: Point, points: &[Point]) -> f64 {
    let sorted = sort_by_angle(centroid, points);
    let n = sorted.len();
    (0..n)
        .map(|i| distance_to_segment(centroid, sorted[i], sorted[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min)
}

/// A one-level copy of a neighboring cell
///
/// Snapshots carry a neighbor's geometry but never its own neighbor list, so the
/// adjacency data stays a tree of values rather than a cyclic graph.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CellSnapshot {
    /// Index of the neighbor in `Diagram::cells`
    pub id: usize,
    pub points: Polygon,
    pub centroid: Point,
    pub inner_circle_radius: f64,
}

impl CellSnapshot {
    /// Copy the geometry of a resolved shape under its arena index
    ///
    /// # Arguments
    ///
    /// * `id` - Index of the neighbor in `Diagram::cells`
    /// * `shape` - The neighbor's analyzed polygon
    pub fn new(id: usize, shape: &CellShape) -> Self {
        Self {
            id,
            points: shape.points.clone(),
            centroid: shape.centroid,
            inner_circle_radius: shape.inner_circle_radius,
        }
    }
}

/// A single cell of the tessellation
///
/// Cells live in an arena (`Diagram::cells`) indexed by `id`. Adjacency is
/// available both as arena indices (`neighbor_ids`) and as value snapshots
/// (`neighbors`) for renderers that want neighbor geometry at hand.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoronoiCell {
    /// Index of this cell in `Diagram::cells`
    pub id: usize,

    /// Generator point after relaxation
    pub site: Point,

    /// Boundary polygon, clipped to the diagram bounds
    pub points: Polygon,

    /// Area centroid of the boundary polygon
    pub centroid: Point,

    /// Approximate inscribed-circle radius (minimum centroid-to-edge distance)
    ///
    /// Used by renderers as a rough measure of usable interior space.
    pub inner_circle_radius: f64,

    /// Arena indices of adjacent cells, ascending
    pub neighbor_ids: Vec<usize>,

    /// Snapshots of adjacent cells, in the same order as `neighbor_ids`
    pub neighbors: Vec<CellSnapshot>,
}

impl VoronoiCell {
    /// Create a cell without adjacency; neighbors are attached afterwards
    ///
    /// # Arguments
    ///
    /// * `id` - Index of this cell in the arena
    /// * `site` - Generator point the cell belongs to
    /// * `shape` - Analyzed boundary polygon
    pub fn new(id: usize, site: Point, shape: CellShape) -> Self {
        Self {
            id,
            site,
            points: shape.points,
            centroid: shape.centroid,
            inner_circle_radius: shape.inner_circle_radius,
            neighbor_ids: Vec::new(),
            neighbors: Vec::new(),
        }
    }

    /// Number of cells sharing an edge with this one
    #[inline]
    pub fn neighbor_count(&self) -> usize {
        self.neighbor_ids.len()
    }

    /// Check if this cell shares an edge with another cell
    ///
    /// # Performance
    ///
    /// O(log k) binary search over the sorted `neighbor_ids`
    #[inline]
    pub fn is_neighbor_of(&self, other_cell_id: usize) -> bool {
        self.neighbor_ids.binary_search(&other_cell_id).is_ok()
    }

    /// Number of vertices in the cell polygon
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    /// Unsigned polygon area
    pub fn area(&self) -> f64 {
        signed_area(&self.points).abs()
    }

    /// Whether the boundary turns the same way at every vertex
    pub fn is_convex(&self) -> bool {
        is_convex(&self.points)
    }

    /// Whether `point` lies inside or on the boundary of this cell
    pub fn contains(&self, point: Point) -> bool {
        convex_contains(&self.points, point)
    }

    /// Push every edge outward along its normal by `amount`
    ///
    /// # Returns
    ///
    /// One vertex per input vertex, in the cell's winding order.
    ///
    /// Each output vertex is the start of an edge offset along that edge's
    /// normal, which is how marks are bled past the cell boundary. A negative
    /// amount shrinks the outline instead. Zero-length edges keep their vertex.
    pub fn dilated(&self, amount: f64) -> Polygon {
        let n = self.points.len();
        // Outward normal of a CCW edge is (dy, -dx); flip for CW rings.
        let outward = if signed_area(&self.points) >= 0.0 { 1.0 } else { -1.0 };
        (0..n)
            .map(|i| {
                let p0 = self.points[i];
                let p1 = self.points[(i + 1) % n];
                let edge = p1 - p0;
                let length = edge.length();
                if length == 0.0 {
                    return p0;
                }
                let normal = Point::new(edge.y, -edge.x) / length * outward;
                p0 + normal * amount
            })
            .collect()
    }

    /// Whether the centroid lies within `margin` of any side of `bounds`
    pub fn is_near_border(&self, bounds: &Bounds, margin: f64) -> bool {
        let c = self.centroid;
        c.x < margin || c.x > bounds.width - margin || c.y < margin || c.y > bounds.height - margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, side: f64) -> Polygon {
        vec![
            Point::new(x0, y0),
            Point::new(x0 + side, y0),
            Point::new(x0 + side, y0 + side),
            Point::new(x0, y0 + side),
        ]
    }

    #[test]
    fn test_analyze_square() {
        let shape = CellShape::analyze(square(0.0, 0.0, 2.0)).unwrap();
        assert!((shape.centroid - Point::new(1.0, 1.0)).length() < 1e-12);
        assert!((shape.inner_circle_radius - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_analyze_rectangle_uses_short_side() {
        let rect = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        let shape = CellShape::analyze(rect).unwrap();
        assert!((shape.inner_circle_radius - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_analyze_includes_closing_edge() {
        // After the angular sort the nearest edge is the one from the last
        // sorted vertex back to the first.
        let trapezoid = vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 1.0),
            Point::new(3.0, 3.0),
            Point::new(0.0, 4.0),
        ];
        let shape = CellShape::analyze(trapezoid).unwrap();
        assert!((shape.centroid - Point::new(4.0 / 3.0, 2.0)).length() < 1e-12);
        assert!((shape.inner_circle_radius - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_analyze_scrambled_vertex_order() {
        // Inconsistent input order still yields the square's true inner radius
        let scrambled = vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 0.0),
            Point::new(0.0, 2.0),
        ];
        let centroid = Point::new(1.0, 1.0);
        assert!((inner_circle_radius(centroid, &scrambled) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_analyze_zero_area() {
        let line = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)];
        assert!(CellShape::analyze(line).is_none());
    }

    #[test]
    fn test_cell_creation() {
        let shape = CellShape::analyze(square(0.0, 0.0, 1.0)).unwrap();
        let mut cell = VoronoiCell::new(0, Point::new(0.4, 0.6), shape.clone());
        cell.neighbor_ids = vec![1, 2, 3];
        cell.neighbors = cell.neighbor_ids.iter().map(|&id| CellSnapshot::new(id, &shape)).collect();

        assert_eq!(cell.id, 0);
        assert_eq!(cell.neighbor_count(), 3);
        assert_eq!(cell.vertex_count(), 4);
        assert!(cell.is_neighbor_of(2));
        assert!(!cell.is_neighbor_of(99));
        assert!((cell.area() - 1.0).abs() < 1e-12);
        assert!(cell.is_convex());
        assert!(cell.contains(Point::new(0.1, 0.9)));
        assert!(!cell.contains(Point::new(1.1, 0.5)));
    }

    #[test]
    fn test_dilated_grows_area() {
        let shape = CellShape::analyze(square(1.0, 1.0, 2.0)).unwrap();
        let cell = VoronoiCell::new(0, Point::new(2.0, 2.0), shape);

        let grown = cell.dilated(0.5);
        assert_eq!(grown.len(), 4);
        assert!(signed_area(&grown).abs() > cell.area());
        // First edge runs along y = 1, so its start moves straight down
        assert!((grown[0] - Point::new(1.0, 0.5)).length() < 1e-12);

        let reversed = VoronoiCell::new(
            1,
            Point::new(2.0, 2.0),
            CellShape::analyze(square(1.0, 1.0, 2.0).into_iter().rev().collect()).unwrap(),
        );
        assert!(signed_area(&reversed.dilated(0.5)).abs() > reversed.area());
    }

    #[test]
    fn test_is_near_border() {
        let bounds = Bounds::new(1.0, 1.0).unwrap();
        let inner = VoronoiCell::new(
            0,
            Point::new(0.5, 0.5),
            CellShape::analyze(square(0.4, 0.4, 0.2)).unwrap(),
        );
        let edge = VoronoiCell::new(
            1,
            Point::new(0.05, 0.5),
            CellShape::analyze(square(0.0, 0.4, 0.1)).unwrap(),
        );
        assert!(!inner.is_near_border(&bounds, 0.08));
        assert!(edge.is_near_border(&bounds, 0.08));
    }
}
