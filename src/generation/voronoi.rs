//! Voronoi cell construction from the Delaunay dual graph
//!
//! One builder pass asks the dual graph for every point's clipped cell polygon.
//! Unresolvable cells come back as `None` rather than an error; callers filter
//! them out when assembling final cells.

use crate::geometry::Polygon;

use super::delaunay::DualGraph;

/// Build one optional polygon per generator point
///
/// The output has exactly `graph.len()` entries, index-aligned with the
/// graph's points.
pub fn build_polygons(graph: &DualGraph) -> Vec<Option<Polygon>> {
    let polygons: Vec<Option<Polygon>> = (0..graph.len()).map(|i| graph.cell_polygon(i)).collect();

    let dropped = polygons.iter().filter(|p| p.is_none()).count();
    if dropped > 0 {
        tracing::debug!(
            dropped,
            points = graph.len(),
            "unresolvable cells dropped from builder pass"
        );
    }

    polygons
}
